// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Arbitrary-precision token amounts tagged with their meaning.
//!
//! Balances, prices and values are all unsigned big integers on chain. The
//! kind parameter keeps them apart: the only arithmetic defined between kinds
//! is `TokenBalance * TokenPrice = TokenValue`.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Mul;

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

/// Marker for a token balance held by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance;

/// Marker for the unit price of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Price;

/// Marker for a balance valued at a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Value;

/// An unsigned big integer of kind `K`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Amount<K> {
    raw: BigUint,
    kind: PhantomData<K>,
}

/// Balance of a token, in the token's smallest unit.
pub type TokenBalance = Amount<Balance>;
/// Price of one smallest unit of a token in the reference currency.
pub type TokenPrice = Amount<Price>;
/// A token balance valued in the reference currency.
pub type TokenValue = Amount<Value>;

impl<K> Amount<K> {
    /// Tags a raw integer.
    #[must_use]
    pub fn new(raw: BigUint) -> Self {
        Self {
            raw,
            kind: PhantomData,
        }
    }

    /// The zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(BigUint::default())
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == BigUint::default()
    }

    /// The untagged integer.
    #[must_use]
    pub fn raw(&self) -> &BigUint {
        &self.raw
    }

    /// Drops the tag.
    #[must_use]
    pub fn into_raw(self) -> BigUint {
        self.raw
    }
}

impl<K> From<BigUint> for Amount<K> {
    fn from(raw: BigUint) -> Self {
        Self::new(raw)
    }
}

impl<K> From<u64> for Amount<K> {
    fn from(raw: u64) -> Self {
        Self::new(BigUint::from(raw))
    }
}

impl Mul<&TokenPrice> for &TokenBalance {
    type Output = TokenValue;

    fn mul(self, price: &TokenPrice) -> TokenValue {
        Amount::new(&self.raw * &price.raw)
    }
}

impl Mul<TokenPrice> for TokenBalance {
    type Output = TokenValue;

    fn mul(self, price: TokenPrice) -> TokenValue {
        &self * &price
    }
}

impl<K> fmt::Display for Amount<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

impl<K> fmt::Debug for Amount<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", std::any::type_name::<K>(), self.raw)
    }
}

// Serialized the way the node encodes big integers: `0x` prefixed,
// lowercase hex, no leading zeros.
impl<K> Serialize for Amount<K> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("0x{:x}", self.raw))
    }
}
