// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::DecodeError;

/// A 20-byte identifier of an on-chain account or contract.
///
/// Equality is byte-wise. The textual form is `0x` followed by 40 lowercase
/// hex digits; parsing accepts upper and mixed case, with or without the
/// `0x` prefix.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractAddress([u8; ContractAddress::SIZE]);

impl ContractAddress {
    /// Number of bytes of an address.
    pub const SIZE: usize = 20;

    /// The all-zero address, served for contracts that were never resolved.
    pub const ZERO: Self = Self([0; Self::SIZE]);

    /// Wraps raw address bytes.
    #[must_use]
    pub const fn new(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds an address from a slice of exactly 20 bytes.
    ///
    /// # Errors
    /// Returns [`DecodeError::AddressLength`] for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let bytes: [u8; Self::SIZE] = bytes
            .try_into()
            .map_err(|_| DecodeError::AddressLength { found: bytes.len() })?;
        Ok(Self(bytes))
    }

    /// The raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// Whether this is the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; Self::SIZE]
    }
}

impl From<[u8; ContractAddress::SIZE]> for ContractAddress {
    fn from(bytes: [u8; ContractAddress::SIZE]) -> Self {
        Self(bytes)
    }
}

impl FromStr for ContractAddress {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for ContractAddress {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContractAddress {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e| {
            SerdeError::custom(format!("invalid address '{s}': {e}"))
        })
    }
}
