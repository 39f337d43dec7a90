// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # fMint token values
//!
//! Balances are read from the fMint minter (the accounting contract), unit
//! prices from the price oracle. A token value is the exact product of the
//! two. Account totals are not summed here: the minter exposes the joined
//! collateral and debt values of an account directly.

use std::sync::Arc;

use opera_bridge_core::abi::{self, CallSignature, Word};
use opera_bridge_core::account::TokenKind;
use opera_bridge_core::amount::{TokenBalance, TokenPrice, TokenValue};
use opera_bridge_core::signatures::fmint;
use opera_bridge_core::{BigUint, ContractAddress};
use tracing::{debug, error};

use crate::rpc::ViewCaller;
use crate::shards::ContractLocator;
use crate::Error;

/// A value read on a best-effort basis.
///
/// When the read fails the value falls back to its default (zero for
/// amounts) and the failure is kept alongside, so display code can show the
/// fallback while strict callers can still refuse it.
#[derive(Debug)]
pub struct Observed<T> {
    value: T,
    failure: Option<Error>,
}

impl<T> Observed<T> {
    fn complete(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    fn unavailable(failure: Error) -> Self
    where
        T: Default,
    {
        Self {
            value: T::default(),
            failure: Some(failure),
        }
    }

    /// The value read, or the fallback if the read failed.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Why the value is a fallback, if it is one.
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Whether the value was actually read.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Splits into the value (possibly a fallback) and the failure.
    pub fn into_parts(self) -> (T, Option<Error>) {
        (self.value, self.failure)
    }

    /// The value if it was read, the failure otherwise.
    pub fn into_result(self) -> Result<T, Error> {
        match self.failure {
            None => Ok(self.value),
            Some(failure) => Err(failure),
        }
    }
}

/// Reader of fMint balances, prices and values.
#[derive(Debug)]
pub struct FMint {
    caller: Arc<dyn ViewCaller>,
    minter: ContractLocator,
    oracle: ContractLocator,
}

impl FMint {
    /// Creates a reader using the given minter and price oracle contracts.
    pub fn new(
        caller: Arc<dyn ViewCaller>,
        minter: ContractLocator,
        oracle: ContractLocator,
    ) -> Self {
        Self {
            caller,
            minter,
            oracle,
        }
    }

    /// Balance of `token` held by `owner` on the given side of the position.
    ///
    /// A failed read yields a zero balance together with the failure.
    pub async fn token_balance(
        &self,
        owner: &ContractAddress,
        token: &ContractAddress,
        kind: TokenKind,
    ) -> Observed<TokenBalance> {
        let args = [Word::from(owner), Word::from(token)];
        match self
            .read(&self.minter, kind.balance_signature(), &args)
            .await
        {
            Ok(balance) => Observed::complete(TokenBalance::new(balance)),
            Err(err) => {
                debug!(
                    %owner,
                    %token,
                    %kind,
                    "Token balance not available: {err}"
                );
                Observed::unavailable(err)
            }
        }
    }

    /// Unit price of `token` published by the price oracle.
    ///
    /// A zero price means the oracle does not know the token; it is not an
    /// error.
    pub async fn token_price(
        &self,
        token: &ContractAddress,
    ) -> Result<TokenPrice, Error> {
        let price = self
            .read(&self.oracle, fmint::GET_PRICE, &[Word::from(token)])
            .await
            .inspect_err(|err| {
                error!(%token, "Price not available: {err}");
            })?;

        let price = TokenPrice::new(price);
        if price.is_zero() {
            debug!(%token, "Token has no price");
        }
        Ok(price)
    }

    /// Current value of the `owner` balance of `token`, i.e. balance times
    /// unit price.
    ///
    /// Unlike [`Self::token_balance`] this is strict: the first failure of
    /// either read is returned and no partial value is produced.
    pub async fn token_value(
        &self,
        owner: &ContractAddress,
        token: &ContractAddress,
        kind: TokenKind,
    ) -> Result<TokenValue, Error> {
        let balance = self
            .token_balance(owner, token, kind)
            .await
            .into_result()
            .inspect_err(|err| {
                error!(%owner, %token, "Token balance unknown: {err}");
            })?;
        let price = self.token_price(token).await?;

        Ok(&balance * &price)
    }

    /// Joined collateral and debt values of `owner`, as computed by the
    /// minter.
    ///
    /// Both reads must succeed; there is no partial result.
    pub async fn account_totals(
        &self,
        owner: &ContractAddress,
    ) -> Result<(TokenValue, TokenValue), Error> {
        let args = [Word::from(owner)];

        let collateral = self
            .read(&self.minter, fmint::COLLATERAL_VALUE_OF, &args)
            .await
            .inspect_err(|err| {
                error!(%owner, "Joined collateral value not available: {err}");
            })?;
        let debt = self
            .read(&self.minter, fmint::DEBT_VALUE_OF, &args)
            .await
            .inspect_err(|err| {
                error!(%owner, "Joined debt value not available: {err}");
            })?;

        Ok((TokenValue::new(collateral), TokenValue::new(debt)))
    }

    async fn read(
        &self,
        contract: &ContractLocator,
        signature: CallSignature,
        args: &[Word],
    ) -> Result<BigUint, Error> {
        let address = contract.address().await;
        let payload = abi::encode_call(signature, args);
        let reply = self.caller.call(&address, &payload).await?;
        Ok(abi::decode_uint(&reply)?)
    }
}
