// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # Opera Bridge
//!
//! A read-only bridge from staking and fMint queries to view-calls against
//! Opera smart contracts.
//!
//! [`Bridge`] wires the pieces together from a [`Config`]: the node client,
//! the SFC constants accessor with its cached shard address, the fMint value
//! reader and the token registry. Every query is a sequence of awaited
//! view-calls; nothing is retried and nothing numeric is cached.

#![deny(missing_docs)]

mod account;
mod error;

pub mod config;
pub mod constants;
pub mod defi;
pub mod registry;
pub mod rpc;
pub mod shards;

use std::sync::Arc;

use opera_bridge_core::account::{AccountValuation, TokenKind};
use opera_bridge_core::amount::TokenValue;
use opera_bridge_core::signatures::fmint;
use opera_bridge_core::ContractAddress;

pub use account::account_valuation;
pub use config::Config;
pub use error::Error;
pub use opera_bridge_core as types;

use constants::SfcConstants;
use defi::FMint;
use registry::{OnChainTokenRegistry, StaticTokenRegistry, TokenRegistry};
use rpc::{RpcClient, TransportError, ViewCaller};
use shards::ContractLocator;

/// Entry point of all bridge queries.
#[derive(Debug)]
pub struct Bridge {
    caller: Arc<dyn ViewCaller>,
    constants: SfcConstants,
    fmint: FMint,
    registry: Arc<dyn TokenRegistry>,
}

impl Bridge {
    /// Connects to the node configured in `config`.
    pub fn connect(config: &Config) -> Result<Self, TransportError> {
        let node = &config.node;
        let client = RpcClient::new(node.url.clone(), node.request_timeout)?;
        Ok(Self::with_caller(config, Arc::new(client)))
    }

    /// Builds the bridge on top of an existing view-call executor.
    pub fn with_caller(config: &Config, caller: Arc<dyn ViewCaller>) -> Self {
        let ttl = config.cache.eviction;
        let defi = &config.defi;
        let provider = defi.address_provider;

        let constants =
            SfcConstants::new(caller.clone(), config.staking.sfc, ttl);

        let minter = ContractLocator::configured(
            defi.minter,
            &caller,
            provider,
            fmint::GET_FANTOM_MINT,
            ttl,
        );
        let oracle = ContractLocator::configured(
            defi.price_oracle,
            &caller,
            provider,
            fmint::GET_PRICE_ORACLE_PROXY,
            ttl,
        );
        let fmint = FMint::new(caller.clone(), minter, oracle);

        let registry: Arc<dyn TokenRegistry> = match &defi.tokens {
            Some(tokens) => Arc::new(StaticTokenRegistry::new(tokens.clone())),
            None => {
                let locator = ContractLocator::configured(
                    None,
                    &caller,
                    provider,
                    fmint::GET_TOKEN_REGISTRY,
                    ttl,
                );
                Arc::new(OnChainTokenRegistry::new(caller.clone(), locator))
            }
        };

        Self {
            caller,
            constants,
            fmint,
            registry,
        }
    }

    /// Replaces the token registry.
    pub fn with_registry(mut self, registry: Arc<dyn TokenRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The view-call executor shared by all readers.
    pub fn caller(&self) -> &Arc<dyn ViewCaller> {
        &self.caller
    }

    /// SFC protocol constants.
    pub fn constants(&self) -> &SfcConstants {
        &self.constants
    }

    /// fMint balances, prices and values.
    pub fn fmint(&self) -> &FMint {
        &self.fmint
    }

    /// The token registry in use.
    pub fn registry(&self) -> &Arc<dyn TokenRegistry> {
        &self.registry
    }

    /// Valuation snapshot of the fMint account of `owner`.
    pub async fn account_valuation(
        &self,
        owner: &ContractAddress,
    ) -> Result<AccountValuation, Error> {
        account_valuation(self.registry.as_ref(), &self.fmint, owner).await
    }

    /// Current value of the `owner` balance of `token`.
    pub async fn token_value(
        &self,
        owner: &ContractAddress,
        token: &ContractAddress,
        kind: TokenKind,
    ) -> Result<TokenValue, Error> {
        self.fmint.token_value(owner, token, kind).await
    }
}
