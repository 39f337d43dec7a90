// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Sources of the tokens accepted by fMint as collateral and debt.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use opera_bridge_core::abi::{self, Word};
use opera_bridge_core::signatures::fmint;
use opera_bridge_core::ContractAddress;
use tracing::debug;

use crate::rpc::ViewCaller;
use crate::shards::ContractLocator;
use crate::Error;

/// Largest token list accepted from the on-chain registry.
pub const MAX_REGISTRY_TOKENS: u64 = 4096;

/// Provides the ordered list of known fMint tokens.
#[async_trait]
pub trait TokenRegistry: Send + Sync + Debug + 'static {
    /// The known tokens, in registry order.
    async fn tokens(&self) -> Result<Vec<ContractAddress>, Error>;
}

/// A fixed, configured token list.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenRegistry {
    tokens: Vec<ContractAddress>,
}

impl StaticTokenRegistry {
    /// Creates a registry serving `tokens` in the given order.
    pub fn new(tokens: Vec<ContractAddress>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenRegistry for StaticTokenRegistry {
    async fn tokens(&self) -> Result<Vec<ContractAddress>, Error> {
        Ok(self.tokens.clone())
    }
}

/// The fMint token registry contract.
///
/// Enumerates `tokens(i)` for every index below `tokensCount()`, which
/// must not exceed [`MAX_REGISTRY_TOKENS`].
#[derive(Debug)]
pub struct OnChainTokenRegistry {
    caller: Arc<dyn ViewCaller>,
    registry: ContractLocator,
}

impl OnChainTokenRegistry {
    /// Creates a reader of the registry contract.
    pub fn new(caller: Arc<dyn ViewCaller>, registry: ContractLocator) -> Self {
        Self { caller, registry }
    }
}

#[async_trait]
impl TokenRegistry for OnChainTokenRegistry {
    async fn tokens(&self) -> Result<Vec<ContractAddress>, Error> {
        let registry = self.registry.address().await;

        let payload = abi::encode_call(fmint::TOKENS_COUNT, &[]);
        let reply = self.caller.call(&registry, &payload).await?;
        let count = abi::decode_uint(&reply)?;
        let count = u64::try_from(count)
            .ok()
            .filter(|count| *count <= MAX_REGISTRY_TOKENS)
            .ok_or_else(|| {
                Error::Registry(format!(
                    "tokens count above {MAX_REGISTRY_TOKENS}"
                ))
            })?;
        debug!(%registry, count, "Loading fMint token list");

        let mut tokens = Vec::new();
        for index in 0..count {
            let payload = abi::encode_call(fmint::TOKENS, &[Word::from(index)]);
            let reply = self.caller.call(&registry, &payload).await?;
            tokens.push(abi::decode_address(&reply)?);
        }
        Ok(tokens)
    }
}
