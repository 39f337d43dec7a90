// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # Derived contract addresses
//!
//! Some contracts are only reachable through a locator function on another
//! contract: the SFC publishes its constants shard through
//! `constsAddress()`, the fMint address provider publishes the minter,
//! price oracle and token registry. [`ShardResolver`] caches such an address
//! for a fixed lifetime and refreshes it lazily.
//!
//! Refreshing is best effort. A failed locator call keeps serving the last
//! known address (or the zero address if none was ever resolved) so that
//! dependent reads keep working through transient node issues. The next
//! attempt waits for a full lifetime, as after a successful one.

use std::sync::Arc;
use std::time::Duration;

use opera_bridge_core::abi::{self, CallSignature};
use opera_bridge_core::ContractAddress;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::rpc::ViewCaller;
use crate::Error;

/// Longest lifetime a derived address may be cached for.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct ShardEntry {
    /// Last address actually located, if any.
    address: Option<ContractAddress>,
    expires_at: Instant,
}

impl ShardEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at > now
    }

    fn address_or_zero(&self) -> ContractAddress {
        self.address.unwrap_or(ContractAddress::ZERO)
    }
}

/// Time-bounded cache of an address obtained through a locator call.
///
/// All resolutions of one instance are serialized: the cache is read and,
/// if expired, refreshed while holding a single lock. Concurrent callers
/// either take the cached address or wait for the one refresh in flight.
///
/// Every refresh attempt, failed or not, starts a new lifetime, so there is
/// at most one locator call per lifetime.
#[derive(Debug)]
pub struct ShardResolver {
    caller: Arc<dyn ViewCaller>,
    primary: ContractAddress,
    locator: CallSignature,
    ttl: Duration,
    entry: Mutex<Option<ShardEntry>>,
}

impl ShardResolver {
    /// Creates a resolver asking `primary` for the address returned by the
    /// `locator` function, caching each answer for `ttl`.
    pub fn new(
        caller: Arc<dyn ViewCaller>,
        primary: ContractAddress,
        locator: CallSignature,
        ttl: Duration,
    ) -> Self {
        Self {
            caller,
            primary,
            locator,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// The contract the locator function is called on.
    pub fn primary(&self) -> ContractAddress {
        self.primary
    }

    /// Returns the derived address, refreshing it first if the cached entry
    /// is missing or expired.
    ///
    /// Never fails: when the refresh does not succeed the previous address
    /// is returned, or [`ContractAddress::ZERO`] if there is none, and that
    /// answer is kept for a whole lifetime before the next attempt.
    pub async fn resolve(&self) -> ContractAddress {
        let mut entry = self.entry.lock().await;

        let previous = *entry;
        let now = Instant::now();
        if let Some(cached) = previous.filter(|e| e.is_fresh(now)) {
            return cached.address_or_zero();
        }

        debug!(
            primary = %self.primary,
            locator = ?self.locator,
            "Refreshing derived contract address"
        );
        let known = previous.and_then(|e| e.address);
        let located = self.locate().await;
        let expires_at = self.expiry(Instant::now());

        let address = match located {
            Ok(address) => {
                if known != Some(address) {
                    info!(
                        primary = %self.primary,
                        %address,
                        "Derived contract address updated"
                    );
                }
                Some(address)
            }
            Err(err) => {
                let stale = known.unwrap_or(ContractAddress::ZERO);
                warn!(
                    primary = %self.primary,
                    %stale,
                    retry_in = ?self.ttl,
                    "Cannot refresh derived contract address: {err}"
                );
                known
            }
        };

        let refreshed = ShardEntry {
            address,
            expires_at,
        };
        *entry = Some(refreshed);
        refreshed.address_or_zero()
    }

    /// The last located address without triggering a refresh, fresh or not.
    ///
    /// `None` until a locator call has succeeded.
    pub async fn cached(&self) -> Option<ContractAddress> {
        let entry = *self.entry.lock().await;
        entry.and_then(|e| e.address)
    }

    fn expiry(&self, now: Instant) -> Instant {
        now.checked_add(self.ttl.min(MAX_TTL)).unwrap_or(now)
    }

    async fn locate(&self) -> Result<ContractAddress, Error> {
        let payload = abi::encode_call(self.locator, &[]);
        let reply = self.caller.call(&self.primary, &payload).await?;
        Ok(abi::decode_address(&reply)?)
    }
}

/// Where a contract address comes from.
#[derive(Debug)]
pub enum ContractLocator {
    /// A fixed, configured address.
    Static(ContractAddress),
    /// An address derived through a locator call.
    Derived(ShardResolver),
}

impl ContractLocator {
    /// Uses `fixed` when configured, otherwise locates the address through
    /// `provider`.
    pub fn configured(
        fixed: Option<ContractAddress>,
        caller: &Arc<dyn ViewCaller>,
        provider: ContractAddress,
        locator: CallSignature,
        ttl: Duration,
    ) -> Self {
        match fixed {
            Some(address) => Self::Static(address),
            None => Self::Derived(ShardResolver::new(
                caller.clone(),
                provider,
                locator,
                ttl,
            )),
        }
    }

    /// The current address of the contract.
    pub async fn address(&self) -> ContractAddress {
        match self {
            Self::Static(address) => *address,
            Self::Derived(resolver) => resolver.resolve().await,
        }
    }
}
