// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Protocol constants of the SFC staking contract.
//!
//! The constants live on a shard contract whose address the SFC publishes.
//! Every getter resolves the shard, calls it and decodes the reply. Values
//! are never cached and errors are returned as they are: these reads are
//! the source of truth, unlike the best-effort shard address.

use std::sync::Arc;
use std::time::Duration;

use opera_bridge_core::abi;
use opera_bridge_core::signatures::{sfc, SfcConstant};
use opera_bridge_core::{BigUint, ContractAddress};
use tracing::debug;

use crate::rpc::ViewCaller;
use crate::shards::ShardResolver;
use crate::Error;

/// Accessor of the SFC constants shard.
#[derive(Debug)]
pub struct SfcConstants {
    caller: Arc<dyn ViewCaller>,
    shard: ShardResolver,
}

impl SfcConstants {
    /// Creates an accessor for the SFC contract at `contract`, caching the
    /// shard address for `ttl`.
    pub fn new(
        caller: Arc<dyn ViewCaller>,
        contract: ContractAddress,
        ttl: Duration,
    ) -> Self {
        let shard = ShardResolver::new(
            caller.clone(),
            contract,
            sfc::CONSTS_ADDRESS,
            ttl,
        );
        Self { caller, shard }
    }

    /// The resolver of the constants shard address.
    pub fn shard(&self) -> &ShardResolver {
        &self.shard
    }

    /// Reads a single constant from the shard.
    pub async fn constant(
        &self,
        constant: SfcConstant,
    ) -> Result<BigUint, Error> {
        let shard = self.shard.resolve().await;
        let payload = abi::encode_call(constant.signature(), &[]);

        let reply = self.caller.call(&shard, &payload).await?;
        let value = abi::decode_uint(&reply)?;

        debug!(%shard, constant = constant.name(), %value, "SFC constant");
        Ok(value)
    }

    /// Minimum self-stake of a validator, in WEI (e.g. 500 000 FTM).
    pub async fn min_self_stake(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::MinSelfStake).await
    }

    /// Maximum ratio of delegations to self-stake a validator may accept.
    pub async fn max_delegated_ratio(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::MaxDelegatedRatio).await
    }

    /// Share of delegation rewards taken by the validator.
    pub async fn validator_commission(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::ValidatorCommission).await
    }

    /// Share of fees that is burnt.
    pub async fn burnt_fee_share(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::BurntFeeShare).await
    }

    /// Share of fees that goes to the treasury.
    pub async fn treasury_fee_share(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::TreasuryFeeShare).await
    }

    /// Ratio of the base reward rate paid to an unlocked stake.
    pub async fn unlocked_reward_ratio(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::UnlockedRewardRatio).await
    }

    /// Minimum lockup duration of a stake, in seconds.
    pub async fn min_lockup_duration(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::MinLockupDuration).await
    }

    /// Maximum lockup duration of a stake, in seconds.
    pub async fn max_lockup_duration(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::MaxLockupDuration).await
    }

    /// Number of epochs undelegated stake stays locked.
    pub async fn withdrawal_period_epochs(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::WithdrawalPeriodEpochs).await
    }

    /// Number of seconds undelegated stake stays locked.
    pub async fn withdrawal_period_time(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::WithdrawalPeriodTime).await
    }

    /// Base staking reward distributed per second.
    pub async fn base_reward_per_second(&self) -> Result<BigUint, Error> {
        self.constant(SfcConstant::BaseRewardPerSecond).await
    }

    /// Target network gas power per second.
    pub async fn target_gas_power_per_second(
        &self,
    ) -> Result<BigUint, Error> {
        self.constant(SfcConstant::TargetGasPowerPerSecond).await
    }
}
