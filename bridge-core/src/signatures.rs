// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The fixed catalogue of view-functions the bridge calls.
//!
//! Every selector is the first four bytes of the keccak-256 hash of the
//! function signature noted next to it.

use crate::abi::CallSignature;

/// Selectors of the SFC staking contract and its constants shard.
pub mod sfc {
    use super::CallSignature;

    /// `constsAddress()`, returns the constants shard address.
    pub const CONSTS_ADDRESS: CallSignature =
        CallSignature::new([0xd4, 0x6f, 0xa5, 0x18]);
    /// `minSelfStake()`
    pub const MIN_SELF_STAKE: CallSignature =
        CallSignature::new([0xc5, 0xf5, 0x30, 0xaf]);
    /// `maxDelegatedRatio()`
    pub const MAX_DELEGATED_RATIO: CallSignature =
        CallSignature::new([0x22, 0x65, 0xf2, 0x84]);
    /// `validatorCommission()`
    pub const VALIDATOR_COMMISSION: CallSignature =
        CallSignature::new([0xa7, 0x78, 0x65, 0x15]);
    /// `burntFeeShare()`
    pub const BURNT_FEE_SHARE: CallSignature =
        CallSignature::new([0xc7, 0x4d, 0xd6, 0x21]);
    /// `treasuryFeeShare()`
    pub const TREASURY_FEE_SHARE: CallSignature =
        CallSignature::new([0x94, 0xc3, 0xe9, 0x14]);
    /// `unlockedRewardRatio()`
    pub const UNLOCKED_REWARD_RATIO: CallSignature =
        CallSignature::new([0x5e, 0x23, 0x08, 0xd2]);
    /// `minLockupDuration()`
    pub const MIN_LOCKUP_DURATION: CallSignature =
        CallSignature::new([0x0d, 0x7b, 0x26, 0x09]);
    /// `maxLockupDuration()`
    pub const MAX_LOCKUP_DURATION: CallSignature =
        CallSignature::new([0x0d, 0x49, 0x55, 0xe3]);
    /// `withdrawalPeriodEpochs()`
    pub const WITHDRAWAL_PERIOD_EPOCHS: CallSignature =
        CallSignature::new([0x65, 0x0a, 0xcd, 0x66]);
    /// `withdrawalPeriodTime()`
    pub const WITHDRAWAL_PERIOD_TIME: CallSignature =
        CallSignature::new([0xb8, 0x2b, 0x84, 0x27]);
    /// `baseRewardPerSecond()`
    pub const BASE_REWARD_PER_SECOND: CallSignature =
        CallSignature::new([0xd9, 0xa7, 0xc1, 0xf9]);
    /// `targetGasPowerPerSecond()`
    pub const TARGET_GAS_POWER_PER_SECOND: CallSignature =
        CallSignature::new([0x3a, 0x3e, 0xf6, 0x6c]);
}

/// Selectors of the fMint address provider, minter, price oracle and token
/// registry contracts.
pub mod fmint {
    use super::CallSignature;

    /// `getFantomMint()`, returns the minter (accounting) contract.
    pub const GET_FANTOM_MINT: CallSignature =
        CallSignature::new([0x44, 0x96, 0x97, 0x11]);
    /// `getPriceOracleProxy()`, returns the price oracle contract.
    pub const GET_PRICE_ORACLE_PROXY: CallSignature =
        CallSignature::new([0x04, 0x5b, 0xb7, 0xf8]);
    /// `getTokenRegistry()`, returns the token registry contract.
    pub const GET_TOKEN_REGISTRY: CallSignature =
        CallSignature::new([0x05, 0x78, 0x38, 0xbd]);

    /// `collateralBalance(address owner, address token)`
    pub const COLLATERAL_BALANCE: CallSignature =
        CallSignature::new([0xe7, 0x60, 0x2b, 0x9d]);
    /// `debtBalance(address owner, address token)`
    pub const DEBT_BALANCE: CallSignature =
        CallSignature::new([0xad, 0x8f, 0x24, 0x0e]);
    /// `collateralValueOf(address owner)`
    pub const COLLATERAL_VALUE_OF: CallSignature =
        CallSignature::new([0x3a, 0x65, 0xa3, 0x50]);
    /// `debtValueOf(address owner)`
    pub const DEBT_VALUE_OF: CallSignature =
        CallSignature::new([0x2f, 0x57, 0x39, 0x10]);

    /// `getPrice(address token)`
    pub const GET_PRICE: CallSignature =
        CallSignature::new([0x41, 0x97, 0x6e, 0x09]);

    /// `tokensCount()`
    pub const TOKENS_COUNT: CallSignature =
        CallSignature::new([0xa6, 0x4e, 0xd8, 0xba]);
    /// `tokens(uint256 index)`
    pub const TOKENS: CallSignature =
        CallSignature::new([0x4f, 0x64, 0xb2, 0xbe]);
}

/// Protocol constants published by the SFC constants shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfcConstant {
    /// Minimum self-stake of a validator, in WEI.
    MinSelfStake,
    /// Maximum ratio of delegations to self-stake.
    MaxDelegatedRatio,
    /// Share of delegation rewards taken by the validator.
    ValidatorCommission,
    /// Share of fees that is burnt.
    BurntFeeShare,
    /// Share of fees transferred to the treasury.
    TreasuryFeeShare,
    /// Reward rate ratio of an unlocked stake.
    UnlockedRewardRatio,
    /// Minimum lockup duration, in seconds.
    MinLockupDuration,
    /// Maximum lockup duration, in seconds.
    MaxLockupDuration,
    /// Number of epochs undelegated stake stays locked.
    WithdrawalPeriodEpochs,
    /// Number of seconds undelegated stake stays locked.
    WithdrawalPeriodTime,
    /// Base staking reward paid per second.
    BaseRewardPerSecond,
    /// Target network gas power per second.
    TargetGasPowerPerSecond,
}

impl SfcConstant {
    /// Every constant, in catalogue order.
    pub const ALL: [Self; 12] = [
        Self::MinSelfStake,
        Self::MaxDelegatedRatio,
        Self::ValidatorCommission,
        Self::BurntFeeShare,
        Self::TreasuryFeeShare,
        Self::UnlockedRewardRatio,
        Self::MinLockupDuration,
        Self::MaxLockupDuration,
        Self::WithdrawalPeriodEpochs,
        Self::WithdrawalPeriodTime,
        Self::BaseRewardPerSecond,
        Self::TargetGasPowerPerSecond,
    ];

    /// Selector of the getter for this constant.
    #[must_use]
    pub const fn signature(self) -> CallSignature {
        match self {
            Self::MinSelfStake => sfc::MIN_SELF_STAKE,
            Self::MaxDelegatedRatio => sfc::MAX_DELEGATED_RATIO,
            Self::ValidatorCommission => sfc::VALIDATOR_COMMISSION,
            Self::BurntFeeShare => sfc::BURNT_FEE_SHARE,
            Self::TreasuryFeeShare => sfc::TREASURY_FEE_SHARE,
            Self::UnlockedRewardRatio => sfc::UNLOCKED_REWARD_RATIO,
            Self::MinLockupDuration => sfc::MIN_LOCKUP_DURATION,
            Self::MaxLockupDuration => sfc::MAX_LOCKUP_DURATION,
            Self::WithdrawalPeriodEpochs => sfc::WITHDRAWAL_PERIOD_EPOCHS,
            Self::WithdrawalPeriodTime => sfc::WITHDRAWAL_PERIOD_TIME,
            Self::BaseRewardPerSecond => sfc::BASE_REWARD_PER_SECOND,
            Self::TargetGasPowerPerSecond => sfc::TARGET_GAS_POWER_PER_SECOND,
        }
    }

    /// Name of the contract getter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinSelfStake => "minSelfStake",
            Self::MaxDelegatedRatio => "maxDelegatedRatio",
            Self::ValidatorCommission => "validatorCommission",
            Self::BurntFeeShare => "burntFeeShare",
            Self::TreasuryFeeShare => "treasuryFeeShare",
            Self::UnlockedRewardRatio => "unlockedRewardRatio",
            Self::MinLockupDuration => "minLockupDuration",
            Self::MaxLockupDuration => "maxLockupDuration",
            Self::WithdrawalPeriodEpochs => "withdrawalPeriodEpochs",
            Self::WithdrawalPeriodTime => "withdrawalPeriodTime",
            Self::BaseRewardPerSecond => "baseRewardPerSecond",
            Self::TargetGasPowerPerSecond => "targetGasPowerPerSecond",
        }
    }
}
