// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Account-level view of an fMint position.

use std::fmt;

use serde::Serialize;

use crate::abi::CallSignature;
use crate::amount::TokenValue;
use crate::signatures::fmint;
use crate::ContractAddress;

/// Side of an fMint position a token balance is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Tokens locked as collateral.
    Collateral,
    /// Tokens minted against the collateral.
    Debt,
}

impl TokenKind {
    /// Selector of the minter getter returning a balance of this kind.
    #[must_use]
    pub const fn balance_signature(self) -> CallSignature {
        match self {
            Self::Collateral => fmint::COLLATERAL_BALANCE,
            Self::Debt => fmint::DEBT_BALANCE,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collateral => write!(f, "collateral"),
            Self::Debt => write!(f, "debt"),
        }
    }
}

/// Valuation snapshot of an fMint account, as of the moment it was read.
///
/// The snapshot is assembled in one go and is never partially populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountValuation {
    /// Owner of the position.
    pub owner: ContractAddress,
    /// Tokens eligible as collateral, in registry order.
    pub collateral_tokens: Vec<ContractAddress>,
    /// Tokens eligible as debt, in registry order.
    pub debt_tokens: Vec<ContractAddress>,
    /// Joined value of all collateral of the account.
    pub collateral_value: TokenValue,
    /// Joined value of all debt of the account.
    pub debt_value: TokenValue,
}
