// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use opera_bridge_core::account::AccountValuation;
use opera_bridge_core::ContractAddress;
use tracing::error;

use crate::defi::FMint;
use crate::registry::TokenRegistry;
use crate::Error;

/// Assembles the valuation snapshot of an fMint account.
///
/// The token list is loaded first, then the joined values. Any failure
/// aborts the whole snapshot.
///
/// Debt-eligible tokens are the collateral-eligible ones: there is no
/// separate debt registry.
pub async fn account_valuation(
    registry: &dyn TokenRegistry,
    fmint: &FMint,
    owner: &ContractAddress,
) -> Result<AccountValuation, Error> {
    let collateral_tokens = registry.tokens().await.inspect_err(|err| {
        error!(%owner, "Collateral tokens list loader failed: {err}");
    })?;
    let debt_tokens = collateral_tokens.clone();

    let (collateral_value, debt_value) =
        fmint.account_totals(owner).await.inspect_err(|err| {
            error!(%owner, "Cannot pull account tokens value: {err}");
        })?;

    Ok(AccountValuation {
        owner: *owner,
        collateral_tokens,
        debt_tokens,
        collateral_value,
        debt_value,
    })
}
