// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use opera_bridge_core::DecodeError;

use crate::rpc::TransportError;

/// Errors returned by the bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node could not be reached or rejected the call
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// The reply did not have the expected scalar shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    /// The token registry could not provide the token list
    #[error("Token registry error: {0}")]
    Registry(String),
}
