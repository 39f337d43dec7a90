// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use thiserror::Error;

/// Errors raised while interpreting raw contract replies or textual
/// addresses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The reply is shorter than a single 32-byte word.
    #[error("Reply too short for a 32-byte word: found {found} bytes")]
    ShortWord {
        /// Number of bytes received.
        found: usize,
    },
    /// The reply is neither empty nor exactly one 32-byte word.
    #[error(
        "Expected an empty reply or a single 32-byte word, found {found} bytes"
    )]
    UnexpectedLength {
        /// Number of bytes received.
        found: usize,
    },
    /// An address does not have exactly 20 bytes.
    #[error("Address must be 20 bytes long, found {found}")]
    AddressLength {
        /// Number of bytes received.
        found: usize,
    },
    /// Hex text could not be decoded.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
