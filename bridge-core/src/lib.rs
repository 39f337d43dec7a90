// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Types used for reading Opera smart contracts.
//!
//! Nothing in this crate performs I/O. It describes contract addresses, the
//! fixed catalogue of view-function selectors the bridge is allowed to call,
//! the word-aligned call encoding and the decoding of scalar replies, and
//! the tagged big-integer amounts the account valuation is built from.

#![deny(missing_docs)]
#![deny(clippy::all)]

pub mod abi;
pub mod account;
pub mod amount;
pub mod signatures;

mod address;
mod error;

pub use address::ContractAddress;
pub use error::DecodeError;

pub use num_bigint::BigUint;
