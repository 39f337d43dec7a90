// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Word-aligned call encoding and scalar reply decoding.
//!
//! A view-call payload is a 4-byte [`CallSignature`] followed by zero or
//! more 32-byte argument [`Word`]s. Scalar replies are single words with the
//! value right-aligned: an address occupies the last 20 bytes, an unsigned
//! integer is big-endian over the whole word.

use std::fmt;

use num_bigint::BigUint;

use crate::{ContractAddress, DecodeError};

/// Size in bytes of an argument or reply word.
pub const WORD_SIZE: usize = 32;

/// Offset of an address inside a left-padded word.
const ADDRESS_OFFSET: usize = WORD_SIZE - ContractAddress::SIZE;

/// The 4-byte selector of a contract view-function.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSignature([u8; 4]);

impl CallSignature {
    /// Wraps a selector.
    #[must_use]
    pub const fn new(selector: [u8; 4]) -> Self {
        Self(selector)
    }

    /// The selector bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Debug for CallSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A single 32-byte argument or reply word.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_SIZE]);

impl Word {
    /// Wraps raw word bytes.
    #[must_use]
    pub const fn new(bytes: [u8; WORD_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw word bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; WORD_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<&ContractAddress> for Word {
    fn from(address: &ContractAddress) -> Self {
        let mut word = [0u8; WORD_SIZE];
        word[ADDRESS_OFFSET..].copy_from_slice(address.as_bytes());
        Self(word)
    }
}

impl From<ContractAddress> for Word {
    fn from(address: ContractAddress) -> Self {
        Self::from(&address)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - 8..].copy_from_slice(&value.to_be_bytes());
        Self(word)
    }
}

/// Builds a view-call payload: the selector followed by the argument words.
#[must_use]
pub fn encode_call(signature: CallSignature, args: &[Word]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(4 + args.len() * WORD_SIZE);
    payload.extend_from_slice(&signature.to_bytes());
    for arg in args {
        payload.extend_from_slice(arg.as_bytes());
    }
    payload
}

/// Reads the first word of a reply.
///
/// # Errors
/// Returns [`DecodeError::ShortWord`] if fewer than 32 bytes are available.
pub fn decode_word(data: &[u8]) -> Result<Word, DecodeError> {
    let word: [u8; WORD_SIZE] = data
        .get(..WORD_SIZE)
        .and_then(|w| w.try_into().ok())
        .ok_or(DecodeError::ShortWord { found: data.len() })?;
    Ok(Word(word))
}

/// Decodes an address padded to word width.
///
/// The 12 leading padding bytes are skipped and the tail of the first word is
/// returned. Trailing data beyond the first word is ignored.
///
/// # Errors
/// Returns [`DecodeError::ShortWord`] if fewer than 32 bytes are available;
/// short replies are never indexed into.
pub fn decode_address(data: &[u8]) -> Result<ContractAddress, DecodeError> {
    let word = decode_word(data)?;
    ContractAddress::from_slice(&word.as_bytes()[ADDRESS_OFFSET..])
}

/// Decodes a big-endian unsigned integer reply.
///
/// An empty reply decodes to zero, which is what a node answers for calls to
/// an address without code.
///
/// # Errors
/// Returns [`DecodeError::UnexpectedLength`] unless the reply is empty or
/// exactly one 32-byte word.
pub fn decode_uint(data: &[u8]) -> Result<BigUint, DecodeError> {
    match data.len() {
        0 => Ok(BigUint::default()),
        WORD_SIZE => Ok(BigUint::from_bytes_be(data)),
        found => Err(DecodeError::UnexpectedLength { found }),
    }
}

/// Encodes an unsigned integer as a word, if it fits in 256 bits.
#[must_use]
pub fn encode_uint(value: &BigUint) -> Option<Word> {
    let bytes = value.to_bytes_be();
    if bytes.len() > WORD_SIZE {
        return None;
    }
    let mut word = [0u8; WORD_SIZE];
    if *value != BigUint::default() {
        word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    }
    Some(Word(word))
}
