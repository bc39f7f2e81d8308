// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Cryptographic building blocks for shielded contract interaction.
//!
//! A shielded call encrypts its ABI-encoded call data before it leaves
//! the client and decrypts the node's response before the caller sees
//! it. This crate holds the pieces that are pure computation: per
//! operation session key derivation ([`SessionKey`]) and the envelope
//! codec ([`envelope`]) that seals call data and classifies node
//! responses.
//!
//! Network access (fetching the node's public key, dispatching the
//! envelope) lives in `shielded-client`.

mod envelope;
mod kdf;
mod session;

pub use envelope::{
    decrypt, encrypt, seal_response, CallResult, DecryptionError, EncryptionError, KEY_ID_LEN,
    NONCE_LEN, REVERT_SELECTOR,
};
pub use kdf::{derive_symmetric, KeyDerivationError, KEY_SIZE};
pub use session::SessionKey;
