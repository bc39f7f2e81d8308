// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::Duration;

use alloy::primitives::TxHash;
use shielded_crypto::{DecryptionError, EncryptionError, KeyDerivationError};

/// JSON-RPC layer failure: connection refused, timeout, malformed
/// response envelope. Carries the method so logs can tell a failed
/// `eth_call` from a failed receipt poll.
#[derive(Debug, thiserror::Error)]
#[error("{method} request to the node failed")]
pub struct TransportError {
    pub method: &'static str,
    #[source]
    pub source: alloy::transports::TransportError,
}

impl TransportError {
    pub fn new(method: &'static str, source: alloy::transports::TransportError) -> Self {
        Self { method, source }
    }
}

/// Session key negotiation failed. Fatal for the operation: the caller
/// retries the whole operation with a fresh key or not at all.
#[derive(Debug, thiserror::Error)]
pub enum KeyExchangeError {
    #[error("could not reach the node for key exchange")]
    Rpc(#[from] TransportError),
    #[error("node returned malformed key material ({0} bytes, expected 32)")]
    MalformedKey(usize),
    #[error(transparent)]
    Derivation(#[from] KeyDerivationError),
}

#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("transaction request is missing fields required for signing: {0}")]
    Incomplete(String),
    #[error("signer could not produce a signature: {0}")]
    Signature(String),
}

/// Everything a shielded operation can fail with.
///
/// The variants are deliberately not collapsed: callers must be able to
/// tell "could not reach the node" from "could not decrypt the
/// response" from "the contract reverted" (the last one is not an error
/// at all - see [`shielded_crypto::CallResult::RevertSentinel`]).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("key exchange failed")]
    KeyExchange(#[from] KeyExchangeError),
    #[error("could not encrypt call data")]
    Encryption(#[from] EncryptionError),
    #[error("could not decrypt node response")]
    Decryption(#[from] DecryptionError),
    #[error("transport failure")]
    Transport(#[from] TransportError),
    #[error("signing failed")]
    Signing(#[from] SigningError),
    #[error("transaction {hash} still pending after {elapsed:?}")]
    Timeout { hash: TxHash, elapsed: Duration },
}
