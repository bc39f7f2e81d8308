// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Shielded contract-interaction client.
//!
//! On a confidentiality-preserving EVM chain the `data` field of every
//! call and transaction must be encrypted with a key negotiated with
//! the serving node, and every read response must be decrypted before
//! the caller can ABI-decode it. [`ShieldedRpcClient`] owns that flow:
//!
//! 1. negotiate a single-use session key with the node,
//! 2. seal the ABI-encoded call data into an envelope,
//! 3. dispatch the envelope over the standard `eth_call` /
//!    `eth_sendRawTransaction` path,
//! 4. for reads, classify the response: decrypt it, or pass through
//!    the node's plaintext `Error(string)` revert payload untouched.
//!
//! Writes return a [`TransactionHandle`]; [`await_completion`] polls
//! the receipt on the caller's budget. Nothing in this crate retries:
//! every failure crosses the boundary carrying its cause, and a retried
//! operation always negotiates a fresh key.

mod abi;
mod client;
mod error;
mod key_exchange;
mod lifecycle;
mod request;
mod signer;
mod transport;

pub use abi::{decode_revert_reason, CallResultExt};
pub use client::ShieldedRpcClient;
pub use error::{ClientError, KeyExchangeError, SigningError, TransportError};
pub use key_exchange::negotiate;
pub use lifecycle::{await_completion, TransactionHandle, TxOutcome, DEFAULT_POLL_INTERVAL};
pub use request::CallRequest;
pub use signer::{LocalWallet, TransactionSigner};
pub use transport::{HttpNode, ShieldedNode};

pub use shielded_crypto::{CallResult, SessionKey};
