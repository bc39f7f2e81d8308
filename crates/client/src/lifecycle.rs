// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::{Duration, Instant};

use alloy::{network::ReceiptResponse, primitives::TxHash, rpc::types::TransactionReceipt};
use tokio::time::sleep;
use tracing::debug;

use crate::{error::ClientError, transport::ShieldedNode};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A submitted shielded transaction. The handle itself never changes:
/// the terminal state comes back as a [`TxOutcome`] from
/// [`await_completion`], and an abandoned wait can simply be retried
/// with the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionHandle {
    hash: TxHash,
    submitted_at: Instant,
}

impl TransactionHandle {
    /// Wrap a transaction hash in a fresh handle. Normally produced by
    /// `shielded_send`, but a caller holding a hash from an earlier
    /// session can build one to resume awaiting.
    pub fn new(hash: TxHash) -> Self {
        Self {
            hash,
            submitted_at: Instant::now(),
        }
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn submitted_at(&self) -> Instant {
        self.submitted_at
    }
}

/// Terminal state of a submitted transaction.
#[derive(Debug, Clone)]
pub enum TxOutcome {
    Mined(Box<TransactionReceipt>),
    Failed {
        reason: String,
        receipt: Box<TransactionReceipt>,
    },
}

/// Poll the node for `handle`'s receipt until it reaches a terminal
/// state or `timeout` elapses.
///
/// Caller-driven: polling cadence and budget are the caller's choice,
/// and dropping the future stops polling without affecting the
/// transaction - it may still be mined later, and the wait may be
/// retried against the same handle (never resubmitted). A zero budget
/// performs exactly one receipt probe, so an already-mined transaction
/// still resolves.
pub async fn await_completion<T: ShieldedNode + ?Sized>(
    node: &T,
    handle: &TransactionHandle,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<TxOutcome, ClientError> {
    let started = Instant::now();

    loop {
        if let Some(receipt) = node.transaction_receipt(handle.hash()).await? {
            return Ok(if receipt.status() {
                debug!(hash = %handle.hash(), block = ?receipt.block_number(), "transaction mined");
                TxOutcome::Mined(Box::new(receipt))
            } else {
                TxOutcome::Failed {
                    reason: "transaction reverted on-chain".to_string(),
                    receipt: Box::new(receipt),
                }
            });
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Err(ClientError::Timeout {
                hash: handle.hash(),
                elapsed,
            });
        }

        sleep(poll_interval.min(timeout - elapsed)).await;
    }
}
