// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::time::Duration;

use alloy::{network::TransactionBuilder, primitives::Bytes, rpc::types::TransactionRequest};
use shielded_crypto::{decrypt, encrypt, CallResult, SessionKey};
use shielded_config::DEFAULT_GAS_LIMIT;
use tracing::{debug, info};

use crate::{
    error::ClientError,
    key_exchange::negotiate,
    lifecycle::{self, TransactionHandle, TxOutcome, DEFAULT_POLL_INTERVAL},
    request::CallRequest,
    signer::TransactionSigner,
    transport::ShieldedNode,
};

/// Encrypt-then-dispatch client for shielded contract interaction.
///
/// The read and write paths share one preparation step (negotiate a
/// key, seal the call data) and then diverge completely: a call
/// decrypts its response immediately, a send returns a pending handle
/// and never decrypts anything. Each operation owns its session key;
/// concurrent operations share no state and need no coordination.
pub struct ShieldedRpcClient<T: ShieldedNode> {
    node: T,
}

impl<T: ShieldedNode> ShieldedRpcClient<T> {
    pub fn new(node: T) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &T {
        &self.node
    }

    /// The shared prefix of both paths: one key negotiation, one
    /// encryption.
    async fn prepare_envelope(&self, data: &[u8]) -> Result<(SessionKey, Bytes), ClientError> {
        let key = negotiate(&self.node).await?;
        let envelope = encrypt(&key, data)?;
        Ok((key, envelope.into()))
    }

    /// Read-only shielded invocation.
    ///
    /// No side effects on chain state. The returned [`CallResult`]
    /// distinguishes decrypted output from a plaintext revert payload;
    /// a response that is neither surfaces as
    /// [`ClientError::Decryption`].
    pub async fn shielded_call(&self, request: &CallRequest) -> Result<CallResult, ClientError> {
        let (key, envelope) = self.prepare_envelope(request.data()).await?;

        debug!(to = %request.to(), bytes = envelope.len(), "dispatching shielded call");
        let response = self
            .node
            .call(request.to(), envelope, request.value())
            .await?;

        let result = decrypt(&key, &response)?;
        if result.is_revert() {
            debug!(to = %request.to(), "node answered with a plaintext revert payload");
        }
        Ok(result)
    }

    /// State-mutating shielded invocation.
    ///
    /// Seals the call data the same way as a call, fills the remaining
    /// transaction fields from the node (nonce, gas price, chain id
    /// unless pinned on the request), signs via `signer`, and submits.
    /// Returns as soon as the node accepts the transaction; use
    /// [`crate::await_completion`] to track it. Transactions return
    /// only a hash, so the session key is dropped undecrypted here.
    pub async fn shielded_send<S: TransactionSigner + ?Sized>(
        &self,
        request: &CallRequest,
        signer: &S,
    ) -> Result<TransactionHandle, ClientError> {
        let (_key, envelope) = self.prepare_envelope(request.data()).await?;

        let from = signer.address();
        let nonce = self.node.transaction_count(from).await?;
        let gas_price = self.node.gas_price().await?;
        let chain_id = match request.chain_id() {
            Some(id) => id,
            None => self.node.chain_id().await?,
        };
        let gas_limit = request.gas_limit().unwrap_or(DEFAULT_GAS_LIMIT);

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(request.to())
            .with_input(envelope)
            .with_value(request.value())
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_gas_limit(gas_limit)
            .with_chain_id(chain_id);

        let raw = signer.sign_transaction(tx).await?;
        let hash = self.node.send_raw_transaction(raw).await?;

        info!(%hash, to = %request.to(), nonce, "shielded transaction submitted");
        Ok(TransactionHandle::new(hash))
    }

    /// Await a submitted transaction with the default polling cadence.
    /// See [`crate::await_completion`] for caller-controlled polling.
    pub async fn await_completion(
        &self,
        handle: &TransactionHandle,
        timeout: Duration,
    ) -> Result<TxOutcome, ClientError> {
        lifecycle::await_completion(&self.node, handle, timeout, DEFAULT_POLL_INTERVAL).await
    }
}
