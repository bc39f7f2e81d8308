// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{Provider, RootProvider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::http::{
        reqwest::{
            header::{HeaderMap, HeaderValue, AUTHORIZATION},
            Client,
        },
        Http,
    },
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use shielded_config::{Rpc, RpcAuth};

use crate::error::TransportError;

/// The node-RPC boundary of a shielded chain.
///
/// Everything the client core needs from a node, and nothing else: the
/// key-exchange endpoint, the call/send primitives (whose `data`
/// carries envelope bytes, not plaintext ABI data), and the queries
/// needed to fill and track a transaction. Test doubles implement this
/// trait to stand in for a whole node.
#[async_trait]
pub trait ShieldedNode: Send + Sync {
    /// The node's x25519 public key, served by the key-exchange RPC.
    async fn node_public_key(&self) -> Result<Bytes, TransportError>;

    /// `eth_call` with envelope bytes as call data. Returns the raw
    /// response bytes: an inbound envelope, or a plaintext revert
    /// payload.
    async fn call(&self, to: Address, data: Bytes, value: U256) -> Result<Bytes, TransportError>;

    /// `eth_sendRawTransaction`. Returns the transaction hash only.
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, TransportError>;

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, TransportError>;

    /// Next nonce for `address`, including pending transactions.
    async fn transaction_count(&self, address: Address) -> Result<u64, TransportError>;

    async fn gas_price(&self) -> Result<u128, TransportError>;

    async fn chain_id(&self) -> Result<u64, TransportError>;
}

fn auth_header(auth: &RpcAuth) -> Option<HeaderValue> {
    match auth {
        RpcAuth::None => None,
        RpcAuth::Basic { username, password } => {
            let credentials = STANDARD.encode(format!("{}:{}", username, password));
            HeaderValue::from_str(&format!("Basic {}", credentials)).ok()
        }
        RpcAuth::Bearer(token) => HeaderValue::from_str(&format!("Bearer {}", token)).ok(),
    }
}

/// [`ShieldedNode`] over plain HTTP JSON-RPC.
#[derive(Clone)]
pub struct HttpNode {
    provider: RootProvider,
}

impl HttpNode {
    pub fn connect(rpc: &Rpc, auth: &RpcAuth) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(value) = auth_header(auth) {
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let http = Http::with_client(client, rpc.url().clone());
        let provider = RootProvider::new(alloy::rpc::client::RpcClient::new(http, rpc.is_local()));

        Ok(Self { provider })
    }
}

#[async_trait]
impl ShieldedNode for HttpNode {
    async fn node_public_key(&self) -> Result<Bytes, TransportError> {
        self.provider
            .raw_request("eth_getNodePublicKey".into(), ())
            .await
            .map_err(|e| TransportError::new("eth_getNodePublicKey", e))
    }

    async fn call(&self, to: Address, data: Bytes, value: U256) -> Result<Bytes, TransportError> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(data)
            .with_value(value);

        self.provider
            .call(tx)
            .await
            .map_err(|e| TransportError::new("eth_call", e))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, TransportError> {
        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .map_err(|e| TransportError::new("eth_sendRawTransaction", e))?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, TransportError> {
        self.provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| TransportError::new("eth_getTransactionReceipt", e))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, TransportError> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(|e| TransportError::new("eth_getTransactionCount", e))
    }

    async fn gas_price(&self) -> Result<u128, TransportError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| TransportError::new("eth_gasPrice", e))
    }

    async fn chain_id(&self) -> Result<u64, TransportError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| TransportError::new("eth_chainId", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_is_base64_encoded() {
        let header = auth_header(&RpcAuth::Basic {
            username: "user".into(),
            password: "pass".into(),
        })
        .unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn bearer_auth_is_passed_through() {
        let header = auth_header(&RpcAuth::Bearer("tok".into())).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer tok");
    }

    #[test]
    fn no_auth_yields_no_header() {
        assert!(auth_header(&RpcAuth::None).is_none());
    }
}
