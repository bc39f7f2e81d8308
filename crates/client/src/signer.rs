// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder, TransactionBuilderError},
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use anyhow::Result;
use async_trait::async_trait;

use crate::error::SigningError;

/// The signer boundary: turns a fully-filled transaction request into
/// raw signed bytes. The client never touches private keys itself.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    fn address(&self) -> Address;

    /// Sign a complete request (nonce, gas, chain id already filled)
    /// and return the EIP-2718 encoded transaction.
    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, SigningError>;
}

/// In-process signer over a local private key.
#[derive(Clone)]
pub struct LocalWallet {
    wallet: EthereumWallet,
    address: Address,
}

impl LocalWallet {
    pub fn new(signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self {
            wallet: EthereumWallet::from(signer),
            address,
        }
    }

    /// Load the key from an environment variable, clearing the variable
    /// afterwards so the key does not linger in the process environment.
    pub fn from_env(var: &str) -> Result<Self> {
        let private_key = std::env::var(var)?;
        std::env::remove_var(var);
        let signer: PrivateKeySigner = private_key.parse()?;
        Ok(Self::new(signer))
    }
}

#[async_trait]
impl TransactionSigner for LocalWallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, SigningError> {
        let envelope = tx.build(&self.wallet).await.map_err(|e| match e {
            TransactionBuilderError::InvalidTransactionRequest(tx_type, missing) => {
                SigningError::Incomplete(format!("{tx_type}: {}", missing.join(", ")))
            }
            other => SigningError::Signature(other.to_string()),
        })?;

        Ok(envelope.encoded_2718().into())
    }
}
