// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, Bytes, U256};

/// One shielded invocation: destination, ABI-encoded call data
/// (pre-encryption), native value, and optional send overrides.
///
/// Immutable once constructed; the `with_*` builders consume and
/// return. `gas_limit` and `chain_id` only matter on the send path -
/// when unset, the send falls back to the configured default gas
/// ceiling and the chain id reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    to: Address,
    data: Bytes,
    value: U256,
    gas_limit: Option<u64>,
    chain_id: Option<u64>,
}

impl CallRequest {
    pub fn new(to: Address, data: Bytes) -> Self {
        Self {
            to,
            data,
            value: U256::ZERO,
            gas_limit: None,
            chain_id: None,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn gas_limit(&self) -> Option<u64> {
        self.gas_limit
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero_value_and_no_overrides() {
        let request = CallRequest::new(Address::ZERO, Bytes::from_static(b"\x01\x02"));
        assert_eq!(request.value(), U256::ZERO);
        assert_eq!(request.gas_limit(), None);
        assert_eq!(request.chain_id(), None);
    }

    #[test]
    fn builders_set_overrides() {
        let request = CallRequest::new(Address::ZERO, Bytes::from_static(b"\x01"))
            .with_value(U256::from(7))
            .with_gas_limit(3_000_000)
            .with_chain_id(1291);
        assert_eq!(request.value(), U256::from(7));
        assert_eq!(request.gas_limit(), Some(3_000_000));
        assert_eq!(request.chain_id(), Some(1291));
    }
}
