// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::rpc::{Rpc, RpcAuth};

/// Gas ceiling applied to shielded sends when neither the request nor
/// the config specifies one.
pub const DEFAULT_GAS_LIMIT: u64 = 2_000_000;

/// One chain profile: where the node is and how to talk to it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    pub name: String,
    pub rpc_url: String,
    pub rpc_auth: RpcAuth,
    /// Pinned into signed transactions when set; otherwise the chain id
    /// reported by the node is used.
    pub chain_id: Option<u64>,
    pub gas_limit: Option<u64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: "localnet".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            rpc_auth: RpcAuth::None,
            chain_id: None,
            gas_limit: None,
        }
    }
}

impl ChainConfig {
    /// Load a profile from a YAML file, with `SHIELDED_`-prefixed
    /// environment variables taking precedence over file values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Figment::from(Serialized::defaults(ChainConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SHIELDED_"))
            .extract()
            .with_context(|| format!("Failed to load chain config from {}", path.display()))
    }

    pub fn rpc(&self) -> Result<Rpc> {
        Rpc::from_url(&self.rpc_url)
            .map_err(|e| anyhow!("Failed to parse RPC URL for chain {}: {}", self.name, e))
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_point_at_localnet() {
        let config = ChainConfig::default();
        assert_eq!(config.name, "localnet");
        assert!(config.rpc().unwrap().is_local());
        assert_eq!(config.gas_limit(), DEFAULT_GAS_LIMIT);
        assert_eq!(config.chain_id, None);
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "shielded.config.yaml",
                r#"
name: testnet
rpc_url: "https://json-rpc.testnet.example.com"
chain_id: 1291
gas_limit: 3000000
"#,
            )?;

            let config = ChainConfig::load("shielded.config.yaml").unwrap();
            assert_eq!(config.name, "testnet");
            assert_eq!(config.chain_id, Some(1291));
            assert_eq!(config.gas_limit(), 3_000_000);
            assert!(config.rpc().unwrap().is_secure());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "shielded.config.yaml",
                r#"
name: testnet
rpc_url: "https://json-rpc.testnet.example.com"
"#,
            )?;
            jail.set_env("SHIELDED_RPC_URL", "http://localhost:9650");

            let config = ChainConfig::load("shielded.config.yaml").unwrap();
            assert_eq!(config.rpc_url, "http://localhost:9650");
            Ok(())
        });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("shielded.config.yaml", "rpc_link: http://localhost:8545\n")?;
            assert!(ChainConfig::load("shielded.config.yaml").is_err());
            Ok(())
        });
    }
}
