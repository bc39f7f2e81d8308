// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// A validated HTTP(S) JSON-RPC endpoint.
///
/// The shielded node protocol (key exchange plus call/send) runs over
/// plain HTTP JSON-RPC, so websocket schemes are rejected outright.
#[derive(Clone, Debug)]
pub struct Rpc {
    url: Url,
    secure: bool,
}

impl Rpc {
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).context("Invalid URL format")?;
        let secure = match parsed.scheme() {
            "http" => false,
            "https" => true,
            _ => bail!("Invalid protocol. Expected: http:// or https://"),
        };

        if parsed.host_str().is_none() {
            bail!("URL must contain a host");
        }

        Ok(Rpc {
            url: parsed,
            secure,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn hostname(&self) -> &str {
        // Safe: validated in from_url() - http(s) schemes always require a host
        self.url.host_str().expect("RPC URL always has a host")
    }

    pub fn port(&self) -> u16 {
        // Safe: http(s) always have known default ports
        self.url
            .port_or_known_default()
            .expect("RPC URL always has a port")
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn is_local(&self) -> bool {
        match self.hostname() {
            "localhost" | "127.0.0.1" | "::1" => true,
            host => host.starts_with("127."), // 127.0.0.0/8 is all loopback
        }
    }
}

impl std::fmt::Display for Rpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[derive(Debug, Hash, Eq, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(tag = "type", content = "credentials")]
pub enum RpcAuth {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer(String),
}
