// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Persisted registry of deployed contract addresses.
///
/// Deployment and upgrade tooling writes addresses here; callers read
/// them back by name before issuing shielded calls. Addresses are kept
/// as plain strings: the client core parses them at the call site and
/// is agnostic to this file's existence.
#[derive(Debug, Clone)]
pub struct AddressBook {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl AddressBook {
    /// Open the registry at `path`. A missing file yields an empty
    /// book, so first deployments do not need a seed file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read address book at {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Malformed address book at {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, address: impl Into<String>) {
        self.entries.insert(name.into(), address.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the book back to disk as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write address book to {}", self.path.display()))
    }
}
