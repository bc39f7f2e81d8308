// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use shielded_crypto::SessionKey;
use tracing::debug;

use crate::{error::KeyExchangeError, transport::ShieldedNode};

/// Negotiate a single-use session key with the node.
///
/// Called once per shielded operation. There is no caching: reusing a
/// session key across operations is a security defect, so a retried
/// operation comes back through here for a fresh one. Purely a network
/// round trip plus local derivation; leaves no state behind.
pub async fn negotiate<T: ShieldedNode + ?Sized>(node: &T) -> Result<SessionKey, KeyExchangeError> {
    let raw = node.node_public_key().await?;
    if raw.len() != 32 {
        return Err(KeyExchangeError::MalformedKey(raw.len()));
    }

    let key = SessionKey::negotiate(&raw)?;
    debug!(
        key_id = %hex::encode(&key.key_id()[..4]),
        "negotiated session key"
    );
    Ok(key)
}
