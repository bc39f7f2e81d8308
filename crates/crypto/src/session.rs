// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::fmt;

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::kdf::{derive_symmetric, KeyDerivationError, KEY_SIZE};

/// Ephemeral symmetric key material for exactly one shielded operation.
///
/// A `SessionKey` is derived from a fresh ephemeral x25519 keypair and
/// the target node's published public key. The ephemeral public key is
/// kept as the session key id: the node needs it to re-derive the same
/// symmetric key, so it travels at the front of every outbound
/// envelope.
///
/// Session keys are single-use by design. They are not `Clone`, never
/// persisted, and the secret is wiped when the key is dropped. A
/// retried operation must negotiate a new one.
pub struct SessionKey {
    secret: Zeroizing<[u8; KEY_SIZE]>,
    key_id: [u8; 32],
    node_public_key: [u8; 32],
}

impl SessionKey {
    /// Derive a fresh session key against the node's x25519 public key.
    ///
    /// Generates a new ephemeral keypair on every call; the ephemeral
    /// secret is consumed by the derivation and never leaves this
    /// function.
    pub fn negotiate(node_public_key: &[u8]) -> Result<Self, KeyDerivationError> {
        let node: [u8; 32] = node_public_key
            .try_into()
            .map_err(|_| KeyDerivationError::MalformedPublicKey)?;

        let ephemeral = StaticSecret::random_from_rng(OsRng);
        let key_id = PublicKey::from(&ephemeral).to_bytes();
        let secret = derive_symmetric(&node, &ephemeral.to_bytes())?;

        Ok(Self {
            secret,
            key_id,
            node_public_key: node,
        })
    }

    /// Build a session key from already-derived parts.
    ///
    /// This is the node's side of the exchange (and what test doubles
    /// use): given the key id from an inbound envelope and its own
    /// secret, the node derives the symmetric key with
    /// [`derive_symmetric`] and wraps it here.
    pub fn from_symmetric(key_id: [u8; 32], node_public_key: [u8; 32], secret: [u8; KEY_SIZE]) -> Self {
        Self {
            secret: Zeroizing::new(secret),
            key_id,
            node_public_key,
        }
    }

    /// The session key id: the ephemeral public key the node uses to
    /// re-derive the symmetric key.
    pub fn key_id(&self) -> &[u8; 32] {
        &self.key_id
    }

    /// The node public key this session was negotiated against.
    pub fn node_public_key(&self) -> &[u8; 32] {
        &self.node_public_key
    }

    pub(crate) fn secret(&self) -> &[u8; KEY_SIZE] {
        &self.secret
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret material stays out of logs.
        f.debug_struct("SessionKey")
            .field("key_id", &hex_prefix(&self.key_id))
            .field("node_public_key", &hex_prefix(&self.node_public_key))
            .finish_non_exhaustive()
    }
}

fn hex_prefix(bytes: &[u8; 32]) -> String {
    bytes[..4].iter().map(|b| format!("{:02x}", b)).collect::<String>() + ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiate_rejects_malformed_node_key() {
        assert_eq!(
            SessionKey::negotiate(&[0u8; 31]).unwrap_err(),
            KeyDerivationError::MalformedPublicKey
        );
    }

    #[test]
    fn negotiate_yields_a_fresh_key_id_each_time() {
        let node = StaticSecret::random_from_rng(OsRng);
        let node_public = PublicKey::from(&node);

        let a = SessionKey::negotiate(node_public.as_bytes()).unwrap();
        let b = SessionKey::negotiate(node_public.as_bytes()).unwrap();

        assert_ne!(a.key_id(), b.key_id());
        assert_ne!(a.secret(), b.secret());
    }

    #[test]
    fn node_rederives_the_client_key_from_the_key_id() {
        let node = StaticSecret::random_from_rng(OsRng);
        let node_public = PublicKey::from(&node);

        let client = SessionKey::negotiate(node_public.as_bytes()).unwrap();
        let node_side = derive_symmetric(client.key_id(), &node.to_bytes()).unwrap();

        assert_eq!(client.secret(), &*node_side);
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let node = PublicKey::from(&StaticSecret::random_from_rng(OsRng));
        let key = SessionKey::negotiate(node.as_bytes()).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("secret"));
    }
}
