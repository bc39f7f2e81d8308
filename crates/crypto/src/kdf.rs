// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

/// Length in bytes of a derived symmetric session key.
pub const KEY_SIZE: usize = 32;

/// Domain separation label for the session key KDF.
const KDF_LABEL: &[u8] = b"shielded-session-key-v1";

/// x25519 key derivation errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyDerivationError {
    #[error("malformed public key")]
    MalformedPublicKey,
    #[error("malformed private key")]
    MalformedPrivateKey,
    #[error("key derivation function failure")]
    KeyDerivationFunctionFailure,
}

/// Derive a symmetric encryption key from the provided public/private
/// key pair.
///
/// Both sides of a shielded exchange run this with their own private
/// key and the peer's public key: the client with its ephemeral secret
/// and the node's published key, the node with its long-term secret and
/// the ephemeral public key carried in the envelope.
pub fn derive_symmetric(
    public_key: &[u8],
    private_key: &[u8],
) -> Result<Zeroizing<[u8; KEY_SIZE]>, KeyDerivationError> {
    let public: [u8; 32] = public_key
        .try_into()
        .map_err(|_| KeyDerivationError::MalformedPublicKey)?;
    let private: [u8; 32] = private_key
        .try_into()
        .map_err(|_| KeyDerivationError::MalformedPrivateKey)?;

    let public = PublicKey::from(public);
    let private = StaticSecret::from(private);

    let mut kdf = Hmac::<Sha256>::new_from_slice(KDF_LABEL)
        .map_err(|_| KeyDerivationError::KeyDerivationFunctionFailure)?;
    kdf.update(private.diffie_hellman(&public).as_bytes());

    let mut derived_key = Zeroizing::new([0u8; KEY_SIZE]);
    derived_key.copy_from_slice(&kdf.finalize().into_bytes());

    Ok(derived_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn rejects_malformed_key_lengths() {
        let short = [0u8; 31];
        let ok = [0u8; 32];
        let long = [0u8; 33];

        assert_eq!(
            derive_symmetric(&short, &ok).unwrap_err(),
            KeyDerivationError::MalformedPublicKey
        );
        assert_eq!(
            derive_symmetric(&long, &ok).unwrap_err(),
            KeyDerivationError::MalformedPublicKey
        );
        assert_eq!(
            derive_symmetric(&ok, &short).unwrap_err(),
            KeyDerivationError::MalformedPrivateKey
        );
        assert_eq!(
            derive_symmetric(&ok, &long).unwrap_err(),
            KeyDerivationError::MalformedPrivateKey
        );
    }

    #[test]
    fn both_sides_derive_the_same_key() {
        let client_secret = StaticSecret::random_from_rng(OsRng);
        let node_secret = StaticSecret::random_from_rng(OsRng);
        let client_public = PublicKey::from(&client_secret);
        let node_public = PublicKey::from(&node_secret);

        let client_side =
            derive_symmetric(node_public.as_bytes(), &client_secret.to_bytes()).unwrap();
        let node_side =
            derive_symmetric(client_public.as_bytes(), &node_secret.to_bytes()).unwrap();

        assert_eq!(*client_side, *node_side);
    }

    #[test]
    fn different_peers_derive_different_keys() {
        let client_secret = StaticSecret::random_from_rng(OsRng);
        let node_a = PublicKey::from(&StaticSecret::random_from_rng(OsRng));
        let node_b = PublicKey::from(&StaticSecret::random_from_rng(OsRng));

        let key_a = derive_symmetric(node_a.as_bytes(), &client_secret.to_bytes()).unwrap();
        let key_b = derive_symmetric(node_b.as_bytes(), &client_secret.to_bytes()).unwrap();

        assert_ne!(*key_a, *key_b);
    }
}
