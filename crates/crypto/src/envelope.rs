// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Envelope codec for shielded call data.
//!
//! Wire layout:
//! - outbound (client -> node): `[32-byte key id][12-byte nonce][ciphertext]`
//! - inbound (node -> client): `[12-byte nonce][ciphertext]`, unless the
//!   node answered with a plaintext revert payload, recognized by its
//!   leading ABI `Error(string)` selector and returned verbatim.
//!
//! The key id is the client's ephemeral public key; the node needs it
//! to derive the symmetric key, the client already holds it.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use crate::session::SessionKey;

/// ABI selector of `Error(string)`. A node response starting with these
/// four bytes is an unencrypted revert payload, not an envelope.
pub const REVERT_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Length of the key id prefix on outbound envelopes.
pub const KEY_ID_LEN: usize = 32;

/// Length of the AES-GCM nonce carried in every envelope.
pub const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    /// Encrypting nothing is a caller bug, not a protocol state.
    #[error("refusing to seal an empty payload")]
    EmptyPlaintext,
    #[error("could not seal payload under the session key")]
    Seal,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecryptionError {
    #[error("response of {0} bytes is too short to be an envelope")]
    Truncated(usize),
    #[error("response did not authenticate under the session key")]
    Authentication,
}

/// Classified outcome of a shielded read.
///
/// Callers must be able to tell a decrypted result from a revert the
/// node signalled in plaintext; collapsing the two would let a revert
/// payload masquerade as valid output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    /// The response decrypted cleanly; holds the plaintext return data,
    /// ready for ABI decoding.
    DecodedSuccess(Vec<u8>),
    /// The node returned an unencrypted `Error(string)` payload. Held
    /// verbatim, selector included.
    RevertSentinel(Vec<u8>),
}

impl CallResult {
    pub fn is_revert(&self) -> bool {
        matches!(self, CallResult::RevertSentinel(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            CallResult::DecodedSuccess(b) | CallResult::RevertSentinel(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CallResult::DecodedSuccess(b) | CallResult::RevertSentinel(b) => b,
        }
    }
}

/// Seal outbound call data under a negotiated session key.
///
/// Produces `key_id || nonce || ciphertext` with a fresh random nonce.
/// Purely local; fails only on malformed input, never on network
/// conditions.
pub fn encrypt(key: &SessionKey, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let sealed = seal(key, plaintext)?;

    let mut envelope = Vec::with_capacity(KEY_ID_LEN + sealed.len());
    envelope.extend_from_slice(key.key_id());
    envelope.extend_from_slice(&sealed);
    Ok(envelope)
}

/// Seal a response body the way the node does: `nonce || ciphertext`,
/// no key id prefix. Exercised by test doubles standing in for a node.
pub fn seal_response(key: &SessionKey, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    seal(key, plaintext)
}

fn seal(key: &SessionKey, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    if plaintext.is_empty() {
        return Err(EncryptionError::EmptyPlaintext);
    }

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.secret()).map_err(|_| EncryptionError::Seal)?;
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| EncryptionError::Seal)?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Classify and open a node response.
///
/// The revert sentinel is checked before anything touches the cipher:
/// a payload whose first four bytes are [`REVERT_SELECTOR`] is a
/// plaintext revert and is returned unmodified. Everything else is
/// treated as `nonce || ciphertext` under `key`; a response that fails
/// to authenticate is surfaced as [`DecryptionError::Authentication`],
/// never silently returned as plaintext.
pub fn decrypt(key: &SessionKey, response: &[u8]) -> Result<CallResult, DecryptionError> {
    if response.len() >= REVERT_SELECTOR.len() && response[..REVERT_SELECTOR.len()] == REVERT_SELECTOR {
        return Ok(CallResult::RevertSentinel(response.to_vec()));
    }

    if response.len() <= NONCE_LEN {
        return Err(DecryptionError::Truncated(response.len()));
    }

    let nonce = Nonce::from_slice(&response[..NONCE_LEN]);
    let cipher =
        Aes256Gcm::new_from_slice(key.secret()).map_err(|_| DecryptionError::Authentication)?;
    let plaintext = cipher
        .decrypt(nonce, &response[NONCE_LEN..])
        .map_err(|_| DecryptionError::Authentication)?;

    Ok(CallResult::DecodedSuccess(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use x25519_dalek::{PublicKey, StaticSecret};

    fn test_key() -> SessionKey {
        let node = PublicKey::from(&StaticSecret::random_from_rng(OsRng));
        SessionKey::negotiate(node.as_bytes()).unwrap()
    }

    #[test]
    fn round_trip() {
        let key = test_key();
        let plaintext = b"listIssuersRecord(0, 2)".to_vec();

        let envelope = encrypt(&key, &plaintext).unwrap();
        assert_eq!(&envelope[..KEY_ID_LEN], key.key_id());

        // The node would answer with nonce || ciphertext.
        let response = seal_response(&key, &plaintext).unwrap();
        assert_eq!(
            decrypt(&key, &response).unwrap(),
            CallResult::DecodedSuccess(plaintext)
        );
    }

    #[test]
    fn distinct_keys_never_produce_identical_envelopes() {
        let plaintext = b"same payload";
        let a = encrypt(&test_key(), plaintext).unwrap();
        let b = encrypt(&test_key(), plaintext).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn refuses_to_seal_empty_payload() {
        assert!(matches!(
            encrypt(&test_key(), b""),
            Err(EncryptionError::EmptyPlaintext)
        ));
    }

    #[test]
    fn sentinel_is_returned_verbatim_for_any_key() {
        // Error("boom")-shaped prefix with a garbage tail; under no key
        // should this reach the cipher.
        let mut payload = REVERT_SELECTOR.to_vec();
        payload.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x01]);

        for _ in 0..4 {
            let result = decrypt(&test_key(), &payload).unwrap();
            assert_eq!(result, CallResult::RevertSentinel(payload.clone()));
        }
    }

    #[test]
    fn bare_sentinel_selector_still_classifies() {
        let result = decrypt(&test_key(), &REVERT_SELECTOR).unwrap();
        assert_eq!(result, CallResult::RevertSentinel(REVERT_SELECTOR.to_vec()));
    }

    #[test]
    fn truncated_response_is_an_error() {
        assert_eq!(
            decrypt(&test_key(), &[0x01, 0x02, 0x03]).unwrap_err(),
            DecryptionError::Truncated(3)
        );
        assert_eq!(
            decrypt(&test_key(), &[0u8; NONCE_LEN]).unwrap_err(),
            DecryptionError::Truncated(NONCE_LEN)
        );
    }

    #[test]
    fn wrong_key_surfaces_authentication_error() {
        let key = test_key();
        let response = seal_response(&key, b"confidential result").unwrap();

        let other = test_key();
        assert_eq!(
            decrypt(&other, &response).unwrap_err(),
            DecryptionError::Authentication
        );
    }

    #[test]
    fn tampered_ciphertext_surfaces_authentication_error() {
        let key = test_key();
        let mut response = seal_response(&key, b"confidential result").unwrap();
        let last = response.len() - 1;
        response[last] ^= 0x01;

        assert_eq!(
            decrypt(&key, &response).unwrap_err(),
            DecryptionError::Authentication
        );
    }

    #[test]
    fn non_sentinel_garbage_never_decrypts_silently() {
        let key = test_key();
        let garbage = vec![0x42u8; 64];
        assert!(decrypt(&key, &garbage).is_err());
    }
}
