// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::sol_types::{Revert, SolError};
use shielded_crypto::CallResult;

/// Decode an ABI `Error(string)` payload (selector included) into its
/// reason string. Returns `None` for anything else.
pub fn decode_revert_reason(raw: &[u8]) -> Option<String> {
    Revert::abi_decode(raw).ok().map(|revert| revert.reason)
}

/// ABI-aware convenience over [`CallResult`].
pub trait CallResultExt {
    /// The revert reason, if this result is a revert sentinel carrying
    /// a well-formed `Error(string)` payload.
    fn revert_reason(&self) -> Option<String>;
}

impl CallResultExt for CallResult {
    fn revert_reason(&self) -> Option<String> {
        match self {
            CallResult::RevertSentinel(raw) => decode_revert_reason(raw),
            CallResult::DecodedSuccess(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shielded_crypto::REVERT_SELECTOR;

    #[test]
    fn round_trips_a_reason_string() {
        let raw = Revert::from("Invalid range").abi_encode();
        assert_eq!(raw[..4], REVERT_SELECTOR);
        assert_eq!(decode_revert_reason(&raw).as_deref(), Some("Invalid range"));
    }

    #[test]
    fn rejects_non_revert_payloads() {
        assert_eq!(decode_revert_reason(b"\x01\x02\x03\x04rest"), None);
        assert_eq!(decode_revert_reason(&[]), None);
    }

    #[test]
    fn success_results_have_no_reason() {
        let result = CallResult::DecodedSuccess(vec![0x01]);
        assert_eq!(result.revert_reason(), None);

        let sentinel = CallResult::RevertSentinel(Revert::from("nope").abi_encode());
        assert_eq!(sentinel.revert_reason().as_deref(), Some("nope"));
    }
}
