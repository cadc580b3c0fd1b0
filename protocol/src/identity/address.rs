//! Bech32 account addresses.
//!
//! A Lum address is `bech32(prefix, ripemd160(sha256(compressed_pubkey)))`,
//! the same construction every Cosmos SDK chain uses. Only the prefix
//! differs, which is why derivation takes it as a parameter: the same key
//! owns `lum1...` and `cosmos1...` addresses with identical payloads.

use bech32::{Bech32, Hrp};
use thiserror::Error;

use crate::config::ADDRESS_HASH_LENGTH;
use crate::crypto::hash::hash160;
use crate::crypto::keys::PublicKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("bech32 encoding failed: {0}")]
    Encode(String),

    #[error("bech32 decoding failed: {0}")]
    Decode(String),

    #[error("address payload must be {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Derive the account address of `public_key` under `prefix`.
///
/// ```
/// use lum_protocol::crypto::keys::PublicKey;
/// use lum_protocol::identity::address::address_from_public_key;
///
/// let pk = PublicKey::from_hex(
///     "02d42e5efac58b0fca5a815e242fce5da286471240ca04cde1448cfacc6fe8c0b8",
/// ).unwrap();
/// assert_eq!(
///     address_from_public_key(&pk, "lum").unwrap(),
///     "lum1vxyzk6fcnc5fcmh2j7h65nfzzdnp07wqpnfste",
/// );
/// ```
pub fn address_from_public_key(public_key: &PublicKey, prefix: &str) -> Result<String, AddressError> {
    encode_address(prefix, &hash160(public_key.as_bytes()))
}

/// Bech32-encode a raw 20-byte account hash.
pub fn encode_address(prefix: &str, payload: &[u8]) -> Result<String, AddressError> {
    if payload.len() != ADDRESS_HASH_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_HASH_LENGTH,
            got: payload.len(),
        });
    }
    let hrp = Hrp::parse(prefix).map_err(|e| AddressError::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: e.to_string(),
    })?;
    bech32::encode::<Bech32>(hrp, payload).map_err(|e| AddressError::Encode(e.to_string()))
}

/// Split an address into its lowercase prefix and 20-byte payload.
pub fn decode_address(address: &str) -> Result<(String, Vec<u8>), AddressError> {
    let (hrp, payload) =
        bech32::decode(address).map_err(|e| AddressError::Decode(e.to_string()))?;
    if payload.len() != ADDRESS_HASH_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_HASH_LENGTH,
            got: payload.len(),
        });
    }
    Ok((hrp.to_string().to_lowercase(), payload))
}

/// Whether `address` is a well-formed account address.
///
/// With `Some(prefix)` the address must also carry that prefix; with `None`
/// any prefix is accepted.
pub fn is_address_valid(address: &str, prefix: Option<&str>) -> bool {
    match decode_address(address) {
        Ok((hrp, _)) => prefix.map_or(true, |p| p.eq_ignore_ascii_case(&hrp)),
        Err(_) => false,
    }
}
