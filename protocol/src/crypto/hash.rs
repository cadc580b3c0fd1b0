//! # Hashing Utilities
//!
//! The three hash functions a Cosmos signer needs and nothing more:
//!
//! - **SHA-256**: the digest that actually gets signed. Every sign document
//!   is hashed with it before it reaches the signature engine.
//! - **RIPEMD-160**: only ever applied on top of SHA-256, to squeeze a
//!   public key into a 20-byte account hash.
//! - **hash160**: `ripemd160(sha256(x))`, the account-hash construction
//!   shared with Bitcoin.
//!
//! All functions return fixed-size arrays. Callers that need a slice can
//! borrow one; callers that need a signing digest get the exact type the
//! signature engine takes.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::DIGEST_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use lum_protocol::crypto::sha256;
///
/// let digest = sha256(b"abc");
/// assert_eq!(
///     hex::encode(digest),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `ripemd160(sha256(data))`.
///
/// Applied to a compressed public key, this is the 20-byte payload of a
/// bech32 account address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
