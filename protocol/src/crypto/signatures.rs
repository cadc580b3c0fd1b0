//! # Digital Signatures
//!
//! secp256k1 ECDSA over 32-byte digests, in the fixed-width `r || s` form
//! Cosmos chains put in `TxRaw.signatures`.
//!
//! ## Determinism
//!
//! Nonces come from RFC 6979, so signing the same digest with the same key
//! always yields the same 64 bytes. Golden-file tests depend on it.
//!
//! ## Strictness
//!
//! Signatures are normalized to low-S on the way out, and high-S signatures
//! are rejected on the way in. A Cosmos node does the same, so accepting
//! the malleable twin here would only defer the failure.
//!
//! Only structurally broken input (a signature that is not 64 bytes) is an
//! error. A signature that is the right shape but simply wrong verifies
//! `false`.

use std::fmt;

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::Signature as EcdsaSignature;
use thiserror::Error;

use super::keys::{PrivateKey, PublicKey};
use crate::config::{DIGEST_LENGTH, SIGNATURE_LENGTH};

/// Errors during signature operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid signature format: expected {expected} bytes, got {got}")]
    InvalidSignatureFormat { expected: usize, got: usize },

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// A 64-byte `r || s` signature. Both halves are 32-byte big-endian
/// integers, left-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Wrap raw bytes, checking only the length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidSignatureFormat {
                expected: SIGNATURE_LENGTH,
                got: bytes.len(),
            });
        }
        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// The `r` component.
    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    /// The `s` component.
    pub fn s(&self) -> &[u8] {
        &self.0[32..]
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Sign a 32-byte digest.
///
/// # Example
///
/// ```
/// use lum_protocol::crypto::{keys::PrivateKey, sha256, sign, verify};
///
/// let key = PrivateKey::generate();
/// let digest = sha256(b"send 100ulum");
/// let signature = sign(&digest, &key).unwrap();
///
/// assert!(verify(signature.as_bytes(), &digest, &key.public_key()).unwrap());
/// ```
pub fn sign(
    digest: &[u8; DIGEST_LENGTH],
    private_key: &PrivateKey,
) -> Result<Signature, SignatureError> {
    let signature: EcdsaSignature = private_key
        .signing_key()
        .sign_prehash(digest)
        .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Signature::from_bytes(&signature.to_bytes())
}

/// Verify a fixed-width signature over a 32-byte digest.
///
/// Returns `Err(InvalidSignatureFormat)` if `signature` is not 64 bytes,
/// `Ok(false)` for anything else that does not check out: a zero or
/// out-of-range scalar, a high-S signature, or a plain mismatch.
pub fn verify(
    signature: &[u8],
    digest: &[u8; DIGEST_LENGTH],
    public_key: &PublicKey,
) -> Result<bool, SignatureError> {
    let signature = Signature::from_bytes(signature)?;
    let parsed = match EcdsaSignature::from_slice(signature.as_bytes()) {
        Ok(sig) => sig,
        Err(_) => return Ok(false),
    };
    if parsed.normalize_s().is_some() {
        return Ok(false);
    }
    Ok(public_key
        .verifying_key()
        .verify_prehash(digest, &parsed)
        .is_ok())
}
