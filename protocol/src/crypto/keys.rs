//! # Key Management
//!
//! secp256k1 private and public keys for Lum accounts.
//!
//! A [`PrivateKey`] wraps a `k256` signing key: a scalar in `1..n-1`. It is
//! the only secret in the whole pipeline, so it never implements `Serialize`,
//! its `Debug` output is redacted, and the underlying `SigningKey` zeroizes
//! its memory on drop.
//!
//! A [`PublicKey`] is a point on the curve. It can be parsed from either SEC1
//! encoding (33-byte compressed or 65-byte uncompressed) but always
//! serializes compressed, because that is the form Cosmos chains embed in
//! auth info and hash into addresses.
//!
//! ## Security considerations
//!
//! - New keys come from the OS RNG (`OsRng`).
//! - Key bytes are never logged. Errors say what shape was wrong, never
//!   what the bytes were.

use std::fmt;
use std::hash::{Hash, Hasher};

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{
    COMPRESSED_PUBLIC_KEY_LENGTH, PRIVATE_KEY_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};

/// Errors that can occur while parsing key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Wrong length, bad hex, a scalar outside the group order, or a point
    /// that is not on the curve.
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private key.
///
/// Construct one from raw bytes, hex, a mnemonic (see
/// [`crate::identity::mnemonic`]) or a keystore (see
/// [`crate::identity::keystore`]).
///
/// # Examples
///
/// ```
/// use lum_protocol::crypto::keys::PrivateKey;
///
/// let key = PrivateKey::from_hex(
///     "0f62b3ccd398bc9f0b33d748fa186a081ebebbbf1befbe957a57fbdb43f4654f",
/// ).unwrap();
/// assert_eq!(
///     key.public_key().to_hex(),
///     "02d42e5efac58b0fca5a815e242fce5da286471240ca04cde1448cfacc6fe8c0b8",
/// );
/// ```
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generate a fresh key from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Parse a 32-byte big-endian scalar.
    ///
    /// Rejects anything that is not exactly 32 bytes, and the two byte
    /// strings that are 32 bytes but not valid scalars: zero and values
    /// `>= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidKeyFormat(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| {
            KeyError::InvalidKeyFormat("private key is not a valid secp256k1 scalar".into())
        })?;
        Ok(Self { signing_key })
    }

    /// Parse a hex-encoded key. A leading `0x` is tolerated.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let trimmed = hex_str.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(trimmed)
                .map_err(|e| KeyError::InvalidKeyFormat(format!("private key hex: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }

    /// The compressed public key for this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key().clone())
    }

    /// Raw scalar bytes, wiped when the returned buffer is dropped.
    ///
    /// Only the keystore needs these. Don't log them.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Hex encoding of the raw scalar.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.to_bytes().as_slice()))
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public key, held alongside its compressed SEC1 encoding.
///
/// Equality and hashing go through the compressed bytes, so a key parsed
/// from its uncompressed form equals the same key parsed compressed.
#[derive(Clone)]
pub struct PublicKey {
    compressed: [u8; COMPRESSED_PUBLIC_KEY_LENGTH],
    verifying_key: VerifyingKey,
}

impl PublicKey {
    fn from_verifying_key(verifying_key: VerifyingKey) -> Self {
        let point = verifying_key.to_encoded_point(true);
        let mut compressed = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        compressed.copy_from_slice(point.as_bytes());
        Self {
            compressed,
            verifying_key,
        }
    }

    /// Parse a SEC1-encoded point, compressed (33 bytes) or uncompressed
    /// (65 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_LENGTH
            && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH
        {
            return Err(KeyError::InvalidKeyFormat(format!(
                "public key must be {} or {} bytes, got {}",
                COMPRESSED_PUBLIC_KEY_LENGTH,
                UNCOMPRESSED_PUBLIC_KEY_LENGTH,
                bytes.len()
            )));
        }
        let tag_ok = match bytes.len() {
            COMPRESSED_PUBLIC_KEY_LENGTH => matches!(bytes[0], 0x02 | 0x03),
            _ => bytes[0] == 0x04,
        };
        if !tag_ok {
            return Err(KeyError::InvalidKeyFormat(format!(
                "invalid SEC1 tag 0x{:02x} for a {}-byte public key",
                bytes[0],
                bytes.len()
            )));
        }
        let verifying_key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| {
            KeyError::InvalidKeyFormat("public key is not a point on secp256k1".into())
        })?;
        Ok(Self::from_verifying_key(verifying_key))
    }

    /// Parse a hex-encoded SEC1 point.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim())
            .map_err(|e| KeyError::InvalidKeyFormat(format!("public key hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Compressed SEC1 encoding.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        self.compressed
    }

    /// Borrowed compressed SEC1 encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.compressed
    }

    /// Uncompressed SEC1 encoding (`04 || x || y`).
    pub fn to_uncompressed(&self) -> Vec<u8> {
        self.verifying_key
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
    }

    /// Lowercase hex of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.compressed)
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.compressed == other.compressed
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compressed.hash(state);
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_KEY: &str = "0f62b3ccd398bc9f0b33d748fa186a081ebebbbf1befbe957a57fbdb43f4654f";
    const ABANDON_PUB: &str = "02d42e5efac58b0fca5a815e242fce5da286471240ca04cde1448cfacc6fe8c0b8";
    const ABANDON_PUB_UNCOMPRESSED: &str = "04d42e5efac58b0fca5a815e242fce5da286471240ca04cde1448cfacc6fe8c0b824ed4fa256f6a949a5e169680d5cf619631adadecc73bb066c2ea67032f2ed0a";

    #[test]
    fn derives_known_public_key() {
        let key = PrivateKey::from_hex(ABANDON_KEY).unwrap();
        assert_eq!(key.public_key().to_hex(), ABANDON_PUB);
    }

    #[test]
    fn hex_roundtrip_and_0x_prefix() {
        let key = PrivateKey::from_hex(&format!("0x{}", ABANDON_KEY)).unwrap();
        assert_eq!(key.to_hex().as_str(), ABANDON_KEY);
    }

    #[test]
    fn generated_keys_differ() {
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn private_key_wrong_length_rejected() {
        match PrivateKey::from_bytes(&[1u8; 31]) {
            Err(KeyError::InvalidKeyFormat(_)) => {}
            other => panic!("expected InvalidKeyFormat, got {:?}", other),
        }
    }

    #[test]
    fn zero_scalar_rejected() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn scalar_equal_to_group_order_rejected() {
        let n = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
            .unwrap();
        assert!(PrivateKey::from_bytes(&n).is_err());
    }

    #[test]
    fn uncompressed_and_compressed_parse_to_same_key() {
        let a = PublicKey::from_hex(ABANDON_PUB).unwrap();
        let b = PublicKey::from_hex(ABANDON_PUB_UNCOMPRESSED).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.to_hex(), ABANDON_PUB);
        assert_eq!(hex::encode(a.to_uncompressed()), ABANDON_PUB_UNCOMPRESSED);
    }

    #[test]
    fn compact_tag_on_compressed_key_rejected() {
        let mut bytes = hex::decode(ABANDON_PUB).unwrap();
        bytes[0] = 0x05;
        match PublicKey::from_bytes(&bytes) {
            Err(KeyError::InvalidKeyFormat(_)) => {}
            other => panic!("expected InvalidKeyFormat, got {:?}", other),
        }
    }

    #[test]
    fn wrong_tag_on_uncompressed_key_rejected() {
        let mut bytes = hex::decode(ABANDON_PUB_UNCOMPRESSED).unwrap();
        for tag in [0x02u8, 0x03, 0x05, 0x06, 0x07] {
            bytes[0] = tag;
            assert!(
                matches!(PublicKey::from_bytes(&bytes), Err(KeyError::InvalidKeyFormat(_))),
                "tag 0x{:02x} accepted",
                tag
            );
        }
    }

    #[test]
    fn uncompressed_tag_on_compressed_key_rejected() {
        let mut bytes = hex::decode(ABANDON_PUB).unwrap();
        bytes[0] = 0x04;
        assert!(PublicKey::from_bytes(&bytes).is_err());
    }

    #[test]
    fn off_curve_point_rejected() {
        // x = 5 has no square root for y^2 = x^3 + 7 modulo p.
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        bytes[0] = 0x02;
        bytes[32] = 0x05;
        assert!(matches!(
            PublicKey::from_bytes(&bytes),
            Err(KeyError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn public_key_wrong_length_rejected() {
        assert!(PublicKey::from_bytes(&[2u8; 32]).is_err());
        assert!(PublicKey::from_bytes(&[]).is_err());
    }

    #[test]
    fn debug_output_does_not_leak_secret() {
        let key = PrivateKey::from_hex(ABANDON_KEY).unwrap();
        let dbg = format!("{:?}", key);
        assert!(!dbg.contains(ABANDON_KEY));
        assert!(dbg.contains(ABANDON_PUB));
    }
}
