//! BIP-39 mnemonics and BIP-32/44 key derivation.
//!
//! A mnemonic is stretched into a 64-byte seed (PBKDF2-HMAC-SHA512, 2048
//! rounds, empty passphrase) and the seed is walked down an HD path to a
//! secp256k1 private key. Lum's default path is `m/44'/837'/0'/0/0`.
//!
//! The seed stretch is deliberately slow. Async callers should run
//! [`private_key_from_mnemonic`] on a blocking thread, which is exactly what
//! [`crate::wallet::MnemonicSigner`] does.

use std::str::FromStr;

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::keys::{KeyError, PrivateKey};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("unsupported word count {0}: expected 12, 15, 18, 21 or 24")]
    InvalidWordCount(usize),

    #[error("invalid derivation path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Generate a fresh English mnemonic of `word_count` words.
///
/// ```
/// use lum_protocol::identity::mnemonic::{generate_mnemonic, is_mnemonic_valid};
///
/// let phrase = generate_mnemonic(24).unwrap();
/// assert_eq!(phrase.split_whitespace().count(), 24);
/// assert!(is_mnemonic_valid(&phrase));
/// ```
pub fn generate_mnemonic(word_count: usize) -> Result<String, MnemonicError> {
    let entropy_len = match word_count {
        12 => 16,
        15 => 20,
        18 => 24,
        21 => 28,
        24 => 32,
        other => return Err(MnemonicError::InvalidWordCount(other)),
    };
    let mut entropy = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(&mut entropy[..entropy_len]);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..entropy_len])
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Whether `phrase` is a checksum-valid English mnemonic.
pub fn is_mnemonic_valid(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

/// Derive the private key at `hd_path` from `phrase`.
pub fn private_key_from_mnemonic(phrase: &str, hd_path: &str) -> Result<PrivateKey, MnemonicError> {
    let mnemonic = parse(phrase)?;
    let path = DerivationPath::from_str(hd_path).map_err(|e| MnemonicError::InvalidPath {
        path: hd_path.to_string(),
        reason: e.to_string(),
    })?;

    let seed = Zeroizing::new(mnemonic.to_seed_normalized(""));
    let xprv = XPrv::derive_from_path(seed.as_slice(), &path)
        .map_err(|e| MnemonicError::Derivation(e.to_string()))?;
    let mut scalar = Zeroizing::new([0u8; 32]);
    scalar.copy_from_slice(&xprv.private_key().to_bytes());
    Ok(PrivateKey::from_bytes(scalar.as_slice())?)
}

fn parse(phrase: &str) -> Result<Mnemonic, MnemonicError> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))
}
