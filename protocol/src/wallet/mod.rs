//! # Wallet Signers
//!
//! A [`Signer`] is anything that can turn a [`TransactionIntent`] or a text
//! message into a signature on behalf of one address. Callers hold a
//! `Box<dyn Signer>` and never care where the key lives.
//!
//! ```text
//! account.rs - key + address + prefix shared by every software signer
//! signers.rs - MnemonicSigner, RawKeySigner, KeystoreSigner
//! ```
//!
//! Construction goes through [`SignerSource`], a tagged description of the
//! key material. Mnemonic derivation and keystore decryption are CPU-heavy
//! and run on the blocking pool; signing itself is a single ECDSA operation
//! and runs inline.

mod account;
pub mod signers;

use async_trait::async_trait;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::keys::{KeyError, PrivateKey, PublicKey};
use crate::identity::{AddressError, KeystoreError, MnemonicError};
use crate::message::{MessageError, SignedMessage};
use crate::transaction::{SignedTransaction, TransactionError, TransactionIntent};

pub use signers::{KeystoreSigner, MnemonicSigner, RawKeySigner};

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("no available mnemonic, private key or keystore")]
    NoSignerAvailable,

    #[error("signing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Where a signer's key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerKind {
    Mnemonic,
    PrivateKey,
    Keystore,
}

impl std::fmt::Display for SignerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignerKind::Mnemonic => "mnemonic",
            SignerKind::PrivateKey => "private-key",
            SignerKind::Keystore => "keystore",
        };
        f.write_str(name)
    }
}

#[async_trait]
pub trait Signer: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> SignerKind;

    /// Bech32 address of the current account.
    fn address(&self) -> &str;

    fn public_key(&self) -> &PublicKey;

    /// Whether [`Signer::use_account`] can move to another derivation path.
    fn can_change_account(&self) -> bool;

    /// Switch to the account at `hd_path`, rendered with `prefix`.
    ///
    /// Returns `true` if the key changed. Signers without a seed cannot
    /// derive anything: they adopt the new prefix, keep their key and
    /// return `false`.
    async fn use_account(&mut self, hd_path: &str, prefix: &str) -> Result<bool, SignerError>;

    /// Sign `intent` in direct mode with the current account's key.
    async fn sign_transaction(
        &self,
        intent: &TransactionIntent,
    ) -> Result<SignedTransaction, SignerError>;

    async fn sign_message(&self, msg: &str) -> Result<SignedMessage, SignerError>;
}

/// Key material a signer can be built from.
pub enum SignerSource {
    Mnemonic {
        phrase: Zeroizing<String>,
        hd_path: String,
    },
    PrivateKey(PrivateKey),
    Keystore {
        json: String,
        password: Zeroizing<String>,
    },
}

impl SignerSource {
    /// Pick a source from optional inputs, first match wins: mnemonic, then
    /// private key hex, then keystore JSON with its password.
    pub fn from_parts(
        mnemonic: Option<&str>,
        hd_path: &str,
        private_key_hex: Option<&str>,
        keystore: Option<(&str, &str)>,
    ) -> Result<Self, SignerError> {
        if let Some(phrase) = mnemonic {
            return Ok(SignerSource::Mnemonic {
                phrase: Zeroizing::new(phrase.to_string()),
                hd_path: hd_path.to_string(),
            });
        }
        if let Some(hex_key) = private_key_hex {
            return Ok(SignerSource::PrivateKey(PrivateKey::from_hex(hex_key)?));
        }
        if let Some((json, password)) = keystore {
            return Ok(SignerSource::Keystore {
                json: json.to_string(),
                password: Zeroizing::new(password.to_string()),
            });
        }
        Err(SignerError::NoSignerAvailable)
    }

    pub fn kind(&self) -> SignerKind {
        match self {
            SignerSource::Mnemonic { .. } => SignerKind::Mnemonic,
            SignerSource::PrivateKey(_) => SignerKind::PrivateKey,
            SignerSource::Keystore { .. } => SignerKind::Keystore,
        }
    }

    pub async fn into_signer(self, prefix: &str) -> Result<Box<dyn Signer>, SignerError> {
        Ok(match self {
            SignerSource::Mnemonic { phrase, hd_path } => {
                Box::new(MnemonicSigner::new(&phrase, &hd_path, prefix).await?)
            }
            SignerSource::PrivateKey(key) => Box::new(RawKeySigner::new(key, prefix)?),
            SignerSource::Keystore { json, password } => {
                Box::new(KeystoreSigner::new(&json, &password, prefix).await?)
            }
        })
    }
}

impl std::fmt::Debug for SignerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignerSource::Mnemonic { hd_path, .. } => f
                .debug_struct("Mnemonic")
                .field("hd_path", hd_path)
                .finish_non_exhaustive(),
            SignerSource::PrivateKey(_) => f.write_str("PrivateKey(..)"),
            SignerSource::Keystore { .. } => f.write_str("Keystore(..)"),
        }
    }
}
