//! Software signers: mnemonic, raw private key and password keystore.
//!
//! All three hold a decrypted key in memory once constructed. They differ
//! only in where the key came from and, consequently, whether they can move
//! to another derivation path.

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use super::account::Account;
use super::{Signer, SignerError, SignerKind};
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::identity::keystore::Keystore;
use crate::identity::mnemonic::private_key_from_mnemonic;
use crate::message::SignedMessage;
use crate::transaction::{SignedTransaction, TransactionIntent};

async fn derive(phrase: &Zeroizing<String>, hd_path: &str) -> Result<PrivateKey, SignerError> {
    let phrase = phrase.clone();
    let hd_path = hd_path.to_string();
    let key =
        tokio::task::spawn_blocking(move || private_key_from_mnemonic(&phrase, &hd_path)).await??;
    Ok(key)
}

// ---------------------------------------------------------------------------
// MnemonicSigner
// ---------------------------------------------------------------------------

/// Signer backed by a BIP-39 phrase. The only kind that can switch accounts.
pub struct MnemonicSigner {
    phrase: Zeroizing<String>,
    hd_path: String,
    account: Account,
}

impl MnemonicSigner {
    /// Derive the key at `hd_path` and render its address with `prefix`.
    ///
    /// Derivation runs 2048 rounds of PBKDF2-HMAC-SHA512 and is moved off
    /// the async executor.
    pub async fn new(phrase: &str, hd_path: &str, prefix: &str) -> Result<Self, SignerError> {
        let phrase = Zeroizing::new(phrase.to_string());
        let key = derive(&phrase, hd_path).await?;
        let account = Account::new(key, prefix)?;
        info!(address = account.address(), hd_path, "mnemonic signer ready");
        Ok(Self {
            phrase,
            hd_path: hd_path.to_string(),
            account,
        })
    }

    pub fn hd_path(&self) -> &str {
        &self.hd_path
    }
}

impl std::fmt::Debug for MnemonicSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MnemonicSigner")
            .field("hd_path", &self.hd_path)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Signer for MnemonicSigner {
    fn kind(&self) -> SignerKind {
        SignerKind::Mnemonic
    }

    fn address(&self) -> &str {
        self.account.address()
    }

    fn public_key(&self) -> &PublicKey {
        self.account.public_key()
    }

    fn can_change_account(&self) -> bool {
        true
    }

    async fn use_account(&mut self, hd_path: &str, prefix: &str) -> Result<bool, SignerError> {
        let key = derive(&self.phrase, hd_path).await?;
        self.account = Account::new(key, prefix)?;
        self.hd_path = hd_path.to_string();
        info!(address = self.account.address(), hd_path, "switched account");
        Ok(true)
    }

    async fn sign_transaction(
        &self,
        intent: &TransactionIntent,
    ) -> Result<SignedTransaction, SignerError> {
        Ok(self.account.sign_transaction(intent)?)
    }

    async fn sign_message(&self, msg: &str) -> Result<SignedMessage, SignerError> {
        Ok(self.account.sign_message(msg)?)
    }
}

// ---------------------------------------------------------------------------
// RawKeySigner
// ---------------------------------------------------------------------------

/// Signer backed by a bare private key.
#[derive(Debug)]
pub struct RawKeySigner {
    account: Account,
}

impl RawKeySigner {
    pub fn new(private_key: PrivateKey, prefix: &str) -> Result<Self, SignerError> {
        let account = Account::new(private_key, prefix)?;
        info!(address = account.address(), "private key signer ready");
        Ok(Self { account })
    }
}

#[async_trait]
impl Signer for RawKeySigner {
    fn kind(&self) -> SignerKind {
        SignerKind::PrivateKey
    }

    fn address(&self) -> &str {
        self.account.address()
    }

    fn public_key(&self) -> &PublicKey {
        self.account.public_key()
    }

    fn can_change_account(&self) -> bool {
        false
    }

    /// The path is ignored; only the prefix changes.
    async fn use_account(&mut self, _hd_path: &str, prefix: &str) -> Result<bool, SignerError> {
        self.account.set_prefix(prefix)?;
        Ok(false)
    }

    async fn sign_transaction(
        &self,
        intent: &TransactionIntent,
    ) -> Result<SignedTransaction, SignerError> {
        Ok(self.account.sign_transaction(intent)?)
    }

    async fn sign_message(&self, msg: &str) -> Result<SignedMessage, SignerError> {
        Ok(self.account.sign_message(msg)?)
    }
}

// ---------------------------------------------------------------------------
// KeystoreSigner
// ---------------------------------------------------------------------------

/// Signer backed by a v1 keystore, decrypted once at construction.
#[derive(Debug)]
pub struct KeystoreSigner {
    keystore_id: String,
    account: Account,
}

impl KeystoreSigner {
    pub async fn new(json: &str, password: &str, prefix: &str) -> Result<Self, SignerError> {
        let keystore = Keystore::from_json(json)?;
        let keystore_id = keystore.id.clone();
        let password = Zeroizing::new(password.to_string());
        let key = tokio::task::spawn_blocking(move || keystore.decrypt(&password)).await??;
        let account = Account::new(key, prefix)?;
        info!(address = account.address(), keystore = %keystore_id, "keystore signer ready");
        Ok(Self {
            keystore_id,
            account,
        })
    }

    pub fn keystore_id(&self) -> &str {
        &self.keystore_id
    }
}

#[async_trait]
impl Signer for KeystoreSigner {
    fn kind(&self) -> SignerKind {
        SignerKind::Keystore
    }

    fn address(&self) -> &str {
        self.account.address()
    }

    fn public_key(&self) -> &PublicKey {
        self.account.public_key()
    }

    fn can_change_account(&self) -> bool {
        false
    }

    async fn use_account(&mut self, _hd_path: &str, prefix: &str) -> Result<bool, SignerError> {
        self.account.set_prefix(prefix)?;
        Ok(false)
    }

    async fn sign_transaction(
        &self,
        intent: &TransactionIntent,
    ) -> Result<SignedTransaction, SignerError> {
        Ok(self.account.sign_transaction(intent)?)
    }

    async fn sign_message(&self, msg: &str) -> Result<SignedMessage, SignerError> {
        Ok(self.account.sign_message(msg)?)
    }
}
