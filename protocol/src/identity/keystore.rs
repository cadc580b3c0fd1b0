//! # Password Keystore (v1)
//!
//! JSON envelope for a private key encrypted under a password. The format
//! matches what Lum wallets export:
//!
//! ```text
//! dk          = PBKDF2-HMAC-SHA256(password, salt, c = 262144, dklen = 32)
//! ciphertext  = AES-256-CTR(key = dk, iv, private_key)
//! mac         = Keccak-512(dk[16..32] || ciphertext)
//! ```
//!
//! The MAC doubles as the password check: a wrong password derives a
//! different `dk`, the MAC no longer matches, and decryption stops before
//! any plaintext is produced.
//!
//! PBKDF2 with 262 144 rounds takes a noticeable fraction of a second. Don't
//! call [`Keystore::decrypt`] on an async executor thread; the wallet layer
//! moves it to `spawn_blocking`.

use std::path::Path;

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak512};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::{
    KEYSTORE_CIPHER, KEYSTORE_DKLEN, KEYSTORE_IV_LENGTH, KEYSTORE_KDF, KEYSTORE_KDF_ITERATIONS,
    KEYSTORE_PRF, KEYSTORE_SALT_LENGTH, KEYSTORE_VERSION,
};
use crate::crypto::keys::{KeyError, PrivateKey};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error("malformed keystore: {0}")]
    Malformed(String),

    #[error("unsupported keystore version {0}")]
    UnsupportedVersion(u32),

    #[error("unsupported cipher {0:?}")]
    UnsupportedCipher(String),

    #[error("unsupported key derivation {0:?}")]
    UnsupportedKdf(String),

    #[error("invalid hex in field {field}: {source}")]
    InvalidHex {
        field: &'static str,
        source: hex::FromHexError,
    },

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("keystore i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

/// A parsed keystore document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keystore {
    pub version: u32,
    pub id: String,
    pub crypto: KeystoreCrypto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub cipher: String,
    pub kdf: String,
    pub kdfparams: KdfParams,
    pub mac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    pub iv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub dklen: usize,
    pub salt: String,
    pub c: u32,
    pub prf: String,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl Keystore {
    pub fn from_json(json: &str) -> Result<Self, KeystoreError> {
        serde_json::from_str(json).map_err(|e| KeystoreError::Malformed(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KeystoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, KeystoreError> {
        serde_json::to_string(self).map_err(|e| KeystoreError::Malformed(e.to_string()))
    }

    /// Encrypt `private_key` under `password` with the standard work factor.
    pub fn encrypt(private_key: &PrivateKey, password: &str) -> Result<Self, KeystoreError> {
        Self::encrypt_with_iterations(private_key, password, KEYSTORE_KDF_ITERATIONS)
    }

    /// Encrypt with a custom PBKDF2 round count. Lower counts are for tests.
    pub fn encrypt_with_iterations(
        private_key: &PrivateKey,
        password: &str,
        iterations: u32,
    ) -> Result<Self, KeystoreError> {
        let mut salt = [0u8; KEYSTORE_SALT_LENGTH];
        let mut iv = [0u8; KEYSTORE_IV_LENGTH];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);

        let dk = derive_key(password, &salt, iterations, KEYSTORE_DKLEN);
        let mut ciphertext = private_key.to_bytes().to_vec();
        apply_ctr(&dk, &iv, &mut ciphertext)?;
        let mac = compute_mac(&dk, &ciphertext);

        Ok(Self {
            version: KEYSTORE_VERSION,
            id: Uuid::new_v4().to_string(),
            crypto: KeystoreCrypto {
                ciphertext: hex::encode(&ciphertext),
                cipherparams: CipherParams {
                    iv: hex::encode(iv),
                },
                cipher: KEYSTORE_CIPHER.to_string(),
                kdf: KEYSTORE_KDF.to_string(),
                kdfparams: KdfParams {
                    dklen: KEYSTORE_DKLEN,
                    salt: hex::encode(salt),
                    c: iterations,
                    prf: KEYSTORE_PRF.to_string(),
                },
                mac: hex::encode(mac),
            },
        })
    }

    /// Recover the private key. Fails with `IncorrectPassword` when the MAC
    /// does not match.
    pub fn decrypt(&self, password: &str) -> Result<PrivateKey, KeystoreError> {
        if self.version != KEYSTORE_VERSION {
            return Err(KeystoreError::UnsupportedVersion(self.version));
        }
        let crypto = &self.crypto;
        if crypto.cipher != KEYSTORE_CIPHER {
            return Err(KeystoreError::UnsupportedCipher(crypto.cipher.clone()));
        }
        if crypto.kdf != KEYSTORE_KDF || crypto.kdfparams.prf != KEYSTORE_PRF {
            return Err(KeystoreError::UnsupportedKdf(format!(
                "{}/{}",
                crypto.kdf, crypto.kdfparams.prf
            )));
        }
        if crypto.kdfparams.dklen != KEYSTORE_DKLEN {
            return Err(KeystoreError::Malformed(format!(
                "dklen must be {}, got {}",
                KEYSTORE_DKLEN, crypto.kdfparams.dklen
            )));
        }

        let salt = decode_field("kdfparams.salt", &crypto.kdfparams.salt)?;
        let iv = decode_field("cipherparams.iv", &crypto.cipherparams.iv)?;
        let ciphertext = decode_field("ciphertext", &crypto.ciphertext)?;
        let mac = decode_field("mac", &crypto.mac)?;

        let dk = derive_key(password, &salt, crypto.kdfparams.c, crypto.kdfparams.dklen);
        if compute_mac(&dk, &ciphertext).as_slice() != mac.as_slice() {
            debug!(keystore_id = %self.id, "keystore mac mismatch");
            return Err(KeystoreError::IncorrectPassword);
        }

        let mut plaintext = Zeroizing::new(ciphertext);
        apply_ctr(&dk, &iv, &mut plaintext)?;
        Ok(PrivateKey::from_bytes(&plaintext)?)
    }
}

fn derive_key(password: &str, salt: &[u8], iterations: u32, dklen: usize) -> Zeroizing<Vec<u8>> {
    let mut dk = Zeroizing::new(vec![0u8; dklen]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut dk);
    dk
}

fn apply_ctr(dk: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), KeystoreError> {
    let mut cipher = Aes256Ctr::new_from_slices(dk, iv)
        .map_err(|_| KeystoreError::Malformed(format!("iv must be {} bytes", KEYSTORE_IV_LENGTH)))?;
    cipher.apply_keystream(buf);
    Ok(())
}

fn compute_mac(dk: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut hasher = Keccak512::new();
    hasher.update(&dk[16..32]);
    hasher.update(ciphertext);
    hasher.finalize().to_vec()
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, KeystoreError> {
    hex::decode(value).map_err(|source| KeystoreError::InvalidHex { field, source })
}
