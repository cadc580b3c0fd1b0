//! Transaction signing with secp256k1 keys.
//!
//! Signing is a separate step from building because the key may not be
//! available at construction time (a locked keystore, a remote signer).
//! The signed payload is always `sha256(SignDoc bytes)`, never the raw body.

use super::assembler::{assemble, TxEnvelope};
use super::sign_doc::build_sign_document;
use super::types::{SignDocument, TransactionError, TransactionIntent};
use crate::codec::proto::SignMode;
use crate::crypto::keys::PrivateKey;
use crate::crypto::signatures::{sign, Signature};

/// A sign document together with the signature over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub sign_document: SignDocument,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Envelope with this transaction's single signature.
    pub fn to_envelope(&self) -> TxEnvelope {
        TxEnvelope::from_sign_document(&self.sign_document, std::slice::from_ref(&self.signature))
    }

    /// Broadcast-ready `TxRaw` bytes.
    pub fn to_envelope_bytes(&self) -> Vec<u8> {
        assemble(&self.sign_document, std::slice::from_ref(&self.signature))
    }
}

/// Sign an already-built sign document.
///
/// The key is borrowed for the duration of the call only.
pub fn sign_document(
    sign_document: &SignDocument,
    private_key: &PrivateKey,
) -> Result<Signature, TransactionError> {
    Ok(sign(&sign_document.digest(), private_key)?)
}

/// Build and sign in one go.
///
/// # Example
///
/// ```rust
/// use lum_protocol::codec::SignMode;
/// use lum_protocol::crypto::PrivateKey;
/// use lum_protocol::transaction::{sign_transaction, verify_sign_document, TransactionIntentBuilder};
///
/// let key = PrivateKey::generate();
/// let intent = TransactionIntentBuilder::new().chain_id("test-1").build().unwrap();
/// let signed = sign_transaction(&intent, &key, SignMode::Direct).unwrap();
///
/// assert!(verify_sign_document(
///     signed.signature.as_bytes(),
///     &signed.sign_document,
///     &key.public_key(),
/// ).unwrap());
/// ```
pub fn sign_transaction(
    intent: &TransactionIntent,
    private_key: &PrivateKey,
    sign_mode: SignMode,
) -> Result<SignedTransaction, TransactionError> {
    let sign_document = build_sign_document(intent, &private_key.public_key(), sign_mode)?;
    let signature = self::sign_document(&sign_document, private_key)?;
    Ok(SignedTransaction {
        sign_document,
        signature,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
