//! Signature verification for sign documents and whole envelopes.
//!
//! The checks are ordered from cheapest to most expensive: decoding and
//! structural checks come first, elliptic-curve math last. Structural
//! problems are errors. A signature that is well-formed but wrong is just
//! `Ok(false)`.

use prost::Message;
use tracing::debug;

use super::assembler::TxEnvelope;
use super::types::{SignDocument, TransactionError};
use crate::codec::proto::{AuthInfo, PubKey};
use crate::codec::TypeUrl;
use crate::crypto::keys::PublicKey;
use crate::crypto::signatures::{verify, SignatureError};

/// Verify `signature` over the sign document's digest.
pub fn verify_sign_document(
    signature: &[u8],
    sign_document: &SignDocument,
    public_key: &PublicKey,
) -> Result<bool, SignatureError> {
    verify(signature, &sign_document.digest(), public_key)
}

/// Extract the first signer's secp256k1 public key from auth info.
pub fn signer_public_key(auth_info: &AuthInfo) -> Result<PublicKey, TransactionError> {
    let signer = auth_info
        .signer_infos
        .first()
        .ok_or(TransactionError::MissingSignerInfo)?;
    let any = signer
        .public_key
        .as_ref()
        .ok_or_else(|| TransactionError::UnsupportedPublicKey("none".into()))?;
    if any.type_url != PubKey::TYPE_URL {
        return Err(TransactionError::UnsupportedPublicKey(any.type_url.clone()));
    }
    let key = PubKey::decode(any.value.as_slice()).map_err(crate::codec::CodecError::from)?;
    Ok(PublicKey::from_bytes(&key.key)?)
}

/// Verify an encoded single-signer envelope the way a node would.
///
/// Decodes the envelope, rebuilds the sign document from the supplied chain
/// context, takes the signer's key from the auth info, and checks the first
/// signature against it.
///
/// # Errors
///
/// Undecodable bytes, a missing signer or signature, a non-secp256k1 key,
/// or a signature that is not 64 bytes.
pub fn verify_envelope(
    envelope_bytes: &[u8],
    chain_id: &str,
    account_number: u64,
) -> Result<bool, TransactionError> {
    let envelope = TxEnvelope::decode(envelope_bytes)?;
    let auth_info = envelope.auth_info()?;
    let public_key = signer_public_key(&auth_info)?;
    let signature = envelope
        .signatures
        .first()
        .ok_or(TransactionError::MissingSignature)?;

    let sign_document = envelope.sign_document(chain_id, account_number);
    let valid = verify_sign_document(signature, &sign_document, &public_key)?;
    debug!(
        chain_id,
        account_number,
        signer = %public_key,
        valid,
        "verified envelope"
    );
    Ok(valid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::proto::{Any, SignMode, SignerInfo};
    use crate::crypto::keys::PrivateKey;
    use crate::transaction::builder::TransactionIntentBuilder;
    use crate::transaction::signing::{sign_transaction, SignedTransaction};

    fn signed(key: &PrivateKey) -> SignedTransaction {
        let intent = TransactionIntentBuilder::new()
            .chain_id("lum-network-1")
            .account_number(21)
            .sequence(2)
            .memo("verify me")
            .build()
            .unwrap();
        sign_transaction(&intent, key, SignMode::Direct).unwrap()
    }

    #[test]
    fn valid_envelope_verifies() {
        let key = PrivateKey::generate();
        let bytes = signed(&key).to_envelope_bytes();
        assert!(verify_envelope(&bytes, "lum-network-1", 21).unwrap());
    }

    #[test]
    fn wrong_chain_context_is_false() {
        let key = PrivateKey::generate();
        let bytes = signed(&key).to_envelope_bytes();
        assert!(!verify_envelope(&bytes, "lum-network-2", 21).unwrap());
        assert!(!verify_envelope(&bytes, "lum-network-1", 22).unwrap());
    }

    #[test]
    fn tampered_body_is_false() {
        let key = PrivateKey::generate();
        let mut env = signed(&key).to_envelope();
        let last = env.body_bytes.len() - 1;
        env.body_bytes[last] ^= 0x01;
        assert!(!verify_envelope(&env.encode(), "lum-network-1", 21).unwrap());
    }

    #[test]
    fn missing_signature_is_an_error() {
        let key = PrivateKey::generate();
        let mut env = signed(&key).to_envelope();
        env.signatures.clear();
        assert_eq!(
            verify_envelope(&env.encode(), "lum-network-1", 21),
            Err(TransactionError::MissingSignature)
        );
    }

    #[test]
    fn short_signature_is_an_error() {
        let key = PrivateKey::generate();
        let mut env = signed(&key).to_envelope();
        env.signatures[0].truncate(10);
        assert!(matches!(
            verify_envelope(&env.encode(), "lum-network-1", 21),
            Err(TransactionError::Signature(
                SignatureError::InvalidSignatureFormat { .. }
            ))
        ));
    }

    #[test]
    fn foreign_key_type_rejected() {
        let auth = AuthInfo {
            signer_infos: vec![SignerInfo {
                public_key: Some(Any {
                    type_url: "/cosmos.crypto.ed25519.PubKey".into(),
                    value: vec![],
                }),
                mode_info: None,
                sequence: 0,
            }],
            fee: None,
        };
        match signer_public_key(&auth) {
            Err(TransactionError::UnsupportedPublicKey(url)) => {
                assert_eq!(url, "/cosmos.crypto.ed25519.PubKey")
            }
            other => panic!("expected UnsupportedPublicKey, got {:?}", other),
        }
    }

    #[test]
    fn no_signer_info_rejected() {
        assert_eq!(
            signer_public_key(&AuthInfo::default()).err(),
            Some(TransactionError::MissingSignerInfo)
        );
    }

    #[test]
    fn sign_document_verification_is_key_bound() {
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        let tx = signed(&a);
        assert!(verify_sign_document(tx.signature.as_bytes(), &tx.sign_document, &a.public_key())
            .unwrap());
        assert!(!verify_sign_document(tx.signature.as_bytes(), &tx.sign_document, &b.public_key())
            .unwrap());
    }
}
