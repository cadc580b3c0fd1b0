//! Signing and verification of arbitrary text messages.
//!
//! A message is never signed raw. It is placed in the memo of an otherwise
//! empty sign document (no messages, zero fee, gas `"0"`, empty chain id,
//! account number and sequence zero), and that document is signed exactly
//! like a transaction. The payload can therefore never be replayed as a
//! real transaction: no chain accepts an empty chain id.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::proto::SignMode;
use crate::config::{MESSAGE_SIGNING_GAS, MESSAGE_SIGNING_VERSION};
use crate::crypto::keys::{KeyError, PrivateKey, PublicKey};
use crate::crypto::signatures::{sign, verify, Signature, SignatureError};
use crate::identity::address::{address_from_public_key, decode_address, AddressError};
use crate::transaction::sign_doc::build_sign_document;
use crate::transaction::types::{Fee, SignDocument, TransactionError, TransactionIntent};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("unsupported message signing version {got:?}, expected {expected:?}")]
    UnsupportedVersion { expected: &'static str, got: String },

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Address(#[from] AddressError),
}

/// What produced a signed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSigner {
    /// Software key: mnemonic, raw key or keystore.
    Paper,
    Ledger,
    Extension,
}

/// A message together with everything needed to check who signed it.
///
/// Keys and signatures travel as hex in JSON. The structure deliberately
/// does not implement `PartialEq`: two signed messages are compared by
/// verifying them, not by comparing bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub address: String,
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
    pub msg: String,
    #[serde(rename = "sig", with = "hex::serde")]
    pub signature: Vec<u8>,
    pub version: String,
    pub signer: MessageSigner,
}

impl SignedMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The canonical sign document for `msg` signed by `public_key`.
pub fn message_sign_document(
    msg: &str,
    public_key: &PublicKey,
) -> Result<SignDocument, TransactionError> {
    let intent = TransactionIntent {
        messages: Vec::new(),
        memo: msg.to_string(),
        fee: Fee::new(Vec::new(), MESSAGE_SIGNING_GAS),
        sequence: 0,
        chain_id: String::new(),
        account_number: 0,
    };
    build_sign_document(&intent, public_key, SignMode::Direct)
}

/// Sign `msg`, attributing it to the `prefix` address of `private_key`.
pub fn sign_message(
    msg: &str,
    private_key: &PrivateKey,
    prefix: &str,
    signer: MessageSigner,
) -> Result<SignedMessage, MessageError> {
    let public_key = private_key.public_key();
    let address = address_from_public_key(&public_key, prefix)?;
    let sign_document = message_sign_document(msg, &public_key)?;
    let signature: Signature = sign(&sign_document.digest(), private_key)?;
    Ok(SignedMessage {
        address,
        public_key: public_key.to_bytes().to_vec(),
        msg: msg.to_string(),
        signature: signature.to_vec(),
        version: MESSAGE_SIGNING_VERSION.to_string(),
        signer,
    })
}

/// Check that `signed.msg` was signed by the key behind `signed.address`.
///
/// The address is checked first: if the public key does not derive to the
/// claimed address (under the claimed address's own prefix), the result is
/// `false` without looking at the signature at all. The key must be the
/// 33-byte compressed encoding the address was hashed from; an uncompressed
/// rendering of the same point is `false`.
///
/// # Errors
///
/// Unknown `version`, a signature that is not 64 bytes, or a public key
/// that does not parse.
pub fn verify_signed_message(signed: &SignedMessage) -> Result<bool, MessageError> {
    if signed.version != MESSAGE_SIGNING_VERSION {
        return Err(MessageError::UnsupportedVersion {
            expected: MESSAGE_SIGNING_VERSION,
            got: signed.version.clone(),
        });
    }
    let signature = Signature::from_bytes(&signed.signature)?;
    let public_key = PublicKey::from_bytes(&signed.public_key)?;

    let prefix = match decode_address(&signed.address) {
        Ok((prefix, _)) => prefix,
        Err(e) => {
            debug!(address = %signed.address, error = %e, "claimed address does not decode");
            return Ok(false);
        }
    };
    // The address commits to the compressed encoding. Any other rendering
    // of the same point does not hash to it.
    if signed.public_key.as_slice() != public_key.as_bytes() {
        warn!(
            claimed = %signed.address,
            key_len = signed.public_key.len(),
            "signed message public key is not in compressed form"
        );
        return Ok(false);
    }
    let derived = address_from_public_key(&public_key, &prefix)?;
    if derived != signed.address.to_lowercase() {
        warn!(
            claimed = %signed.address,
            derived = %derived,
            "signed message address does not match public key"
        );
        return Ok(false);
    }

    let sign_document = message_sign_document(&signed.msg, &public_key)?;
    Ok(verify(signature.as_bytes(), &sign_document.digest(), &public_key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HD_PATH;
    use crate::identity::mnemonic::private_key_from_mnemonic;

    const SURROUND: &str = "surround miss nominee dream gap cross assault thank captain prosper drop duty group candy wealth weather scale put";
    const MESSAGE: &str = "Lum network is an awesome decentralized protocol";

    fn surround_key() -> PrivateKey {
        private_key_from_mnemonic(SURROUND, DEFAULT_HD_PATH).unwrap()
    }

    #[test]
    fn canonical_message_document() {
        let doc = message_sign_document(MESSAGE, &surround_key().public_key()).unwrap();
        assert_eq!(
            hex::encode(doc.to_signable_bytes()),
            "0a3212304c756d206e6574776f726b20697320616e20617765736f6d6520646563656e7472616c697a65642070726f746f636f6c12520a4e0a460a1f2f636f736d6f732e63727970746f2e736563703235366b312e5075624b657912230a210329049361628136ce07e3d7ab2be7cb250c531cbfcbc1102b46edc71cda4917c512040a0208011200"
        );
    }

    #[test]
    fn known_message_signature() {
        let signed = sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        assert_eq!(signed.address, "lum1p2lvfwcm8gs75geg3sy5h4rl4q67gtlnuk0lnl");
        assert_eq!(
            hex::encode(&signed.signature),
            "71307a5932e418cb2f978c3b61c8f0ad5e08d9f24328456f81e5411e00c3b90414dc5ec1431a1cb5c10a287cdb5a351112446549007085f415ff27b93e1cb52f"
        );
        assert_eq!(signed.version, "1");
        assert!(verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn altered_message_fails() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.msg = "Wrong message input".into();
        assert!(!verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn substituted_public_key_fails() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.public_key = PrivateKey::generate().public_key().to_bytes().to_vec();
        assert!(!verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn substituted_address_fails() {
        let other = PrivateKey::generate();
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.address = address_from_public_key(&other.public_key(), "lum").unwrap();
        assert!(!verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn address_mismatch_short_circuits_even_with_valid_signature() {
        // Key and signature are consistent; only the address lies. Still false.
        let key = surround_key();
        let mut signed = sign_message(MESSAGE, &key, "lum", MessageSigner::Paper).unwrap();
        let doc = message_sign_document(MESSAGE, &key.public_key()).unwrap();
        assert!(verify(&signed.signature, &doc.digest(), &key.public_key()).unwrap());
        signed.address = "lum1vxyzk6fcnc5fcmh2j7h65nfzzdnp07wqpnfste".into();
        assert!(!verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn other_prefix_is_honoured() {
        let signed =
            sign_message(MESSAGE, &surround_key(), "cosmos", MessageSigner::Paper).unwrap();
        assert!(signed.address.starts_with("cosmos1"));
        assert!(verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn garbage_address_is_false() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.address = "definitely-not-bech32".into();
        assert!(!verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn unknown_version_is_an_error() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.version = "2".into();
        assert!(matches!(
            verify_signed_message(&signed),
            Err(MessageError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn truncated_signature_is_an_error() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.signature.pop();
        assert!(matches!(
            verify_signed_message(&signed),
            Err(MessageError::Signature(SignatureError::InvalidSignatureFormat { .. }))
        ));
    }

    #[test]
    fn malformed_public_key_is_an_error() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.public_key = vec![0x02; 10];
        assert!(matches!(
            verify_signed_message(&signed),
            Err(MessageError::Key(KeyError::InvalidKeyFormat(_)))
        ));
    }

    #[test]
    fn compact_tagged_public_key_is_an_error() {
        let mut signed =
            sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        signed.public_key[0] = 0x05;
        assert!(matches!(
            verify_signed_message(&signed),
            Err(MessageError::Key(KeyError::InvalidKeyFormat(_)))
        ));
    }

    #[test]
    fn uncompressed_public_key_does_not_match_address() {
        let key = surround_key();
        let mut signed = sign_message(MESSAGE, &key, "lum", MessageSigner::Paper).unwrap();
        signed.public_key = key.public_key().to_uncompressed();
        assert_eq!(signed.public_key.len(), 65);
        assert!(!verify_signed_message(&signed).unwrap());
    }

    #[test]
    fn json_roundtrip_keeps_fields() {
        let signed = sign_message(MESSAGE, &surround_key(), "lum", MessageSigner::Paper).unwrap();
        let json = signed.to_json().unwrap();
        assert!(json.contains("\"publicKey\""));
        assert!(json.contains("\"sig\""));
        assert!(json.contains("\"signer\": \"paper\""));

        let back = SignedMessage::from_json(&json).unwrap();
        assert_eq!(back.address, signed.address);
        assert_eq!(back.public_key, signed.public_key);
        assert_eq!(back.msg, signed.msg);
        assert_eq!(back.signature, signed.signature);
        assert_eq!(back.version, signed.version);
        assert_eq!(back.signer, signed.signer);
        assert!(verify_signed_message(&back).unwrap());
    }
}
