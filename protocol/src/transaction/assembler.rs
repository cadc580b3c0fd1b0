//! Transaction envelope assembly and inspection.
//!
//! The envelope (`TxRaw`) is what gets broadcast: the body and auth-info
//! bytes exactly as they were signed, plus one signature per signer.
//! Assembly is unconditional. Nothing here checks that the signatures are
//! valid; that is [`super::verification`]'s job, or the node's.

use prost::Message;
use serde::Serialize;

use super::types::{Coin, SignDocument, TransactionError};
use crate::codec::proto::{mode_info, AuthInfo, PubKey, SignMode, TxBody, TxRaw};
use crate::codec::{CodecError, Registry};
use crate::crypto::hash::sha256;
use crate::crypto::signatures::Signature;

/// Decoded `TxRaw`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEnvelope {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}

/// Assemble and encode the broadcast envelope.
///
/// Body and auth-info bytes are copied from `sign_document` unchanged;
/// signatures keep their order.
pub fn assemble(sign_document: &SignDocument, signatures: &[Signature]) -> Vec<u8> {
    TxEnvelope::from_sign_document(sign_document, signatures).encode()
}

impl TxEnvelope {
    pub fn from_sign_document(sign_document: &SignDocument, signatures: &[Signature]) -> Self {
        Self {
            body_bytes: sign_document.body_bytes.clone(),
            auth_info_bytes: sign_document.auth_info_bytes.clone(),
            signatures: signatures.iter().map(Signature::to_vec).collect(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        TxRaw {
            body_bytes: self.body_bytes.clone(),
            auth_info_bytes: self.auth_info_bytes.clone(),
            signatures: self.signatures.clone(),
        }
        .encode_to_vec()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw = TxRaw::decode(bytes)?;
        Ok(Self {
            body_bytes: raw.body_bytes,
            auth_info_bytes: raw.auth_info_bytes,
            signatures: raw.signatures,
        })
    }

    /// Hash a node reports for this transaction: uppercase hex SHA-256 of
    /// the encoded envelope.
    pub fn tx_hash(&self) -> String {
        hex::encode_upper(sha256(&self.encode()))
    }

    pub fn body(&self) -> Result<TxBody, CodecError> {
        Ok(TxBody::decode(self.body_bytes.as_slice())?)
    }

    pub fn auth_info(&self) -> Result<AuthInfo, CodecError> {
        Ok(AuthInfo::decode(self.auth_info_bytes.as_slice())?)
    }

    /// Rebuild the sign document this envelope was signed under. The chain
    /// context is not part of the envelope and must be supplied.
    pub fn sign_document(&self, chain_id: &str, account_number: u64) -> SignDocument {
        SignDocument {
            body_bytes: self.body_bytes.clone(),
            auth_info_bytes: self.auth_info_bytes.clone(),
            chain_id: chain_id.to_string(),
            account_number,
        }
    }

    /// Human-readable summary of the envelope contents.
    pub fn describe(&self, registry: &Registry) -> Result<EnvelopeSummary, TransactionError> {
        let body = self.body()?;
        let auth_info = self.auth_info()?;
        let fee = auth_info.fee.unwrap_or_default();

        let signers = auth_info
            .signer_infos
            .iter()
            .map(|info| {
                let public_key = info
                    .public_key
                    .as_ref()
                    .filter(|any| any.type_url == crate::config::SECP256K1_PUBKEY_TYPE_URL)
                    .and_then(|any| PubKey::decode(any.value.as_slice()).ok())
                    .map(|pk| hex::encode(pk.key));
                let sign_mode = match info.mode_info.as_ref().and_then(|m| m.sum.as_ref()) {
                    Some(mode_info::Sum::Single(single)) => SignMode::try_from(single.mode)
                        .map(|m| format!("{:?}", m))
                        .unwrap_or_else(|_| format!("Unknown({})", single.mode)),
                    None => "None".to_string(),
                };
                SignerSummary {
                    public_key,
                    sequence: info.sequence,
                    sign_mode,
                }
            })
            .collect();

        Ok(EnvelopeSummary {
            tx_hash: self.tx_hash(),
            memo: body.memo,
            messages: body
                .messages
                .iter()
                .map(|any| MessageSummary {
                    type_url: any.type_url.clone(),
                    registered: registry.is_registered(&any.type_url),
                    value_len: any.value.len(),
                })
                .collect(),
            fee: fee.amount.into_iter().map(Coin::from).collect(),
            gas_limit: fee.gas_limit,
            signers,
            signatures: self.signatures.iter().map(hex::encode).collect(),
        })
    }
}

/// Serializable view of an envelope, for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeSummary {
    pub tx_hash: String,
    pub memo: String,
    pub messages: Vec<MessageSummary>,
    pub fee: Vec<Coin>,
    pub gas_limit: u64,
    pub signers: Vec<SignerSummary>,
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    pub type_url: String,
    pub registered: bool,
    pub value_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignerSummary {
    pub public_key: Option<String>,
    pub sequence: u64,
    pub sign_mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PrivateKey;
    use crate::crypto::signatures::sign;
    use crate::transaction::builder::TransactionIntentBuilder;
    use crate::transaction::sign_doc::build_sign_document;

    fn doc() -> SignDocument {
        SignDocument {
            body_bytes: vec![0x0a, 0x00, 0x12, 0x02, b'h', b'i'],
            auth_info_bytes: vec![0x12, 0x00],
            chain_id: "test-1".into(),
            account_number: 3,
        }
    }

    #[test]
    fn assemble_then_decode_reproduces_inputs() {
        let key = PrivateKey::generate();
        let sigs = vec![
            sign(&sha256(b"one"), &key).unwrap(),
            sign(&sha256(b"two"), &key).unwrap(),
        ];
        let bytes = assemble(&doc(), &sigs);
        let env = TxEnvelope::decode(&bytes).unwrap();
        assert_eq!(env.body_bytes, doc().body_bytes);
        assert_eq!(env.auth_info_bytes, doc().auth_info_bytes);
        assert_eq!(env.signatures, vec![sigs[0].to_vec(), sigs[1].to_vec()]);
        assert_eq!(env.encode(), bytes);
    }

    #[test]
    fn assembly_does_not_check_signatures() {
        let bogus = Signature::from_bytes(&[7u8; 64]).unwrap();
        let env = TxEnvelope::decode(&assemble(&doc(), &[bogus])).unwrap();
        assert_eq!(env.signatures, vec![vec![7u8; 64]]);
    }

    #[test]
    fn no_signatures_is_allowed() {
        let env = TxEnvelope::decode(&assemble(&doc(), &[])).unwrap();
        assert!(env.signatures.is_empty());
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(TxEnvelope::decode(&[0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn sign_document_rebuild() {
        let env = TxEnvelope::from_sign_document(&doc(), &[]);
        assert_eq!(env.sign_document("test-1", 3), doc());
    }

    #[test]
    fn tx_hash_is_uppercase_sha256() {
        let env = TxEnvelope::from_sign_document(&doc(), &[]);
        let hash = env.tx_hash();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hex::encode(sha256(&env.encode())).to_uppercase());
    }

    #[test]
    fn describe_reports_signer_and_fee() {
        let key = PrivateKey::generate();
        let intent = TransactionIntentBuilder::new()
            .chain_id("test-1")
            .sequence(5)
            .memo("rent")
            .fee_amount(Coin::new("500", "ulum"))
            .gas(100_000u64)
            .build()
            .unwrap();
        let sd = build_sign_document(&intent, &key.public_key(), SignMode::Direct).unwrap();
        let sig = sign(&sd.digest(), &key).unwrap();
        let env = TxEnvelope::from_sign_document(&sd, &[sig]);

        let summary = env.describe(Registry::global()).unwrap();
        assert_eq!(summary.memo, "rent");
        assert_eq!(summary.gas_limit, 100_000);
        assert_eq!(summary.fee, vec![Coin::new("500", "ulum")]);
        assert_eq!(summary.signers.len(), 1);
        assert_eq!(summary.signers[0].sequence, 5);
        assert_eq!(summary.signers[0].sign_mode, "Direct");
        assert_eq!(summary.signers[0].public_key, Some(key.public_key().to_hex()));
        assert_eq!(summary.signatures, vec![sig.to_hex()]);
    }
}
