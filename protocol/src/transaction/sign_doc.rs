//! Sign-document construction.
//!
//! Turns a [`TransactionIntent`] plus the signer's public key into the
//! canonical [`SignDocument`]: the protobuf-encoded body, the encoded auth
//! info, and the chain context. Everything here is a pure function of its
//! inputs, so the same intent and key always sign the same bytes.

use prost::Message;
use tracing::debug;

use super::types::{Fee, SignDocument, TransactionError, TransactionIntent};
use crate::codec::proto::{mode_info, Any, AuthInfo, ModeInfo, PubKey, SignMode, SignerInfo, TxBody};
use crate::codec::{Registry, TypeUrl};
use crate::crypto::keys::PublicKey;

/// Encode single-signer auth info: the signer's key wrapped as a
/// `/cosmos.crypto.secp256k1.PubKey`, the signing mode, the sequence, and
/// the fee.
///
/// The key is always embedded compressed, whatever form it was parsed from.
///
/// # Errors
///
/// `InvalidFeeFormat` if `fee.gas` is not a non-negative integer within
/// 2^53 - 1.
pub fn build_auth_info(
    public_key: &PublicKey,
    fee: &Fee,
    sequence: u64,
    sign_mode: SignMode,
) -> Result<Vec<u8>, TransactionError> {
    let fee = fee.to_proto()?;
    let public_key = Any {
        type_url: PubKey::TYPE_URL.to_string(),
        value: PubKey {
            key: public_key.as_bytes().to_vec(),
        }
        .encode_to_vec(),
    };
    let auth_info = AuthInfo {
        signer_infos: vec![SignerInfo {
            public_key: Some(public_key),
            mode_info: Some(ModeInfo {
                sum: Some(mode_info::Sum::Single(mode_info::Single {
                    mode: sign_mode as i32,
                })),
            }),
            sequence,
        }],
        fee: Some(fee),
    };
    Ok(auth_info.encode_to_vec())
}

/// Build the sign document for `intent` using the default registry.
pub fn build_sign_document(
    intent: &TransactionIntent,
    public_key: &PublicKey,
    sign_mode: SignMode,
) -> Result<SignDocument, TransactionError> {
    build_sign_document_with(Registry::global(), intent, public_key, sign_mode)
}

/// Build the sign document, checking message type URLs against `registry`.
///
/// # Errors
///
/// - `Codec(UnregisteredType)` if a message's type URL is unknown.
/// - `InvalidFeeFormat` from [`build_auth_info`].
pub fn build_sign_document_with(
    registry: &Registry,
    intent: &TransactionIntent,
    public_key: &PublicKey,
    sign_mode: SignMode,
) -> Result<SignDocument, TransactionError> {
    registry.check_all(&intent.messages)?;
    let body = TxBody {
        messages: intent.messages.clone(),
        memo: intent.memo.clone(),
    };
    let body_bytes = registry.encode(&body)?;
    let auth_info_bytes = build_auth_info(public_key, &intent.fee, intent.sequence, sign_mode)?;

    debug!(
        chain_id = %intent.chain_id,
        account_number = intent.account_number,
        sequence = intent.sequence,
        messages = intent.messages.len(),
        body_len = body_bytes.len(),
        auth_info_len = auth_info_bytes.len(),
        "built sign document"
    );

    Ok(SignDocument {
        body_bytes,
        auth_info_bytes,
        chain_id: intent.chain_id.clone(),
        account_number: intent.account_number,
    })
}

/// Serialize the sign document itself. These bytes are hashed and signed.
pub fn to_signable_bytes(sign_document: &SignDocument) -> Vec<u8> {
    sign_document.to_signable_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::proto::{Coin as ProtoCoin, MsgSend};
    use crate::codec::CodecError;
    use crate::transaction::types::Coin;

    const ABANDON_PUB: &str = "02d42e5efac58b0fca5a815e242fce5da286471240ca04cde1448cfacc6fe8c0b8";
    const GOLDEN_BODY: &str = "0a85010a1c2f636f736d6f732e62616e6b2e763162657461312e4d736753656e6412650a2a6c756d317678797a6b3666636e633566636d68326a376836356e667a7a646e7030377771706e66737465122a6c756d316635646e727530666c64716677326e347a6a7a6361346d7868687a71773765763337736b33791a0b0a04756c756d1203313030";
    const GOLDEN_AUTH: &str = "0a4e0a460a1f2f636f736d6f732e63727970746f2e736563703235366b312e5075624b657912230a2102d42e5efac58b0fca5a815e242fce5da286471240ca04cde1448cfacc6fe8c0b812040a020801120410c09a0c";

    fn pk() -> PublicKey {
        PublicKey::from_hex(ABANDON_PUB).unwrap()
    }

    fn golden_intent() -> TransactionIntent {
        let send = MsgSend {
            from_address: "lum1vxyzk6fcnc5fcmh2j7h65nfzzdnp07wqpnfste".into(),
            to_address: "lum1f5dnru0fldqfw2n4zjzca4mxhhzqw7ev37sk3y".into(),
            amount: vec![ProtoCoin {
                denom: "ulum".into(),
                amount: "100".into(),
            }],
        };
        TransactionIntent {
            messages: vec![Registry::global().pack(&send).unwrap()],
            memo: String::new(),
            fee: Fee::new(vec![], "200000"),
            sequence: 0,
            chain_id: "test-1".into(),
            account_number: 1,
        }
    }

    #[test]
    fn golden_body_and_auth_info() {
        let doc = build_sign_document(&golden_intent(), &pk(), SignMode::Direct).unwrap();
        assert_eq!(hex::encode(&doc.body_bytes), GOLDEN_BODY);
        assert_eq!(hex::encode(&doc.auth_info_bytes), GOLDEN_AUTH);
        assert_eq!(doc.chain_id, "test-1");
        assert_eq!(doc.account_number, 1);
    }

    #[test]
    fn golden_signable_bytes() {
        let doc = build_sign_document(&golden_intent(), &pk(), SignMode::Direct).unwrap();
        let expected = format!("0a8801{}1256{}1a06746573742d312001", GOLDEN_BODY, GOLDEN_AUTH);
        assert_eq!(hex::encode(to_signable_bytes(&doc)), expected);
        assert_eq!(
            hex::encode(doc.digest()),
            "e5e121d37d512ac7361d5169955db025a1025d26808dd371845a67d1afbeb109"
        );
    }

    #[test]
    fn building_twice_is_byte_identical() {
        let a = build_sign_document(&golden_intent(), &pk(), SignMode::Direct).unwrap();
        let b = build_sign_document(&golden_intent(), &pk(), SignMode::Direct).unwrap();
        assert_eq!(a, b);
        assert_eq!(to_signable_bytes(&a), to_signable_bytes(&b));
    }

    #[test]
    fn uncompressed_key_embeds_compressed() {
        let uncompressed = PublicKey::from_bytes(&pk().to_uncompressed()).unwrap();
        let fee = Fee::new(vec![], "200000");
        assert_eq!(
            build_auth_info(&uncompressed, &fee, 0, SignMode::Direct).unwrap(),
            build_auth_info(&pk(), &fee, 0, SignMode::Direct).unwrap()
        );
    }

    #[test]
    fn sign_mode_changes_auth_info() {
        let fee = Fee::new(vec![], "1");
        let direct = build_auth_info(&pk(), &fee, 0, SignMode::Direct).unwrap();
        let amino = build_auth_info(&pk(), &fee, 0, SignMode::LegacyAminoJson).unwrap();
        assert_ne!(direct, amino);
    }

    #[test]
    fn auth_info_decodes_back() {
        let fee = Fee::new(vec![Coin::new("25", "ulum")], "90000");
        let bytes = build_auth_info(&pk(), &fee, 12, SignMode::Direct).unwrap();
        let auth = AuthInfo::decode(bytes.as_slice()).unwrap();
        let signer = &auth.signer_infos[0];
        assert_eq!(signer.sequence, 12);
        let key = signer.public_key.as_ref().unwrap();
        assert_eq!(key.type_url, "/cosmos.crypto.secp256k1.PubKey");
        assert_eq!(PubKey::decode(key.value.as_slice()).unwrap().key, pk().to_bytes());
        let fee = auth.fee.unwrap();
        assert_eq!(fee.gas_limit, 90_000);
        assert_eq!(fee.amount[0].amount, "25");
    }

    #[test]
    fn gas_overflow_fails_auth_info() {
        let fee = Fee::new(vec![], "9007199254740992");
        assert!(matches!(
            build_auth_info(&pk(), &fee, 0, SignMode::Direct),
            Err(TransactionError::InvalidFeeFormat { .. })
        ));
    }

    #[test]
    fn unregistered_message_rejected() {
        let mut intent = golden_intent();
        intent.messages.push(Any {
            type_url: "/unknown.Msg".into(),
            value: vec![1],
        });
        match build_sign_document(&intent, &pk(), SignMode::Direct) {
            Err(TransactionError::Codec(CodecError::UnregisteredType(url))) => {
                assert_eq!(url, "/unknown.Msg")
            }
            other => panic!("expected UnregisteredType, got {:?}", other),
        }
    }

    #[test]
    fn custom_registry_accepts_custom_messages() {
        let mut registry = Registry::default();
        registry.register_type_url("/unknown.Msg");
        let mut intent = golden_intent();
        intent.messages.push(Any {
            type_url: "/unknown.Msg".into(),
            value: vec![1],
        });
        assert!(build_sign_document_with(&registry, &intent, &pk(), SignMode::Direct).is_ok());
    }
}
