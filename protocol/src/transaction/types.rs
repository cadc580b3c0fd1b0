//! Core value types for the signing pipeline: amounts, fees, the caller's
//! transaction intent and the derived sign document.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::proto::{self, Any};
use crate::codec::CodecError;
use crate::config::MAX_SAFE_GAS;
use crate::crypto::hash::sha256;
use crate::crypto::keys::KeyError;
use crate::crypto::signatures::SignatureError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while building, signing or checking a transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The gas string is not a non-negative integer within 2^53 - 1.
    #[error("invalid fee format: gas {gas:?} {reason}")]
    InvalidFeeFormat { gas: String, reason: &'static str },

    /// A required builder field was never set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The auth info names no signer.
    #[error("auth info carries no signer info")]
    MissingSignerInfo,

    /// The signer's key is not a single secp256k1 key.
    #[error("unsupported signer public key type: {0}")]
    UnsupportedPublicKey(String),

    /// The envelope has no signatures.
    #[error("transaction envelope carries no signature")]
    MissingSignature,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

// ---------------------------------------------------------------------------
// Coin
// ---------------------------------------------------------------------------

/// An amount of a single denomination. The amount stays a decimal string
/// because on-chain integers are arbitrary precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn to_proto(&self) -> proto::Coin {
        proto::Coin {
            denom: self.denom.clone(),
            amount: self.amount.clone(),
        }
    }
}

impl From<proto::Coin> for Coin {
    fn from(c: proto::Coin) -> Self {
        Self {
            denom: c.denom,
            amount: c.amount,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

// ---------------------------------------------------------------------------
// Fee
// ---------------------------------------------------------------------------

/// Fee amounts plus a gas limit written as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

impl Fee {
    pub fn new(amount: Vec<Coin>, gas: impl Into<String>) -> Self {
        Self {
            amount,
            gas: gas.into(),
        }
    }

    /// The gas limit as an integer. See [`parse_gas`].
    pub fn gas_limit(&self) -> Result<u64, TransactionError> {
        parse_gas(&self.gas)
    }

    pub fn to_proto(&self) -> Result<proto::Fee, TransactionError> {
        Ok(proto::Fee {
            amount: self.amount.iter().map(Coin::to_proto).collect(),
            gas_limit: self.gas_limit()?,
        })
    }
}

/// Parse a gas string: ASCII digits only, value at most 2^53 - 1.
///
/// Signs, whitespace, decimals and exponents are all rejected rather than
/// coerced.
pub fn parse_gas(gas: &str) -> Result<u64, TransactionError> {
    let invalid = |reason| TransactionError::InvalidFeeFormat {
        gas: gas.to_string(),
        reason,
    };
    if gas.is_empty() || !gas.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("is not a non-negative integer"));
    }
    let value: u64 = gas.parse().map_err(|_| invalid("exceeds 2^53 - 1"))?;
    if value > MAX_SAFE_GAS {
        return Err(invalid("exceeds 2^53 - 1"));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// TransactionIntent
// ---------------------------------------------------------------------------

/// Everything a caller decides about a transaction before any key is
/// involved.
///
/// Messages are opaque `Any` payloads. Build them with
/// [`Registry::pack`](crate::codec::Registry::pack) so their type URLs are
/// checked.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionIntent {
    pub messages: Vec<Any>,
    pub memo: String,
    pub fee: Fee,
    /// Signer's account sequence, incremented by the chain per transaction.
    pub sequence: u64,
    pub chain_id: String,
    pub account_number: u64,
}

// ---------------------------------------------------------------------------
// SignDocument
// ---------------------------------------------------------------------------

/// The encoded parts of a transaction plus the chain context they are
/// signed under.
///
/// Identical inputs always produce identical bytes here. Nothing in the
/// encoding depends on map order, time, or randomness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignDocument {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub chain_id: String,
    pub account_number: u64,
}

impl SignDocument {
    pub fn to_proto(&self) -> proto::SignDoc {
        proto::SignDoc {
            body_bytes: self.body_bytes.clone(),
            auth_info_bytes: self.auth_info_bytes.clone(),
            chain_id: self.chain_id.clone(),
            account_number: self.account_number,
        }
    }

    /// Protobuf `SignDoc` bytes. This, not the body, is what gets signed.
    pub fn to_signable_bytes(&self) -> Vec<u8> {
        prost::Message::encode_to_vec(&self.to_proto())
    }

    /// SHA-256 of [`to_signable_bytes`](Self::to_signable_bytes).
    pub fn digest(&self) -> [u8; 32] {
        sha256(&self.to_signable_bytes())
    }
}

impl From<proto::SignDoc> for SignDocument {
    fn from(doc: proto::SignDoc) -> Self {
        Self {
            body_bytes: doc.body_bytes,
            auth_info_bytes: doc.auth_info_bytes,
            chain_id: doc.chain_id,
            account_number: doc.account_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_boundary_accepted() {
        assert_eq!(parse_gas("9007199254740991").unwrap(), 9_007_199_254_740_991);
        assert_eq!(parse_gas("0").unwrap(), 0);
        assert_eq!(parse_gas("200000").unwrap(), 200_000);
    }

    #[test]
    fn gas_just_past_boundary_rejected() {
        match parse_gas("9007199254740992") {
            Err(TransactionError::InvalidFeeFormat { gas, .. }) => {
                assert_eq!(gas, "9007199254740992")
            }
            other => panic!("expected InvalidFeeFormat, got {:?}", other),
        }
    }

    #[test]
    fn gas_beyond_u64_rejected() {
        assert!(matches!(
            parse_gas("99999999999999999999999"),
            Err(TransactionError::InvalidFeeFormat { .. })
        ));
    }

    #[test]
    fn malformed_gas_rejected() {
        for bad in ["", "-1", "+5", " 10", "10 ", "1.5", "1e6", "0x10", "abc"] {
            assert!(
                matches!(parse_gas(bad), Err(TransactionError::InvalidFeeFormat { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn fee_to_proto_carries_gas_and_amounts() {
        let fee = Fee::new(vec![Coin::new("5000", "ulum")], "80000");
        let p = fee.to_proto().unwrap();
        assert_eq!(p.gas_limit, 80_000);
        assert_eq!(p.amount[0].denom, "ulum");
        assert_eq!(p.amount[0].amount, "5000");
    }

    #[test]
    fn coin_display() {
        assert_eq!(Coin::new("100", "ulum").to_string(), "100ulum");
    }

    #[test]
    fn sign_document_proto_roundtrip() {
        let doc = SignDocument {
            body_bytes: vec![1, 2],
            auth_info_bytes: vec![3],
            chain_id: "lum-network-1".into(),
            account_number: 42,
        };
        let back = SignDocument::from(doc.to_proto());
        assert_eq!(back, doc);
        assert_eq!(doc.digest(), sha256(&doc.to_signable_bytes()));
    }
}
