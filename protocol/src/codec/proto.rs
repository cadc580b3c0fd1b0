//! Protobuf message definitions for the Cosmos SDK schemas the signer
//! touches.
//!
//! These are written out by hand rather than generated: the set is small,
//! stable, and keeping it in-tree avoids a `protoc` build dependency. Field
//! numbers and types match the upstream `.proto` files exactly; any drift
//! here changes sign bytes and every signature with them.

pub use prost_types::Any;

// ---------------------------------------------------------------------------
// cosmos.base.v1beta1
// ---------------------------------------------------------------------------

/// `cosmos.base.v1beta1.Coin`.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: ::prost::alloc::string::String,
    /// Arbitrary-precision integer, as a decimal string.
    #[prost(string, tag = "2")]
    pub amount: ::prost::alloc::string::String,
}

// ---------------------------------------------------------------------------
// cosmos.crypto.secp256k1
// ---------------------------------------------------------------------------

/// `cosmos.crypto.secp256k1.PubKey`: a 33-byte compressed point.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}

// ---------------------------------------------------------------------------
// cosmos.bank.v1beta1 / cosmos.staking.v1beta1
// ---------------------------------------------------------------------------

/// `cosmos.bank.v1beta1.MsgSend`.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgSend {
    #[prost(string, tag = "1")]
    pub from_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub to_address: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub amount: ::prost::alloc::vec::Vec<Coin>,
}

/// `cosmos.staking.v1beta1.MsgDelegate`.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgDelegate {
    #[prost(string, tag = "1")]
    pub delegator_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub validator_address: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub amount: ::core::option::Option<Coin>,
}

// ---------------------------------------------------------------------------
// cosmos.tx.signing.v1beta1
// ---------------------------------------------------------------------------

/// `cosmos.tx.signing.v1beta1.SignMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SignMode {
    Unspecified = 0,
    Direct = 1,
    Textual = 2,
    LegacyAminoJson = 127,
}

// ---------------------------------------------------------------------------
// cosmos.tx.v1beta1
// ---------------------------------------------------------------------------

/// `cosmos.tx.v1beta1.TxBody`. Only the fields a wallet sets are modelled.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxBody {
    #[prost(message, repeated, tag = "1")]
    pub messages: ::prost::alloc::vec::Vec<Any>,
    #[prost(string, tag = "2")]
    pub memo: ::prost::alloc::string::String,
}

/// `cosmos.tx.v1beta1.AuthInfo`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthInfo {
    #[prost(message, repeated, tag = "1")]
    pub signer_infos: ::prost::alloc::vec::Vec<SignerInfo>,
    #[prost(message, optional, tag = "2")]
    pub fee: ::core::option::Option<Fee>,
}

/// `cosmos.tx.v1beta1.SignerInfo`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignerInfo {
    #[prost(message, optional, tag = "1")]
    pub public_key: ::core::option::Option<Any>,
    #[prost(message, optional, tag = "2")]
    pub mode_info: ::core::option::Option<ModeInfo>,
    #[prost(uint64, tag = "3")]
    pub sequence: u64,
}

/// `cosmos.tx.v1beta1.ModeInfo`. Multisig is not supported.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ModeInfo {
    #[prost(oneof = "mode_info::Sum", tags = "1")]
    pub sum: ::core::option::Option<mode_info::Sum>,
}

pub mod mode_info {
    /// `ModeInfo.Single`.
    #[derive(Clone, PartialEq, Eq, ::prost::Message)]
    pub struct Single {
        #[prost(enumeration = "super::SignMode", tag = "1")]
        pub mode: i32,
    }

    #[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
    pub enum Sum {
        #[prost(message, tag = "1")]
        Single(Single),
    }
}

/// `cosmos.tx.v1beta1.Fee`. Payer and granter are left unset.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Fee {
    #[prost(message, repeated, tag = "1")]
    pub amount: ::prost::alloc::vec::Vec<Coin>,
    #[prost(uint64, tag = "2")]
    pub gas_limit: u64,
}

/// `cosmos.tx.v1beta1.SignDoc`: the bytes that get hashed and signed in
/// `SIGN_MODE_DIRECT`.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct SignDoc {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "3")]
    pub chain_id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "4")]
    pub account_number: u64,
}

/// `cosmos.tx.v1beta1.TxRaw`: the broadcast envelope.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct TxRaw {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn defaults_encode_to_nothing() {
        assert!(SignDoc::default().encode_to_vec().is_empty());
        assert!(TxBody::default().encode_to_vec().is_empty());
    }

    #[test]
    fn empty_fee_is_still_present_in_auth_info() {
        let auth = AuthInfo {
            signer_infos: vec![],
            fee: Some(Fee::default()),
        };
        assert_eq!(hex::encode(auth.encode_to_vec()), "1200");
    }

    #[test]
    fn mode_info_single_direct() {
        let mode = ModeInfo {
            sum: Some(mode_info::Sum::Single(mode_info::Single {
                mode: SignMode::Direct as i32,
            })),
        };
        assert_eq!(hex::encode(mode.encode_to_vec()), "0a020801");
    }

    #[test]
    fn sign_mode_enumerants() {
        assert_eq!(SignMode::Direct as i32, 1);
        assert_eq!(SignMode::LegacyAminoJson as i32, 127);
        assert_eq!(SignMode::try_from(2).ok(), Some(SignMode::Textual));
    }

    #[test]
    fn tx_raw_decodes_what_it_encodes() {
        let raw = TxRaw {
            body_bytes: vec![1, 2, 3],
            auth_info_bytes: vec![4],
            signatures: vec![vec![9; 64], vec![]],
        };
        let decoded = TxRaw::decode(raw.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, raw);
    }
}
