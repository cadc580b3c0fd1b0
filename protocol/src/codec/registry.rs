//! Type-URL registry for `Any`-wrapped messages.
//!
//! A transaction body carries its messages as `(type_url, bytes)` pairs. The
//! chain only executes type URLs it knows, so packing a message the node
//! cannot decode produces a transaction that is signed, broadcast, and then
//! rejected. The [`Registry`] catches that at build time: every message that
//! enters a body must have its type URL registered.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use prost::Message;
use thiserror::Error;

use super::proto::{Any, MsgDelegate, MsgSend, PubKey, TxBody};
use crate::config::{
    MSG_DELEGATE_TYPE_URL, MSG_SEND_TYPE_URL, SECP256K1_PUBKEY_TYPE_URL, TX_BODY_TYPE_URL,
};

/// Errors raised while encoding or decoding registered messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unregistered type url: {0}")]
    UnregisteredType(String),

    #[error("type url mismatch: expected {expected}, got {got}")]
    TypeUrlMismatch { expected: String, got: String },

    #[error("protobuf decode failed: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Associates a protobuf message type with its fully qualified type URL.
pub trait TypeUrl {
    const TYPE_URL: &'static str;
}

impl TypeUrl for TxBody {
    const TYPE_URL: &'static str = TX_BODY_TYPE_URL;
}

impl TypeUrl for PubKey {
    const TYPE_URL: &'static str = SECP256K1_PUBKEY_TYPE_URL;
}

impl TypeUrl for MsgSend {
    const TYPE_URL: &'static str = MSG_SEND_TYPE_URL;
}

impl TypeUrl for MsgDelegate {
    const TYPE_URL: &'static str = MSG_DELEGATE_TYPE_URL;
}

/// The set of type URLs a signer is willing to encode.
///
/// [`Registry::default`] knows the transaction body, the secp256k1 public
/// key and the bank/staking messages. Applications with custom modules
/// start from it and [`register`](Registry::register) their own types.
#[derive(Debug, Clone)]
pub struct Registry {
    type_urls: BTreeSet<String>,
}

impl Registry {
    /// A registry that knows nothing.
    pub fn empty() -> Self {
        Self {
            type_urls: BTreeSet::new(),
        }
    }

    /// Shared instance of the default registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::default)
    }

    /// Register a typed message.
    pub fn register<M: TypeUrl>(&mut self) -> &mut Self {
        self.type_urls.insert(M::TYPE_URL.to_string());
        self
    }

    /// Register a type URL without a Rust type behind it, for payloads the
    /// caller encodes itself.
    pub fn register_type_url(&mut self, type_url: impl Into<String>) -> &mut Self {
        self.type_urls.insert(type_url.into());
        self
    }

    pub fn is_registered(&self, type_url: &str) -> bool {
        self.type_urls.contains(type_url)
    }

    /// Registered type URLs, sorted.
    pub fn type_urls(&self) -> impl Iterator<Item = &str> {
        self.type_urls.iter().map(String::as_str)
    }

    /// Encode a message under its type URL. Fails if the URL is unknown.
    pub fn encode<M: Message + TypeUrl>(&self, message: &M) -> Result<Vec<u8>, CodecError> {
        self.encode_as(M::TYPE_URL, message)
    }

    /// Encode `message` under an explicit type URL.
    pub fn encode_as<M: Message>(&self, type_url: &str, message: &M) -> Result<Vec<u8>, CodecError> {
        self.ensure_registered(type_url)?;
        Ok(message.encode_to_vec())
    }

    /// Wrap a typed message in an `Any`.
    pub fn pack<M: Message + TypeUrl>(&self, message: &M) -> Result<Any, CodecError> {
        Ok(Any {
            type_url: M::TYPE_URL.to_string(),
            value: self.encode(message)?,
        })
    }

    /// Decode an `Any` back into `M`, checking the type URL first.
    pub fn unpack<M: Message + Default + TypeUrl>(&self, any: &Any) -> Result<M, CodecError> {
        if any.type_url != M::TYPE_URL {
            return Err(CodecError::TypeUrlMismatch {
                expected: M::TYPE_URL.to_string(),
                got: any.type_url.clone(),
            });
        }
        self.ensure_registered(&any.type_url)?;
        Ok(M::decode(any.value.as_slice())?)
    }

    /// Fail on the first message in `messages` whose type URL is unknown.
    pub fn check_all(&self, messages: &[Any]) -> Result<(), CodecError> {
        messages
            .iter()
            .try_for_each(|any| self.ensure_registered(&any.type_url))
    }

    fn ensure_registered(&self, type_url: &str) -> Result<(), CodecError> {
        if self.is_registered(type_url) {
            Ok(())
        } else {
            Err(CodecError::UnregisteredType(type_url.to_string()))
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register::<TxBody>()
            .register::<PubKey>()
            .register::<MsgSend>()
            .register::<MsgDelegate>();
        registry
    }
}
