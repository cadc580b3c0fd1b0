//! # Message Signing
//!
//! Proof of address ownership without broadcasting anything. A wallet signs
//! a short text by wrapping it in a transaction-shaped document that no
//! chain would ever accept, and anyone holding the resulting
//! [`SignedMessage`] can check the claim offline.

pub mod signed;

pub use signed::{
    message_sign_document, sign_message, verify_signed_message, MessageError, MessageSigner,
    SignedMessage,
};
