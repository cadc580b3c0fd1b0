//! # Cryptographic Primitives
//!
//! Everything that touches key material or hashes lives here:
//!
//! - **secp256k1 ECDSA** for signatures, via `k256`.
//! - **SHA-256** for signing digests.
//! - **RIPEMD-160** for account hashes.
//!
//! Everything is a thin, typed wrapper around audited implementations. The
//! wrappers exist to pin down the exact encodings a Cosmos chain expects
//! (compressed keys, 64-byte low-S signatures), not to reimplement anything.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{hash160, ripemd160, sha256};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use signatures::{sign, verify, Signature, SignatureError};
