//! # Transaction Module
//!
//! Construction, signing, assembly and verification of Cosmos SDK
//! transactions in `SIGN_MODE_DIRECT`.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        - Coin, Fee, TransactionIntent, SignDocument, TransactionError
//! builder.rs      - Fluent TransactionIntentBuilder
//! sign_doc.rs     - Auth-info and sign-document encoding
//! signing.rs      - Digest-and-sign over the sign document
//! assembler.rs    - TxRaw envelope assembly, decoding and inspection
//! verification.rs - Signature checks for sign documents and envelopes
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: use [`TransactionIntentBuilder`] to fix messages, fee and
//!    chain context.
//! 2. **Encode**: [`build_sign_document`] produces body and auth-info bytes.
//! 3. **Sign**: [`sign_document`] signs `sha256(SignDoc bytes)`.
//! 4. **Assemble**: [`assemble`] wraps body, auth info and signatures into
//!    the broadcast envelope.
//! 5. **Verify**: [`verify_envelope`] repeats the node's signature check.
//!
//! ## Design Decisions
//!
//! - Gas is carried as a string and must fit in 53 bits. Larger values are
//!   rejected, never rounded.
//! - Body and auth-info bytes are produced once and then copied verbatim.
//!   Re-encoding a decoded message is never assumed to reproduce the same
//!   bytes.

pub mod assembler;
pub mod builder;
pub mod sign_doc;
pub mod signing;
pub mod types;
pub mod verification;

pub use assembler::{assemble, EnvelopeSummary, TxEnvelope};
pub use builder::TransactionIntentBuilder;
pub use sign_doc::{build_auth_info, build_sign_document, build_sign_document_with, to_signable_bytes};
pub use signing::{sign_document, sign_transaction, SignedTransaction};
pub use types::{parse_gas, Coin, Fee, SignDocument, TransactionError, TransactionIntent};
pub use verification::{signer_public_key, verify_envelope, verify_sign_document};
