// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lum Protocol - Signing Core
//!
//! Offline transaction and message signing for the Lum Network, a Cosmos
//! SDK chain. Nothing in this crate talks to a node: it turns intents into
//! bytes, bytes into signatures, and signatures into broadcast-ready
//! envelopes. Getting the bytes right is the whole job. The chain hashes
//! exactly what it receives, so one misplaced varint is a rejected
//! transaction.
//!
//! ## Architecture
//!
//! - **config** - Protocol constants and the runtime `SigningConfig`.
//! - **crypto** - secp256k1 keys, low-S ECDSA, SHA-256/RIPEMD-160.
//! - **codec** - Protobuf schemas (prost) and the `Any` type-URL registry.
//! - **identity** - Bech32 addresses, BIP-39 mnemonics, v1 keystores.
//! - **transaction** - Sign documents, signing, envelopes, verification.
//! - **message** - Off-chain message signing for proof of ownership.
//! - **wallet** - The `Signer` abstraction over all key sources.
//!
//! ## Design Philosophy
//!
//! 1. Bytes that were signed are never re-encoded. They are copied.
//! 2. A well-formed but wrong signature is `Ok(false)`, never an error.
//! 3. Private keys are zeroized on drop and never printed.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod message;
pub mod transaction;
pub mod wallet;
