//! # Identity Module
//!
//! Where keys come from and what they are called.
//!
//! The identity stack is layered:
//!
//! 1. **Mnemonic**: a BIP-39 phrase, stretched to a seed and walked down the
//!    Lum HD path (`m/44'/837'/...`) to a secp256k1 private key.
//! 2. **Keystore**: the same private key at rest, encrypted under a
//!    password in the v1 JSON format Lum wallets export.
//! 3. **Address**: the bech32 rendering (`lum1...`) of the hash of a public
//!    key. This is what users see, share, and paste into payment fields.
//!
//! ## Design Decisions
//!
//! - Bech32 (not Bech32m) for addresses, matching every Cosmos SDK chain.
//! - Derivation uses the empty BIP-39 passphrase. Wallets that set one are
//!   not interoperable with Lum's reference wallets, so we don't offer it.

pub mod address;
pub mod keystore;
pub mod mnemonic;

pub use address::{address_from_public_key, decode_address, is_address_valid, AddressError};
pub use keystore::{Keystore, KeystoreError};
pub use mnemonic::{
    generate_mnemonic, is_mnemonic_valid, private_key_from_mnemonic, MnemonicError,
};
