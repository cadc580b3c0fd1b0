//! # Protocol Configuration & Constants
//!
//! Every magic number the signing pipeline depends on lives here: address
//! prefixes, derivation paths, type URLs, key and signature sizes, keystore
//! parameters. A Lum node rejects anything that drifts from these values,
//! so treat them as part of the wire format.
//!
//! The one runtime knob is [`SigningConfig`], a serde-friendly bundle of
//! defaults that front ends load from JSON and override from flags.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Bech32 human-readable prefix of Lum account addresses (`lum1...`).
pub const LUM_BECH32_PREFIX_ACC_ADDR: &str = "lum";

/// Base denomination. One LUM is 10^6 ulum.
pub const LUM_DENOM: &str = "ulum";

/// SLIP-44 coin type registered for Lum Network.
pub const LUM_COIN_TYPE: u32 = 837;

/// Default derivation path: first account, first external address.
pub const DEFAULT_HD_PATH: &str = "m/44'/837'/0'/0/0";

/// Builds the BIP-44 path for a given account and address index.
///
/// ```
/// use lum_protocol::config::{lum_hd_path, DEFAULT_HD_PATH};
///
/// assert_eq!(lum_hd_path(0, 0), DEFAULT_HD_PATH);
/// assert_eq!(lum_hd_path(2, 7), "m/44'/837'/2'/0/7");
/// ```
pub fn lum_hd_path(account: u32, index: u32) -> String {
    format!("m/44'/{}'/{}'/0/{}", LUM_COIN_TYPE, account, index)
}

// ---------------------------------------------------------------------------
// Type URLs
// ---------------------------------------------------------------------------

/// Type URL of the transaction body.
pub const TX_BODY_TYPE_URL: &str = "/cosmos.tx.v1beta1.TxBody";

/// Type URL wrapping a compressed secp256k1 public key inside auth info.
pub const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// Bank module transfer.
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Staking module delegation.
pub const MSG_DELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgDelegate";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// secp256k1 private scalar length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// SEC1 compressed public key length (`02`/`03` prefix + x).
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// SEC1 uncompressed public key length (`04` prefix + x + y).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Fixed-width `r || s` signature length. No recovery byte, no DER.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-256 digest length; the signature engine only signs digests of this size.
pub const DIGEST_LENGTH: usize = 32;

/// Length of the account hash behind a bech32 address (RIPEMD-160 output).
pub const ADDRESS_HASH_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Largest gas limit accepted: 2^53 - 1.
///
/// Gas travels through JSON tooling as a number, and anything beyond the
/// double-precision safe range silently rounds. We refuse it outright.
pub const MAX_SAFE_GAS: u64 = (1 << 53) - 1;

/// Gas limit used when a caller does not pick one.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

// ---------------------------------------------------------------------------
// Message Signing
// ---------------------------------------------------------------------------

/// Format version stamped on every signed message.
pub const MESSAGE_SIGNING_VERSION: &str = "1";

/// Gas string of the fee embedded in a message sign document.
pub const MESSAGE_SIGNING_GAS: &str = "0";

// ---------------------------------------------------------------------------
// Keystore
// ---------------------------------------------------------------------------

/// Keystore JSON format version.
pub const KEYSTORE_VERSION: u32 = 1;

/// Symmetric cipher identifier.
pub const KEYSTORE_CIPHER: &str = "aes-256-ctr";

/// Key derivation function identifier.
pub const KEYSTORE_KDF: &str = "pbkdf2";

/// PRF used by PBKDF2.
pub const KEYSTORE_PRF: &str = "hmac-sha256";

/// PBKDF2 iteration count. Slow on purpose.
pub const KEYSTORE_KDF_ITERATIONS: u32 = 262_144;

/// Derived key length in bytes (AES-256 key).
pub const KEYSTORE_DKLEN: usize = 32;

/// Random salt length generated for new keystores.
pub const KEYSTORE_SALT_LENGTH: usize = 32;

/// AES-CTR initial counter block length.
pub const KEYSTORE_IV_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Caller-level defaults for building and signing transactions.
///
/// Every field has a default, so a partial JSON document (or `{}`) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Bech32 prefix for derived addresses.
    pub address_prefix: String,
    /// Derivation path used for mnemonic signers.
    pub hd_path: String,
    /// Chain the transactions are meant for. No sensible default exists.
    pub chain_id: Option<String>,
    /// Gas limit for built transactions.
    pub gas_limit: u64,
    /// Denomination for amounts given as bare integers.
    pub denom: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            address_prefix: LUM_BECH32_PREFIX_ACC_ADDR.to_string(),
            hd_path: DEFAULT_HD_PATH.to_string(),
            chain_id: None,
            gas_limit: DEFAULT_GAS_LIMIT,
            denom: LUM_DENOM.to_string(),
        }
    }
}

impl SigningConfig {
    /// Parses a configuration from JSON, filling unset fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_safe_gas_is_two_pow_53_minus_one() {
        assert_eq!(MAX_SAFE_GAS, 9_007_199_254_740_991);
    }

    #[test]
    fn hd_path_uses_lum_coin_type() {
        assert_eq!(lum_hd_path(0, 0), "m/44'/837'/0'/0/0");
        assert_eq!(lum_hd_path(1, 3), "m/44'/837'/1'/0/3");
    }

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = SigningConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SigningConfig::default());
        assert_eq!(cfg.address_prefix, "lum");
        assert_eq!(cfg.gas_limit, 200_000);
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let cfg = SigningConfig::from_json(r#"{"chain_id":"lum-network-1","gas_limit":80000}"#)
            .unwrap();
        assert_eq!(cfg.chain_id.as_deref(), Some("lum-network-1"));
        assert_eq!(cfg.gas_limit, 80_000);
        assert_eq!(cfg.hd_path, DEFAULT_HD_PATH);
    }
}
