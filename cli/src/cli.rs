//! # CLI Interface
//!
//! Defines the command-line argument structure for `lum` using `clap`
//! derive. Key material can come from flags or from the environment, so
//! secrets never need to appear in shell history.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Offline signer for the Lum Network.
///
/// Derives addresses, signs transactions and messages, and inspects or
/// verifies encoded transactions. Never contacts a node.
#[derive(Parser, Debug)]
#[command(
    name = "lum",
    about = "Offline signer for the Lum Network",
    version,
    propagate_version = true
)]
pub struct LumCli {
    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "LUM_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "LUM_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Path to a JSON signing configuration. Unset fields take defaults.
    #[arg(long, global = true, env = "LUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `lum` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh mnemonic and print its first address.
    Generate(GenerateArgs),
    /// Print the address and public key of a signer.
    Address(AddressArgs),
    /// Build and sign a bank send transaction.
    SignSend(SignSendArgs),
    /// Sign a text message to prove address ownership.
    SignMessage(SignMessageArgs),
    /// Verify a signed message document.
    VerifyMessage(VerifyMessageArgs),
    /// Decode a hex transaction envelope and print its contents.
    DecodeTx(DecodeTxArgs),
    /// Verify the signature on a hex transaction envelope.
    VerifyTx(VerifyTxArgs),
    /// Encrypt a private key into a v1 keystore file.
    KeystoreEncrypt(KeystoreEncryptArgs),
}

/// Where the signing key comes from. The first one given wins, in the
/// order listed.
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// BIP-39 mnemonic phrase.
    #[arg(long, env = "LUM_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Derivation path for `--mnemonic`. Defaults to the configured path.
    #[arg(long)]
    pub hd_path: Option<String>,

    /// Hex-encoded secp256k1 private key.
    ///
    /// **Prefer the environment variable** over the flag.
    #[arg(long, env = "LUM_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Path to a v1 keystore JSON file.
    #[arg(long, env = "LUM_KEYSTORE")]
    pub keystore: Option<PathBuf>,

    /// Password for `--keystore`.
    #[arg(long, env = "LUM_KEYSTORE_PASSWORD", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// Bech32 address prefix. Defaults to the configured prefix.
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Number of words: 12, 15, 18, 21 or 24.
    #[arg(long, default_value_t = 24)]
    pub words: usize,

    /// Bech32 address prefix. Defaults to the configured prefix.
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Arguments for the `address` subcommand.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    #[command(flatten)]
    pub key: KeyArgs,
}

/// Arguments for the `sign-send` subcommand.
#[derive(Parser, Debug)]
pub struct SignSendArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Recipient address.
    #[arg(long)]
    pub to: String,

    /// Amount in the smallest unit, as a decimal integer string.
    #[arg(long)]
    pub amount: String,

    /// Denomination. Defaults to the configured denom.
    #[arg(long)]
    pub denom: Option<String>,

    /// Target chain. Falls back to the configured chain id.
    #[arg(long, env = "LUM_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// On-chain account number of the sender.
    #[arg(long)]
    pub account_number: u64,

    /// Current sequence of the sender.
    #[arg(long)]
    pub sequence: u64,

    #[arg(long, default_value = "")]
    pub memo: String,

    /// Fee amount in the configured denom. Omit for a zero-fee transaction.
    #[arg(long)]
    pub fee: Option<String>,

    /// Gas limit. Defaults to the configured limit.
    #[arg(long)]
    pub gas: Option<String>,
}

/// Arguments for the `sign-message` subcommand.
#[derive(Parser, Debug)]
pub struct SignMessageArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Text to sign.
    #[arg(long)]
    pub message: String,
}

/// Arguments for the `verify-message` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyMessageArgs {
    /// Path to the signed message JSON produced by `sign-message`.
    pub file: PathBuf,
}

/// Arguments for the `decode-tx` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeTxArgs {
    /// Hex-encoded `TxRaw` bytes.
    pub tx: String,
}

/// Arguments for the `verify-tx` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyTxArgs {
    /// Hex-encoded `TxRaw` bytes.
    pub tx: String,

    /// Chain the transaction was signed for.
    #[arg(long, env = "LUM_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// Account number the transaction was signed with.
    #[arg(long)]
    pub account_number: u64,
}

/// Arguments for the `keystore-encrypt` subcommand.
#[derive(Parser, Debug)]
pub struct KeystoreEncryptArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Password to encrypt under.
    #[arg(long, env = "LUM_NEW_KEYSTORE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output file. Refuses to overwrite an existing file.
    #[arg(long, short = 'o')]
    pub out: PathBuf,
}
