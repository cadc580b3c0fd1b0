// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lum Offline Signer
//!
//! Entry point for the `lum` binary. Parses CLI arguments, initializes
//! logging, loads the signing configuration, and runs one command.
//!
//! The binary supports these subcommands:
//!
//! - `generate`         - create a mnemonic and show its first address
//! - `address`          - show a signer's address and public key
//! - `sign-send`        - build and sign a bank send, print the envelope
//! - `sign-message`     - sign a text message, print the JSON proof
//! - `verify-message`   - check a signed message proof
//! - `decode-tx`        - pretty-print a hex envelope
//! - `verify-tx`        - check the signature on a hex envelope
//! - `keystore-encrypt` - write a private key to a v1 keystore file

mod cli;
mod logging;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

use lum_protocol::codec::proto::{Coin as ProtoCoin, MsgSend};
use lum_protocol::codec::Registry;
use lum_protocol::config::SigningConfig;
use lum_protocol::identity::{
    address_from_public_key, generate_mnemonic, is_address_valid, private_key_from_mnemonic,
    Keystore,
};
use lum_protocol::message::{verify_signed_message, SignedMessage};
use lum_protocol::transaction::{verify_envelope, Coin, TransactionIntentBuilder, TxEnvelope};
use lum_protocol::wallet::{Signer, SignerSource};

use cli::{Commands, KeyArgs, LumCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = LumCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => generate(args, &config),
        Commands::Address(args) => show_address(args, &config).await,
        Commands::SignSend(args) => sign_send(args, &config).await,
        Commands::SignMessage(args) => sign_message(args, &config).await,
        Commands::VerifyMessage(args) => verify_message(args),
        Commands::DecodeTx(args) => decode_tx(args),
        Commands::VerifyTx(args) => verify_tx(args, &config),
        Commands::KeystoreEncrypt(args) => keystore_encrypt(args, &config).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<SigningConfig> {
    let Some(path) = path else {
        return Ok(SigningConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config = SigningConfig::from_json(&json)
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded signing config");
    Ok(config)
}

/// Resolve `--mnemonic` / `--private-key` / `--keystore` into a signer.
async fn open_signer(key: &KeyArgs, config: &SigningConfig) -> Result<Box<dyn Signer>> {
    let keystore_json = match &key.keystore {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read keystore: {}", path.display()))?,
        ),
        None => None,
    };
    let keystore = match (&keystore_json, &key.keystore_password) {
        (Some(json), Some(password)) => Some((json.as_str(), password.as_str())),
        (Some(_), None) => bail!("--keystore requires --keystore-password"),
        _ => None,
    };
    let hd_path = key.hd_path.as_deref().unwrap_or(&config.hd_path);
    let prefix = key.prefix.as_deref().unwrap_or(&config.address_prefix);

    let source = SignerSource::from_parts(
        key.mnemonic.as_deref(),
        hd_path,
        key.private_key.as_deref(),
        keystore,
    )
    .context("no signing key: pass --mnemonic, --private-key or --keystore")?;
    tracing::info!(kind = %source.kind(), "opening signer");

    let signer = source.into_signer(prefix).await.context("failed to open signer")?;
    Ok(signer)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn generate(args: cli::GenerateArgs, config: &SigningConfig) -> Result<()> {
    let phrase = generate_mnemonic(args.words)?;
    let key = private_key_from_mnemonic(&phrase, &config.hd_path)?;
    let prefix = args.prefix.as_deref().unwrap_or(&config.address_prefix);
    let address = address_from_public_key(&key.public_key(), prefix)?;

    println!("Mnemonic : {}", phrase);
    println!("HD path  : {}", config.hd_path);
    println!("Address  : {}", address);
    println!();
    println!("Write the mnemonic down. It is the only way to recover this account.");
    Ok(())
}

async fn show_address(args: cli::AddressArgs, config: &SigningConfig) -> Result<()> {
    let signer = open_signer(&args.key, config).await?;
    println!("Address    : {}", signer.address());
    println!("Public key : {}", signer.public_key());
    println!("Source     : {}", signer.kind());
    Ok(())
}

#[derive(Serialize)]
struct SignedTxOutput {
    tx_hash: String,
    tx_bytes: String,
    signature: String,
}

async fn sign_send(args: cli::SignSendArgs, config: &SigningConfig) -> Result<()> {
    let signer = open_signer(&args.key, config).await?;

    if !is_address_valid(&args.to, None) {
        bail!("invalid recipient address: {}", args.to);
    }
    let chain_id = args
        .chain_id
        .clone()
        .or_else(|| config.chain_id.clone())
        .ok_or_else(|| anyhow!("no chain id: pass --chain-id or set it in the config"))?;
    let denom = args.denom.as_deref().unwrap_or(&config.denom);

    let send = MsgSend {
        from_address: signer.address().to_string(),
        to_address: args.to.clone(),
        amount: vec![ProtoCoin {
            denom: denom.to_string(),
            amount: args.amount.clone(),
        }],
    };
    let message = Registry::global().pack(&send)?;

    let mut builder = TransactionIntentBuilder::new()
        .chain_id(chain_id)
        .account_number(args.account_number)
        .sequence(args.sequence)
        .memo(args.memo.clone())
        .message(message)
        .gas(args.gas.clone().unwrap_or_else(|| config.gas_limit.to_string()));
    if let Some(fee) = &args.fee {
        builder = builder.fee_amount(Coin::new(fee.as_str(), config.denom.as_str()));
    }
    let intent = builder.build().context("invalid transaction")?;

    let signed = signer.sign_transaction(&intent).await?;
    let envelope = signed.to_envelope();
    tracing::info!(
        from = signer.address(),
        to = %args.to,
        amount = %args.amount,
        tx_hash = %envelope.tx_hash(),
        "signed send"
    );

    print_json(&SignedTxOutput {
        tx_hash: envelope.tx_hash(),
        tx_bytes: hex::encode(envelope.encode()),
        signature: signed.signature.to_hex(),
    })
}

async fn sign_message(args: cli::SignMessageArgs, config: &SigningConfig) -> Result<()> {
    let signer = open_signer(&args.key, config).await?;
    let signed = signer.sign_message(&args.message).await?;
    println!("{}", signed.to_json()?);
    Ok(())
}

fn verify_message(args: cli::VerifyMessageArgs) -> Result<()> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let signed = SignedMessage::from_json(&json).context("not a signed message document")?;
    if verify_signed_message(&signed)? {
        println!("VALID: {} signed {:?}", signed.address, signed.msg);
        Ok(())
    } else {
        bail!("INVALID: signature does not match {}", signed.address)
    }
}

fn decode_envelope(tx: &str) -> Result<TxEnvelope> {
    let bytes = hex::decode(tx.trim()).context("transaction is not valid hex")?;
    Ok(TxEnvelope::decode(&bytes).context("transaction is not a TxRaw envelope")?)
}

fn decode_tx(args: cli::DecodeTxArgs) -> Result<()> {
    let envelope = decode_envelope(&args.tx)?;
    print_json(&envelope.describe(Registry::global())?)
}

fn verify_tx(args: cli::VerifyTxArgs, config: &SigningConfig) -> Result<()> {
    let bytes = hex::decode(args.tx.trim()).context("transaction is not valid hex")?;
    let chain_id = args
        .chain_id
        .or_else(|| config.chain_id.clone())
        .ok_or_else(|| anyhow!("no chain id: pass --chain-id or set it in the config"))?;

    if verify_envelope(&bytes, &chain_id, args.account_number)? {
        println!("VALID");
        Ok(())
    } else {
        bail!("INVALID: signature does not verify for {} / {}", chain_id, args.account_number)
    }
}

async fn keystore_encrypt(args: cli::KeystoreEncryptArgs, config: &SigningConfig) -> Result<()> {
    if args.out.exists() {
        bail!("refusing to overwrite {}", args.out.display());
    }
    let private_key = match (&args.key.private_key, &args.key.mnemonic) {
        (Some(hex_key), _) => lum_protocol::crypto::PrivateKey::from_hex(hex_key)?,
        (None, Some(phrase)) => {
            let hd_path = args.key.hd_path.as_deref().unwrap_or(&config.hd_path);
            private_key_from_mnemonic(phrase, hd_path)?
        }
        (None, None) => bail!("keystore-encrypt needs --private-key or --mnemonic"),
    };
    let password = args.password.clone();
    let keystore =
        tokio::task::spawn_blocking(move || Keystore::encrypt(&private_key, &password)).await??;

    std::fs::write(&args.out, keystore.to_json()?)
        .with_context(|| format!("failed to write keystore to {}", args.out.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&args.out, std::fs::Permissions::from_mode(0o600))?;
    }

    tracing::info!(id = %keystore.id, path = %args.out.display(), "keystore written");
    println!("Keystore written to {}", args.out.display());
    Ok(())
}
