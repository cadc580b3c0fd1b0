//! The key, address and prefix a signer is currently acting as.

use crate::codec::proto::SignMode;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::identity::address::{address_from_public_key, AddressError};
use crate::message::{sign_message, MessageError, MessageSigner, SignedMessage};
use crate::transaction::{sign_transaction, SignedTransaction, TransactionError, TransactionIntent};

#[derive(Clone)]
pub(crate) struct Account {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: String,
    prefix: String,
}

impl Account {
    pub(crate) fn new(private_key: PrivateKey, prefix: &str) -> Result<Self, AddressError> {
        let public_key = private_key.public_key();
        let address = address_from_public_key(&public_key, prefix)?;
        Ok(Self {
            private_key,
            public_key,
            address,
            prefix: prefix.to_string(),
        })
    }

    /// Re-render the address under another prefix. The key stays.
    pub(crate) fn set_prefix(&mut self, prefix: &str) -> Result<(), AddressError> {
        self.address = address_from_public_key(&self.public_key, prefix)?;
        self.prefix = prefix.to_string();
        Ok(())
    }

    pub(crate) fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub(crate) fn sign_transaction(
        &self,
        intent: &TransactionIntent,
    ) -> Result<SignedTransaction, TransactionError> {
        sign_transaction(intent, &self.private_key, SignMode::Direct)
    }

    pub(crate) fn sign_message(&self, msg: &str) -> Result<SignedMessage, MessageError> {
        sign_message(msg, &self.private_key, &self.prefix, MessageSigner::Paper)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
