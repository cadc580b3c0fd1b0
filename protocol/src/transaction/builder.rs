//! Transaction intent construction via the builder pattern.
//!
//! The [`TransactionIntentBuilder`] enforces a disciplined construction
//! flow: set the chain context, add messages, pick a fee, call `.build()`,
//! and get back an immutable [`TransactionIntent`] whose gas has already
//! been validated.
//!
//! The builder does not sign; that happens in [`super::signing`]. This
//! separation keeps construction testable without key material.

use super::types::{parse_gas, Coin, Fee, TransactionError, TransactionIntent};
use crate::codec::proto::Any;
use crate::config::DEFAULT_GAS_LIMIT;

/// Fluent builder for [`TransactionIntent`].
///
/// # Usage
///
/// ```rust
/// use lum_protocol::codec::{proto::MsgSend, Registry};
/// use lum_protocol::transaction::{Coin, TransactionIntentBuilder};
///
/// let send = MsgSend {
///     from_address: "lum1vxyzk6fcnc5fcmh2j7h65nfzzdnp07wqpnfste".into(),
///     to_address: "lum1f5dnru0fldqfw2n4zjzca4mxhhzqw7ev37sk3y".into(),
///     amount: vec![Coin::new("100", "ulum").to_proto()],
/// };
///
/// let intent = TransactionIntentBuilder::new()
///     .chain_id("lum-network-1")
///     .account_number(7)
///     .sequence(3)
///     .message(Registry::global().pack(&send).unwrap())
///     .fee_amount(Coin::new("5000", "ulum"))
///     .gas("120000")
///     .build()
///     .unwrap();
///
/// assert_eq!(intent.fee.gas, "120000");
/// ```
#[derive(Debug, Clone)]
pub struct TransactionIntentBuilder {
    messages: Vec<Any>,
    memo: String,
    fee_amount: Vec<Coin>,
    gas: String,
    sequence: u64,
    chain_id: Option<String>,
    account_number: u64,
}

impl Default for TransactionIntentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionIntentBuilder {
    /// Starts with no messages, an empty memo, no fee amount, the default
    /// gas limit, and sequence and account number zero.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            memo: String::new(),
            fee_amount: Vec::new(),
            gas: DEFAULT_GAS_LIMIT.to_string(),
            sequence: 0,
            chain_id: None,
            account_number: 0,
        }
    }

    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    pub fn account_number(mut self, account_number: u64) -> Self {
        self.account_number = account_number;
        self
    }

    pub fn sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Appends one message. Order is preserved into the body.
    pub fn message(mut self, message: Any) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Any>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Appends one fee coin.
    pub fn fee_amount(mut self, coin: Coin) -> Self {
        self.fee_amount.push(coin);
        self
    }

    /// Replaces both fee amounts and gas.
    pub fn fee(mut self, fee: Fee) -> Self {
        self.fee_amount = fee.amount;
        self.gas = fee.gas;
        self
    }

    pub fn gas(mut self, gas: impl ToString) -> Self {
        self.gas = gas.to_string();
        self
    }

    /// Validates and returns the intent.
    ///
    /// # Errors
    ///
    /// - `MissingField("chain_id")` if no chain was set.
    /// - `InvalidFeeFormat` if the gas string is not a safe integer.
    pub fn build(self) -> Result<TransactionIntent, TransactionError> {
        let chain_id = self
            .chain_id
            .ok_or(TransactionError::MissingField("chain_id"))?;
        parse_gas(&self.gas)?;
        Ok(TransactionIntent {
            messages: self.messages,
            memo: self.memo,
            fee: Fee::new(self.fee_amount, self.gas),
            sequence: self.sequence,
            chain_id,
            account_number: self.account_number,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
