//! Transaction builder.
//!
//! Every payload shape shares the same header logic; only the payload
//! member of the resulting [`RawTransaction`] differs.

use crate::account::Ed25519Account;
use crate::error::{SupraError, SupraResult};
use crate::transaction::payload::{
    AutomationRegistrationParams, AutomationRegistrationParamsV1, EntryFunction, Script,
    TransactionPayload,
};
use crate::transaction::signer::sign_transaction;
use crate::transaction::types::{RawTransaction, SignedTransaction};
use crate::types::{AccountAddress, ChainId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default maximum gas amount.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 500_000;
/// Default gas unit price.
pub const DEFAULT_GAS_UNIT_PRICE: u64 = 100_000;
/// Default transaction lifetime in seconds.
pub const DEFAULT_EXPIRATION_SECONDS: u64 = 300;

/// Optional header overrides accepted by the high-level send calls.
///
/// Unset fields fall back to the builder defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOptions {
    /// Maximum gas amount.
    pub max_gas_amount: Option<u64>,
    /// Gas unit price.
    pub gas_unit_price: Option<u64>,
    /// Lifetime of the transaction in seconds from now.
    pub expiration_secs: Option<u64>,
}

impl TransactionOptions {
    /// Sets the maximum gas amount.
    #[must_use]
    pub fn with_max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = Some(max_gas_amount);
        self
    }

    /// Sets the gas unit price.
    #[must_use]
    pub fn with_gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = Some(gas_unit_price);
        self
    }

    /// Sets the lifetime in seconds from now.
    #[must_use]
    pub fn with_expiration_secs(mut self, expiration_secs: u64) -> Self {
        self.expiration_secs = Some(expiration_secs);
        self
    }
}

/// A builder for constructing transactions.
///
/// ```rust
/// use supra_rust_sdk::transaction::{EntryFunction, TransactionBuilder};
/// use supra_rust_sdk::types::{AccountAddress, ChainId};
///
/// let recipient = AccountAddress::from_hex_padded("0x123").unwrap();
/// let txn = TransactionBuilder::new()
///     .sender(AccountAddress::ONE)
///     .sequence_number(0)
///     .entry_function(EntryFunction::supra_transfer(recipient, 1000).unwrap())
///     .chain_id(ChainId::testnet())
///     .build()
///     .unwrap();
/// assert_eq!(txn.max_gas_amount, 500_000);
/// assert_eq!(txn.gas_unit_price, 100_000);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    sender: Option<AccountAddress>,
    sequence_number: Option<u64>,
    payload: Option<TransactionPayload>,
    max_gas_amount: u64,
    gas_unit_price: u64,
    expiration_timestamp_secs: Option<u64>,
    chain_id: Option<ChainId>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    /// Creates a new transaction builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sender: None,
            sequence_number: None,
            payload: None,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            expiration_timestamp_secs: None,
            chain_id: None,
        }
    }

    /// Sets the sender address.
    #[must_use]
    pub fn sender(mut self, sender: AccountAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Sets the sequence number.
    #[must_use]
    pub fn sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = Some(sequence_number);
        self
    }

    /// Sets the transaction payload.
    #[must_use]
    pub fn payload(mut self, payload: TransactionPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Uses an entry function call as payload.
    #[must_use]
    pub fn entry_function(self, call: EntryFunction) -> Self {
        self.payload(call.into())
    }

    /// Uses a script as payload.
    #[must_use]
    pub fn script(self, script: Script) -> Self {
        self.payload(script.into())
    }

    /// Uses a multisig call as payload.
    ///
    /// Fails with [`SupraError::InvalidPayload`] when `call` is `None`.
    pub fn multisig(
        self,
        multisig_address: AccountAddress,
        call: Option<EntryFunction>,
    ) -> SupraResult<Self> {
        Ok(self.payload(TransactionPayload::multisig(multisig_address, call)?))
    }

    /// Registers `call` for automated execution.
    #[must_use]
    pub fn automation_registration(
        self,
        call: EntryFunction,
        max_gas_amount: u64,
        gas_price_cap: u64,
        automation_fee_cap_for_epoch: u64,
        expiration_timestamp_secs: u64,
        aux_data: Vec<Vec<u8>>,
    ) -> Self {
        self.payload(
            AutomationRegistrationParams::V1(AutomationRegistrationParamsV1 {
                automated_function: call,
                max_gas_amount,
                gas_price_cap,
                automation_fee_cap_for_epoch,
                expiration_timestamp_secs,
                aux_data,
            })
            .into(),
        )
    }

    /// Sets the maximum gas amount.
    #[must_use]
    pub fn max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = max_gas_amount;
        self
    }

    /// Sets the gas unit price.
    #[must_use]
    pub fn gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = gas_unit_price;
        self
    }

    /// Sets the expiration timestamp in seconds since Unix epoch.
    #[must_use]
    pub fn expiration_timestamp_secs(mut self, expiration_timestamp_secs: u64) -> Self {
        self.expiration_timestamp_secs = Some(expiration_timestamp_secs);
        self
    }

    /// Sets the expiration time relative to now.
    #[must_use]
    pub fn expiration_from_now(mut self, seconds: u64) -> Self {
        self.expiration_timestamp_secs = Some(now_secs().saturating_add(seconds));
        self
    }

    /// Sets the chain ID.
    #[must_use]
    pub fn chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Applies any overrides present in `options`.
    #[must_use]
    pub fn options(mut self, options: &TransactionOptions) -> Self {
        if let Some(max_gas_amount) = options.max_gas_amount {
            self.max_gas_amount = max_gas_amount;
        }
        if let Some(gas_unit_price) = options.gas_unit_price {
            self.gas_unit_price = gas_unit_price;
        }
        if let Some(expiration_secs) = options.expiration_secs {
            self = self.expiration_from_now(expiration_secs);
        }
        self
    }

    /// Builds the raw transaction.
    ///
    /// Sender, sequence number, payload and chain id are required.
    pub fn build(self) -> SupraResult<RawTransaction> {
        let sender = self
            .sender
            .ok_or_else(|| SupraError::transaction("sender is required"))?;
        let sequence_number = self
            .sequence_number
            .ok_or_else(|| SupraError::transaction("sequence_number is required"))?;
        let payload = self
            .payload
            .ok_or_else(|| SupraError::transaction("payload is required"))?;
        let chain_id = self
            .chain_id
            .ok_or_else(|| SupraError::transaction("chain_id is required"))?;

        let expiration_timestamp_secs = self
            .expiration_timestamp_secs
            .unwrap_or_else(|| now_secs().saturating_add(DEFAULT_EXPIRATION_SECONDS));

        Ok(RawTransaction::new(
            sender,
            sequence_number,
            payload,
            self.max_gas_amount,
            self.gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        ))
    }

    /// Builds the raw transaction and signs it as `account`.
    pub fn build_and_sign(self, account: &Ed25519Account) -> SupraResult<SignedTransaction> {
        sign_transaction(account, self.build()?)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
