//! Raw and signed transactions.

use crate::crypto::sha3_256;
use crate::error::SupraResult;
use crate::transaction::authenticator::TransactionAuthenticator;
use crate::transaction::encoding;
use crate::transaction::payload::TransactionPayload;
use crate::transaction::signer;
use crate::types::{AccountAddress, ChainId, HashValue};
use serde::{Deserialize, Serialize};

/// Domain prefix of the transaction hash.
const TRANSACTION_HASH_SALT: &[u8] = b"SUPRA::Transaction";
/// Discriminant of a user transaction inside the chain's transaction union.
const USER_TRANSACTION_VARIANT: u8 = 0;

/// The raw transaction that a client signs.
///
/// Immutable once built: its canonical encoding is a pure function of these
/// fields, and every signature depends on that encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Sender's address.
    pub sender: AccountAddress,
    /// Sequence number of this transaction.
    pub sequence_number: u64,
    /// The transaction payload.
    pub payload: TransactionPayload,
    /// Maximum gas units the sender is willing to pay.
    pub max_gas_amount: u64,
    /// Price per gas unit in quants.
    pub gas_unit_price: u64,
    /// Expiration time in seconds since Unix epoch.
    pub expiration_timestamp_secs: u64,
    /// Chain ID to prevent cross-chain replay.
    pub chain_id: ChainId,
}

impl RawTransaction {
    /// Creates a new raw transaction.
    pub fn new(
        sender: AccountAddress,
        sequence_number: u64,
        payload: TransactionPayload,
        max_gas_amount: u64,
        gas_unit_price: u64,
        expiration_timestamp_secs: u64,
        chain_id: ChainId,
    ) -> Self {
        Self {
            sender,
            sequence_number,
            payload,
            max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        }
    }

    /// The message a single signer signs: `SHA3-256("SUPRA::RawTransaction") || bcs(self)`.
    pub fn signing_message(&self) -> SupraResult<Vec<u8>> {
        signer::signature_message(self)
    }

    /// Serializes this transaction to canonical bytes.
    pub fn to_bcs(&self) -> SupraResult<Vec<u8>> {
        encoding::encode(self)
    }

    /// Decodes a transaction from canonical bytes.
    pub fn from_bcs(bytes: &[u8]) -> SupraResult<Self> {
        encoding::decode(bytes)
    }
}

/// A signed transaction ready for submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The raw transaction.
    pub raw_txn: RawTransaction,
    /// The authenticator (signature(s) and public key(s)).
    pub authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    /// Creates a new signed transaction.
    pub fn new(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        Self {
            raw_txn,
            authenticator,
        }
    }

    /// Serializes this signed transaction to canonical bytes.
    pub fn to_bcs(&self) -> SupraResult<Vec<u8>> {
        encoding::encode(self)
    }

    /// Returns the sender address.
    pub fn sender(&self) -> AccountAddress {
        self.raw_txn.sender
    }

    /// Returns the sequence number.
    pub fn sequence_number(&self) -> u64 {
        self.raw_txn.sequence_number
    }

    /// Computes the transaction hash the node will report for this
    /// transaction.
    pub fn hash(&self) -> SupraResult<HashValue> {
        let bcs_bytes = self.to_bcs()?;
        let prefix = sha3_256(TRANSACTION_HASH_SALT);
        Ok(HashValue::sha3_256_of([
            &prefix[..],
            &[USER_TRANSACTION_VARIANT],
            &bcs_bytes,
        ]))
    }

    /// Checks every Ed25519 leaf against the message its role signs.
    pub fn verify_signatures(&self) -> SupraResult<()> {
        signer::verify_authenticator(&self.raw_txn, &self.authenticator)
    }

    /// Returns a copy whose authenticator carries all-zero signatures, for
    /// simulation. `self` is left as it was.
    pub fn for_simulation(&self) -> Self {
        Self {
            raw_txn: self.raw_txn.clone(),
            authenticator: self.authenticator.with_zeroed_signatures(),
        }
    }
}

/// A raw transaction plus the secondary signers that must co-sign it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiAgentRawTransaction {
    /// The raw transaction.
    pub raw_txn: RawTransaction,
    /// Secondary signer addresses.
    pub secondary_signer_addresses: Vec<AccountAddress>,
}

impl MultiAgentRawTransaction {
    /// Creates a new multi-agent transaction.
    pub fn new(raw_txn: RawTransaction, secondary_signer_addresses: Vec<AccountAddress>) -> Self {
        Self {
            raw_txn,
            secondary_signer_addresses,
        }
    }

    /// The message every signer of this transaction signs.
    pub fn signing_message(&self) -> SupraResult<Vec<u8>> {
        signer::multi_agent_signature_message(&self.raw_txn, &self.secondary_signer_addresses)
    }
}

/// A raw transaction whose gas is paid by a sponsor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeePayerRawTransaction {
    /// The raw transaction.
    pub raw_txn: RawTransaction,
    /// Secondary signer addresses.
    pub secondary_signer_addresses: Vec<AccountAddress>,
    /// The fee payer's address.
    pub fee_payer_address: AccountAddress,
}

impl FeePayerRawTransaction {
    /// Creates a new fee payer transaction.
    pub fn new(
        raw_txn: RawTransaction,
        secondary_signer_addresses: Vec<AccountAddress>,
        fee_payer_address: AccountAddress,
    ) -> Self {
        Self {
            raw_txn,
            secondary_signer_addresses,
            fee_payer_address,
        }
    }

    /// The message every signer of this transaction signs.
    pub fn signing_message(&self) -> SupraResult<Vec<u8>> {
        signer::fee_payer_signature_message(
            &self.raw_txn,
            &self.secondary_signer_addresses,
            self.fee_payer_address,
        )
    }
}
