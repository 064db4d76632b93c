//! Transaction building, signing, submission and insights.
//!
//! This module provides types and utilities for constructing, signing,
//! and submitting transactions to a Supra node, and for reading back what a
//! committed transaction did.
//!
//! # Overview
//!
//! - **Simple transactions** - single sender, self-paid gas
//! - **Multi-agent transactions** - several signers, sender pays gas
//! - **Fee payer transactions** - a sponsor pays gas on the sender's behalf
//!
//! # Example: Simple Transaction
//!
//! ```rust
//! use supra_rust_sdk::account::Ed25519Account;
//! use supra_rust_sdk::transaction::{EntryFunction, TransactionBuilder};
//! use supra_rust_sdk::types::{AccountAddress, ChainId};
//!
//! let sender = Ed25519Account::generate();
//! let recipient = AccountAddress::from_hex_padded("0xcafe").unwrap();
//!
//! let signed_txn = TransactionBuilder::new()
//!     .sender(sender.address())
//!     .sequence_number(0)
//!     .entry_function(EntryFunction::supra_transfer(recipient, 1_000).unwrap())
//!     .chain_id(ChainId::testnet())
//!     .build_and_sign(&sender)
//!     .unwrap();
//! assert!(signed_txn.verify_signatures().is_ok());
//! ```
//!
//! # Example: Fee Payer Transaction
//!
//! ```rust
//! use supra_rust_sdk::account::Ed25519Account;
//! use supra_rust_sdk::transaction::{sign_fee_payer_transaction, EntryFunction, TransactionBuilder};
//! use supra_rust_sdk::types::{AccountAddress, ChainId};
//!
//! let user = Ed25519Account::generate();
//! let sponsor = Ed25519Account::generate();
//!
//! let raw = TransactionBuilder::new()
//!     .sender(user.address())
//!     .sequence_number(0)
//!     .entry_function(EntryFunction::supra_transfer(AccountAddress::ONE, 10).unwrap())
//!     .chain_id(ChainId::testnet())
//!     .build()
//!     .unwrap();
//! let signed_txn = sign_fee_payer_transaction(&user, &[], &sponsor, raw).unwrap();
//! assert!(signed_txn.authenticator.is_multi_signer());
//! ```

pub mod authenticator;
pub mod builder;
pub mod encoding;
pub mod insight;
pub mod payload;
pub mod signer;
pub mod status;
pub mod submission;
pub mod types;

pub use authenticator::{AccountAuthenticator, TransactionAuthenticator};
pub use builder::{
    TransactionBuilder, TransactionOptions, DEFAULT_EXPIRATION_SECONDS, DEFAULT_GAS_UNIT_PRICE,
    DEFAULT_MAX_GAS_AMOUNT,
};
pub use insight::{extract, CoinChange, TransactionInsight, TransactionKind};
pub use payload::{
    AutomationRegistrationParams, AutomationRegistrationParamsV1, EntryFunction, Multisig,
    MultisigTransactionPayload, Script, ScriptArgument, TransactionPayload,
};
pub use signer::{
    default_sign_fn, sign_fee_payer_transaction, sign_multi_agent_transaction,
    sign_raw_transaction, sign_transaction, signature_message, SignFn,
};
pub use status::TransactionStatus;
pub use submission::{
    NodeTransport, PollState, SubmissionEnvelope, SubmissionResult, SubmitOptions,
    TransactionSubmitter,
};
pub use types::{FeePayerRawTransaction, MultiAgentRawTransaction, RawTransaction, SignedTransaction};
