//! # Supra Rust SDK
//!
//! Build, sign and submit transactions to Supra nodes, and read back what a
//! committed transaction did to an account's coin balances.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use supra_rust_sdk::account::Ed25519Account;
//! use supra_rust_sdk::transaction::{EntryFunction, SubmitOptions, TransactionOptions};
//! use supra_rust_sdk::{Supra, SupraConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let supra = Supra::new(SupraConfig::testnet())?;
//!     let sender = Ed25519Account::from_private_key_hex("0x...")?;
//!     let recipient = Ed25519Account::generate();
//!
//!     let result = supra
//!         .send_entry_function(
//!             &sender,
//!             EntryFunction::supra_transfer(recipient.address(), 1_000)?,
//!             &TransactionOptions::default(),
//!             SubmitOptions::default(),
//!         )
//!         .await?;
//!
//!     let insight = supra.transaction_insight(sender.address(), &result.txn_hash).await?;
//!     println!("{:?}", insight.coin_change);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`account`] - Ed25519 accounts and address derivation
//! - [`crypto`] - Keys, signatures and hashing
//! - [`transaction`] - Payloads, building, signing, submission and insights
//! - [`api`] - RPC client for Supra nodes
//! - [`types`] - Addresses, hashes, Move type tags and events

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod account;
pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod transaction;
pub mod types;

mod supra;

// Re-export main entry points
pub use config::SupraConfig;
pub use error::{SupraError, SupraResult};
pub use supra::Supra;

// Re-export commonly used types
pub use types::{AccountAddress, ChainId, HashValue};
