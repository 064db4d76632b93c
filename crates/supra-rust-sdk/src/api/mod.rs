//! API client for Supra nodes.
//!
//! - [`SupraClient`] - RPC client for account lookup, submission, simulation
//!   and transaction queries

pub mod client;
pub mod response;

pub use client::SupraClient;
pub use response::{AccountInfo, SupraResponse, TransactionData, EXECUTION_SUCCESS};
