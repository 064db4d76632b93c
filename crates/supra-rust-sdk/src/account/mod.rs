//! Local signing accounts.
//!
//! An account couples an Ed25519 private key with the on-chain address it
//! signs for.

mod ed25519;

pub use ed25519::Ed25519Account;
