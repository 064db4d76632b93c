//! Example: Basic SUPRA transfer
//!
//! This example demonstrates how to:
//! 1. Create a Supra client
//! 2. Load a funded account
//! 3. Transfer SUPRA to another account, simulating first
//! 4. Read the coin changes of the committed transaction
//!
//! Run with: `SUPRA_PRIVATE_KEY=0x... RUST_LOG=supra_rust_sdk=debug cargo run --example transfer`

use supra_rust_sdk::{
    account::Ed25519Account,
    transaction::{EntryFunction, SubmitOptions, TransactionOptions},
    Supra, SupraConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Create client for testnet
    let supra = Supra::new(SupraConfig::testnet())?;
    println!("Connected to {}", supra.config().rpc_url());

    let key = std::env::var("SUPRA_PRIVATE_KEY")
        .map_err(|_| anyhow::anyhow!("set SUPRA_PRIVATE_KEY to a funded testnet key"))?;
    let sender = Ed25519Account::from_private_key_hex(&key)?;
    println!("Sender address: {}", sender.address());

    let info = supra.get_account_info(sender.address()).await?;
    println!("Sender sequence number: {}", info.sequence_number);

    let recipient = Ed25519Account::generate();
    println!("Recipient address: {}", recipient.address());

    // Transfer 0.001 SUPRA (100_000 quants)
    let result = supra
        .send_entry_function(
            &sender,
            EntryFunction::supra_transfer(recipient.address(), 100_000)?,
            &TransactionOptions::default().with_max_gas_amount(10_000),
            SubmitOptions::default().with_simulation(true),
        )
        .await?;
    println!("Transaction {} is {}", result.txn_hash, result.status);

    if result.status.is_success() {
        let insight = supra
            .transaction_insight(sender.address(), &result.txn_hash)
            .await?;
        println!("Kind: {:?}", insight.kind);
        for change in &insight.coin_change {
            println!("  {} {}", change.coin_type, change.amount);
        }
    }

    Ok(())
}
