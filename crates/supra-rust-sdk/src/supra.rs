//! Main Supra client entry point.
//!
//! The [`Supra`] struct wires a node transport (the RPC client by default),
//! the signing function and the submission pipeline together.

use crate::account::Ed25519Account;
use crate::api::response::AccountInfo;
use crate::api::SupraClient;
use crate::config::SupraConfig;
use crate::error::{SupraError, SupraResult};
use crate::transaction::insight::{self, TransactionInsight};
use crate::transaction::signer::{default_sign_fn, SignFn};
use crate::transaction::submission::{
    NodeTransport, SubmissionResult, SubmitOptions, TransactionSubmitter,
};
use crate::transaction::{
    EntryFunction, RawTransaction, SignedTransaction, TransactionBuilder, TransactionOptions,
    TransactionPayload, TransactionStatus,
};
use crate::types::{AccountAddress, ChainId, HashValue};
use std::sync::Arc;

/// The main entry point for the Supra SDK.
///
/// # Example
///
/// ```rust,no_run
/// use supra_rust_sdk::account::Ed25519Account;
/// use supra_rust_sdk::transaction::{EntryFunction, SubmitOptions, TransactionOptions};
/// use supra_rust_sdk::types::AccountAddress;
/// use supra_rust_sdk::{Supra, SupraConfig};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let supra = Supra::new(SupraConfig::testnet())?;
///     let sender = Ed25519Account::from_private_key_hex("0x...")?;
///     let recipient = AccountAddress::from_hex_padded("0xcafe")?;
///
///     let result = supra
///         .send_entry_function(
///             &sender,
///             EntryFunction::supra_transfer(recipient, 1_000)?,
///             &TransactionOptions::default(),
///             SubmitOptions::default().with_simulation(true),
///         )
///         .await?;
///     println!("{} is {}", result.txn_hash, result.status);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Supra {
    config: SupraConfig,
    transport: Arc<dyn NodeTransport>,
    submitter: TransactionSubmitter,
}

impl std::fmt::Debug for Supra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supra")
            .field("config", &self.config)
            .field("submitter", &self.submitter)
            .finish_non_exhaustive()
    }
}

impl Supra {
    /// Creates a new Supra client signing with the default Ed25519 signer.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: SupraConfig) -> SupraResult<Self> {
        Self::with_sign_fn(config, default_sign_fn())
    }

    /// Creates a new Supra client that signs transactions with `sign_fn`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_sign_fn(config: SupraConfig, sign_fn: SignFn) -> SupraResult<Self> {
        let client = Arc::new(SupraClient::new(config.clone())?);
        Ok(Self::with_transport(config, client, sign_fn))
    }

    /// Creates a client that talks to the node through `transport`.
    pub fn with_transport(
        config: SupraConfig,
        transport: Arc<dyn NodeTransport>,
        sign_fn: SignFn,
    ) -> Self {
        let submitter =
            TransactionSubmitter::new(transport.clone(), sign_fn, *config.wait_config());
        Self {
            config,
            transport,
            submitter,
        }
    }

    /// Creates a client for testnet with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn testnet() -> SupraResult<Self> {
        Self::new(SupraConfig::testnet())
    }

    /// Creates a client for mainnet with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn mainnet() -> SupraResult<Self> {
        Self::new(SupraConfig::mainnet())
    }

    /// Creates a client for a local node.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn local() -> SupraResult<Self> {
        Self::new(SupraConfig::local())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SupraConfig {
        &self.config
    }

    /// Returns the submission pipeline.
    pub fn submitter(&self) -> &TransactionSubmitter {
        &self.submitter
    }

    /// Returns the chain ID transactions are built for.
    ///
    /// # Errors
    ///
    /// Returns [`SupraError::Config`] for a custom network without a chain
    /// id.
    pub fn chain_id(&self) -> SupraResult<ChainId> {
        self.config
            .chain_id()
            .ok_or_else(|| SupraError::Config("chain id is not set for this network".into()))
    }

    // === Account ===

    /// Gets the sequence number and authentication key of an account.
    ///
    /// # Errors
    ///
    /// Returns [`SupraError::AccountNotFound`] for unknown accounts, or an
    /// error if the request fails.
    pub async fn get_account_info(&self, address: AccountAddress) -> SupraResult<AccountInfo> {
        self.transport.get_account_info(address).await
    }

    /// Gets the next sequence number of an account.
    ///
    /// # Errors
    ///
    /// Same as [`get_account_info`](Self::get_account_info).
    pub async fn get_sequence_number(&self, address: AccountAddress) -> SupraResult<u64> {
        Ok(self.get_account_info(address).await?.sequence_number)
    }

    // === Transactions ===

    /// Builds a transaction for `sender`, fetching its sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence number cannot be fetched or the
    /// chain id is unknown.
    pub async fn build_transaction(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
        options: &TransactionOptions,
    ) -> SupraResult<RawTransaction> {
        let chain_id = self.chain_id()?;
        let sequence_number = self.get_sequence_number(sender).await?;

        TransactionBuilder::new()
            .sender(sender)
            .sequence_number(sequence_number)
            .payload(payload)
            .chain_id(chain_id)
            .options(options)
            .build()
    }

    /// Builds, signs and submits an entry function call.
    ///
    /// # Errors
    ///
    /// See [`send_transaction`](Self::send_transaction).
    pub async fn send_entry_function(
        &self,
        account: &Ed25519Account,
        call: EntryFunction,
        options: &TransactionOptions,
        submit_options: SubmitOptions,
    ) -> SupraResult<SubmissionResult> {
        self.send_transaction(account, call.into(), options, submit_options)
            .await
    }

    /// Builds, signs and submits a transaction carrying `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be built, the simulation
    /// fails, or the node cannot be reached for submission. Errors while
    /// waiting are not reported: the status stays `Pending`.
    pub async fn send_transaction(
        &self,
        account: &Ed25519Account,
        payload: TransactionPayload,
        options: &TransactionOptions,
        submit_options: SubmitOptions,
    ) -> SupraResult<SubmissionResult> {
        let raw_txn = self
            .build_transaction(account.address(), payload, options)
            .await?;
        self.submitter
            .sign_and_submit(account, raw_txn, submit_options)
            .await
    }

    /// Submits a transaction signed elsewhere, e.g. a multi-agent or fee
    /// payer transaction.
    ///
    /// # Errors
    ///
    /// Same as [`send_transaction`](Self::send_transaction), minus building.
    pub async fn send_signed_transaction(
        &self,
        signed_txn: &SignedTransaction,
        submit_options: SubmitOptions,
    ) -> SupraResult<SubmissionResult> {
        self.submitter.submit_signed(signed_txn, submit_options).await
    }

    /// Queries the current status of a transaction once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_transaction_status(&self, txn_hash: &HashValue) -> SupraResult<TransactionStatus> {
        Ok(self
            .transport
            .get_transaction(txn_hash)
            .await?
            .map(|data| data.transaction_status())
            .unwrap_or(TransactionStatus::Pending))
    }

    /// Derives what a transaction did from `account`'s point of view.
    ///
    /// # Errors
    ///
    /// Returns [`SupraError::NotFound`] if the node does not know the
    /// transaction and [`SupraError::UnsupportedPayload`] if its payload
    /// cannot be interpreted.
    pub async fn transaction_insight(
        &self,
        account: AccountAddress,
        txn_hash: &HashValue,
    ) -> SupraResult<TransactionInsight> {
        let data = self
            .transport
            .get_transaction(txn_hash)
            .await?
            .ok_or_else(|| SupraError::NotFound(format!("transaction {txn_hash}")))?;
        insight::extract(account, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransactionData;
    use crate::transaction::submission::SubmissionEnvelope;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingNode {
        account_lookups: AtomicUsize,
    }

    #[async_trait]
    impl NodeTransport for CountingNode {
        async fn get_account_info(&self, _address: AccountAddress) -> SupraResult<AccountInfo> {
            self.account_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(AccountInfo {
                sequence_number: 12,
                authentication_key: String::new(),
            })
        }

        async fn submit(&self, _envelope: &SubmissionEnvelope) -> SupraResult<HashValue> {
            Err(SupraError::SubmissionFailed("offline".into()))
        }

        async fn simulate(&self, _envelope: &SubmissionEnvelope) -> SupraResult<TransactionData> {
            Ok(TransactionData::default())
        }

        async fn get_transaction(&self, _hash: &HashValue) -> SupraResult<Option<TransactionData>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_build_transaction_reads_sequence_number_from_transport() {
        let node = Arc::new(CountingNode::default());
        let supra = Supra::with_transport(SupraConfig::testnet(), node.clone(), default_sign_fn());

        let raw = supra
            .build_transaction(
                AccountAddress::ONE,
                EntryFunction::supra_transfer(AccountAddress::ONE, 1)
                    .unwrap()
                    .into(),
                &TransactionOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(raw.sequence_number, 12);
        assert_eq!(node.account_lookups.load(Ordering::SeqCst), 1);

        let hash = HashValue::sha3_256(b"unknown");
        assert_eq!(
            supra.get_transaction_status(&hash).await.unwrap(),
            TransactionStatus::Pending
        );
        assert!(matches!(
            supra.transaction_insight(AccountAddress::ONE, &hash).await,
            Err(SupraError::NotFound(_))
        ));
    }

    #[test]
    fn test_presets() {
        let supra = Supra::testnet().unwrap();
        assert_eq!(supra.chain_id().unwrap(), ChainId::testnet());
        assert_eq!(supra.submitter().wait_config().max_attempts, 20);

        let supra = Supra::mainnet().unwrap();
        assert_eq!(supra.chain_id().unwrap(), ChainId::mainnet());
    }

    #[test]
    fn test_custom_network_needs_chain_id() {
        let config = SupraConfig::custom("http://localhost:27001/rpc/v1").unwrap();
        let supra = Supra::new(config).unwrap();
        assert!(matches!(supra.chain_id(), Err(SupraError::Config(_))));
    }
}
