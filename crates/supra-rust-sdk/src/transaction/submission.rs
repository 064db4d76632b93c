//! Simulate, submit and wait.
//!
//! [`TransactionSubmitter`] drives a signed transaction through
//! `Built -> Simulated -> Submitted -> Pending -> {Success, Failed}`. The node
//! is reached through the [`NodeTransport`] trait so the pipeline can run
//! against any client, including in-memory fakes.

use crate::account::Ed25519Account;
use crate::api::response::{AccountInfo, TransactionData, EXECUTION_SUCCESS};
use crate::config::WaitConfig;
use crate::error::{SupraError, SupraResult};
use crate::transaction::authenticator::TransactionAuthenticator;
use crate::transaction::signer::SignFn;
use crate::transaction::status::TransactionStatus;
use crate::transaction::types::{RawTransaction, SignedTransaction};
use crate::types::{AccountAddress, HashValue};
use async_trait::async_trait;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The node operations the facade and the submission pipeline depend on.
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Fetches the sequence number and authentication key of an account.
    async fn get_account_info(&self, address: AccountAddress) -> SupraResult<AccountInfo>;

    /// Posts a transaction and returns the hash the node assigned to it.
    ///
    /// Transport failures are reported as [`SupraError::SubmissionFailed`].
    async fn submit(&self, envelope: &SubmissionEnvelope) -> SupraResult<HashValue>;

    /// Dry-runs a transaction.
    async fn simulate(&self, envelope: &SubmissionEnvelope) -> SupraResult<TransactionData>;

    /// Looks a transaction up by hash. `None` when the node does not know it
    /// yet.
    async fn get_transaction(&self, hash: &HashValue) -> SupraResult<Option<TransactionData>>;
}

/// The body posted to the submit and simulate endpoints.
///
/// On the wire: `{"Move": {"raw_txn": .., "authenticator": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEnvelope {
    /// The raw transaction.
    pub raw_txn: RawTransaction,
    /// The authenticator.
    pub authenticator: TransactionAuthenticator,
}

impl SubmissionEnvelope {
    /// Builds the envelope for submission.
    pub fn for_submission(signed: &SignedTransaction) -> Self {
        Self {
            raw_txn: signed.raw_txn.clone(),
            authenticator: signed.authenticator.clone(),
        }
    }

    /// Builds the envelope for simulation, with every signature zeroed.
    pub fn for_simulation(signed: &SignedTransaction) -> Self {
        let simulated = signed.for_simulation();
        Self {
            raw_txn: simulated.raw_txn,
            authenticator: simulated.authenticator,
        }
    }
}

#[derive(Serialize)]
enum EnvelopeRepr<'a> {
    Move {
        raw_txn: &'a RawTransaction,
        authenticator: &'a TransactionAuthenticator,
    },
}

impl Serialize for SubmissionEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EnvelopeRepr::Move {
            raw_txn: &self.raw_txn,
            authenticator: &self.authenticator,
        }
        .serialize(serializer)
    }
}

/// Toggles for [`TransactionSubmitter::submit_signed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Dry-run the transaction first and abort if it would not execute.
    pub enable_simulation: bool,
    /// Poll until the transaction settles or attempts run out.
    pub enable_wait: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            enable_simulation: false,
            enable_wait: true,
        }
    }
}

impl SubmitOptions {
    /// Enables or disables simulation.
    #[must_use]
    pub fn with_simulation(mut self, enable: bool) -> Self {
        self.enable_simulation = enable;
        self
    }

    /// Enables or disables waiting.
    #[must_use]
    pub fn with_wait(mut self, enable: bool) -> Self {
        self.enable_wait = enable;
        self
    }
}

/// Outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionResult {
    /// The hash returned by the node.
    pub txn_hash: HashValue,
    /// The last status observed. `Pending` after waiting means the outcome
    /// is not known yet.
    pub status: TransactionStatus,
}

/// State of the completion poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Query number `attempt` (1-based) is due.
    Query {
        /// The attempt about to be made.
        attempt: u32,
    },
    /// Sleeping before query number `attempt`.
    Wait {
        /// The attempt that follows the sleep.
        attempt: u32,
    },
    /// The loop is over.
    Done(TransactionStatus),
}

impl PollState {
    /// Initial state for the given configuration.
    pub fn start(config: &WaitConfig) -> Self {
        if config.max_attempts == 0 {
            Self::Done(TransactionStatus::Pending)
        } else {
            Self::Query { attempt: 1 }
        }
    }

    /// Transition after a query observed `status`.
    pub fn after_query(self, status: TransactionStatus, config: &WaitConfig) -> Self {
        match self {
            Self::Query { .. } if status.is_terminal() => Self::Done(status),
            Self::Query { attempt } if attempt >= config.max_attempts => {
                Self::Done(TransactionStatus::Pending)
            }
            Self::Query { attempt } => Self::Wait {
                attempt: attempt + 1,
            },
            other => other,
        }
    }

    /// Transition once the inter-query delay has elapsed.
    pub fn after_wait(self) -> Self {
        match self {
            Self::Wait { attempt } => Self::Query { attempt },
            other => other,
        }
    }
}

/// Drives signed transactions through simulation, submission and waiting.
#[derive(Clone)]
pub struct TransactionSubmitter {
    transport: Arc<dyn NodeTransport>,
    sign_fn: SignFn,
    wait_config: WaitConfig,
}

impl std::fmt::Debug for TransactionSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSubmitter")
            .field("wait_config", &self.wait_config)
            .finish_non_exhaustive()
    }
}

impl TransactionSubmitter {
    /// Creates a submitter over `transport`, signing with `sign_fn`.
    pub fn new(transport: Arc<dyn NodeTransport>, sign_fn: SignFn, wait_config: WaitConfig) -> Self {
        Self {
            transport,
            sign_fn,
            wait_config,
        }
    }

    /// Returns the wait configuration.
    pub fn wait_config(&self) -> &WaitConfig {
        &self.wait_config
    }

    /// Signs `raw_txn` as `account` with the injected signing function, then
    /// submits it.
    pub async fn sign_and_submit(
        &self,
        account: &Ed25519Account,
        raw_txn: RawTransaction,
        options: SubmitOptions,
    ) -> SupraResult<SubmissionResult> {
        let signature = (self.sign_fn)(account.private_key(), &raw_txn)?;
        let signed = SignedTransaction::new(
            raw_txn,
            TransactionAuthenticator::ed25519(*account.public_key(), signature),
        );
        self.submit_signed(&signed, options).await
    }

    /// Submits an already signed transaction.
    ///
    /// With simulation enabled, a dry run that does not report success
    /// aborts with [`SupraError::SimulationFailed`] and nothing is submitted.
    pub async fn submit_signed(
        &self,
        signed: &SignedTransaction,
        options: SubmitOptions,
    ) -> SupraResult<SubmissionResult> {
        if options.enable_simulation {
            self.simulate(signed).await?;
        }

        let envelope = SubmissionEnvelope::for_submission(signed);
        let txn_hash = self.transport.submit(&envelope).await?;
        info!(
            txn_hash = %txn_hash,
            sender = %signed.sender(),
            sequence_number = signed.sequence_number(),
            "transaction submitted"
        );

        let status = if options.enable_wait {
            self.wait_for_transaction(&txn_hash).await
        } else {
            TransactionStatus::Pending
        };

        Ok(SubmissionResult { txn_hash, status })
    }

    /// Dry-runs `signed` with zeroed signatures and checks the VM status.
    pub async fn simulate(&self, signed: &SignedTransaction) -> SupraResult<TransactionData> {
        let envelope = SubmissionEnvelope::for_simulation(signed);
        let report = self.transport.simulate(&envelope).await?;
        let vm_status = report.vm_status().unwrap_or("missing vm status");
        debug!(vm_status, "transaction simulated");

        if vm_status != EXECUTION_SUCCESS {
            return Err(SupraError::SimulationFailed(vm_status.to_string()));
        }
        Ok(report)
    }

    /// Polls until the transaction settles or attempts run out.
    ///
    /// Never fails: query errors count as `Pending` for that attempt, and
    /// running out of attempts returns `Pending`. Dropping the returned
    /// future stops the loop.
    pub async fn wait_for_transaction(&self, txn_hash: &HashValue) -> TransactionStatus {
        let mut state = PollState::start(&self.wait_config);
        loop {
            state = match state {
                PollState::Query { attempt } => {
                    let observed = self.poll_once(txn_hash, attempt).await;
                    state.after_query(observed, &self.wait_config)
                }
                PollState::Wait { .. } => {
                    tokio::time::sleep(self.wait_config.poll_interval).await;
                    state.after_wait()
                }
                PollState::Done(status) => {
                    debug!(txn_hash = %txn_hash, status = ?status, "finished waiting");
                    return status;
                }
            };
        }
    }

    async fn poll_once(&self, txn_hash: &HashValue, attempt: u32) -> TransactionStatus {
        match self.transport.get_transaction(txn_hash).await {
            Ok(Some(data)) => {
                let status = data.transaction_status();
                debug!(txn_hash = %txn_hash, attempt, status = ?status, "polled transaction");
                status
            }
            Ok(None) => TransactionStatus::Pending,
            Err(e) => {
                warn!(
                    txn_hash = %txn_hash,
                    attempt,
                    retryable = e.is_retryable(),
                    error = %e.sanitized_message(),
                    "transaction status query failed"
                );
                TransactionStatus::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519PrivateKey, Ed25519Signature};
    use crate::transaction::payload::EntryFunction;
    use crate::transaction::signer::{default_sign_fn, sign_transaction};
    use crate::types::ChainId;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeNode {
        statuses: Mutex<VecDeque<SupraResult<Option<TransactionData>>>>,
        vm_status: Option<&'static str>,
        fail_submit: bool,
        polls: AtomicUsize,
        submitted: Mutex<Vec<SubmissionEnvelope>>,
        simulated: Mutex<Vec<SubmissionEnvelope>>,
    }

    fn with_status(status: &str) -> SupraResult<Option<TransactionData>> {
        Ok(Some(TransactionData {
            status: Some(status.to_string()),
            ..Default::default()
        }))
    }

    #[async_trait]
    impl NodeTransport for FakeNode {
        async fn get_account_info(&self, _address: AccountAddress) -> SupraResult<AccountInfo> {
            Ok(AccountInfo {
                sequence_number: 0,
                authentication_key: String::new(),
            })
        }

        async fn submit(&self, envelope: &SubmissionEnvelope) -> SupraResult<HashValue> {
            if self.fail_submit {
                return Err(SupraError::SubmissionFailed("connection reset".into()));
            }
            self.submitted.lock().unwrap().push(envelope.clone());
            Ok(HashValue::sha3_256(b"txn"))
        }

        async fn simulate(&self, envelope: &SubmissionEnvelope) -> SupraResult<TransactionData> {
            self.simulated.lock().unwrap().push(envelope.clone());
            Ok(TransactionData {
                output: self
                    .vm_status
                    .map(|s| json!({"Move": {"vm_status": s, "events": []}})),
                ..Default::default()
            })
        }

        async fn get_transaction(&self, _hash: &HashValue) -> SupraResult<Option<TransactionData>> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| with_status("Pending"))
        }
    }

    fn submitter(node: Arc<FakeNode>, max_attempts: u32) -> TransactionSubmitter {
        TransactionSubmitter::new(
            node,
            default_sign_fn(),
            WaitConfig::new(Duration::ZERO, max_attempts),
        )
    }

    fn signed() -> SignedTransaction {
        let account = Ed25519Account::generate();
        let raw = RawTransaction::new(
            account.address(),
            0,
            EntryFunction::supra_transfer(AccountAddress::ONE, 5).unwrap().into(),
            500_000,
            100_000,
            1_700_000_000,
            ChainId::testnet(),
        );
        sign_transaction(&account, raw).unwrap()
    }

    #[test]
    fn test_poll_state_transitions() {
        let config = WaitConfig::new(Duration::ZERO, 2);
        let state = PollState::start(&config);
        assert_eq!(state, PollState::Query { attempt: 1 });

        let state = state.after_query(TransactionStatus::Pending, &config);
        assert_eq!(state, PollState::Wait { attempt: 2 });
        let state = state.after_wait();
        assert_eq!(state, PollState::Query { attempt: 2 });
        assert_eq!(
            state.after_query(TransactionStatus::Pending, &config),
            PollState::Done(TransactionStatus::Pending)
        );
        assert_eq!(
            state.after_query(TransactionStatus::Failed, &config),
            PollState::Done(TransactionStatus::Failed)
        );
        assert_eq!(
            PollState::start(&WaitConfig::new(Duration::ZERO, 0)),
            PollState::Done(TransactionStatus::Pending)
        );
    }

    #[tokio::test]
    async fn test_exhausted_poll_returns_pending_after_max_attempts() {
        let node = Arc::new(FakeNode::default());
        let submitter = submitter(node.clone(), 3);

        let status = submitter.wait_for_transaction(&HashValue::ZERO).await;

        assert_eq!(status, TransactionStatus::Pending);
        assert_eq!(node.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_poll_stops_at_first_terminal_status() {
        let node = Arc::new(FakeNode::default());
        node.statuses
            .lock()
            .unwrap()
            .extend([with_status("Pending"), with_status("Success")]);
        let submitter = submitter(node.clone(), 3);

        let status = submitter.wait_for_transaction(&HashValue::ZERO).await;

        assert_eq!(status, TransactionStatus::Success);
        assert_eq!(node.polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_poll_errors_count_as_pending() {
        let node = Arc::new(FakeNode::default());
        node.statuses.lock().unwrap().extend([
            Err(SupraError::api(503, "unavailable")),
            Ok(None),
            with_status("Invalid"),
        ]);
        let submitter = submitter(node.clone(), 5);

        let status = submitter.wait_for_transaction(&HashValue::ZERO).await;

        assert_eq!(status, TransactionStatus::Failed);
        assert_eq!(node.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_simulation_does_not_touch_real_signatures() {
        let node = Arc::new(FakeNode {
            vm_status: Some(EXECUTION_SUCCESS),
            ..Default::default()
        });
        let submitter = submitter(node.clone(), 1);
        let signed = signed();
        let before = signed.authenticator.clone();

        let result = submitter
            .submit_signed(&signed, SubmitOptions::default().with_simulation(true).with_wait(false))
            .await
            .unwrap();

        assert_eq!(result.status, TransactionStatus::Pending);
        assert_eq!(signed.authenticator, before);

        let simulated = node.simulated.lock().unwrap();
        assert_eq!(
            *simulated[0].authenticator.signers()[0].signature(),
            Ed25519Signature::zero()
        );
        let submitted = node.submitted.lock().unwrap();
        assert_eq!(submitted[0].authenticator, before);
        assert_eq!(node.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_simulation_aborts_submission() {
        let node = Arc::new(FakeNode {
            vm_status: Some("Move abort in 0x1::coin: EINSUFFICIENT_BALANCE"),
            ..Default::default()
        });
        let submitter = submitter(node.clone(), 1);

        let err = submitter
            .submit_signed(&signed(), SubmitOptions::default().with_simulation(true))
            .await
            .unwrap_err();

        assert!(matches!(err, SupraError::SimulationFailed(ref s) if s.contains("EINSUFFICIENT")));
        assert!(node.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_vm_status_is_a_failed_simulation() {
        let node = Arc::new(FakeNode::default());
        let submitter = submitter(node.clone(), 1);
        let err = submitter.simulate(&signed()).await.unwrap_err();
        assert!(matches!(err, SupraError::SimulationFailed(_)));
    }

    #[tokio::test]
    async fn test_submission_error_is_fatal() {
        let node = Arc::new(FakeNode {
            fail_submit: true,
            ..Default::default()
        });
        let submitter = submitter(node.clone(), 3);

        let err = submitter
            .submit_signed(&signed(), SubmitOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SupraError::SubmissionFailed(_)));
        assert_eq!(node.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sign_and_submit_uses_injected_signer() {
        let node = Arc::new(FakeNode::default());
        node.statuses.lock().unwrap().push_back(with_status("Success"));
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let submitter = TransactionSubmitter::new(
            node.clone(),
            Arc::new(move |key: &Ed25519PrivateKey, raw: &RawTransaction| {
                counted.fetch_add(1, Ordering::SeqCst);
                crate::transaction::signer::sign_raw_transaction(key, raw)
            }),
            WaitConfig::new(Duration::ZERO, 3),
        );
        let account = Ed25519Account::generate();
        let raw = signed().raw_txn;

        let result = submitter
            .sign_and_submit(&account, raw, SubmitOptions::default())
            .await
            .unwrap();

        assert_eq!(result.status, TransactionStatus::Success);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(node.submitted.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_envelope_wire_form() {
        let signed = signed();
        let json = serde_json::to_value(SubmissionEnvelope::for_submission(&signed)).unwrap();
        assert!(json["Move"]["raw_txn"]["sender"].is_string());
        assert_eq!(json["Move"]["raw_txn"]["chain_id"], 6);
        assert!(json["Move"]["authenticator"]["Ed25519"].is_object());
    }
}
