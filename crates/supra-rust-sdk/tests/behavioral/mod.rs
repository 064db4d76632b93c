//! Behavioral tests for the SDK.
//!
//! These tests drive the public API against a mock node, so they run
//! without a live network.

mod crypto_tests {
    use supra_rust_sdk::crypto::Ed25519PrivateKey;

    #[test]
    fn test_sign_verify_roundtrip() {
        let private_key = Ed25519PrivateKey::generate();
        let public_key = private_key.public_key();
        let message = b"test message";

        let signature = private_key.sign(message);
        assert!(public_key.verify(message, &signature).is_ok());
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let key1 = Ed25519PrivateKey::generate();
        let key2 = Ed25519PrivateKey::generate();
        let message = b"test message";

        let signature = key1.sign(message);
        assert!(key2.public_key().verify(message, &signature).is_err());
    }

    #[test]
    fn test_tampered_message_fails_verification() {
        let private_key = Ed25519PrivateKey::generate();
        let signature = private_key.sign(b"original message");

        assert!(private_key
            .public_key()
            .verify(b"tampered message", &signature)
            .is_err());
    }
}

mod transaction_tests {
    use supra_rust_sdk::account::Ed25519Account;
    use supra_rust_sdk::transaction::{
        sign_fee_payer_transaction, sign_multi_agent_transaction, EntryFunction,
        TransactionBuilder,
    };
    use supra_rust_sdk::types::{AccountAddress, ChainId};

    fn raw_transfer(sender: &Ed25519Account) -> supra_rust_sdk::transaction::RawTransaction {
        TransactionBuilder::new()
            .sender(sender.address())
            .sequence_number(7)
            .entry_function(EntryFunction::supra_transfer(AccountAddress::ONE, 10).unwrap())
            .chain_id(ChainId::testnet())
            .build()
            .unwrap()
    }

    #[test]
    fn test_signed_transaction_verifies() {
        let sender = Ed25519Account::generate();
        let signed = TransactionBuilder::new()
            .sender(sender.address())
            .sequence_number(0)
            .entry_function(EntryFunction::supra_transfer(AccountAddress::ONE, 10).unwrap())
            .chain_id(ChainId::testnet())
            .build_and_sign(&sender)
            .unwrap();

        assert!(signed.verify_signatures().is_ok());
        assert_eq!(signed.sender(), sender.address());
    }

    #[test]
    fn test_hash_is_stable_and_depends_on_content() {
        let sender = Ed25519Account::generate();
        let a = TransactionBuilder::new()
            .sender(sender.address())
            .sequence_number(1)
            .entry_function(EntryFunction::supra_transfer(AccountAddress::ONE, 10).unwrap())
            .chain_id(ChainId::testnet())
            .expiration_timestamp_secs(1_700_000_000)
            .build_and_sign(&sender)
            .unwrap();

        assert_eq!(a.hash().unwrap(), a.clone().hash().unwrap());

        let b = TransactionBuilder::new()
            .sender(sender.address())
            .sequence_number(2)
            .entry_function(EntryFunction::supra_transfer(AccountAddress::ONE, 10).unwrap())
            .chain_id(ChainId::testnet())
            .expiration_timestamp_secs(1_700_000_000)
            .build_and_sign(&sender)
            .unwrap();

        assert_ne!(a.hash().unwrap(), b.hash().unwrap());
    }

    #[test]
    fn test_multi_agent_and_fee_payer_verify() {
        let sender = Ed25519Account::generate();
        let other = Ed25519Account::generate();
        let sponsor = Ed25519Account::generate();

        let multi = sign_multi_agent_transaction(&sender, &[&other], raw_transfer(&sender)).unwrap();
        assert!(multi.verify_signatures().is_ok());

        let sponsored =
            sign_fee_payer_transaction(&sender, &[], &sponsor, raw_transfer(&sender)).unwrap();
        assert!(sponsored.verify_signatures().is_ok());
    }

    #[test]
    fn test_simulation_copy_carries_no_signature() {
        let sender = Ed25519Account::generate();
        let signed = TransactionBuilder::new()
            .sender(sender.address())
            .sequence_number(0)
            .entry_function(EntryFunction::supra_transfer(AccountAddress::ONE, 10).unwrap())
            .chain_id(ChainId::testnet())
            .build_and_sign(&sender)
            .unwrap();

        let simulated = signed.for_simulation();
        assert!(simulated.verify_signatures().is_err());
        assert_eq!(simulated.raw_txn, signed.raw_txn);
    }
}

mod node_flow_tests {
    use serde_json::{json, Value};
    use std::time::Duration;
    use supra_rust_sdk::account::Ed25519Account;
    use supra_rust_sdk::config::WaitConfig;
    use supra_rust_sdk::transaction::{
        EntryFunction, SubmitOptions, TransactionKind, TransactionOptions, TransactionStatus,
    };
    use supra_rust_sdk::types::framework::SUPRA_COIN_TYPE;
    use supra_rust_sdk::{HashValue, Supra, SupraConfig, SupraError};
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HASH: &str = "0x8a1b3c9d2e4f5061728394a5b6c7d8e9f0a1b2c3d4e5f60718293a4b5c6d7e8f";

    fn supra_for(server: &MockServer) -> Supra {
        let config = SupraConfig::custom(&format!("{}/rpc/v1", server.uri()))
            .unwrap()
            .with_chain_id(supra_rust_sdk::ChainId::testnet())
            .with_wait(WaitConfig::new(Duration::from_millis(10), 3));
        Supra::new(config).unwrap()
    }

    fn committed_transfer(sender: &Ed25519Account, recipient: &str, status: &str) -> Value {
        json!({
            "hash": HASH,
            "status": status,
            "header": {"sender": {"Move": sender.address().to_string()}},
            "payload": {"Move": {
                "type": "entry_function_payload",
                "function": "0x1::supra_account::transfer",
                "type_arguments": [],
                "arguments": [recipient, "250"]
            }},
            "output": {"Move": {"events": [], "vm_status": "Executed successfully"}}
        })
    }

    async fn mount_account(server: &MockServer, sequence_number: u64) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/rpc/v1/accounts/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": sequence_number,
                "authentication_key": "0x00"
            })))
            .mount(server)
            .await;
    }

    async fn transaction_lookups(server: &MockServer) -> usize {
        let lookup_path = format!("/rpc/v1/transactions/{HASH}");
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method == wiremock::http::Method::Get)
            .filter(|request| request.url.path() == lookup_path)
            .count()
    }

    async fn mount_submit(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/rpc/v1/transactions/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(HASH)))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_transfer_end_to_end() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let server = MockServer::start().await;
        let sender = Ed25519Account::generate();
        let recipient = Ed25519Account::generate();

        mount_account(&server, 3).await;
        Mock::given(method("POST"))
            .and(path("/rpc/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "output": {"Move": {"vm_status": "Executed successfully", "events": []}}
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/rpc/v1/transactions/{HASH}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(committed_transfer(
                &sender,
                &recipient.address().to_string(),
                "Success",
            )))
            .mount(&server)
            .await;

        let supra = supra_for(&server);
        let result = supra
            .send_entry_function(
                &sender,
                EntryFunction::supra_transfer(recipient.address(), 250).unwrap(),
                &TransactionOptions::default(),
                SubmitOptions::default().with_simulation(true),
            )
            .await
            .unwrap();

        assert_eq!(result.txn_hash, HashValue::from_hex(HASH).unwrap());
        assert_eq!(result.status, TransactionStatus::Success);

        let insight = supra
            .transaction_insight(sender.address(), &result.txn_hash)
            .await
            .unwrap();
        assert_eq!(insight.kind, TransactionKind::CoinTransfer);
        assert_eq!(insight.coin_receiver, Some(recipient.address()));
        assert_eq!(insight.coin_change[0].coin_type, SUPRA_COIN_TYPE);
        assert_eq!(insight.coin_change[0].amount, -250);

        let received = supra
            .transaction_insight(recipient.address(), &result.txn_hash)
            .await
            .unwrap();
        assert_eq!(received.coin_change[0].amount, 250);
    }

    #[tokio::test]
    async fn test_failed_simulation_stops_submission() {
        let server = MockServer::start().await;
        mount_account(&server, 0).await;
        Mock::given(method("POST"))
            .and(path("/rpc/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "output": {"Move": {"vm_status": "Move abort: EINSUFFICIENT_BALANCE"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rpc/v1/transactions/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(HASH)))
            .expect(0)
            .mount(&server)
            .await;

        let supra = supra_for(&server);
        let sender = Ed25519Account::generate();
        let err = supra
            .send_entry_function(
                &sender,
                EntryFunction::supra_transfer(sender.address(), 1).unwrap(),
                &TransactionOptions::default(),
                SubmitOptions::default().with_simulation(true),
            )
            .await
            .unwrap_err();

        match err {
            SupraError::SimulationFailed(status) => assert!(status.contains("EINSUFFICIENT_BALANCE")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_transaction_stays_pending() {
        let server = MockServer::start().await;
        mount_account(&server, 0).await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/rpc/v1/transactions/{HASH}")))
            .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
            .mount(&server)
            .await;

        let supra = supra_for(&server);
        let sender = Ed25519Account::generate();
        let result = supra
            .send_entry_function(
                &sender,
                EntryFunction::supra_transfer(sender.address(), 1).unwrap(),
                &TransactionOptions::default(),
                SubmitOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(result.status, TransactionStatus::Pending);
        assert_eq!(transaction_lookups(&server).await, 3);

        let status = supra.get_transaction_status(&result.txn_hash).await.unwrap();
        assert_eq!(status, TransactionStatus::Pending);

        let err = supra
            .transaction_insight(sender.address(), &result.txn_hash)
            .await
            .unwrap_err();
        assert!(matches!(err, SupraError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_poll_stops_once_committed() {
        let server = MockServer::start().await;
        let sender = Ed25519Account::generate();
        mount_account(&server, 0).await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/rpc/v1/transactions/{HASH}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hash": HASH,
                "status": "Pending"
            })))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/rpc/v1/transactions/{HASH}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(committed_transfer(
                &sender, "0x2", "Fail",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let supra = supra_for(&server);
        let result = supra
            .send_entry_function(
                &sender,
                EntryFunction::supra_transfer(sender.address(), 1).unwrap(),
                &TransactionOptions::default(),
                SubmitOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(result.status, TransactionStatus::Failed);
    }

    #[tokio::test]
    async fn test_submit_without_waiting() {
        let server = MockServer::start().await;
        mount_account(&server, 9).await;
        mount_submit(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/rpc/v1/transactions/{HASH}")))
            .respond_with(ResponseTemplate::new(404))
            .expect(0)
            .mount(&server)
            .await;

        let supra = supra_for(&server);
        let sender = Ed25519Account::generate();
        let result = supra
            .send_entry_function(
                &sender,
                EntryFunction::supra_transfer(sender.address(), 1).unwrap(),
                &TransactionOptions::default(),
                SubmitOptions::default().with_wait(false),
            )
            .await
            .unwrap();

        assert_eq!(result.status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_transaction_status_query() {
        let server = MockServer::start().await;
        let sender = Ed25519Account::generate();
        Mock::given(method("GET"))
            .and(path(format!("/rpc/v1/transactions/{HASH}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(committed_transfer(
                &sender,
                "0x2",
                "Fail",
            )))
            .mount(&server)
            .await;

        let supra = supra_for(&server);
        let status = supra
            .get_transaction_status(&HashValue::from_hex(HASH).unwrap())
            .await
            .unwrap();

        assert_eq!(status, TransactionStatus::Failed);
    }

    #[tokio::test]
    async fn test_build_transaction_uses_account_sequence_number() {
        let server = MockServer::start().await;
        mount_account(&server, 41).await;

        let supra = supra_for(&server);
        let sender = Ed25519Account::generate();
        let raw = supra
            .build_transaction(
                sender.address(),
                EntryFunction::supra_transfer(sender.address(), 1).unwrap().into(),
                &TransactionOptions::default().with_gas_unit_price(150),
            )
            .await
            .unwrap();

        assert_eq!(raw.sequence_number, 41);
        assert_eq!(raw.gas_unit_price, 150);
        assert_eq!(raw.chain_id, supra_rust_sdk::ChainId::testnet());
    }
}
