//! Domain-separated transaction signing.
//!
//! A signature message is `SHA3-256(salt) || bcs(value)`. Plain transactions
//! use [`RAW_TRANSACTION_SALT`]; multi-agent and fee payer transactions sign a
//! `RawTransactionWithData` wrapper under [`RAW_TRANSACTION_WITH_DATA_SALT`].
//! A signature produced for one shape therefore never verifies for another.

use crate::account::Ed25519Account;
use crate::crypto::{sha3_256, Ed25519PrivateKey, Ed25519Signature};
use crate::error::{SupraError, SupraResult};
use crate::transaction::authenticator::{AccountAuthenticator, TransactionAuthenticator};
use crate::transaction::encoding;
use crate::transaction::types::{
    FeePayerRawTransaction, MultiAgentRawTransaction, RawTransaction, SignedTransaction,
};
use crate::types::AccountAddress;
use serde::Serialize;
use std::sync::Arc;

/// Salt for single-signer transactions.
pub const RAW_TRANSACTION_SALT: &[u8] = b"SUPRA::RawTransaction";
/// Salt for multi-agent and fee payer transactions.
pub const RAW_TRANSACTION_WITH_DATA_SALT: &[u8] = b"SUPRA::RawTransactionWithData";

/// A signing function, injected into the submission pipeline at
/// construction.
pub type SignFn =
    Arc<dyn Fn(&Ed25519PrivateKey, &RawTransaction) -> SupraResult<Ed25519Signature> + Send + Sync>;

/// Returns the default [`SignFn`], backed by [`sign_raw_transaction`].
pub fn default_sign_fn() -> SignFn {
    Arc::new(sign_raw_transaction)
}

#[derive(Serialize)]
enum RawTransactionWithData<'a> {
    MultiAgent {
        raw_txn: &'a RawTransaction,
        secondary_signer_addresses: &'a [AccountAddress],
    },
    MultiAgentWithFeePayer {
        raw_txn: &'a RawTransaction,
        secondary_signer_addresses: &'a [AccountAddress],
        fee_payer_address: AccountAddress,
    },
}

fn salted<T: Serialize + ?Sized>(salt: &[u8], value: &T) -> SupraResult<Vec<u8>> {
    let prefix = sha3_256(salt);
    let bcs_bytes = encoding::encode(value)?;
    let mut message = Vec::with_capacity(prefix.len() + bcs_bytes.len());
    message.extend_from_slice(&prefix);
    message.extend_from_slice(&bcs_bytes);
    Ok(message)
}

/// Signature message of a single-signer transaction.
pub fn signature_message(raw_txn: &RawTransaction) -> SupraResult<Vec<u8>> {
    salted(RAW_TRANSACTION_SALT, raw_txn)
}

/// Signature message shared by every signer of a multi-agent transaction.
pub fn multi_agent_signature_message(
    raw_txn: &RawTransaction,
    secondary_signer_addresses: &[AccountAddress],
) -> SupraResult<Vec<u8>> {
    salted(
        RAW_TRANSACTION_WITH_DATA_SALT,
        &RawTransactionWithData::MultiAgent {
            raw_txn,
            secondary_signer_addresses,
        },
    )
}

/// Signature message shared by every signer of a fee payer transaction.
pub fn fee_payer_signature_message(
    raw_txn: &RawTransaction,
    secondary_signer_addresses: &[AccountAddress],
    fee_payer_address: AccountAddress,
) -> SupraResult<Vec<u8>> {
    salted(
        RAW_TRANSACTION_WITH_DATA_SALT,
        &RawTransactionWithData::MultiAgentWithFeePayer {
            raw_txn,
            secondary_signer_addresses,
            fee_payer_address,
        },
    )
}

/// Signs the single-signer message of `raw_txn`.
pub fn sign_raw_transaction(
    private_key: &Ed25519PrivateKey,
    raw_txn: &RawTransaction,
) -> SupraResult<Ed25519Signature> {
    Ok(private_key.sign(&signature_message(raw_txn)?))
}

/// Signs a single-signer transaction.
pub fn sign_transaction(
    account: &Ed25519Account,
    raw_txn: RawTransaction,
) -> SupraResult<SignedTransaction> {
    let signature = sign_raw_transaction(account.private_key(), &raw_txn)?;
    Ok(SignedTransaction::new(
        raw_txn,
        TransactionAuthenticator::ed25519(*account.public_key(), signature),
    ))
}

fn leaf(account: &Ed25519Account, message: &[u8]) -> AccountAuthenticator {
    AccountAuthenticator::ed25519(*account.public_key(), account.sign_message(message))
}

/// Signs a multi-agent transaction once per signer.
///
/// The authenticator lists the secondary signers' addresses, not their keys,
/// so the node can tell signer roles apart.
pub fn sign_multi_agent_transaction(
    sender: &Ed25519Account,
    secondary_signers: &[&Ed25519Account],
    raw_txn: RawTransaction,
) -> SupraResult<SignedTransaction> {
    let multi = MultiAgentRawTransaction::new(
        raw_txn,
        secondary_signers.iter().map(|s| s.address()).collect(),
    );
    let message = multi.signing_message()?;

    let authenticator = TransactionAuthenticator::multi_agent(
        leaf(sender, &message),
        multi.secondary_signer_addresses,
        secondary_signers.iter().map(|s| leaf(s, &message)).collect(),
    );
    Ok(SignedTransaction::new(multi.raw_txn, authenticator))
}

/// Signs a sponsored transaction once per signer, fee payer included.
pub fn sign_fee_payer_transaction(
    sender: &Ed25519Account,
    secondary_signers: &[&Ed25519Account],
    fee_payer: &Ed25519Account,
    raw_txn: RawTransaction,
) -> SupraResult<SignedTransaction> {
    let sponsored = FeePayerRawTransaction::new(
        raw_txn,
        secondary_signers.iter().map(|s| s.address()).collect(),
        fee_payer.address(),
    );
    let message = sponsored.signing_message()?;

    let authenticator = TransactionAuthenticator::fee_payer(
        leaf(sender, &message),
        sponsored.secondary_signer_addresses,
        secondary_signers.iter().map(|s| leaf(s, &message)).collect(),
        sponsored.fee_payer_address,
        leaf(fee_payer, &message),
    );
    Ok(SignedTransaction::new(sponsored.raw_txn, authenticator))
}

/// Verifies every leaf of `authenticator` against the message its shape
/// signs.
pub fn verify_authenticator(
    raw_txn: &RawTransaction,
    authenticator: &TransactionAuthenticator,
) -> SupraResult<()> {
    let message = match authenticator {
        TransactionAuthenticator::Ed25519 { .. } => signature_message(raw_txn)?,
        TransactionAuthenticator::MultiAgent {
            secondary_signer_addresses,
            secondary_signers,
            ..
        } => {
            check_counts(secondary_signer_addresses, secondary_signers)?;
            multi_agent_signature_message(raw_txn, secondary_signer_addresses)?
        }
        TransactionAuthenticator::FeePayer {
            secondary_signer_addresses,
            secondary_signers,
            fee_payer_address,
            ..
        } => {
            check_counts(secondary_signer_addresses, secondary_signers)?;
            fee_payer_signature_message(raw_txn, secondary_signer_addresses, *fee_payer_address)?
        }
    };

    authenticator
        .signers()
        .iter()
        .try_for_each(|s| s.public_key().verify(&message, s.signature()))
}

fn check_counts(addresses: &[AccountAddress], signers: &[AccountAuthenticator]) -> SupraResult<()> {
    if addresses.len() != signers.len() {
        return Err(SupraError::InvalidSignature(format!(
            "{} secondary signer addresses but {} secondary signatures",
            addresses.len(),
            signers.len()
        )));
    }
    Ok(())
}
