//! Human-readable effects of a transaction.
//!
//! Coin transfers are read straight from the call arguments. For any other
//! call the balance change is rebuilt from the deposit and withdraw events
//! of a successful execution.

use crate::api::response::TransactionData;
use crate::error::{SupraError, SupraResult};
use crate::transaction::payload::{
    COIN_TRANSFER_FUNCTION, SUPRA_TRANSFER_COINS_FUNCTION, SUPRA_TRANSFER_FUNCTION,
};
use crate::transaction::status::TransactionStatus;
use crate::types::{framework, AccountAddress, CoinEventData, EntryFunctionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// What kind of transaction an insight was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A native or generic coin transfer.
    CoinTransfer,
    /// Any other entry function call.
    EntryFunctionCall,
    /// A script.
    ScriptCall,
    /// An automation registration.
    AutomationRegistration,
    /// A multisig call.
    Multisig,
}

/// Net change of one coin type for the account of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChange {
    /// Fully qualified coin type. Empty when nothing is known.
    pub coin_type: String,
    /// Signed amount: negative when the account paid.
    pub amount: i128,
}

/// Effects of a transaction from the point of view of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInsight {
    /// The coin receiver, for coin transfers.
    pub coin_receiver: Option<AccountAddress>,
    /// Balance changes per coin type.
    pub coin_change: Vec<CoinChange>,
    /// The transaction kind.
    pub kind: TransactionKind,
}

impl TransactionInsight {
    fn unknown(kind: TransactionKind) -> Self {
        Self {
            coin_receiver: None,
            coin_change: vec![CoinChange::default()],
            kind,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum PayloadView {
    #[serde(rename = "entry_function_payload")]
    EntryFunction(EntryFunctionView),
    #[serde(rename = "script_payload")]
    Script,
    #[serde(rename = "multisig_payload")]
    Multisig,
    #[serde(rename = "automation_registration_payload")]
    AutomationRegistration,
}

#[derive(Debug, Deserialize)]
struct EntryFunctionView {
    function: String,
    #[serde(default)]
    type_arguments: Vec<String>,
    #[serde(default)]
    arguments: Vec<Value>,
}

/// Derives the insight of `tx_data` for `account`.
///
/// Fails with [`SupraError::UnsupportedPayload`] when the payload shape is
/// not recognized.
pub fn extract(account: AccountAddress, tx_data: &TransactionData) -> SupraResult<TransactionInsight> {
    let payload = tx_data
        .move_payload()
        .ok_or_else(|| SupraError::UnsupportedPayload("transaction has no payload".into()))?;
    let view: PayloadView = serde_json::from_value(payload.clone()).map_err(|e| {
        SupraError::UnsupportedPayload(format!(
            "{}: {e}",
            payload.get("type").and_then(Value::as_str).unwrap_or("untyped payload")
        ))
    })?;

    match view {
        PayloadView::EntryFunction(call) => {
            if is_call_to(&call.function, SUPRA_TRANSFER_FUNCTION) {
                coin_transfer(account, tx_data, &call, framework::SUPRA_COIN_TYPE.to_string())
            } else if is_call_to(&call.function, SUPRA_TRANSFER_COINS_FUNCTION)
                || is_call_to(&call.function, COIN_TRANSFER_FUNCTION)
            {
                let coin_type = call.type_arguments.first().cloned().ok_or_else(|| {
                    SupraError::invalid_payload(format!("{} without a coin type", call.function))
                })?;
                coin_transfer(account, tx_data, &call, coin_type)
            } else {
                Ok(from_events(account, tx_data, TransactionKind::EntryFunctionCall))
            }
        }
        PayloadView::Script => Ok(from_events(account, tx_data, TransactionKind::ScriptCall)),
        PayloadView::AutomationRegistration => Ok(from_events(
            account,
            tx_data,
            TransactionKind::AutomationRegistration,
        )),
        PayloadView::Multisig => Ok(TransactionInsight::unknown(TransactionKind::Multisig)),
    }
}

fn is_call_to(function: &str, well_known: &str) -> bool {
    match (
        EntryFunctionId::from_str_strict(function),
        EntryFunctionId::from_str_strict(well_known),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn coin_transfer(
    account: AccountAddress,
    tx_data: &TransactionData,
    call: &EntryFunctionView,
    coin_type: String,
) -> SupraResult<TransactionInsight> {
    let receiver = call
        .arguments
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| SupraError::invalid_payload("transfer without a receiver argument"))?;
    let receiver = AccountAddress::from_hex_padded(receiver)?;
    let amount = call
        .arguments
        .get(1)
        .and_then(amount_of)
        .ok_or_else(|| SupraError::invalid_payload("transfer without an amount argument"))?;

    let sender = tx_data
        .sender()
        .ok_or_else(|| SupraError::invalid_payload("transfer without a sender"))?;
    let amount = if sender == account { -amount } else { amount };

    Ok(TransactionInsight {
        coin_receiver: Some(receiver),
        coin_change: vec![CoinChange { coin_type, amount }],
        kind: TransactionKind::CoinTransfer,
    })
}

fn amount_of(value: &Value) -> Option<i128> {
    match value {
        Value::String(s) => s.parse::<u64>().ok().map(i128::from),
        Value::Number(n) => n.as_u64().map(i128::from),
        _ => None,
    }
}

fn from_events(
    account: AccountAddress,
    tx_data: &TransactionData,
    kind: TransactionKind,
) -> TransactionInsight {
    if tx_data.transaction_status() != TransactionStatus::Success {
        return TransactionInsight::unknown(kind);
    }

    // first-seen order of coin types
    let mut coin_change: Vec<CoinChange> = Vec::new();
    for event in tx_data.events() {
        let sign = if event.is_coin_deposit() {
            1
        } else if event.is_coin_withdraw() {
            -1
        } else {
            continue;
        };
        let data: CoinEventData = match event.data_as() {
            Ok(data) => data,
            Err(e) => {
                debug!(event_type = %event.typ, error = %e, "skipping undecodable coin event");
                continue;
            }
        };
        match AccountAddress::from_hex_padded(&data.account) {
            Ok(owner) if owner == account => {}
            _ => continue,
        }

        let delta = sign * i128::from(data.amount);
        match coin_change.iter_mut().find(|c| c.coin_type == data.coin_type) {
            Some(change) => change.amount += delta,
            None => coin_change.push(CoinChange {
                coin_type: data.coin_type,
                amount: delta,
            }),
        }
    }

    TransactionInsight {
        coin_receiver: None,
        coin_change,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const A: &str = "0xa";
    const B: &str = "0x00000000000000000000000000000000000000000000000000000000000000b";

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::from_hex_padded(s).unwrap()
    }

    fn tx(status: &str, payload: Value, events: Value) -> TransactionData {
        serde_json::from_value(json!({
            "status": status,
            "header": {"sender": {"Move": A}},
            "payload": {"Move": payload},
            "output": {"Move": {"events": events, "vm_status": "Executed successfully"}}
        }))
        .unwrap()
    }

    fn coin_event(kind: &str, account: &str, amount: u64, coin_type: &str) -> Value {
        json!({
            "type": format!("0x1::coin::{kind}"),
            "data": {"account": account, "amount": amount.to_string(), "coin_type": coin_type}
        })
    }

    fn transfer_payload(function: &str, type_arguments: Value) -> Value {
        json!({
            "type": "entry_function_payload",
            "function": function,
            "type_arguments": type_arguments,
            "arguments": [B, "500"]
        })
    }

    #[test]
    fn test_native_transfer_from_sender() {
        let data = tx(
            "Success",
            transfer_payload("0x1::supra_account::transfer", json!([])),
            json!([]),
        );

        let insight = extract(addr(A), &data).unwrap();

        assert_eq!(insight.kind, TransactionKind::CoinTransfer);
        assert_eq!(insight.coin_receiver, Some(addr(B)));
        assert_eq!(
            insight.coin_change,
            vec![CoinChange {
                coin_type: framework::SUPRA_COIN_TYPE.to_string(),
                amount: -500
            }]
        );
    }

    #[test]
    fn test_native_transfer_seen_by_receiver_is_positive() {
        let data = tx(
            "Success",
            transfer_payload(
                "0x0000000000000000000000000000000000000000000000000000000000000001::supra_account::transfer",
                json!([]),
            ),
            json!([]),
        );
        let insight = extract(addr(B), &data).unwrap();
        assert_eq!(insight.coin_change[0].amount, 500);
    }

    #[test]
    fn test_generic_transfer_uses_type_argument() {
        for function in ["0x1::supra_account::transfer_coins", "0x1::coin::transfer"] {
            let data = tx(
                "Success",
                transfer_payload(function, json!(["0x1::usdc::USDC"])),
                json!([]),
            );
            let insight = extract(addr(A), &data).unwrap();
            assert_eq!(insight.kind, TransactionKind::CoinTransfer);
            assert_eq!(insight.coin_change[0].coin_type, "0x1::usdc::USDC");
            assert_eq!(insight.coin_change[0].amount, -500);
        }
    }

    #[test]
    fn test_generic_transfer_without_type_argument_is_rejected() {
        let data = tx(
            "Success",
            transfer_payload("0x1::coin::transfer", json!([])),
            json!([]),
        );
        assert!(matches!(
            extract(addr(A), &data),
            Err(SupraError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_events_are_netted_per_coin_type() {
        let data = tx(
            "Success",
            json!({"type": "entry_function_payload", "function": "0x1::dex::swap", "arguments": []}),
            json!([
                coin_event("CoinDeposit", A, 100, "0x1::X"),
                coin_event("CoinWithdraw", A, 30, "0x1::X"),
                coin_event("CoinDeposit", "0xb", 1_000, "0x1::X"),
                coin_event("CoinDeposit", "0x000a", 5, "0x1::X"),
            ]),
        );

        let insight = extract(addr(A), &data).unwrap();

        assert_eq!(insight.kind, TransactionKind::EntryFunctionCall);
        assert!(insight.coin_receiver.is_none());
        assert_eq!(
            insight.coin_change,
            vec![CoinChange {
                coin_type: "0x1::X".to_string(),
                amount: 75
            }]
        );
    }

    #[test]
    fn test_events_keep_first_seen_coin_order() {
        let data = tx(
            "Success",
            json!({"type": "script_payload", "code": {"bytecode": "0x00"}}),
            json!([
                coin_event("CoinWithdraw", A, 7, "0x1::Y"),
                coin_event("CoinDeposit", A, 3, "0x1::X"),
                {"type": "0x1::other::Event", "data": {}},
            ]),
        );

        let insight = extract(addr(A), &data).unwrap();

        assert_eq!(insight.kind, TransactionKind::ScriptCall);
        let types: Vec<_> = insight.coin_change.iter().map(|c| c.coin_type.as_str()).collect();
        assert_eq!(types, vec!["0x1::Y", "0x1::X"]);
        assert_eq!(insight.coin_change[0].amount, -7);
    }

    #[test]
    fn test_failed_transaction_has_default_change() {
        let data = tx(
            "Fail",
            json!({"type": "automation_registration_payload"}),
            json!([coin_event("CoinDeposit", A, 100, "0x1::X")]),
        );

        let insight = extract(addr(A), &data).unwrap();

        assert_eq!(insight.kind, TransactionKind::AutomationRegistration);
        assert_eq!(insight.coin_change, vec![CoinChange::default()]);
    }

    #[test]
    fn test_multisig_and_unknown_payloads() {
        let data = tx("Success", json!({"type": "multisig_payload"}), json!([]));
        assert_eq!(
            extract(addr(A), &data).unwrap().kind,
            TransactionKind::Multisig
        );

        let data = tx("Success", json!({"type": "module_bundle_payload"}), json!([]));
        assert!(matches!(
            extract(addr(A), &data),
            Err(SupraError::UnsupportedPayload(_))
        ));

        let data = TransactionData::default();
        assert!(matches!(
            extract(addr(A), &data),
            Err(SupraError::UnsupportedPayload(_))
        ));
    }

    #[test]
    fn test_transfer_without_sender_is_rejected() {
        let mut data = tx(
            "Success",
            transfer_payload("0x1::supra_account::transfer", json!([])),
            json!([]),
        );
        data.header = Some(json!({"sender": null}));

        assert!(matches!(
            extract(addr(A), &data),
            Err(SupraError::InvalidPayload(_))
        ));
    }
}
