//! API response types.

use crate::transaction::TransactionStatus;
use crate::types::{u64_from_str_or_num, AccountAddress, Event};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw response from the node: status code, decoded body and headers.
#[derive(Debug, Clone)]
pub struct SupraResponse<T> {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub data: T,
    /// The response headers.
    pub headers: HeaderMap,
}

impl<T> SupraResponse<T> {
    /// Creates a new response with data only.
    pub fn new(data: T) -> Self {
        Self {
            status: 200,
            data,
            headers: HeaderMap::new(),
        }
    }

    /// Returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the inner data using a function.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SupraResponse<U> {
        SupraResponse {
            status: self.status,
            data: f(self.data),
            headers: self.headers,
        }
    }
}

/// Account information from the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// The next sequence number the account will use.
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub sequence_number: u64,
    /// The authentication key, as a hex string.
    pub authentication_key: String,
}

/// The node's view of a transaction, as returned by the query and simulate
/// endpoints.
///
/// Only the fields this SDK interprets are typed. Payload and output are
/// kept as JSON because their shape depends on the transaction kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    /// The transaction hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// The status string reported by the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The header fields (sender, sequence number, gas).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    /// The payload, possibly wrapped in a `Move` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// The execution output, possibly wrapped in a `Move` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

/// Simulation and execution success marker.
pub const EXECUTION_SUCCESS: &str = "Executed successfully";

impl TransactionData {
    /// Returns the canonical status of this transaction.
    pub fn transaction_status(&self) -> TransactionStatus {
        TransactionStatus::from_optional(self.status.as_deref())
    }

    /// Returns the sender from the header.
    ///
    /// The node renders it either as a plain string or as `{"Move": "0x.."}`.
    pub fn sender(&self) -> Option<AccountAddress> {
        let sender = unwrap_move(self.header.as_ref()?.get("sender")?);
        AccountAddress::from_hex_padded(sender.as_str()?).ok()
    }

    /// Returns the payload with any `Move` wrapper removed.
    pub fn move_payload(&self) -> Option<&Value> {
        self.payload.as_ref().map(unwrap_move)
    }

    /// Returns the VM status string of the execution output.
    pub fn vm_status(&self) -> Option<&str> {
        self.move_output()?.get("vm_status")?.as_str()
    }

    /// Returns the events emitted during execution.
    ///
    /// Events that cannot be decoded are skipped.
    pub fn events(&self) -> Vec<Event> {
        self.move_output()
            .and_then(|output| output.get("events"))
            .and_then(Value::as_array)
            .map(|events| {
                events
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn move_output(&self) -> Option<&Value> {
        self.output.as_ref().map(unwrap_move)
    }
}

pub(crate) fn unwrap_move(value: &Value) -> &Value {
    value.get("Move").unwrap_or(value)
}
