//! Event types.
//!
//! Events are emitted by Move modules during execution and returned by the
//! node inside a transaction's output. Coin deposit and withdraw events are
//! what balance changes are reconstructed from.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A globally unique identifier for an event stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGuid {
    /// The creation number.
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub creation_number: u64,
    /// The owning account, as rendered by the node.
    pub account_address: String,
}

/// An event emitted during transaction execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The globally unique identifier for this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<EventGuid>,
    /// The sequence number of this event within its stream.
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub sequence_number: u64,
    /// The type of the event data.
    #[serde(rename = "type")]
    pub typ: String,
    /// The event data as JSON.
    pub data: serde_json::Value,
}

impl Event {
    /// Returns the event type as a string.
    pub fn event_type(&self) -> &str {
        &self.typ
    }

    /// Tries to deserialize the event data into a specific type.
    pub fn data_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }

    /// Returns true for coin deposit events.
    pub fn is_coin_deposit(&self) -> bool {
        self.typ == framework::COIN_DEPOSIT_EVENT
    }

    /// Returns true for coin withdraw events.
    pub fn is_coin_withdraw(&self) -> bool {
        self.typ == framework::COIN_WITHDRAW_EVENT
    }
}

/// Payload of a coin deposit or withdraw event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEventData {
    /// The affected account as rendered by the node. May be short or
    /// unpadded; compare through [`pad_address`](crate::types::pad_address).
    pub account: String,
    /// Amount moved, in the coin's base unit.
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub amount: u64,
    /// Fully qualified coin type, e.g. `0x1::supra_coin::SupraCoin`.
    pub coin_type: String,
}

/// Well-known framework identifiers.
pub mod framework {
    /// The native coin type.
    pub const SUPRA_COIN_TYPE: &str = "0x1::supra_coin::SupraCoin";
    /// Event type for coin deposits.
    pub const COIN_DEPOSIT_EVENT: &str = "0x1::coin::CoinDeposit";
    /// Event type for coin withdrawals.
    pub const COIN_WITHDRAW_EVENT: &str = "0x1::coin::CoinWithdraw";
}

/// Nodes render 64-bit integers as JSON strings; accept either form.
pub(crate) fn u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Num(u64),
    }

    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Str(s) => s.parse().map_err(de::Error::custom),
        StrOrNum::Num(n) => Ok(n),
    }
}
