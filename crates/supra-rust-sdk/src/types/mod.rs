//! Core Supra types.
//!
//! Addresses, chain ids, hashes, Move identifiers and the on-chain event
//! model.

mod address;
mod chain_id;
mod events;
mod hash;
mod move_types;

pub use address::{normalize_address, pad_address, AccountAddress, ADDRESS_HEX_LENGTH, ADDRESS_LENGTH};
pub use chain_id::ChainId;
pub use events::{framework, CoinEventData, Event, EventGuid};
pub(crate) use events::u64_from_str_or_num;
pub use hash::{HashValue, HASH_LENGTH};
pub use move_types::{EntryFunctionId, Identifier, MoveModuleId, StructTag, TypeTag};
