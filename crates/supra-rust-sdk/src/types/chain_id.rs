use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the chain a transaction is meant for.
///
/// Part of every raw transaction so a transaction signed for testnet cannot
/// be replayed on mainnet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u8);

impl ChainId {
    /// Creates a chain id from its numeric value.
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Mainnet chain id.
    pub const fn mainnet() -> Self {
        Self(8)
    }

    /// Testnet chain id.
    pub const fn testnet() -> Self {
        Self(6)
    }

    /// Returns the numeric value.
    pub const fn id(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ChainId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}
