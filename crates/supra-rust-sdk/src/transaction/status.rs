//! Canonical transaction status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a submitted transaction.
///
/// `Pending` returned after waiting means the outcome is unknown, not that
/// the transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Not yet known to be committed.
    Pending,
    /// Committed and executed successfully.
    Success,
    /// Committed with a failed execution, or rejected by the node.
    Failed,
}

impl TransactionStatus {
    /// Maps the status string a node reports to the canonical status.
    ///
    /// `Invalid` folds into `Failed`. Anything unrecognized is `Pending`.
    pub fn from_node_status(status: &str) -> Self {
        match status {
            "Success" => Self::Success,
            "Fail" | "Failed" | "Invalid" => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// Same as [`from_node_status`](Self::from_node_status), with a missing
    /// value treated as `Pending`.
    pub fn from_optional(status: Option<&str>) -> Self {
        status.map_or(Self::Pending, Self::from_node_status)
    }

    /// Returns true for `Success` and `Failed`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true for `Success`.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Failed => "Failed",
        };
        f.write_str(s)
    }
}
