//! Error types for the Supra SDK.
//!
//! Every fallible operation in this crate returns [`SupraResult`]. Validation
//! problems (addresses, payload shape) surface at build time, transport
//! problems surface from the client, and chain-side outcomes that are not
//! errors (a transaction still pending after the wait budget) are reported as
//! a [`TransactionStatus`](crate::transaction::TransactionStatus) instead.

use std::fmt;
use thiserror::Error;

/// A specialized Result type for Supra SDK operations.
pub type SupraResult<T> = Result<T, SupraError>;

/// The main error type for the Supra SDK.
#[derive(Error, Debug)]
pub enum SupraError {
    /// Error occurred during HTTP communication
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error occurred during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error occurred during BCS serialization/deserialization
    #[error("BCS error: {0}")]
    Bcs(String),

    /// Error occurred during URL parsing
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Error occurred during hex encoding/decoding
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Malformed account address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid public key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Invalid signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid type tag or Move identifier
    #[error("Invalid type tag: {0}")]
    InvalidTypeTag(String),

    /// Payload is structurally incomplete for the requested operation
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Transaction building error (missing header field and similar)
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// The node reported a non-successful simulation
    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    /// The submit call itself failed
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Insight extraction met a payload shape it does not know
    #[error("Unsupported payload: {0}")]
    UnsupportedPayload(String),

    /// API returned an error response
    #[error("API error ({status_code}): {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
        /// Optional error code from the API
        error_code: Option<String>,
    },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal SDK error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Any other error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Maximum length for error messages written to logs.
const MAX_ERROR_MESSAGE_LENGTH: usize = 1000;

/// Patterns that might indicate sensitive information in error messages.
const SENSITIVE_PATTERNS: &[&str] = &[
    "private_key",
    "secret",
    "password",
    "mnemonic",
    "seed",
    "bearer",
    "authorization",
];

impl SupraError {
    /// Creates a new BCS error
    pub fn bcs<E: fmt::Display>(err: E) -> Self {
        Self::Bcs(err.to_string())
    }

    /// Creates a new transaction error
    pub fn transaction<S: Into<String>>(msg: S) -> Self {
        Self::Transaction(msg.into())
    }

    /// Creates a new invalid payload error
    pub fn invalid_payload<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Creates a new API error from response details
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
            error_code: None,
        }
    }

    /// Creates a new API error with the node's error code attached
    pub fn api_with_code(
        status_code: u16,
        message: impl Into<String>,
        error_code: Option<String>,
    ) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
            error_code,
        }
    }

    /// Returns true if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::AccountNotFound(_)
                | Self::Api {
                    status_code: 404,
                    ..
                }
        )
    }

    /// Returns true if this is a transient error that might succeed later.
    ///
    /// The SDK never retries transport calls itself; the classification is
    /// reported in poll-loop logs and left to callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status_code, .. } => {
                matches!(status_code, 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Returns a sanitized version of the error message safe for logging.
    ///
    /// Control characters are stripped, long messages are truncated and
    /// messages that look like they carry key material are redacted.
    ///
    /// ```rust
    /// use supra_rust_sdk::SupraError;
    ///
    /// let err = SupraError::api(500, "Internal server error with details...");
    /// let safe_msg = err.sanitized_message();
    /// assert!(safe_msg.contains("500"));
    /// ```
    pub fn sanitized_message(&self) -> String {
        Self::sanitize_string(&self.to_string())
    }

    fn sanitize_string(s: &str) -> String {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect();

        let lower = cleaned.to_lowercase();
        for pattern in SENSITIVE_PATTERNS {
            if lower.contains(pattern) {
                return format!("[REDACTED: message contained sensitive pattern '{pattern}']");
            }
        }

        if cleaned.len() > MAX_ERROR_MESSAGE_LENGTH {
            let mut cut = MAX_ERROR_MESSAGE_LENGTH;
            while !cleaned.is_char_boundary(cut) {
                cut -= 1;
            }
            format!(
                "{}... [truncated, total length: {}]",
                &cleaned[..cut],
                cleaned.len()
            )
        } else {
            cleaned
        }
    }

    /// Returns a short message suitable for display to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Http(_) => "Network error occurred",
            Self::Json(_) => "Failed to process response",
            Self::Bcs(_) => "Failed to process data",
            Self::Url(_) => "Invalid URL",
            Self::Hex(_) => "Invalid hex format",
            Self::InvalidAddress(_) => "Invalid account address",
            Self::InvalidPublicKey(_) => "Invalid public key",
            Self::InvalidPrivateKey(_) => "Invalid private key",
            Self::InvalidSignature(_) => "Invalid signature",
            Self::SignatureVerificationFailed => "Signature verification failed",
            Self::InvalidTypeTag(_) => "Invalid type format",
            Self::InvalidPayload(_) => "Invalid transaction payload",
            Self::Transaction(_) => "Transaction error",
            Self::SimulationFailed(_) => "Transaction simulation failed",
            Self::SubmissionFailed(_) => "Transaction submission failed",
            Self::UnsupportedPayload(_) => "Unsupported transaction payload",
            Self::NotFound(_)
            | Self::Api {
                status_code: 404, ..
            } => "Resource not found",
            Self::Api {
                status_code: 429, ..
            } => "Rate limit exceeded",
            Self::Api { status_code, .. } if *status_code >= 500 => "Server error",
            Self::Api { .. } => "API error",
            Self::AccountNotFound(_) => "Account not found",
            Self::Config(_) => "Configuration error",
            Self::Internal(_) => "Internal error",
            Self::Other(_) => "An error occurred",
        }
    }
}
