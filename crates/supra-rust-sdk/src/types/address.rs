//! Account address type.
//!
//! Supra account addresses are 32-byte values, displayed as 64 hexadecimal
//! characters with a `0x` prefix.
//!
//! Two parsers exist and they are deliberately not interchangeable:
//!
//! - [`AccountAddress::from_hex`] is strict. After an optional `0x` prefix the
//!   input must be exactly 64 hex characters.
//! - [`AccountAddress::from_hex_padded`] accepts 1 to 64 hex characters and
//!   left-pads with zeros. It is used for user-facing strings such as `0x1`
//!   in `0x1::coin::transfer` and for account fields inside node events.

use crate::error::{SupraError, SupraResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Number of hex characters in a full-length address (without prefix).
pub const ADDRESS_HEX_LENGTH: usize = ADDRESS_LENGTH * 2;

/// A 32-byte Supra account address.
///
/// ```rust
/// use supra_rust_sdk::AccountAddress;
///
/// let addr = AccountAddress::from_hex_padded("0x1").unwrap();
/// assert_eq!(addr.to_string(), "0x0000000000000000000000000000000000000000000000000000000000000001");
/// assert_eq!(addr.to_short_string(), "0x1");
///
/// // Strict parsing refuses the short form.
/// assert!(AccountAddress::from_hex("0x1").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    /// The "zero" address (all zeros).
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// The core framework address (0x1).
    pub const ONE: Self = Self::from_u64(1);

    /// Creates an address from a byte array.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    const fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        let value_bytes = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[ADDRESS_LENGTH - 8 + i] = value_bytes[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Strictly parses an address.
    ///
    /// Accepts an optional `0x`/`0X` prefix followed by exactly 64 hex
    /// characters. Anything shorter or longer is rejected, no padding or
    /// truncation is applied.
    pub fn from_hex<T: AsRef<str>>(hex_str: T) -> SupraResult<Self> {
        let digits = strip_prefix(hex_str.as_ref());
        if digits.len() != ADDRESS_HEX_LENGTH {
            return Err(SupraError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                ADDRESS_HEX_LENGTH,
                digits.len()
            )));
        }
        Self::decode_digits(digits)
    }

    /// Parses an address, left-padding short input with zeros.
    ///
    /// Accepts 1 to 64 hex characters after an optional prefix. Longer input
    /// is still rejected.
    pub fn from_hex_padded<T: AsRef<str>>(hex_str: T) -> SupraResult<Self> {
        let digits = strip_prefix(hex_str.as_ref());
        if digits.is_empty() {
            return Err(SupraError::InvalidAddress(
                "address must contain at least one hex digit".to_string(),
            ));
        }
        if digits.len() > ADDRESS_HEX_LENGTH {
            return Err(SupraError::InvalidAddress(format!(
                "address too long: {} characters (max {})",
                digits.len(),
                ADDRESS_HEX_LENGTH
            )));
        }
        Self::decode_digits(&format!("{digits:0>64}"))
    }

    fn decode_digits(digits: &str) -> SupraResult<Self> {
        let bytes =
            hex::decode(digits).map_err(|e| SupraError::InvalidAddress(format!("{digits}: {e}")))?;
        Self::from_bytes(bytes)
    }

    /// Creates an address from a byte slice.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> SupraResult<Self> {
        let bytes = bytes.as_ref();
        if bytes.len() != ADDRESS_LENGTH {
            return Err(SupraError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(bytes);
        Ok(Self(address))
    }

    /// Returns the address as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address as a byte array.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Returns the address as a hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Returns a short hex string, trimming leading zeros.
    pub fn to_short_string(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Strictly normalizes an address string to its 32-byte value.
///
/// Shorthand for [`AccountAddress::from_hex`].
pub fn normalize_address(address: &str) -> SupraResult<AccountAddress> {
    AccountAddress::from_hex(address)
}

/// Left-pads an address string to its canonical `0x` + 64 hex form.
///
/// Shorthand for [`AccountAddress::from_hex_padded`] followed by
/// [`AccountAddress::to_hex`].
pub fn pad_address(address: &str) -> SupraResult<String> {
    AccountAddress::from_hex_padded(address).map(|a| a.to_hex())
}

impl Default for AccountAddress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_short_string())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = SupraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            // fixed-size, no length prefix
            use serde::ser::SerializeTuple;
            let mut tuple = serializer.serialize_tuple(ADDRESS_LENGTH)?;
            for byte in &self.0 {
                tuple.serialize_element(byte)?;
            }
            tuple.end()
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            // nodes render framework addresses in short form
            let s = String::deserialize(deserializer)?;
            Self::from_hex_padded(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; ADDRESS_LENGTH]>::deserialize(deserializer)?;
            Ok(Self(bytes))
        }
    }
}

impl From<[u8; ADDRESS_LENGTH]> for AccountAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
