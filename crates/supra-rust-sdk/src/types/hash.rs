//! Hash value type.
//!
//! A 32-byte SHA3-256 digest, used for transaction hashes.

use crate::error::{SupraError, SupraResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

/// The length of a hash value in bytes.
pub const HASH_LENGTH: usize = 32;

/// A 32-byte cryptographic hash value.
///
/// ```rust
/// use supra_rust_sdk::HashValue;
///
/// let hash = HashValue::sha3_256(b"hello world");
/// assert_eq!(hash.to_hex().len(), 66);
/// assert_eq!(hash.to_hex().parse::<HashValue>().unwrap(), hash);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashValue([u8; HASH_LENGTH]);

impl HashValue {
    /// The "zero" hash (all zeros).
    pub const ZERO: Self = Self([0u8; HASH_LENGTH]);

    /// Creates a hash from a byte array.
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Computes the SHA3-256 hash of the given data.
    pub fn sha3_256<T: AsRef<[u8]>>(data: T) -> Self {
        Self::sha3_256_of([data])
    }

    /// Computes the SHA3-256 hash of multiple byte slices.
    pub fn sha3_256_of<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut hasher = Sha3_256::new();
        for item in items {
            hasher.update(item.as_ref());
        }
        Self(hasher.finalize().into())
    }

    /// Creates a hash from a hex string of exactly 64 hex characters,
    /// with or without `0x` prefix.
    pub fn from_hex<T: AsRef<str>>(hex_str: T) -> SupraResult<Self> {
        let s = hex_str.as_ref();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != HASH_LENGTH * 2 {
            return Err(SupraError::Internal(format!(
                "Invalid hash length: expected {} hex characters, got {}",
                HASH_LENGTH * 2,
                digits.len()
            )));
        }
        let mut hash = [0u8; HASH_LENGTH];
        hex::decode_to_slice(digits, &mut hash)?;
        Ok(Self(hash))
    }

    /// Returns the hash as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the hash as a hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Returns true if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl Default for HashValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.to_hex())
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for HashValue {
    type Err = SupraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for HashValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; HASH_LENGTH]>::deserialize(deserializer)?;
            Ok(Self(bytes))
        }
    }
}

impl From<[u8; HASH_LENGTH]> for HashValue {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_of_multiple() {
        let hash1 = HashValue::sha3_256_of([b"hello" as &[u8], b" " as &[u8], b"world" as &[u8]]);
        let hash2 = HashValue::sha3_256(b"hello world");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_from_hex() {
        let hash = HashValue::sha3_256(b"test");
        let hex = hash.to_hex();
        assert_eq!(HashValue::from_hex(&hex).unwrap(), hash);
        assert_eq!(HashValue::from_hex(&hex[2..]).unwrap(), hash);
        assert_eq!(HashValue::from_hex(hex.replace("0x", "0X")).unwrap(), hash);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(HashValue::from_hex("0x1234").is_err());
        assert!(HashValue::from_hex("zz".repeat(32)).is_err());
    }

    #[test]
    fn test_json_serialization() {
        let hash = HashValue::sha3_256(b"test");
        let json = serde_json::to_string(&hash).unwrap();
        let parsed: HashValue = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, parsed);
    }
}
