//! Canonical encoding boundary.
//!
//! All byte-level encoding goes through the external `bcs` codec. The output
//! is opaque and order-sensitive: callers hash, sign or transmit it as-is and
//! never splice fields back in after encoding.

use crate::error::{SupraError, SupraResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Canonically encodes a value.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> SupraResult<Vec<u8>> {
    bcs::to_bytes(value).map_err(SupraError::bcs)
}

/// Decodes a canonically encoded value. Trailing bytes are an error.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> SupraResult<T> {
    bcs::from_bytes(bytes).map_err(SupraError::bcs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_integers_and_length_prefixes() {
        assert_eq!(encode(&0x0102u16).unwrap(), vec![0x02, 0x01]);
        assert_eq!(encode(&vec![7u8, 8u8]).unwrap(), vec![2, 7, 8]);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert!(decode::<u8>(&[1, 2]).is_err());
        assert!(matches!(decode::<u64>(&[1]), Err(SupraError::Bcs(_))));
    }
}
