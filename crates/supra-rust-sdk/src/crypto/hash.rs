//! SHA3-256 helpers.

use sha3::{Digest, Sha3_256};

/// Computes the SHA3-256 hash of the input.
///
/// ```rust
/// use supra_rust_sdk::crypto::sha3_256;
///
/// assert_eq!(sha3_256(b"hello world").len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// Computes the SHA3-256 hash of multiple byte slices.
pub fn sha3_256_of<I, T>(items: I) -> [u8; 32]
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut hasher = Sha3_256::new();
    for item in items {
        hasher.update(item.as_ref());
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_known_vector() {
        let expected =
            hex::decode("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
                .unwrap();
        assert_eq!(sha3_256(b"").as_slice(), expected.as_slice());
    }

    #[test]
    fn test_sha3_256_of_multiple() {
        let hash1 = sha3_256(b"helloworld");
        let hash2 = sha3_256_of([b"hello".as_slice(), b"world".as_slice()]);
        assert_eq!(hash1, hash2);
    }
}
