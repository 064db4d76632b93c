//! Cryptographic primitives.
//!
//! Ed25519 keys and signatures plus the SHA3-256 helpers used for signing
//! messages, transaction hashes and address derivation.
//!
//! ```rust
//! use supra_rust_sdk::crypto::Ed25519PrivateKey;
//!
//! let private_key = Ed25519PrivateKey::generate();
//! let signature = private_key.sign(b"hello world");
//! assert!(private_key.public_key().verify(b"hello world", &signature).is_ok());
//! ```

mod ed25519;
mod hash;

pub use ed25519::{
    Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, ED25519_PRIVATE_KEY_LENGTH,
    ED25519_PUBLIC_KEY_LENGTH, ED25519_SIGNATURE_LENGTH,
};
pub use hash::{sha3_256, sha3_256_of};

/// The authentication key scheme byte for Ed25519 single-key accounts.
pub const ED25519_SCHEME: u8 = 0;

/// Derives an authentication key from a public key and scheme.
///
/// The authentication key is SHA3-256(public_key_bytes || scheme_byte).
pub fn derive_authentication_key(public_key: &[u8], scheme: u8) -> [u8; 32] {
    sha3_256_of([public_key, &[scheme]])
}

/// Derives an account address from a public key and scheme.
///
/// A freshly created account's address equals its authentication key.
pub fn derive_address(public_key: &[u8], scheme: u8) -> crate::types::AccountAddress {
    crate::types::AccountAddress::new(derive_authentication_key(public_key, scheme))
}
