//! Ed25519 signature scheme.
//!
//! Every Supra account authenticator leaf is an Ed25519 public key plus a
//! 64-byte signature.

use crate::error::{SupraError, SupraResult};
use ed25519_dalek::{Signer as DalekSigner, Verifier as DalekVerifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Ed25519 private key length in bytes.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;
/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// An Ed25519 private key.
///
/// The key material is zeroized on drop and never printed.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Ed25519PrivateKey {
    #[zeroize(skip)]
    #[allow(unused)] // zeroized by dalek's own Drop
    inner: ed25519_dalek::SigningKey,
}

impl Ed25519PrivateKey {
    /// Generates a new random private key.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            inner: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Creates a private key from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> SupraResult<Self> {
        let key_bytes: [u8; ED25519_PRIVATE_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SupraError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                ED25519_PRIVATE_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self {
            inner: ed25519_dalek::SigningKey::from_bytes(&key_bytes),
        })
    }

    /// Creates a private key from a hex string, with or without `0x`.
    pub fn from_hex(hex_str: &str) -> SupraResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let mut bytes = hex::decode(hex_str)
            .map_err(|e| SupraError::InvalidPrivateKey(e.to_string()))?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Returns the private key as bytes.
    pub fn to_bytes(&self) -> [u8; ED25519_PRIVATE_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Returns the corresponding public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Signs a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature {
            inner: self.inner.sign(message),
        }
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PrivateKey([REDACTED])")
    }
}

/// An Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl Ed25519PublicKey {
    /// Creates a public key from raw bytes. The bytes must be a valid
    /// compressed curve point.
    pub fn from_bytes(bytes: &[u8]) -> SupraResult<Self> {
        let key_bytes: [u8; ED25519_PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SupraError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                ED25519_PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        let inner = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
            .map_err(|e| SupraError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates a public key from a hex string.
    pub fn from_hex(hex_str: &str) -> SupraResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// Returns the public key as bytes.
    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Returns the public key as a hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.inner.to_bytes()))
    }

    /// Verifies a signature against a message.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> SupraResult<()> {
        self.inner
            .verify(message, &signature.inner)
            .map_err(|_| SupraError::SignatureVerificationFailed)
    }

    /// Derives the account address for this public key (scheme byte 0).
    pub fn to_address(&self) -> crate::types::AccountAddress {
        crate::crypto::derive_address(&self.to_bytes(), crate::crypto::ED25519_SCHEME)
    }

    /// Derives the authentication key for this public key.
    pub fn to_authentication_key(&self) -> [u8; 32] {
        crate::crypto::derive_authentication_key(&self.to_bytes(), crate::crypto::ED25519_SCHEME)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.inner.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = serde_bytes::ByteBuf::deserialize(deserializer)?;
            Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

/// An Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature {
    inner: ed25519_dalek::Signature,
}

impl Ed25519Signature {
    /// The all-zero placeholder sent in place of real signatures when a
    /// transaction is simulated.
    pub fn zero() -> Self {
        Self {
            inner: ed25519_dalek::Signature::from_bytes(&[0u8; ED25519_SIGNATURE_LENGTH]),
        }
    }

    /// Creates a signature from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> SupraResult<Self> {
        let inner = ed25519_dalek::Signature::from_slice(bytes).map_err(|_| {
            SupraError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                ED25519_SIGNATURE_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self { inner })
    }

    /// Creates a signature from a hex string.
    pub fn from_hex(hex_str: &str) -> SupraResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        Self::from_bytes(&hex::decode(hex_str)?)
    }

    /// Returns the signature as bytes.
    pub fn to_bytes(&self) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.inner.to_bytes()
    }

    /// Returns the signature as a hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.inner.to_bytes()))
    }

    /// Returns true for the simulation placeholder.
    pub fn is_zero(&self) -> bool {
        self.to_bytes().iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({})", self.to_hex())
    }
}

impl fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.inner.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = serde_bytes::ByteBuf::deserialize(deserializer)?;
            Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}
