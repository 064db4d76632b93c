//! Transaction authenticators.
//!
//! Canonical discriminants: Ed25519 = 0, multi-agent = 2, fee payer = 3.
//! Index 1 (multi-ed25519) is not produced by this SDK and is rejected on
//! decode.

use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::types::AccountAddress;
use serde::{Deserialize, Serialize};

/// The signed proof attached to a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AuthenticatorRepr", try_from = "AuthenticatorRepr")]
pub enum TransactionAuthenticator {
    /// Single-signer Ed25519 authentication.
    Ed25519 {
        /// The signer's public key.
        public_key: Ed25519PublicKey,
        /// The signature over the plain signing message.
        signature: Ed25519Signature,
    },
    /// Several signers, the sender paying gas.
    MultiAgent {
        /// The sender's authenticator.
        sender: AccountAuthenticator,
        /// Secondary signer addresses, in signing order.
        secondary_signer_addresses: Vec<AccountAddress>,
        /// Secondary signers' authenticators, same order as the addresses.
        secondary_signers: Vec<AccountAuthenticator>,
    },
    /// A sponsor pays gas on the sender's behalf.
    FeePayer {
        /// The sender's authenticator.
        sender: AccountAuthenticator,
        /// Secondary signer addresses.
        secondary_signer_addresses: Vec<AccountAddress>,
        /// Secondary signers' authenticators.
        secondary_signers: Vec<AccountAuthenticator>,
        /// The fee payer's address.
        fee_payer_address: AccountAddress,
        /// The fee payer's authenticator.
        fee_payer_signer: AccountAuthenticator,
    },
}

/// An authenticator for a single signer inside a composite authenticator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountAuthenticator {
    /// Ed25519 public key and signature.
    Ed25519 {
        /// The public key.
        public_key: Ed25519PublicKey,
        /// The signature.
        signature: Ed25519Signature,
    },
}

impl AccountAuthenticator {
    /// Creates an Ed25519 leaf.
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self::Ed25519 {
            public_key,
            signature,
        }
    }

    /// Returns the leaf's public key.
    pub fn public_key(&self) -> &Ed25519PublicKey {
        match self {
            Self::Ed25519 { public_key, .. } => public_key,
        }
    }

    /// Returns the leaf's signature.
    pub fn signature(&self) -> &Ed25519Signature {
        match self {
            Self::Ed25519 { signature, .. } => signature,
        }
    }

    fn zeroed(&self) -> Self {
        Self::ed25519(*self.public_key(), Ed25519Signature::zero())
    }
}

impl TransactionAuthenticator {
    /// Creates a single-signer authenticator.
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self::Ed25519 {
            public_key,
            signature,
        }
    }

    /// Creates a multi-agent authenticator.
    pub fn multi_agent(
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
    ) -> Self {
        Self::MultiAgent {
            sender,
            secondary_signer_addresses,
            secondary_signers,
        }
    }

    /// Creates a fee payer authenticator.
    pub fn fee_payer(
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
        fee_payer_address: AccountAddress,
        fee_payer_signer: AccountAuthenticator,
    ) -> Self {
        Self::FeePayer {
            sender,
            secondary_signer_addresses,
            secondary_signers,
            fee_payer_address,
            fee_payer_signer,
        }
    }

    /// Returns true for the multi-agent and fee payer forms.
    pub fn is_multi_signer(&self) -> bool {
        !matches!(self, Self::Ed25519 { .. })
    }

    /// Every signer leaf in order: sender, secondary signers, fee payer.
    pub fn signers(&self) -> Vec<AccountAuthenticator> {
        match self {
            Self::Ed25519 {
                public_key,
                signature,
            } => vec![AccountAuthenticator::ed25519(*public_key, *signature)],
            Self::MultiAgent {
                sender,
                secondary_signers,
                ..
            } => std::iter::once(sender)
                .chain(secondary_signers)
                .cloned()
                .collect(),
            Self::FeePayer {
                sender,
                secondary_signers,
                fee_payer_signer,
                ..
            } => std::iter::once(sender)
                .chain(secondary_signers)
                .chain(std::iter::once(fee_payer_signer))
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy with every signature replaced by the all-zero
    /// placeholder. Public keys, addresses and shape are kept. `self` is not
    /// modified.
    pub fn with_zeroed_signatures(&self) -> Self {
        match self {
            Self::Ed25519 { public_key, .. } => {
                Self::ed25519(*public_key, Ed25519Signature::zero())
            }
            Self::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            } => Self::multi_agent(
                sender.zeroed(),
                secondary_signer_addresses.clone(),
                secondary_signers.iter().map(AccountAuthenticator::zeroed).collect(),
            ),
            Self::FeePayer {
                sender,
                secondary_signer_addresses,
                secondary_signers,
                fee_payer_address,
                fee_payer_signer,
            } => Self::fee_payer(
                sender.zeroed(),
                secondary_signer_addresses.clone(),
                secondary_signers.iter().map(AccountAuthenticator::zeroed).collect(),
                *fee_payer_address,
                fee_payer_signer.zeroed(),
            ),
        }
    }
}

/// Placeholder for the multi-ed25519 discriminant.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct UnsupportedMultiEd25519;

#[derive(Clone, Debug, Serialize, Deserialize)]
enum AuthenticatorRepr {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
    MultiEd25519(UnsupportedMultiEd25519),
    MultiAgent {
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
    },
    FeePayer {
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
        fee_payer_address: AccountAddress,
        fee_payer_signer: AccountAuthenticator,
    },
}

impl From<TransactionAuthenticator> for AuthenticatorRepr {
    fn from(auth: TransactionAuthenticator) -> Self {
        match auth {
            TransactionAuthenticator::Ed25519 {
                public_key,
                signature,
            } => Self::Ed25519 {
                public_key,
                signature,
            },
            TransactionAuthenticator::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            } => Self::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            },
            TransactionAuthenticator::FeePayer {
                sender,
                secondary_signer_addresses,
                secondary_signers,
                fee_payer_address,
                fee_payer_signer,
            } => Self::FeePayer {
                sender,
                secondary_signer_addresses,
                secondary_signers,
                fee_payer_address,
                fee_payer_signer,
            },
        }
    }
}

impl TryFrom<AuthenticatorRepr> for TransactionAuthenticator {
    type Error = String;

    fn try_from(repr: AuthenticatorRepr) -> Result<Self, Self::Error> {
        match repr {
            AuthenticatorRepr::Ed25519 {
                public_key,
                signature,
            } => Ok(Self::Ed25519 {
                public_key,
                signature,
            }),
            AuthenticatorRepr::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            } => Ok(Self::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            }),
            AuthenticatorRepr::FeePayer {
                sender,
                secondary_signer_addresses,
                secondary_signers,
                fee_payer_address,
                fee_payer_signer,
            } => Ok(Self::FeePayer {
                sender,
                secondary_signer_addresses,
                secondary_signers,
                fee_payer_address,
                fee_payer_signer,
            }),
            AuthenticatorRepr::MultiEd25519(_) => {
                Err("multi-ed25519 authenticators are not supported".to_string())
            }
        }
    }
}
