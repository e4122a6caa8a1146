//! # Ledger Identity Newtypes
//!
//! Newtype wrappers for the handles the hosting ledger environment supplies:
//! account identities and asset identifiers. You cannot pass an `AssetId`
//! where an `AccountId` is expected.
//!
//! ## Security Invariant
//!
//! Both handles are opaque. The protocol compares them for equality and
//! nothing else — it never derives meaning from their contents, so a
//! malformed or hostile handle cannot influence any decision beyond
//! "same" or "different".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated account identity supplied by the ledger environment.
///
/// Covers every party the protocol distinguishes: the borrower, the lender,
/// the program creator, and the program's own custody account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

/// An asset identifier: the ledger's index for a fungible token or NFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AccountId {
    /// Mint a fresh account handle.
    ///
    /// In production the environment supplies handles; this constructor
    /// exists for test environments that play the environment's role.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetId {
    /// Access the inner ledger asset index.
    pub fn index(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "asset:{}", self.0)
    }
}
