//! # The Custody Primitive
//!
//! `Ledger` is the seam between the protocol and the hosting environment's
//! balance bookkeeping. The protocol decides *what* to move; the
//! environment owns balances, fees, and atomicity.

use thiserror::Error;

use pawn_core::{AccountId, AssetId};

use crate::transfer::TransferIntent;

/// A refusal from the ledger environment.
///
/// Any refusal aborts the atomic unit that issued the batch; the protocol
/// never retries or compensates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// `from` holds no balance record for the asset.
    #[error("{account} holds no {asset}")]
    UnknownHolding {
        /// The account missing the holding.
        account: AccountId,
        /// The asset in question.
        asset: AssetId,
    },

    /// The debited account's balance is below the requested amount.
    #[error("{account} has {available} of {asset}, needs {requested}")]
    InsufficientBalance {
        /// The account being debited.
        account: AccountId,
        /// The asset in question.
        asset: AssetId,
        /// Balance currently held.
        available: u64,
        /// Amount the intent requested.
        requested: u64,
    },

    /// The credited account has not established a holding of the asset.
    #[error("{account} is not opted in to {asset}")]
    ReceiverNotOptedIn {
        /// The account being credited.
        account: AccountId,
        /// The asset in question.
        asset: AssetId,
    },
}

/// The asset custody primitive supplied by the hosting environment.
///
/// `apply_batch` is all-or-nothing: either every intent in the slice takes
/// effect or none does. The environment extends that guarantee to the
/// state change committed in the same call, which is what lets the
/// mediator treat "execute transfers, then write state" as one unit.
pub trait Ledger {
    /// Execute a batch of movements atomically.
    fn apply_batch(&mut self, intents: &[TransferIntent]) -> Result<(), LedgerError>;

    /// The balance `account` holds of `asset`, or `None` without a holding.
    ///
    /// Read-only; exposed for tests and for environments that surface
    /// balances to callers. The protocol core never branches on it.
    fn balance(&self, account: &AccountId, asset: AssetId) -> Option<u64>;

    /// Whether `account` has an established holding of `asset`.
    fn holds(&self, account: &AccountId, asset: AssetId) -> bool {
        self.balance(account, asset).is_some()
    }
}
