//! # Transfer Descriptions
//!
//! Value types describing asset movements across the ledger boundary, in
//! both directions: intents the protocol issues outward, and attestations
//! of deposits that arrived grouped with the current call.

use serde::{Deserialize, Serialize};

use pawn_core::{AccountId, AssetId};

/// Who bears the settlement fee of an outbound movement.
///
/// The protocol always issues its movements with the program bearing its
/// own cost — charging the counterpart implicitly would show up as a
/// balance discrepancy. A fee-bearing deployment variant exists for
/// environments that price inner movements to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeePolicy {
    /// The program's own balance covers the settlement cost.
    ProgramPays,
    /// The outer caller covers the settlement cost.
    CallerPays,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::ProgramPays
    }
}

/// An outbound asset movement the protocol asks the environment to execute.
///
/// With `close_remainder` set, the movement sweeps the *entire* balance of
/// `asset` held by `from` to `to` and removes `from`'s holding of that
/// asset. The protocol uses this to fully vacate collateral custody — it
/// never wants a dust remainder of an NFT holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
    /// The asset to move.
    pub asset: AssetId,
    /// The account debited.
    pub from: AccountId,
    /// The account credited.
    pub to: AccountId,
    /// Amount moved before any close sweep. A zero-amount self-transfer
    /// establishes a holding (asset opt-in).
    pub amount: u64,
    /// Sweep the full remaining balance to `to` and remove the holding.
    pub close_remainder: bool,
    /// Who pays the settlement fee.
    pub fee: FeePolicy,
}

impl TransferIntent {
    /// A zero-amount self-transfer establishing `account`'s holding of
    /// `asset` (the custody channel for incoming deposits).
    pub fn opt_in(account: AccountId, asset: AssetId, fee: FeePolicy) -> Self {
        Self {
            asset,
            from: account.clone(),
            to: account,
            amount: 0,
            close_remainder: false,
            fee,
        }
    }

    /// A full-balance close of `from`'s holding of `asset` to `to`.
    ///
    /// `amount` is carried explicitly because deployed drafts differ:
    /// collateral returns close with amount 0, liquidation sweeps close
    /// with amount 1.
    pub fn close_out(
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: u64,
        fee: FeePolicy,
    ) -> Self {
        Self {
            asset,
            from,
            to,
            amount,
            close_remainder: true,
            fee,
        }
    }
}

/// The environment's attested description of a deposit grouped with the
/// current call.
///
/// The environment has already validated signatures and executed the
/// movement inside the same atomic unit; the protocol checks that its
/// fields match what the operation requires and rejects otherwise,
/// aborting the whole unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingTransfer {
    /// The asset deposited.
    pub asset: AssetId,
    /// The account that signed and funded the deposit.
    pub sender: AccountId,
    /// The account credited.
    pub receiver: AccountId,
    /// Amount deposited.
    pub amount: u64,
    /// Close-out side channel. Must be absent: a grouped deposit that
    /// also drains the sender's holding somewhere else is hostile.
    pub close_remainder_to: Option<AccountId>,
    /// Rekey side channel. Must be absent for the same reason.
    pub rekey_to: Option<AccountId>,
}

impl IncomingTransfer {
    /// A plain deposit with no side channels.
    pub fn new(asset: AssetId, sender: AccountId, receiver: AccountId, amount: u64) -> Self {
        Self {
            asset,
            sender,
            receiver,
            amount,
            close_remainder_to: None,
            rekey_to: None,
        }
    }

    /// Whether the transfer is free of close-out and rekey side channels.
    pub fn is_clean(&self) -> bool {
        self.close_remainder_to.is_none() && self.rekey_to.is_none()
    }
}
