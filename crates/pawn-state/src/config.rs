//! # Deployment Variant Configuration
//!
//! The protocol is deployed as a family of near-duplicate contract
//! drafts: one where the borrower deposits the NFT and one where the
//! program creator does, one validating repayment with a non-strict
//! expiry inequality and one with a strict inequality, fee-exempt and
//! fee-bearing inner movements. They are the same state machine. This
//! module captures the differences as flags so one core serves all of
//! them.

use serde::{Deserialize, Serialize};

use pawn_core::LedgerTime;
use pawn_ledger::FeePolicy;

/// Who may establish the collateral custody channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralDepositor {
    /// The borrower deposits their own NFT.
    Borrower,
    /// The program creator administers the deposit.
    Creator,
}

/// Which side of the expiry boundary each exit owns.
///
/// The two deployed drafts disagree on the boundary instant itself and
/// the discrepancy may be intentional per-deployment policy, so both
/// forms are preserved under explicit names rather than unified. Under
/// either policy exactly one of repayment and liquidation is admissible
/// at every instant — the boundary never belongs to both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Repayment admitted up to and including `end` (`now <= end`);
    /// liquidation strictly after (`now > end`).
    InclusiveRepay,
    /// Repayment admitted strictly before `end` (`now < end`);
    /// liquidation from `end` onward (`now >= end`).
    ExclusiveRepay,
}

impl ExpiryPolicy {
    /// Whether the borrower may still repay at `now`.
    pub fn repay_allowed(&self, now: LedgerTime, end: LedgerTime) -> bool {
        match self {
            Self::InclusiveRepay => now <= end,
            Self::ExclusiveRepay => now < end,
        }
    }

    /// Whether the lender may liquidate at `now`.
    pub fn liquidation_allowed(&self, now: LedgerTime, end: LedgerTime) -> bool {
        match self {
            Self::InclusiveRepay => now > end,
            Self::ExclusiveRepay => now >= end,
        }
    }
}

/// The variant flags of one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Who may call `deposit_collateral`.
    pub collateral_depositor: CollateralDepositor,
    /// Expiry boundary policy.
    pub expiry: ExpiryPolicy,
    /// Fee responsibility on every outbound movement.
    pub fee: FeePolicy,
}

impl Default for VariantConfig {
    /// The primary source draft: borrower deposits, repayment inclusive
    /// of the boundary, program pays its own settlement fees.
    fn default() -> Self {
        Self {
            collateral_depositor: CollateralDepositor::Borrower,
            expiry: ExpiryPolicy::InclusiveRepay,
            fee: FeePolicy::ProgramPays,
        }
    }
}
