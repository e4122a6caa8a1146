//! # Operation Catalogue
//!
//! One exhaustive enum naming every entry point the protocol exposes.
//! Authorization policy, transition planning, and the audit log all match
//! on `Operation` exhaustively — adding an operation forces every consumer
//! to handle it.

use serde::{Deserialize, Serialize};

/// Number of protocol operations. Kept in sync by the exhaustive test below.
pub const OPERATION_COUNT: usize = 7;

/// The entry points of the loan protocol.
///
/// These are the only calls the program instance answers; the hosting
/// environment routes everything else away before the protocol sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A caller registers as the borrower (deployments without a fixed
    /// borrower only).
    RegisterBorrower,
    /// Establish the custody channel for the collateral NFT.
    DepositCollateral,
    /// Lock the collateral and declare the loan terms.
    RequestLoan,
    /// Withdraw an unfunded request and recover the collateral.
    CancelRequest,
    /// Fund the requested loan and become the lender.
    AcceptLoan,
    /// Pay principal plus accrued interest and recover the collateral.
    RepayLoan,
    /// Seize the collateral after expiry.
    LiquidateLoan,
}

impl Operation {
    /// Canonical snake_case name, matching the wire-level call name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterBorrower => "register_borrower",
            Self::DepositCollateral => "deposit_collateral",
            Self::RequestLoan => "request_loan",
            Self::CancelRequest => "cancel_request",
            Self::AcceptLoan => "accept_loan",
            Self::RepayLoan => "repay_loan",
            Self::LiquidateLoan => "liquidate_loan",
        }
    }

    /// All operations, in lifecycle order.
    pub fn all() -> [Operation; OPERATION_COUNT] {
        [
            Self::RegisterBorrower,
            Self::DepositCollateral,
            Self::RequestLoan,
            Self::CancelRequest,
            Self::AcceptLoan,
            Self::RepayLoan,
            Self::LiquidateLoan,
        ]
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
