//! # Authorization Guard
//!
//! The policy is one explicit table — operation to required role —
//! testable independently of the state machine, and one checker that
//! compares the environment-attested caller against the role's field.
//!
//! An unset role field always denies: `repay_loan` cannot be authorized
//! before a borrower exists, `liquidate_loan` not before a lender does.

use pawn_core::{AccountId, Operation, ProtocolError};

use crate::config::{CollateralDepositor, VariantConfig};
use crate::state::Loan;

/// The role a caller must hold for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Must equal the loan's borrower.
    Borrower,
    /// Must equal the funding lender.
    Lender,
    /// Must equal the program creator.
    Creator,
    /// Open to any authenticated caller.
    Anyone,
}

/// The policy table: which role each operation demands under `config`.
pub fn required_role(operation: Operation, config: &VariantConfig) -> RequiredRole {
    match operation {
        // The caller becomes the borrower; eligibility is checked by the
        // engine (only while unset).
        Operation::RegisterBorrower => RequiredRole::Anyone,
        Operation::DepositCollateral => match config.collateral_depositor {
            CollateralDepositor::Borrower => RequiredRole::Borrower,
            CollateralDepositor::Creator => RequiredRole::Creator,
        },
        Operation::RequestLoan => RequiredRole::Borrower,
        Operation::CancelRequest => RequiredRole::Borrower,
        // Anyone may fund; the engine only admits it while no lender is
        // set, which the Requested phase guarantees structurally.
        Operation::AcceptLoan => RequiredRole::Anyone,
        Operation::RepayLoan => RequiredRole::Borrower,
        Operation::LiquidateLoan => RequiredRole::Lender,
    }
}

/// Check `caller` against the role `operation` demands on `loan`.
///
/// Denial is terminal for the call: the transition aborts with no side
/// effects.
pub fn authorize(
    operation: Operation,
    caller: &AccountId,
    loan: &Loan,
) -> Result<(), ProtocolError> {
    let allowed = match required_role(operation, loan.config()) {
        RequiredRole::Anyone => true,
        RequiredRole::Creator => caller == loan.creator(),
        RequiredRole::Borrower => loan.borrower() == Some(caller),
        RequiredRole::Lender => loan.state().lender() == Some(caller),
    };

    if allowed {
        Ok(())
    } else {
        Err(ProtocolError::AuthorizationDenied {
            operation,
            caller: caller.clone(),
        })
    }
}
