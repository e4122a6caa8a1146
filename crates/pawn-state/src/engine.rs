//! # Transition Engine
//!
//! Plans every protocol operation as a [`Transition`]: a value holding the
//! next lifecycle state and the asset movements that must accompany it.
//! Planning never mutates anything — [`crate::mediator::apply`] commits
//! the whole unit against the ledger, or nothing at all.
//!
//! Each method validates authorization first, then business
//! preconditions, then any accompanying incoming transfer, field by
//! field. The first failure aborts the call.

use pawn_core::{amount_due, AccountId, AssetId, LedgerTime, Operation, ProtocolError};
use pawn_ledger::{IncomingTransfer, TransferIntent};

use crate::auth::authorize;
use crate::state::{Loan, LoanState, LoanTerms};

/// What the hosting environment attests about the current call.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// The authenticated caller.
    pub caller: AccountId,
    /// The consensus clock value for this call.
    pub now: LedgerTime,
}

impl CallContext {
    pub fn new(caller: AccountId, now: LedgerTime) -> Self {
        Self { caller, now }
    }
}

/// A planned, not-yet-committed transition: the new state plus every
/// asset movement that must accompany it, as one value.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The operation that planned this transition.
    pub operation: Operation,
    /// The lifecycle state after commit.
    pub next_state: LoanState,
    /// The borrower field after commit.
    pub next_borrower: Option<AccountId>,
    /// Outbound movements the mediator must execute in the same unit.
    pub transfers: Vec<TransferIntent>,
    /// Consensus time of the planning call.
    pub at: LedgerTime,
}

impl Loan {
    /// `register_borrower` — the caller becomes the borrower.
    ///
    /// Only admissible while no borrower is set; the handle is immutable
    /// for the rest of the cycle.
    pub fn register_borrower(&self, ctx: &CallContext) -> Result<Transition, ProtocolError> {
        authorize(Operation::RegisterBorrower, &ctx.caller, self)?;
        if self.borrower().is_some() {
            return Err(ProtocolError::PreconditionViolated(
                "borrower is already registered".into(),
            ));
        }
        Ok(Transition {
            operation: Operation::RegisterBorrower,
            next_state: self.state().clone(),
            next_borrower: Some(ctx.caller.clone()),
            transfers: Vec::new(),
            at: ctx.now,
        })
    }

    /// `deposit_collateral` — declare the collateral NFT and establish
    /// the custody channel.
    ///
    /// The mediator issues a zero-amount self-transfer of `asset` by the
    /// program (asset opt-in); no value moves yet.
    pub fn deposit_collateral(
        &self,
        ctx: &CallContext,
        asset: AssetId,
    ) -> Result<Transition, ProtocolError> {
        authorize(Operation::DepositCollateral, &ctx.caller, self)?;
        match self.state() {
            LoanState::Empty => {}
            other => {
                return Err(ProtocolError::PreconditionViolated(format!(
                    "collateral is already set (phase {})",
                    other.phase()
                )))
            }
        }
        Ok(Transition {
            operation: Operation::DepositCollateral,
            next_state: LoanState::CollateralHeld { collateral: asset },
            next_borrower: self.borrower().cloned(),
            transfers: vec![TransferIntent::opt_in(
                self.program_address().clone(),
                asset,
                self.config().fee,
            )],
            at: ctx.now,
        })
    }

    /// `request_loan` — lock the collateral and declare the terms.
    ///
    /// The accompanying transfer must deposit exactly one unit of the
    /// declared collateral into the program's custody account.
    pub fn request_loan(
        &self,
        ctx: &CallContext,
        terms: LoanTerms,
        incoming: &IncomingTransfer,
    ) -> Result<Transition, ProtocolError> {
        authorize(Operation::RequestLoan, &ctx.caller, self)?;
        let collateral = match self.state() {
            LoanState::CollateralHeld { collateral } => *collateral,
            LoanState::Empty => {
                return Err(ProtocolError::PreconditionViolated(
                    "no collateral custody channel established".into(),
                ))
            }
            other => {
                return Err(ProtocolError::PreconditionViolated(format!(
                    "loan already requested (phase {})",
                    other.phase()
                )))
            }
        };

        if terms.principal == 0 {
            return Err(ProtocolError::PreconditionViolated(
                "principal must be positive".into(),
            ));
        }
        if terms.duration_secs == 0 {
            return Err(ProtocolError::PreconditionViolated(
                "duration must be positive".into(),
            ));
        }

        require_clean(incoming)?;
        require_asset(incoming, collateral)?;
        require_receiver(incoming, self.program_address())?;
        // The collateral is non-fungible: custody is exactly one unit.
        require_amount(incoming, 1)?;

        Ok(Transition {
            operation: Operation::RequestLoan,
            next_state: LoanState::Requested { collateral, terms },
            next_borrower: self.borrower().cloned(),
            transfers: Vec::new(),
            at: ctx.now,
        })
    }

    /// `cancel_request` — withdraw an unfunded request.
    ///
    /// Returns the full collateral custody to the borrower and resets the
    /// cycle. Structurally impossible once funded: the `Funded` phase
    /// does not admit this operation.
    pub fn cancel_request(&self, ctx: &CallContext) -> Result<Transition, ProtocolError> {
        authorize(Operation::CancelRequest, &ctx.caller, self)?;
        let collateral = match self.state() {
            LoanState::Requested { collateral, .. } => *collateral,
            LoanState::Funded { .. } => {
                return Err(ProtocolError::PreconditionViolated(
                    "cannot cancel a funded loan".into(),
                ))
            }
            other => {
                return Err(ProtocolError::PreconditionViolated(format!(
                    "no open request to cancel (phase {})",
                    other.phase()
                )))
            }
        };
        let borrower = self.require_borrower()?;

        Ok(Transition {
            operation: Operation::CancelRequest,
            next_state: LoanState::Empty,
            next_borrower: self.borrower_after_reset(),
            transfers: vec![TransferIntent::close_out(
                collateral,
                self.program_address().clone(),
                borrower,
                0,
                self.config().fee,
            )],
            at: ctx.now,
        })
    }

    /// `accept_loan` — the caller funds the request and becomes the
    /// lender.
    ///
    /// The accompanying transfer must pay exactly the principal of the
    /// loan asset from the caller to the borrower; it reaches the
    /// borrower inside the same atomic unit, so no further forwarding
    /// movement is needed.
    pub fn accept_loan(
        &self,
        ctx: &CallContext,
        incoming: &IncomingTransfer,
    ) -> Result<Transition, ProtocolError> {
        authorize(Operation::AcceptLoan, &ctx.caller, self)?;
        let (collateral, terms) = match self.state() {
            LoanState::Requested { collateral, terms } => (*collateral, terms.clone()),
            LoanState::Funded { .. } => {
                return Err(ProtocolError::PreconditionViolated(
                    "loan is already funded".into(),
                ))
            }
            other => {
                return Err(ProtocolError::PreconditionViolated(format!(
                    "no open request to fund (phase {})",
                    other.phase()
                )))
            }
        };
        let borrower = self.require_borrower()?;

        require_clean(incoming)?;
        require_asset(incoming, terms.loan_asset)?;
        require_amount(incoming, terms.principal)?;
        require_sender(incoming, &ctx.caller)?;
        require_receiver(incoming, &borrower)?;

        let end = ctx
            .now
            .checked_add_secs(terms.duration_secs)
            .ok_or_else(|| {
                ProtocolError::PreconditionViolated(format!(
                    "loan end time overflows ({} + {}s)",
                    ctx.now, terms.duration_secs
                ))
            })?;

        Ok(Transition {
            operation: Operation::AcceptLoan,
            next_state: LoanState::Funded {
                collateral,
                terms,
                lender: ctx.caller.clone(),
                start: ctx.now,
                end,
            },
            next_borrower: self.borrower().cloned(),
            transfers: Vec::new(),
            at: ctx.now,
        })
    }

    /// `repay_loan` — pay principal plus accrued interest and recover
    /// the collateral.
    ///
    /// The accompanying transfer must pay exactly the amount due at the
    /// call's consensus time, from the borrower to the lender; the
    /// mediator then returns the full collateral custody to the borrower
    /// and resets the cycle.
    pub fn repay_loan(
        &self,
        ctx: &CallContext,
        incoming: &IncomingTransfer,
    ) -> Result<Transition, ProtocolError> {
        authorize(Operation::RepayLoan, &ctx.caller, self)?;
        let (collateral, terms, lender, start, end) = match self.state() {
            LoanState::Funded {
                collateral,
                terms,
                lender,
                start,
                end,
            } => (*collateral, terms.clone(), lender.clone(), *start, *end),
            other => {
                return Err(ProtocolError::PreconditionViolated(format!(
                    "no funded loan to repay (phase {})",
                    other.phase()
                )))
            }
        };
        let borrower = self.require_borrower()?;

        if !self.config().expiry.repay_allowed(ctx.now, end) {
            return Err(ProtocolError::PreconditionViolated(format!(
                "loan expired at {end}, cannot repay at {}",
                ctx.now
            )));
        }

        let due = amount_due(terms.principal, terms.interest_rate, start, ctx.now)?;

        require_clean(incoming)?;
        require_asset(incoming, terms.loan_asset)?;
        require_amount(incoming, due)?;
        require_sender(incoming, &borrower)?;
        require_receiver(incoming, &lender)?;

        Ok(Transition {
            operation: Operation::RepayLoan,
            next_state: LoanState::Empty,
            next_borrower: self.borrower_after_reset(),
            transfers: vec![TransferIntent::close_out(
                collateral,
                self.program_address().clone(),
                borrower,
                0,
                self.config().fee,
            )],
            at: ctx.now,
        })
    }

    /// `liquidate_loan` — the lender seizes the collateral after expiry.
    ///
    /// Sweeps the program's entire collateral balance to the lender and
    /// resets the cycle.
    pub fn liquidate_loan(&self, ctx: &CallContext) -> Result<Transition, ProtocolError> {
        authorize(Operation::LiquidateLoan, &ctx.caller, self)?;
        let (collateral, lender, end) = match self.state() {
            LoanState::Funded {
                collateral,
                lender,
                end,
                ..
            } => (*collateral, lender.clone(), *end),
            other => {
                return Err(ProtocolError::PreconditionViolated(format!(
                    "no funded loan to liquidate (phase {})",
                    other.phase()
                )))
            }
        };

        if !self.config().expiry.liquidation_allowed(ctx.now, end) {
            return Err(ProtocolError::PreconditionViolated(format!(
                "loan not expired until {end}, cannot liquidate at {}",
                ctx.now
            )));
        }

        Ok(Transition {
            operation: Operation::LiquidateLoan,
            next_state: LoanState::Empty,
            next_borrower: self.borrower_after_reset(),
            transfers: vec![TransferIntent::close_out(
                collateral,
                self.program_address().clone(),
                lender,
                1,
                self.config().fee,
            )],
            at: ctx.now,
        })
    }

    fn require_borrower(&self) -> Result<AccountId, ProtocolError> {
        self.borrower().cloned().ok_or_else(|| {
            ProtocolError::PreconditionViolated("no borrower registered".into())
        })
    }
}

// ─── Incoming-Transfer Field Checks ──────────────────────────────────

fn require_clean(incoming: &IncomingTransfer) -> Result<(), ProtocolError> {
    if incoming.is_clean() {
        Ok(())
    } else {
        Err(ProtocolError::TransferMismatch {
            field: "side_channel",
            expected: "no close-remainder or rekey".into(),
            actual: format!(
                "close_remainder_to: {:?}, rekey_to: {:?}",
                incoming.close_remainder_to, incoming.rekey_to
            ),
        })
    }
}

fn require_asset(incoming: &IncomingTransfer, expected: AssetId) -> Result<(), ProtocolError> {
    if incoming.asset == expected {
        Ok(())
    } else {
        Err(ProtocolError::TransferMismatch {
            field: "asset",
            expected: expected.to_string(),
            actual: incoming.asset.to_string(),
        })
    }
}

fn require_amount(incoming: &IncomingTransfer, expected: u64) -> Result<(), ProtocolError> {
    if incoming.amount == expected {
        Ok(())
    } else {
        Err(ProtocolError::TransferMismatch {
            field: "amount",
            expected: expected.to_string(),
            actual: incoming.amount.to_string(),
        })
    }
}

fn require_sender(incoming: &IncomingTransfer, expected: &AccountId) -> Result<(), ProtocolError> {
    if &incoming.sender == expected {
        Ok(())
    } else {
        Err(ProtocolError::TransferMismatch {
            field: "sender",
            expected: expected.to_string(),
            actual: incoming.sender.to_string(),
        })
    }
}

fn require_receiver(
    incoming: &IncomingTransfer,
    expected: &AccountId,
) -> Result<(), ProtocolError> {
    if &incoming.receiver == expected {
        Ok(())
    } else {
        Err(ProtocolError::TransferMismatch {
            field: "receiver",
            expected: expected.to_string(),
            actual: incoming.receiver.to_string(),
        })
    }
}
