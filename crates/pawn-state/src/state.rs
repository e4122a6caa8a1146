//! # Loan State
//!
//! The singleton record a program instance owns, with its lifecycle phase
//! encoded as a tagged variant. Each variant carries exactly the fields
//! that are meaningful in its phase, so invalid combinations (a lender
//! before funding, terms without collateral) are unrepresentable.

use serde::{Deserialize, Serialize};

use pawn_core::{AccountId, AssetId, LedgerTime, Operation};

use crate::config::VariantConfig;

// ─── Loan Terms ──────────────────────────────────────────────────────

/// The terms a borrower declares when requesting a loan.
///
/// Set together, atomically, exactly once per loan cycle; unset again
/// only by a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// The fungible asset to be borrowed.
    pub loan_asset: AssetId,
    /// Amount of `loan_asset` owed before interest. Always > 0.
    pub principal: u64,
    /// Seconds the loan remains valid for after acceptance.
    pub duration_secs: u64,
    /// Interest per whole year of accrual, fixed-point with 2 implied
    /// decimal digits, denominated in the same unit as `principal`.
    pub interest_rate: u64,
}

// ─── Lifecycle State ─────────────────────────────────────────────────

/// The lifecycle state of the loan, tagged by phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanState {
    /// No collateral, no loan. The starting state and the state every
    /// completed cycle returns to.
    Empty,
    /// The custody channel for the collateral is established.
    CollateralHeld {
        /// The NFT locked (or about to be locked) as collateral.
        collateral: AssetId,
    },
    /// Collateral is in custody and terms are declared; waiting for a
    /// lender.
    Requested {
        /// The NFT held in custody.
        collateral: AssetId,
        /// The declared terms.
        terms: LoanTerms,
    },
    /// A lender funded the loan; the clock is running.
    Funded {
        /// The NFT held in custody.
        collateral: AssetId,
        /// The declared terms.
        terms: LoanTerms,
        /// The account that funded the loan. Immutable for the cycle.
        lender: AccountId,
        /// Consensus time at funding.
        start: LedgerTime,
        /// Expiry boundary: `start + duration`.
        end: LedgerTime,
    },
}

impl LoanState {
    /// The runtime phase tag.
    pub fn phase(&self) -> LoanPhase {
        match self {
            Self::Empty => LoanPhase::Empty,
            Self::CollateralHeld { .. } => LoanPhase::CollateralHeld,
            Self::Requested { .. } => LoanPhase::Requested,
            Self::Funded { .. } => LoanPhase::Funded,
        }
    }

    /// The collateral asset, in any phase that has one.
    pub fn collateral(&self) -> Option<AssetId> {
        match self {
            Self::Empty => None,
            Self::CollateralHeld { collateral }
            | Self::Requested { collateral, .. }
            | Self::Funded { collateral, .. } => Some(*collateral),
        }
    }

    /// The declared terms, once requested.
    pub fn terms(&self) -> Option<&LoanTerms> {
        match self {
            Self::Requested { terms, .. } | Self::Funded { terms, .. } => Some(terms),
            _ => None,
        }
    }

    /// The lender, once funded.
    pub fn lender(&self) -> Option<&AccountId> {
        match self {
            Self::Funded { lender, .. } => Some(lender),
            _ => None,
        }
    }
}

/// Runtime phase tag for reporting and the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanPhase {
    /// No collateral, no loan.
    Empty,
    /// Custody channel established.
    CollateralHeld,
    /// Terms declared, collateral locked, no lender yet.
    Requested,
    /// Funded and running.
    Funded,
}

impl LoanPhase {
    /// Canonical phase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::CollateralHeld => "COLLATERAL_HELD",
            Self::Requested => "REQUESTED",
            Self::Funded => "FUNDED",
        }
    }
}

impl std::fmt::Display for LoanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// Audit log entry for a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The operation that caused the transition.
    pub operation: Operation,
    /// Phase before the transition.
    pub from_phase: LoanPhase,
    /// Phase after the transition.
    pub to_phase: LoanPhase,
    /// Consensus time of the call.
    pub at: LedgerTime,
}

// ─── The Loan ────────────────────────────────────────────────────────

/// The singleton loan record owned by one program instance.
///
/// Mutated only by [`crate::mediator::apply`] committing a planned
/// [`crate::engine::Transition`]; everything else reads through the
/// accessors. The hosting environment persists the whole record with the
/// same atomicity as asset balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    creator: AccountId,
    program_address: AccountId,
    borrower: Option<AccountId>,
    /// A borrower fixed at creation survives cycle resets; a registered
    /// one clears with the rest of the cycle.
    borrower_fixed: bool,
    config: VariantConfig,
    state: LoanState,
    transitions: Vec<TransitionRecord>,
}

impl Loan {
    /// A fresh instance with no borrower; one registers via
    /// `register_borrower`.
    pub fn new(creator: AccountId, program_address: AccountId, config: VariantConfig) -> Self {
        Self {
            creator,
            program_address,
            borrower: None,
            borrower_fixed: false,
            config,
            state: LoanState::Empty,
            transitions: Vec::new(),
        }
    }

    /// A fresh instance with the borrower fixed at creation (the
    /// creator-is-borrower deployment draft).
    pub fn with_borrower(
        creator: AccountId,
        program_address: AccountId,
        borrower: AccountId,
        config: VariantConfig,
    ) -> Self {
        Self {
            creator,
            program_address,
            borrower: Some(borrower),
            borrower_fixed: true,
            config,
            state: LoanState::Empty,
            transitions: Vec::new(),
        }
    }

    /// The account that deployed the program instance.
    pub fn creator(&self) -> &AccountId {
        &self.creator
    }

    /// The program's own custody account.
    pub fn program_address(&self) -> &AccountId {
        &self.program_address
    }

    /// The borrower, once set.
    pub fn borrower(&self) -> Option<&AccountId> {
        self.borrower.as_ref()
    }

    /// The deployment variant flags.
    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// The current lifecycle state.
    pub fn state(&self) -> &LoanState {
        &self.state
    }

    /// The current phase tag.
    pub fn phase(&self) -> LoanPhase {
        self.state.phase()
    }

    /// The immutable audit log.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// The borrower field after a full cycle reset.
    pub(crate) fn borrower_after_reset(&self) -> Option<AccountId> {
        if self.borrower_fixed {
            self.borrower.clone()
        } else {
            None
        }
    }

    /// Commit a transition. Crate-internal: only the mediator calls this,
    /// and only after the ledger accepted every accompanying movement.
    pub(crate) fn commit(
        &mut self,
        operation: Operation,
        next_state: LoanState,
        next_borrower: Option<AccountId>,
        at: LedgerTime,
    ) {
        self.transitions.push(TransitionRecord {
            operation,
            from_phase: self.state.phase(),
            to_phase: next_state.phase(),
            at,
        });
        self.state = next_state;
        self.borrower = next_borrower;
    }
}
