//! # pawn-state — The Loan Escrow State Machine
//!
//! Implements the custody protocol for a single collateralized loan: a
//! borrower locks an NFT as collateral, declares terms, a lender funds the
//! loan, and the machine guarantees that either repayment returns the
//! collateral (principal plus interest going to the lender) or, past the
//! deadline, the lender seizes it.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──deposit_collateral──▶ CollateralHeld ──request_loan──▶ Requested
//!   ▲                                                               │   │
//!   │◀──────────────cancel_request (collateral returns)─────────────┘   │
//!   │                                                          accept_loan
//!   │                                                               │
//!   │◀──repay_loan (collateral → borrower, due → lender)──── Funded ◀┘
//!   │◀──liquidate_loan (collateral → lender, past expiry)──────┘
//! ```
//!
//! ## Design
//!
//! The lifecycle phase is a tagged variant (`LoanState`) carrying only the
//! fields meaningful in that phase — there is no reachable state where a
//! lender exists before funding, or where loan terms are half-set. Several
//! protocol invariants are therefore structural rather than checked:
//! `accept_loan` cannot succeed twice, and `repay_loan`/`liquidate_loan`
//! exclude each other because whichever commits first leaves `Empty`.
//!
//! Each operation plans a [`Transition`] — a value holding the next state
//! and the asset movements that must accompany it — and
//! [`mediator::apply`] commits the whole unit against the environment's
//! atomic custody primitive, or nothing at all.
//!
//! Near-duplicate deployment drafts (who deposits the NFT, inclusive vs
//! exclusive expiry bound, fee-bearing movements) are flags of one
//! machine: see [`VariantConfig`].

pub mod auth;
pub mod config;
pub mod engine;
pub mod mediator;
pub mod state;

pub use auth::{authorize, required_role, RequiredRole};
pub use config::{CollateralDepositor, ExpiryPolicy, VariantConfig};
pub use engine::{CallContext, Transition};
pub use mediator::apply;
pub use state::{Loan, LoanPhase, LoanState, LoanTerms, TransitionRecord};
