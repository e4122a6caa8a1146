//! # pawn-core — Foundational Types for the Pawn Protocol
//!
//! This crate is the bedrock of the Pawn Protocol workspace. It defines the
//! primitives every other crate builds on: opaque account and asset handles,
//! the consensus-clock instant, the catalogue of protocol operations, the
//! error taxonomy, and the interest calculator.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `AccountId` and `AssetId`
//!    are opaque, equality-comparable tokens supplied by the hosting ledger
//!    environment. The protocol never inspects their structure.
//!
//! 2. **Consensus time only.** `LedgerTime` is the timestamp the ledger
//!    environment agrees on for the current call. There is no constructor
//!    that reads a local clock — the protocol has no other time source.
//!
//! 3. **One exhaustive `Operation` enum.** Every entry point of the protocol
//!    is named here once; authorization and audit logging match on it
//!    exhaustively.
//!
//! 4. **Unrecoverable errors.** Every `ProtocolError` aborts the whole
//!    atomic unit that raised it. There is no retry or compensation variant.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pawn-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod interest;
pub mod operation;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::ProtocolError;
pub use identity::{AccountId, AssetId};
pub use interest::{amount_due, SECONDS_PER_YEAR};
pub use operation::{Operation, OPERATION_COUNT};
pub use temporal::LedgerTime;
