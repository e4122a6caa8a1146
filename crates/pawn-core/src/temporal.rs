//! # Temporal Types — Consensus Clock Instants
//!
//! Defines `LedgerTime`, the timestamp the hosting ledger environment
//! supplies per call, in whole seconds since the Unix epoch.
//!
//! ## Security Invariant
//!
//! The protocol never reads a local clock. Every time-dependent decision
//! (loan expiry, interest accrual) is made against the consensus clock
//! value attested by the network for the current call, so all replicas
//! decide identically.
//!
//! The environment guarantees the clock is monotonically non-decreasing
//! across calls. A call observing time running backwards relative to
//! recorded state is a hosting-environment bug, surfaced as
//! `ProtocolError::ProgrammingError` by the consumers of this type.

use serde::{Deserialize, Serialize};

/// A consensus-clock instant: whole seconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LedgerTime(pub u64);

impl LedgerTime {
    /// Construct from epoch seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The raw epoch-seconds value.
    pub fn secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, or `None` if `self < earlier`.
    ///
    /// A `None` here means the monotonic-clock contract was violated;
    /// callers treat it as fatal, not as a business condition.
    pub fn seconds_since(&self, earlier: LedgerTime) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }

    /// This instant advanced by `secs`, or `None` on overflow.
    pub fn checked_add_secs(&self, secs: u64) -> Option<LedgerTime> {
        self.0.checked_add(secs).map(LedgerTime)
    }
}

impl std::fmt::Display for LedgerTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={}", self.0)
    }
}
