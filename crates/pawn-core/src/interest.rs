//! # Interest Calculator
//!
//! Pure computation of the amount owed on a funded loan. Isolated in its
//! own module because its numeric semantics — truncating integer division
//! over whole years — are the kind of detail that silently drifts when
//! inlined into transition code.
//!
//! ## Accrual Semantics
//!
//! Interest accrues in whole-year steps: `rate * floor(elapsed / year)`.
//! Partial years contribute nothing, so the amount owed is a step function
//! of time, not a continuous rate. This coarse behavior is intentional and
//! must be preserved exactly — deployed counterparties price against it.

use crate::error::ProtocolError;
use crate::temporal::LedgerTime;

/// Seconds in one accrual year (365.2422 days).
pub const SECONDS_PER_YEAR: u64 = 31_556_926;

/// The amount owed at `now` on a loan funded at `start`:
/// `principal + interest_rate * floor((now - start) / SECONDS_PER_YEAR)`.
///
/// `interest_rate` is denominated in the same unit as `principal`
/// (fixed-point, 2 implied decimals, per the loan terms).
///
/// # Errors
///
/// `ProgrammingError` if `now < start` (the consensus clock never runs
/// backwards; the engine checks expiry separately and never calls this
/// out of bounds) or if the amount overflows `u64`.
pub fn amount_due(
    principal: u64,
    interest_rate: u64,
    start: LedgerTime,
    now: LedgerTime,
) -> Result<u64, ProtocolError> {
    let elapsed = now.seconds_since(start).ok_or_else(|| {
        ProtocolError::ProgrammingError(format!(
            "consensus clock ran backwards: now {now} precedes loan start {start}"
        ))
    })?;

    let years = elapsed / SECONDS_PER_YEAR;
    interest_rate
        .checked_mul(years)
        .and_then(|interest| principal.checked_add(interest))
        .ok_or_else(|| {
            ProtocolError::ProgrammingError(format!(
                "amount due overflows u64 (principal {principal}, rate {interest_rate}, years {years})"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START: LedgerTime = LedgerTime(1000);

    #[test]
    fn test_principal_only_under_one_year() {
        let due = amount_due(5, 1, START, LedgerTime(1050)).unwrap();
        assert_eq!(due, 5);

        // One second short of a full year still accrues nothing.
        let just_under = LedgerTime(START.secs() + SECONDS_PER_YEAR - 1);
        assert_eq!(amount_due(5, 1, START, just_under).unwrap(), 5);
    }

    #[test]
    fn test_step_at_year_boundary() {
        let one_year = LedgerTime(START.secs() + SECONDS_PER_YEAR);
        assert_eq!(amount_due(5, 1, START, one_year).unwrap(), 6);

        let two_years = LedgerTime(START.secs() + 2 * SECONDS_PER_YEAR);
        assert_eq!(amount_due(5, 1, START, two_years).unwrap(), 7);
    }

    #[test]
    fn test_zero_elapsed() {
        assert_eq!(amount_due(100, 50, START, START).unwrap(), 100);
    }

    #[test]
    fn test_clock_regression_is_programming_error() {
        let err = amount_due(5, 1, START, LedgerTime(999)).unwrap_err();
        assert!(matches!(err, ProtocolError::ProgrammingError(_)));
    }

    #[test]
    fn test_overflow_is_programming_error() {
        let far_future = LedgerTime(u64::MAX);
        let err = amount_due(u64::MAX, u64::MAX, LedgerTime(0), far_future).unwrap_err();
        assert!(matches!(err, ProtocolError::ProgrammingError(_)));
    }

    proptest! {
        /// Amount due never decreases as time advances.
        #[test]
        fn prop_monotone_in_now(
            principal in 0u64..1_000_000,
            rate in 0u64..10_000,
            a in 0u64..u32::MAX as u64,
            b in 0u64..u32::MAX as u64,
        ) {
            let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
            let start = LedgerTime(0);
            let due_earlier = amount_due(principal, rate, start, LedgerTime(earlier)).unwrap();
            let due_later = amount_due(principal, rate, start, LedgerTime(later)).unwrap();
            prop_assert!(due_earlier <= due_later);
        }

        /// Below one year the amount due is exactly the principal.
        #[test]
        fn prop_principal_within_first_year(
            principal in 0u64..1_000_000,
            rate in 0u64..10_000,
            elapsed in 0u64..SECONDS_PER_YEAR,
        ) {
            let start = LedgerTime(0);
            let due = amount_due(principal, rate, start, LedgerTime(elapsed)).unwrap();
            prop_assert_eq!(due, principal);
        }
    }
}
