//! # Transfer Mediator
//!
//! Commits a planned [`Transition`] as one unit: every outbound movement
//! the engine decided on is executed through the environment's atomic
//! custody primitive, and only then is the state change written and
//! logged. A ledger refusal aborts the call with the loan untouched —
//! the hosting environment extends the same all-or-nothing guarantee to
//! the incoming deposits grouped with the call.

use tracing::{debug, trace};

use pawn_core::ProtocolError;
use pawn_ledger::Ledger;

use crate::engine::Transition;
use crate::state::Loan;

/// Execute the transition's movements and commit its state change.
///
/// # Errors
///
/// `TransferRejected` if the ledger refuses any movement in the batch;
/// the loan record is left unchanged and the environment rolls back the
/// rest of the unit.
pub fn apply<L: Ledger>(
    loan: &mut Loan,
    ledger: &mut L,
    transition: Transition,
) -> Result<(), ProtocolError> {
    if !transition.transfers.is_empty() {
        for intent in &transition.transfers {
            trace!(
                asset = %intent.asset,
                from = %intent.from,
                to = %intent.to,
                amount = intent.amount,
                close_remainder = intent.close_remainder,
                "issuing transfer"
            );
        }
        ledger
            .apply_batch(&transition.transfers)
            .map_err(|e| ProtocolError::TransferRejected(e.to_string()))?;
    }

    let from_phase = loan.phase();
    let to_phase = transition.next_state.phase();
    loan.commit(
        transition.operation,
        transition.next_state,
        transition.next_borrower,
        transition.at,
    );
    debug!(
        operation = %transition.operation,
        from = %from_phase,
        to = %to_phase,
        at = %transition.at,
        "transition committed"
    );
    Ok(())
}
