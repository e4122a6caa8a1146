//! # Error Taxonomy
//!
//! The failure modes of the protocol. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Every error is unrecoverable for the call that raised it: the hosting
//! environment aborts the entire atomic unit, so no partial state change
//! or partial asset movement can survive a failure. The protocol has no
//! retry or compensation variants, by design — partial application would
//! corrupt the custody invariant.

use thiserror::Error;

use crate::identity::AccountId;
use crate::operation::Operation;

/// A rejected protocol call.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The caller is not the party allowed to invoke this operation.
    #[error("caller {caller} is not authorized to invoke {operation}")]
    AuthorizationDenied {
        /// The operation that was attempted.
        operation: Operation,
        /// The authenticated caller that was denied.
        caller: AccountId,
    },

    /// The loan is not in a state that admits this operation, or an
    /// argument violates a business precondition.
    #[error("precondition violated: {0}")]
    PreconditionViolated(String),

    /// An accompanying asset movement does not match the expected value.
    #[error("transfer mismatch on {field}: expected {expected}, got {actual}")]
    TransferMismatch {
        /// The transfer field that failed validation.
        field: &'static str,
        /// What the protocol required.
        expected: String,
        /// What the environment attested.
        actual: String,
    },

    /// The ledger environment refused an outbound movement the mediator
    /// issued. The whole unit aborts with no state change.
    #[error("ledger rejected transfer: {0}")]
    TransferRejected(String),

    /// An invariant the hosting environment guarantees was violated
    /// (clock regression, arithmetic overflow on attested values).
    /// This is a bug, not a business condition.
    #[error("programming error: {0}")]
    ProgrammingError(String),
}
