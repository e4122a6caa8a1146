//! # pawn-ledger — The Hosting Environment Boundary
//!
//! Everything the protocol knows about asset custody lives behind this
//! crate's types. The hosting ledger environment executes a top-level call
//! plus everything it triggers as a single all-or-nothing unit; the
//! protocol only ever decides *what* to move, never *how* balances are
//! represented.
//!
//! ## Pieces
//!
//! - **`TransferIntent`** (`transfer.rs`): an outbound movement the
//!   protocol asks the environment to execute, including full-balance
//!   close semantics and fee responsibility.
//!
//! - **`IncomingTransfer`** (`transfer.rs`): the environment's attested
//!   description of a deposit grouped with the current call. The protocol
//!   validates its fields; it never observes raw balances.
//!
//! - **`Ledger`** (`ledger.rs`): the custody primitive as a trait. The
//!   only mutating entry is `apply_batch`, which the environment applies
//!   atomically.
//!
//! - **`InMemoryLedger`** (`memory.rs`): a test stand-in playing the
//!   environment's role, with asset opt-in semantics and
//!   validate-then-commit batches.

pub mod ledger;
pub mod memory;
pub mod transfer;

pub use ledger::{Ledger, LedgerError};
pub use memory::InMemoryLedger;
pub use transfer::{FeePolicy, IncomingTransfer, TransferIntent};
