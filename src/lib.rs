//! Deterministic State-Transition Core (DSTC)
//!
//! The consensus-critical heart of a distributed ledger: given a proposed
//! transaction and a ledger state, produce either a new provably-consistent
//! state or a rejection, byte-for-byte identically on every node. Networking,
//! consensus voting, serialization of wire formats, persistence, and
//! signature verification all live outside this crate; transactions arrive
//! already parsed and verified, and the caller decides whether a produced
//! state delta is retained.

pub mod amount;
pub mod directory;
pub mod engine;
pub mod error;
pub mod indexes;
pub mod journal;
pub mod result;
pub mod ticket;
pub mod transactor;
pub mod types;
pub mod view;

// Re-export core types
pub use amount::{is_legal_amount, mul_ratio, Amount, DROPS_PER_UNIT, SUPPLY_CAP};
pub use directory::{
    dir_add, dir_contains, dir_entries, dir_is_empty, dir_remove, owner_page_describer,
    DirectoryPage, DIR_PAGE_CAPACITY,
};
pub use engine::{AppliedTransaction, TransactionEngine};
pub use error::{AmountError, ViewError};
pub use indexes::ticket_index;
pub use journal::{Journal, LogEntry, LogLevel};
pub use result::{ResultClass, TxResult};
pub use ticket::TicketCreate;
pub use transactor::{
    apply, claim_fee, ApplyParams, TicketCreateFields, Transaction, Transactor, TxKind,
};
pub use types::{AccountId, CloseTime, ObjectId, StateHash};
pub use view::{AccountEntry, LedgerObject, LedgerView, ReserveSchedule, Ticket};
