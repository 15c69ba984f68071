//! Error types for caller-bug and API-misuse conditions
//!
//! Transaction outcomes are never expressed as errors; they are the
//! inspectable result codes in [`crate::result`]. The enums here cover the
//! conditions that indicate a bug in the caller or a protocol-constant
//! violation, never legitimate untrusted input.

use crate::types::{AccountId, ObjectId};
use thiserror::Error;

/// Fatal arithmetic conditions on [`crate::Amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("ratio scaling overflowed the 64-bit drop range")]
    Overflow,
}

/// Misuse of the ledger view API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("object already present: {id}")]
    DuplicateObject { id: ObjectId },

    #[error("object not found: {id}")]
    MissingObject { id: ObjectId },

    #[error("account not found: {account}")]
    MissingAccount { account: AccountId },
}
