//! Deterministic derivation of ledger-object identifiers
//!
//! Identifiers are Blake3 digests over domain-tagged canonical inputs, so
//! every node derives the same key for the same object.

use crate::types::{AccountId, ObjectId};
use blake3::Hasher;

/// Domain tag for ticket objects.
const TICKET_SPACE: &[u8] = b"ticket";

/// Identifier of the ticket created by `owner` with transaction `sequence`.
pub fn ticket_index(owner: &AccountId, sequence: u32) -> ObjectId {
    let mut hasher = Hasher::new();
    hasher.update(TICKET_SPACE);
    hasher.update(owner.as_bytes());
    hasher.update(&sequence.to_be_bytes());
    ObjectId(*hasher.finalize().as_bytes())
}
