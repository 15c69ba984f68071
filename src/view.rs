//! Mutable ledger view: typed object storage, account bookkeeping, reserves
//!
//! One `LedgerView` instance exists per ledger-building attempt. All
//! mutations made through it during one transaction's apply are committed or
//! discarded as a unit by the caller; the view itself performs no rollback.
//! Exclusivity is enforced by the single `&mut` borrow a caller holds for
//! the duration of one apply.
//!
//! All maps are `BTreeMap` so iteration and serialization order are
//! deterministic, which makes the state digest reproducible across nodes.

use crate::amount::Amount;
use crate::directory::DirectoryPage;
use crate::error::ViewError;
use crate::types::{AccountId, CloseTime, ObjectId, StateHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An account's ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountEntry {
    pub balance: Amount,
    /// Count of ledger objects this account owns; drives the reserve.
    pub owner_count: u32,
    /// The next transaction sequence this account is expected to submit.
    pub sequence: u32,
}

impl AccountEntry {
    pub fn new(balance: Amount, sequence: u32) -> Self {
        Self {
            balance,
            owner_count: 0,
            sequence,
        }
    }
}

/// A self-expiring owned object granting its holder a future right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    /// The owning account.
    pub account: AccountId,
    /// The transaction sequence that created this ticket.
    pub sequence: u32,
    /// Absolute ledger close time after which the ticket is void.
    pub expiration: Option<CloseTime>,
    /// Account the ticket applies to when different from the owner.
    pub target: Option<AccountId>,
    /// Owner-directory page holding this ticket's identifier.
    pub owner_node: Option<u64>,
}

/// The closed set of owned ledger-object kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerObject {
    Ticket(Ticket),
}

impl LedgerObject {
    pub fn as_ticket(&self) -> Option<&Ticket> {
        match self {
            LedgerObject::Ticket(t) => Some(t),
        }
    }

    pub fn as_ticket_mut(&mut self) -> Option<&mut Ticket> {
        match self {
            LedgerObject::Ticket(t) => Some(t),
        }
    }
}

/// Reserve schedule: base reserve plus a per-owned-object increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReserveSchedule {
    pub base: Amount,
    pub increment: Amount,
}

impl ReserveSchedule {
    pub fn new(base: Amount, increment: Amount) -> Self {
        Self { base, increment }
    }

    /// Minimum balance an account owning `owner_count` objects must retain.
    pub fn required(&self, owner_count: u32) -> Amount {
        Amount::from_drops(self.base.drops() + self.increment.drops() * i64::from(owner_count))
    }
}

/// Mutable overlay over the ledger state for one building attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerView {
    accounts: BTreeMap<AccountId, AccountEntry>,
    objects: BTreeMap<ObjectId, LedgerObject>,
    pub(crate) dir_pages: BTreeMap<(AccountId, u64), DirectoryPage>,
    pub(crate) dir_tails: BTreeMap<AccountId, u64>,
    close_time: CloseTime,
    reserve: ReserveSchedule,
}

impl LedgerView {
    pub fn new(close_time: CloseTime, reserve: ReserveSchedule) -> Self {
        Self {
            accounts: BTreeMap::new(),
            objects: BTreeMap::new(),
            dir_pages: BTreeMap::new(),
            dir_tails: BTreeMap::new(),
            close_time,
            reserve,
        }
    }

    /// Close time of the ledger version being built.
    pub fn close_time(&self) -> CloseTime {
        self.close_time
    }

    /// Reserve required to own `owner_count` objects.
    pub fn reserve_for(&self, owner_count: u32) -> Amount {
        self.reserve.required(owner_count)
    }

    /// Read a ledger object without mutating anything.
    pub fn peek(&self, id: &ObjectId) -> Option<&LedgerObject> {
        self.objects.get(id)
    }

    /// Mutable access to an existing ledger object.
    pub fn object_mut(&mut self, id: &ObjectId) -> Option<&mut LedgerObject> {
        self.objects.get_mut(id)
    }

    /// Insert a new ledger object. The key must not already be present.
    pub fn insert(&mut self, id: ObjectId, object: LedgerObject) -> Result<(), ViewError> {
        if self.objects.contains_key(&id) {
            return Err(ViewError::DuplicateObject { id });
        }
        self.objects.insert(id, object);
        Ok(())
    }

    /// Remove a ledger object, returning it.
    pub fn erase(&mut self, id: &ObjectId) -> Result<LedgerObject, ViewError> {
        self.objects
            .remove(id)
            .ok_or(ViewError::MissingObject { id: *id })
    }

    pub fn account(&self, account: &AccountId) -> Option<&AccountEntry> {
        self.accounts.get(account)
    }

    pub fn account_mut(&mut self, account: &AccountId) -> Option<&mut AccountEntry> {
        self.accounts.get_mut(account)
    }

    /// Create an account entry (genesis or account-creation processing).
    pub fn insert_account(&mut self, account: AccountId, entry: AccountEntry) {
        self.accounts.insert(account, entry);
    }

    /// Adjust an account's owner-count by a signed delta.
    ///
    /// The count never goes below zero; a delta that would do so is a
    /// caller bug in lifecycle bookkeeping.
    pub fn adjust_owner_count(
        &mut self,
        account: &AccountId,
        delta: i32,
    ) -> Result<(), ViewError> {
        let entry = self
            .accounts
            .get_mut(account)
            .ok_or(ViewError::MissingAccount { account: *account })?;
        let adjusted = i64::from(entry.owner_count) + i64::from(delta);
        debug_assert!(adjusted >= 0, "owner count underflow");
        entry.owner_count = adjusted.max(0) as u32;
        Ok(())
    }

    /// Number of ledger objects held by the view.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Blake3 digest of the canonical (bincode) encoding of the whole view.
    ///
    /// Two views with identical contents produce identical digests on every
    /// node, so this is the primitive for detecting consensus divergence.
    pub fn state_hash(&self) -> StateHash {
        let serialized =
            bincode::serialize(self).expect("ledger view serialization should never fail");
        StateHash(*blake3::hash(&serialized).as_bytes())
    }
}
