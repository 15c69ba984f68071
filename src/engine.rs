//! Sequential transaction engine with atomic commit-or-discard semantics
//!
//! Transactions are applied one at a time, in the canonical order decided by
//! the consensus layer. Each attempt runs against a scratch clone of the
//! committed view, so any non-success code leaves the committed state
//! untouched: a success commits the scratch in full, a claimed-cost outcome
//! commits only the fee debit and sequence advance, and everything else is
//! discarded.

use crate::journal::Journal;
use crate::result::{ResultClass, TxResult};
use crate::transactor::{apply, claim_fee, ApplyParams, Transaction};
use crate::types::{AccountId, StateHash};
use crate::view::LedgerView;
use serde::{Deserialize, Serialize};

/// Record of one apply attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTransaction {
    pub account: AccountId,
    pub sequence: u32,
    pub result: TxResult,
    /// Digest of the committed state after this attempt.
    pub state_hash: StateHash,
}

/// Applies a transaction sequence against one ledger-building attempt.
#[derive(Debug, Clone)]
pub struct TransactionEngine {
    view: LedgerView,
    params: ApplyParams,
    journal: Journal,
    applied: Vec<AppliedTransaction>,
}

impl TransactionEngine {
    pub fn new(view: LedgerView, params: ApplyParams) -> Self {
        Self {
            view,
            params,
            journal: Journal::all(),
            applied: Vec::new(),
        }
    }

    /// Apply one transaction, committing or discarding its mutations as a
    /// unit, and record the attempt.
    pub fn apply(&mut self, tx: &Transaction) -> TxResult {
        let mut scratch = self.view.clone();
        let result = apply(tx, &mut scratch, &self.params, &mut self.journal);

        match result.class() {
            ResultClass::Success => {
                self.view = scratch;
            }
            ResultClass::ClaimedCost => {
                // The intended effect is dropped with the scratch; only the
                // fee and sequence advance survive as a spam deterrent.
                claim_fee(&mut self.view, tx);
            }
            _ => {}
        }

        self.applied.push(AppliedTransaction {
            account: tx.account,
            sequence: tx.sequence,
            result,
            state_hash: self.view.state_hash(),
        });
        result
    }

    /// Apply a whole canonical sequence, returning the per-attempt codes.
    pub fn apply_all(&mut self, transactions: &[Transaction]) -> Vec<TxResult> {
        transactions.iter().map(|tx| self.apply(tx)).collect()
    }

    /// The committed view.
    pub fn view(&self) -> &LedgerView {
        &self.view
    }

    /// Record of every attempt so far.
    pub fn applied(&self) -> &[AppliedTransaction] {
        &self.applied
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Digest of the committed state.
    pub fn state_hash(&self) -> StateHash {
        self.view.state_hash()
    }

    /// Consume the engine, yielding the committed view and attempt record.
    pub fn into_result(self) -> (LedgerView, Vec<AppliedTransaction>) {
        (self.view, self.applied)
    }
}
