//! Ticket creation: the full owned-object lifecycle protocol
//!
//! A ticket is a self-expiring owned object. Creating one exercises every
//! edge of the lifecycle protocol: the reserve gate against the prior
//! balance, expiration checked against the ledger close time, target
//! resolution with self-target normalization, owner-directory insertion with
//! a removal hint, and the owner-count increment ordered strictly last.

use crate::amount::Amount;
use crate::directory::{dir_add, owner_page_describer};
use crate::indexes::ticket_index;
use crate::journal::Journal;
use crate::result::TxResult;
use crate::transactor::{Transaction, Transactor, TxKind};
use crate::types::CloseTime;
use crate::view::{LedgerObject, LedgerView, Ticket};

/// Transactor creating a [`Ticket`].
pub struct TicketCreate;

impl TicketCreate {
    fn fields(tx: &Transaction) -> &crate::transactor::TicketCreateFields {
        match &tx.kind {
            TxKind::TicketCreate(fields) => fields,
        }
    }
}

impl Transactor for TicketCreate {
    fn pre_check(tx: &Transaction) -> TxResult {
        if Self::fields(tx).expiration == Some(0) {
            return TxResult::BadExpiration;
        }
        TxResult::Success
    }

    fn do_apply(
        tx: &Transaction,
        view: &mut LedgerView,
        prior_balance: Amount,
        journal: &mut Journal,
    ) -> TxResult {
        let fields = Self::fields(tx);
        let owner_count = match view.account(&tx.account) {
            Some(entry) => entry.owner_count,
            None => return TxResult::InternalError,
        };

        // The ticket counts against the issuer's reserve, but the check runs
        // on the starting balance so the fee for this very transaction may
        // come out of the reserve.
        if prior_balance < view.reserve_for(owner_count + 1) {
            return TxResult::InsufficientReserve;
        }

        if let Some(expiration) = fields.expiration {
            if view.close_time().seconds() >= expiration {
                // Already expired at apply time: a successful no-op.
                journal.debug(format!(
                    "ticket for {} expired before creation",
                    tx.account
                ));
                return TxResult::Success;
            }
        }

        let id = ticket_index(&tx.account, tx.sequence);
        let ticket = Ticket {
            account: tx.account,
            sequence: tx.sequence,
            expiration: fields.expiration.map(CloseTime::from_seconds),
            target: None,
            owner_node: None,
        };
        if view.insert(id, LedgerObject::Ticket(ticket)).is_err() {
            return TxResult::InternalError;
        }

        if let Some(target) = fields.target {
            if view.account(&target).is_none() {
                return TxResult::NoTarget;
            }
            // The issuing account is the default the ticket applies to, so
            // a self-target is not stored.
            if target != tx.account {
                if let Some(LedgerObject::Ticket(t)) = view.object_mut(&id) {
                    t.target = Some(target);
                }
            }
        }

        let (hint, result) = dir_add(view, tx.account, id, owner_page_describer(tx.account));
        journal.trace(format!("creating ticket {}: {}", id, result));
        if !result.is_success() {
            return result;
        }

        if let Some(LedgerObject::Ticket(t)) = view.object_mut(&id) {
            t.owner_node = Some(hint);
        }

        // Only now, with the object durably indexed, does it count against
        // the creator's reserve.
        if view.adjust_owner_count(&tx.account, 1).is_err() {
            return TxResult::InternalError;
        }
        TxResult::Success
    }
}
