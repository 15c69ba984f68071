//! The staged validate/apply contract every transaction kind implements
//!
//! A transaction arrives already parsed and signature-verified. It then
//! passes through three stages: `pre_check` (stateless, structural),
//! `pre_claim` (read-only ledger state), and `do_apply` (the only stage
//! allowed to mutate the view). The driver in [`apply`] also performs the
//! checks shared by every kind: feature gating, fee legality, account
//! existence, sequence ordering, and fee funding.
//!
//! Reserve sufficiency is deliberately evaluated against the balance as it
//! stood before this transaction's fee was debited (the prior balance), so
//! an account may dip into its reserve to pay for the very transaction the
//! reserve check would otherwise block, while new objects still cannot be
//! funded out of the reserve.

use crate::amount::{is_legal_amount, Amount};
use crate::journal::Journal;
use crate::result::TxResult;
use crate::ticket::TicketCreate;
use crate::types::AccountId;
use crate::view::LedgerView;
use serde::{Deserialize, Serialize};

/// Fields specific to a ticket-creation transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketCreateFields {
    /// Absolute close time after which the ticket is void. A present value
    /// of zero is malformed.
    pub expiration: Option<u32>,
    /// Account the ticket should apply to, when not the owner itself.
    pub target: Option<AccountId>,
}

/// The closed, protocol-fixed set of transaction kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    TicketCreate(TicketCreateFields),
}

/// A pre-parsed, pre-verified transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub account: AccountId,
    /// Per-account sequence number; must equal the account's next expected
    /// sequence exactly.
    pub sequence: u32,
    pub fee: Amount,
    pub kind: TxKind,
}

/// Protocol parameters governing an apply attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyParams {
    /// Are self-expiring ticket-style objects enabled?
    pub tickets_enabled: bool,
}

impl Default for ApplyParams {
    fn default() -> Self {
        Self {
            tickets_enabled: true,
        }
    }
}

/// The staged contract implemented per transaction kind.
///
/// Implementations are stateless; all inputs arrive as arguments so the
/// set of kinds stays exhaustively matchable in [`apply`].
pub trait Transactor {
    /// Stateless structural validation against the transaction's own
    /// fields. No ledger access.
    fn pre_check(tx: &Transaction) -> TxResult;

    /// Validation requiring read-only ledger state. Default: pass-through.
    fn pre_claim(_tx: &Transaction, _view: &LedgerView) -> TxResult {
        TxResult::Success
    }

    /// The only stage permitted to mutate the view. `prior_balance` is the
    /// sender's balance before the fee debit.
    fn do_apply(
        tx: &Transaction,
        view: &mut LedgerView,
        prior_balance: Amount,
        journal: &mut Journal,
    ) -> TxResult;
}

/// Apply one transaction to the view, dispatching on its kind.
///
/// The view must be discarded in full by the caller unless the returned
/// code is a success; for claimed-cost codes the caller re-applies the fee
/// alone via [`claim_fee`]. See [`crate::engine`] for the canonical driver.
pub fn apply(
    tx: &Transaction,
    view: &mut LedgerView,
    params: &ApplyParams,
    journal: &mut Journal,
) -> TxResult {
    let result = match &tx.kind {
        TxKind::TicketCreate(_) => {
            if !params.tickets_enabled {
                journal.warn("ticket creation is disabled".to_string());
                TxResult::Disabled
            } else {
                apply_staged::<TicketCreate>(tx, view, journal)
            }
        }
    };
    journal.trace(format!(
        "applied {}#{}: {}",
        tx.account, tx.sequence, result
    ));
    result
}

fn apply_staged<X: Transactor>(
    tx: &Transaction,
    view: &mut LedgerView,
    journal: &mut Journal,
) -> TxResult {
    let result = X::pre_check(tx);
    if !result.is_success() {
        return result;
    }

    // Structural fee check shared by every kind. is_legal_amount only
    // bounds the ceiling, so the sign is checked here.
    if tx.fee.signum() < 0 || !is_legal_amount(tx.fee) {
        return TxResult::BadFee;
    }

    let Some(entry) = view.account(&tx.account) else {
        return TxResult::NoAccount;
    };
    if tx.sequence < entry.sequence {
        return TxResult::PastSequence;
    }
    if tx.sequence > entry.sequence {
        return TxResult::PreSequence;
    }
    if tx.fee > entry.balance {
        return TxResult::InsufficientFeeBalance;
    }

    let result = X::pre_claim(tx, view);
    if !result.is_success() {
        return result;
    }

    let prior_balance = claim_fee(view, tx);
    X::do_apply(tx, view, prior_balance, journal)
}

/// Debit the fee and advance the sender's sequence, returning the balance
/// as it stood before the debit.
///
/// All funding and sequence checks must already have passed; this never
/// fails and never drives the balance negative.
pub fn claim_fee(view: &mut LedgerView, tx: &Transaction) -> Amount {
    let entry = view
        .account_mut(&tx.account)
        .expect("sender existence was checked before the fee claim");
    let prior_balance = entry.balance;
    entry.balance -= tx.fee;
    entry.sequence = tx.sequence + 1;
    prior_balance
}
