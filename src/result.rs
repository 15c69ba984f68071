//! Transaction result codes and their ordered classification
//!
//! Every apply attempt produces exactly one code. Codes are grouped into
//! classes that determine how the caller treats the attempt: whether the
//! transaction can ever be included in a ledger, whether it may be retried,
//! and whether the fee is consumed despite failure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered classification of transaction results.
///
/// `Local < Malformed < Failure < Retry < ClaimedCost < Success`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ResultClass {
    /// Never eligible for inclusion in any ledger.
    Local,
    /// Rejected by protocol-level structural validation.
    Malformed,
    /// Non-retryable failure with no effect.
    Failure,
    /// Transient condition; the caller may re-attempt later.
    Retry,
    /// The fee is consumed even though the intended effect did not happen.
    ClaimedCost,
    /// Applied in full, including deliberate no-op successes.
    Success,
}

/// The concrete result code of one apply attempt.
///
/// Variants are listed in class order so the derived ordering matches the
/// classification ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TxResult {
    /// Internal invariant violated while applying; local to this node.
    InternalError,

    /// An explicitly present expiration field of value zero.
    BadExpiration,
    /// Fee is negative or exceeds the legal supply.
    BadFee,
    /// The transaction kind is not enabled by protocol parameters.
    Disabled,

    /// Ledger bookkeeping is inconsistent with the requested operation.
    BadLedger,
    /// Transaction sequence has already been consumed.
    PastSequence,

    /// The sending account does not exist in the ledger.
    NoAccount,
    /// Transaction sequence is ahead of the account; retry later.
    PreSequence,
    /// The account cannot cover the fee; retry after funding.
    InsufficientFeeBalance,

    /// Prior balance is below the reserve required for one more owned object.
    InsufficientReserve,
    /// The named target account does not exist.
    NoTarget,

    /// Applied successfully.
    Success,
}

impl TxResult {
    /// The classification this code belongs to.
    pub fn class(self) -> ResultClass {
        match self {
            TxResult::InternalError => ResultClass::Local,
            TxResult::BadExpiration | TxResult::BadFee | TxResult::Disabled => {
                ResultClass::Malformed
            }
            TxResult::BadLedger | TxResult::PastSequence => ResultClass::Failure,
            TxResult::NoAccount | TxResult::PreSequence | TxResult::InsufficientFeeBalance => {
                ResultClass::Retry
            }
            TxResult::InsufficientReserve | TxResult::NoTarget => ResultClass::ClaimedCost,
            TxResult::Success => ResultClass::Success,
        }
    }

    pub fn is_success(self) -> bool {
        self == TxResult::Success
    }

    /// True iff the fee is consumed: success and claimed-cost outcomes.
    pub fn consumes_fee(self) -> bool {
        matches!(self.class(), ResultClass::ClaimedCost | ResultClass::Success)
    }

    /// True iff the caller may re-attempt the transaction later.
    pub fn is_retry(self) -> bool {
        self.class() == ResultClass::Retry
    }
}

impl fmt::Display for TxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxResult::InternalError => "internal error",
            TxResult::BadExpiration => "malformed: bad expiration",
            TxResult::BadFee => "malformed: bad fee",
            TxResult::Disabled => "malformed: feature disabled",
            TxResult::BadLedger => "inconsistent ledger entry",
            TxResult::PastSequence => "sequence already consumed",
            TxResult::NoAccount => "sending account not found",
            TxResult::PreSequence => "sequence not yet reachable",
            TxResult::InsufficientFeeBalance => "balance cannot cover fee",
            TxResult::InsufficientReserve => "insufficient reserve",
            TxResult::NoTarget => "target account not found",
            TxResult::Success => "success",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ordering() {
        assert!(ResultClass::Local < ResultClass::Malformed);
        assert!(ResultClass::Malformed < ResultClass::Failure);
        assert!(ResultClass::Failure < ResultClass::Retry);
        assert!(ResultClass::Retry < ResultClass::ClaimedCost);
        assert!(ResultClass::ClaimedCost < ResultClass::Success);
    }

    #[test]
    fn test_code_order_matches_class_order() {
        let codes = [
            TxResult::InternalError,
            TxResult::BadExpiration,
            TxResult::BadFee,
            TxResult::Disabled,
            TxResult::BadLedger,
            TxResult::PastSequence,
            TxResult::NoAccount,
            TxResult::PreSequence,
            TxResult::InsufficientFeeBalance,
            TxResult::InsufficientReserve,
            TxResult::NoTarget,
            TxResult::Success,
        ];
        for pair in codes.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].class() <= pair[1].class());
        }
    }

    #[test]
    fn test_fee_consumption() {
        assert!(TxResult::Success.consumes_fee());
        assert!(TxResult::InsufficientReserve.consumes_fee());
        assert!(TxResult::NoTarget.consumes_fee());
        assert!(!TxResult::BadExpiration.consumes_fee());
        assert!(!TxResult::PreSequence.consumes_fee());
        assert!(!TxResult::InternalError.consumes_fee());
    }

    #[test]
    fn test_retry_classification() {
        assert!(TxResult::PreSequence.is_retry());
        assert!(TxResult::NoAccount.is_retry());
        assert!(TxResult::InsufficientFeeBalance.is_retry());
        assert!(!TxResult::PastSequence.is_retry());
        assert!(!TxResult::Success.is_retry());
    }
}
