//! Fixed-point native-currency amounts with deterministic arithmetic
//!
//! Balances, fees and deltas are all counted in drops, the indivisible unit
//! of the native currency. Arithmetic here is consensus-critical: every node
//! must produce bit-identical results, so rounding direction is always
//! explicit and intermediate widths are fixed.

use crate::error::AmountError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of drops per unit of native currency.
pub const DROPS_PER_UNIT: i64 = 1_000_000;

/// Total units of native currency ever in existence.
pub const SYSTEM_CURRENCY_COINS: i64 = 10_757;

/// Total legal supply in drops. Protocol constant; must match bit-for-bit
/// across implementations.
pub const SUPPLY_CAP: i64 = SYSTEM_CURRENCY_COINS * DROPS_PER_UNIT;

/// A signed count of drops.
///
/// Negative values are meaningful as deltas; persisted balances must be
/// validated non-negative by the caller. Overflow of add/sub is a caller
/// bug, not a runtime condition: legal balances sit far below the i64
/// range, so no checked arithmetic is used here (matching integer
/// semantics of the reference protocol).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount {
    drops: i64,
}

impl Amount {
    pub const ZERO: Amount = Amount { drops: 0 };

    /// Create an amount from a drop count.
    pub const fn from_drops(drops: i64) -> Self {
        Self { drops }
    }

    /// The number of drops.
    pub const fn drops(self) -> i64 {
        self.drops
    }

    /// True iff the amount is nonzero.
    pub const fn is_nonzero(self) -> bool {
        self.drops != 0
    }

    /// True iff the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.drops == 0
    }

    /// The sign of the amount: -1, 0 or +1.
    pub const fn signum(self) -> i64 {
        self.drops.signum()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::from_drops(self.drops + rhs.drops)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.drops += rhs.drops;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::from_drops(self.drops - rhs.drops)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.drops -= rhs.drops;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount::from_drops(-self.drops)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.drops)
    }
}

/// Scale an amount by `num / den` with an explicit rounding direction.
///
/// The multiply runs at 128-bit width, the divide truncates toward zero,
/// and a nonzero remainder earns at most one drop of correction:
/// non-negative amounts round up when `round_up` is set, negative amounts
/// round down when it is not, keeping the magnitude rounding rule
/// consistent across signs.
///
/// Untrusted numeric fields must be range-checked before reaching this
/// function; both error conditions indicate a caller bug or a
/// protocol-constant violation and are fatal to the apply attempt.
pub fn mul_ratio(amount: Amount, num: u32, den: u32, round_up: bool) -> Result<Amount, AmountError> {
    if den == 0 {
        return Err(AmountError::DivisionByZero);
    }

    let neg = amount.drops() < 0;
    let m = i128::from(amount.drops()) * i128::from(num);
    let mut r = m / i128::from(den);
    if m % i128::from(den) != 0 {
        if !neg && round_up {
            r += 1;
        }
        if neg && !round_up {
            r -= 1;
        }
    }

    i64::try_from(r)
        .map(Amount::from_drops)
        .map_err(|_| AmountError::Overflow)
}

/// True iff the amount does not exceed the total supply ever in existence.
///
/// This is a ceiling check only: negative drop counts pass. Callers that
/// need a non-negativity guarantee must check `signum()` separately. The
/// boundary is preserved exactly as the reference protocol defines it.
pub fn is_legal_amount(amount: Amount) -> bool {
    amount.drops() <= SUPPLY_CAP
}
