//! # Value Objects

use serde::{Deserialize, Serialize};
use shared_types::Amount;
use std::cmp::Ordering;
use std::fmt;

/// Sign-magnitude amount for values that may go negative (profits).
///
/// Zero is always non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedAmount {
    /// True for values below zero.
    pub negative: bool,
    /// Absolute value.
    pub magnitude: Amount,
}

impl SignedAmount {
    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Non-negative value.
    pub fn positive(magnitude: Amount) -> Self {
        Self {
            negative: false,
            magnitude,
        }
    }

    /// Negated value (zero stays non-negative).
    pub fn negative(magnitude: Amount) -> Self {
        Self {
            negative: !magnitude.is_zero(),
            magnitude,
        }
    }

    /// `a - b` without underflow.
    pub fn difference(a: Amount, b: Amount) -> Self {
        if a >= b {
            Self::positive(a - b)
        } else {
            Self::negative(b - a)
        }
    }

    /// Value below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Value above zero.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.magnitude.is_zero()
    }

    /// `self + other`, `None` on overflow.
    pub fn checked_add(self, other: SignedAmount) -> Option<SignedAmount> {
        if self.negative == other.negative {
            let magnitude = self.magnitude.checked_add(other.magnitude)?;
            return Some(if self.negative {
                Self::negative(magnitude)
            } else {
                Self::positive(magnitude)
            });
        }
        let (pos, neg) = if self.negative {
            (other.magnitude, self.magnitude)
        } else {
            (self.magnitude, other.magnitude)
        };
        Some(Self::difference(pos, neg))
    }

    /// `self - amount`, `None` on overflow.
    pub fn checked_sub_amount(self, amount: Amount) -> Option<SignedAmount> {
        self.checked_add(Self::negative(amount))
    }
}

impl PartialOrd for SignedAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SignedAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}
