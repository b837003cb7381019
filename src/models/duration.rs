//! Exact rational durations
//!
//! Durations are fractions of a whole note. A duration is *assignable* when
//! a single notehead with up to three dots can express it (1/4, 3/8, 7/16);
//! anything else is written as an assignable base with a LilyPond
//! multiplier.

use num_rational::Rational32;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Re-export Rational for tuplet ratios and multipliers
pub type Rational = Rational32;

const MAX_DOTS: u32 = 3;
const MAX_LOG: u32 = 7;

/// Duration as a fraction of a whole note
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration(Rational);

impl Duration {
    /// Create a duration of `numerator / denominator` whole notes
    pub fn new(numerator: i32, denominator: i32) -> Self {
        assert!(denominator > 0, "Duration denominator must be positive");
        Duration(Rational::new(numerator, denominator))
    }

    /// Like [`Duration::new`], but `None` for a non-positive denominator
    pub fn try_new(numerator: i32, denominator: i32) -> Option<Self> {
        (denominator > 0).then(|| Duration(Rational::new(numerator, denominator)))
    }

    pub fn zero() -> Self {
        Duration(Rational::new(0, 1))
    }

    pub fn from_rational(value: Rational) -> Self {
        Duration(value)
    }

    pub fn as_rational(&self) -> Rational {
        self.0
    }

    pub fn numerator(&self) -> i32 {
        *self.0.numer()
    }

    pub fn denominator(&self) -> i32 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        *self.0.numer() == 0
    }

    pub fn is_positive(&self) -> bool {
        *self.0.numer() > 0
    }

    /// Notehead log and dot count, if one notehead can express this duration
    ///
    /// Log 0 is a whole note, 1 a half, 2 a quarter and so on.
    pub fn assignable_parts(&self) -> Option<(u32, u32)> {
        if !self.is_positive() {
            return None;
        }
        for dots in 0..=MAX_DOTS {
            // dotted = base * (2^(dots+1) - 1) / 2^dots
            let dot_multiplier = Rational::new((1 << (dots + 1)) - 1, 1 << dots);
            let base = self.0 / dot_multiplier;
            let denom = *base.denom() as u32;
            if *base.numer() == 1 && denom.is_power_of_two() {
                let log = denom.trailing_zeros();
                if log <= MAX_LOG {
                    return Some((log, dots));
                }
            }
        }
        None
    }

    pub fn is_assignable(&self) -> bool {
        self.assignable_parts().is_some()
    }

    /// LilyPond duration string: "4", "8.", "16*5", "1*2/3"
    pub fn to_lilypond_string(&self) -> String {
        if let Some((log, dots)) = self.assignable_parts() {
            return format!("{}{}", 1u32 << log, ".".repeat(dots as usize));
        }
        let denom = self.denominator() as u32;
        if denom.is_power_of_two() && denom.trailing_zeros() <= MAX_LOG {
            format!("{}*{}", denom, self.numerator())
        } else {
            format!("1*{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration(self.0 + other.0)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Duration {
        Duration(self.0 - other.0)
    }
}

impl Mul<Rational> for Duration {
    type Output = Duration;

    fn mul(self, multiplier: Rational) -> Duration {
        Duration(self.0 * multiplier)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::zero(), |total, d| total + d)
    }
}

impl From<(i32, i32)> for Duration {
    fn from((numerator, denominator): (i32, i32)) -> Self {
        Duration::new(numerator, denominator)
    }
}
