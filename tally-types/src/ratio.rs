use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TallyError;

/// Exact rational factor used to extrapolate a partial bucket to a full one.
///
/// Kept as a numerator/denominator pair rather than a float so that scaling
/// is exact: `apply` multiplies before dividing, which keeps quantities like
/// `sum * (m + 1) / n` free of rounding when the division is even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRatio {
    numerator: u64,
    denominator: u64,
}

impl ScaleRatio {
    /// Build a ratio.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `denominator` is zero.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, TallyError> {
        if denominator == 0 {
            return Err(TallyError::invalid_arg("ratio denominator must be nonzero"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The identity ratio (1/1).
    #[must_use]
    pub const fn one() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    /// Numerator component.
    #[must_use]
    pub const fn numerator(self) -> u64 {
        self.numerator
    }

    /// Denominator component.
    #[must_use]
    pub const fn denominator(self) -> u64 {
        self.denominator
    }

    /// Scale a decimal quantity by this ratio, multiplying first.
    #[must_use]
    pub fn apply(self, value: Decimal) -> Decimal {
        value * Decimal::from(self.numerator) / Decimal::from(self.denominator)
    }

    /// Lossy float view, for hosts that only need an approximate factor.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}
