use serde::{Deserialize, Serialize};

use super::errors::ProductError;

/// Non-negative amount in minor currency units (cents).
///
/// Bounded by what a `NUMERIC(12, 2)` column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    pub const MAX_CENTS: i64 = 999_999_999_999;

    pub fn from_cents(cents: i64) -> Result<Self, ProductError> {
        if !(0..=Self::MAX_CENTS).contains(&cents) {
            return Err(ProductError::InvalidPrice);
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
