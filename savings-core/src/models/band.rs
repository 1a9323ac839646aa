use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a threshold-banded rate schedule.
///
/// A band covers amounts in `(lower, upper]`; `upper` is `None` for the
/// open-ended top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl Band {
    pub fn new(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { lower, upper, rate }
    }

    /// Whether `amount` falls in this band. An amount equal to `lower`
    /// belongs to the band below.
    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        amount > self.lower && self.upper.is_none_or(|upper| amount <= upper)
    }

    /// The part of `amount` that lies inside this band.
    pub fn portion_of(
        &self,
        amount: Decimal,
    ) -> Decimal {
        if amount <= self.lower {
            return Decimal::ZERO;
        }
        let capped = match self.upper {
            Some(upper) => amount.min(upper),
            None => amount,
        };
        capped - self.lower
    }
}
