//! Threshold-banded rate schedules.
//!
//! A schedule is an ordered list of contiguous [`Band`]s starting at zero and
//! ending in an open band. Charges are computed piecewise: every band takes
//! its rate on the slice of the amount that falls inside it.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use savings_core::Band;
//! use savings_core::calculations::BandSchedule;
//!
//! let employee_ni = BandSchedule::new(vec![
//!     Band::new(dec!(0), Some(dec!(12570)), dec!(0)),
//!     Band::new(dec!(12570), Some(dec!(50270)), dec!(0.08)),
//!     Band::new(dec!(50270), None, dec!(0.02)),
//! ])
//! .unwrap();
//!
//! // 37,700 × 8% + 9,730 × 2%
//! assert_eq!(employee_ni.charge(dec!(60000)), dec!(3210.60));
//! assert_eq!(employee_ni.marginal_rate(dec!(50270)), dec!(0.08));
//! ```

use rust_decimal::Decimal;

use crate::Band;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandSchedule {
    bands: Vec<Band>,
}

impl BandSchedule {
    /// Builds a schedule after checking its shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConstants`] if:
    /// - the schedule is empty or does not start at zero
    /// - a band's upper limit is below its lower limit
    /// - consecutive bands are not contiguous
    /// - any band other than the last is open-ended, or the last is closed
    /// - any rate is outside [0, 1]
    pub fn new(bands: Vec<Band>) -> Result<Self, ValidationError> {
        let invalid = |detail: String| ValidationError::InvalidConstants(detail);

        let first = bands
            .first()
            .ok_or_else(|| invalid("band schedule is empty".to_string()))?;
        if !first.lower.is_zero() {
            return Err(invalid(format!(
                "band schedule must start at 0, starts at {}",
                first.lower
            )));
        }

        let last_index = bands.len() - 1;
        for (i, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "band rate must be between 0 and 1, got {}",
                    band.rate
                )));
            }
            match band.upper {
                Some(upper) if i == last_index => {
                    return Err(invalid(format!(
                        "top band must be open-ended, closes at {upper}"
                    )));
                }
                Some(upper) if upper < band.lower => {
                    return Err(invalid(format!(
                        "band upper limit {upper} is below lower limit {}",
                        band.lower
                    )));
                }
                None if i != last_index => {
                    return Err(invalid(format!(
                        "only the top band may be open-ended (band starting at {})",
                        band.lower
                    )));
                }
                _ => {}
            }
            if i > 0 && bands[i - 1].upper != Some(band.lower) {
                return Err(invalid(format!(
                    "bands are not contiguous at {}",
                    band.lower
                )));
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Total charge on `amount`, unrounded. Amounts at or below zero carry
    /// no charge.
    pub fn charge(
        &self,
        amount: Decimal,
    ) -> Decimal {
        self.bands
            .iter()
            .map(|band| band.portion_of(amount) * band.rate)
            .sum()
    }

    /// Rate charged on the last penny of `amount`. An amount exactly at a
    /// threshold takes the rate of the band below it.
    pub fn marginal_rate(
        &self,
        amount: Decimal,
    ) -> Decimal {
        self.bands
            .iter()
            .find(|band| band.contains(amount))
            .unwrap_or(&self.bands[0])
            .rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn employer_ni() -> BandSchedule {
        BandSchedule::new(vec![
            Band::new(dec!(0), Some(dec!(5000)), dec!(0)),
            Band::new(dec!(5000), None, dec!(0.15)),
        ])
        .unwrap()
    }

    fn employee_ni() -> BandSchedule {
        BandSchedule::new(vec![
            Band::new(dec!(0), Some(dec!(12570)), dec!(0)),
            Band::new(dec!(12570), Some(dec!(50270)), dec!(0.08)),
            Band::new(dec!(50270), None, dec!(0.02)),
        ])
        .unwrap()
    }

    // =========================================================================
    // construction
    // =========================================================================

    #[test]
    fn new_rejects_empty_schedule() {
        assert!(BandSchedule::new(vec![]).is_err());
    }

    #[test]
    fn new_rejects_non_zero_start() {
        let result = BandSchedule::new(vec![Band::new(dec!(100), None, dec!(0.1))]);

        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_gaps_between_bands() {
        let result = BandSchedule::new(vec![
            Band::new(dec!(0), Some(dec!(100)), dec!(0)),
            Band::new(dec!(200), None, dec!(0.1)),
        ]);

        assert_eq!(
            result,
            Err(ValidationError::InvalidConstants(
                "bands are not contiguous at 200".to_string()
            ))
        );
    }

    #[test]
    fn new_rejects_closed_top_band() {
        let result = BandSchedule::new(vec![Band::new(dec!(0), Some(dec!(100)), dec!(0))]);

        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_open_band_before_top() {
        let result = BandSchedule::new(vec![
            Band::new(dec!(0), None, dec!(0)),
            Band::new(dec!(0), None, dec!(0.1)),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn new_accepts_zero_width_band() {
        let result = BandSchedule::new(vec![
            Band::new(dec!(0), Some(dec!(0)), dec!(0)),
            Band::new(dec!(0), None, dec!(0.15)),
        ]);

        assert!(result.is_ok());
    }

    // =========================================================================
    // charge
    // =========================================================================

    #[test]
    fn charge_is_zero_at_or_below_first_threshold() {
        assert_eq!(employer_ni().charge(dec!(0)), dec!(0));
        assert_eq!(employer_ni().charge(dec!(5000)), dec!(0));
        assert_eq!(employer_ni().charge(dec!(-100)), dec!(0));
    }

    #[test]
    fn charge_single_rated_band() {
        // (40,000 - 5,000) × 15%
        assert_eq!(employer_ni().charge(dec!(40000)), dec!(5250.00));
    }

    #[test]
    fn charge_spans_multiple_bands() {
        assert_eq!(employee_ni().charge(dec!(40000)), dec!(2194.40));
        assert_eq!(employee_ni().charge(dec!(60000)), dec!(3210.60));
    }

    #[test]
    fn charge_exactly_at_upper_limit_has_nothing_in_next_band() {
        assert_eq!(employee_ni().charge(dec!(50270)), dec!(3016.00));
    }

    // =========================================================================
    // marginal_rate
    // =========================================================================

    #[test]
    fn marginal_rate_at_threshold_uses_band_below() {
        let schedule = employee_ni();

        assert_eq!(schedule.marginal_rate(dec!(12570)), dec!(0));
        assert_eq!(schedule.marginal_rate(dec!(50270)), dec!(0.08));
    }

    #[test]
    fn marginal_rate_just_above_threshold_uses_band_above() {
        let schedule = employee_ni();

        assert_eq!(schedule.marginal_rate(dec!(12570.01)), dec!(0.08));
        assert_eq!(schedule.marginal_rate(dec!(50270.01)), dec!(0.02));
    }

    #[test]
    fn marginal_rate_for_zero_or_negative_uses_first_band() {
        assert_eq!(employer_ni().marginal_rate(dec!(0)), dec!(0));
        assert_eq!(employer_ni().marginal_rate(dec!(-5)), dec!(0));
    }
}
