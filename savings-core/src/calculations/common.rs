//! Rounding and validation helpers shared by every calculator.
//!
//! UK payroll rounds different figures in different directions:
//!
//! | Figure                 | Rule                                          |
//! |------------------------|-----------------------------------------------|
//! | NI contributions       | nearest penny, exactly ½p rounds down         |
//! | Income tax             | down to the whole penny                       |
//! | Everything else        | nearest penny, ½p rounds up (away from zero)  |

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::ValidationError;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an NI contribution to the penny, with exactly half a penny
/// rounded down.
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::common::round_ni;
///
/// assert_eq!(round_ni(dec!(10.125)), dec!(10.12));
/// assert_eq!(round_ni(dec!(10.1251)), dec!(10.13));
/// ```
pub fn round_ni(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointTowardZero)
}

/// Rounds income tax down to the whole penny.
pub fn round_tax(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// `percentage`% of `amount`, unrounded.
pub fn percentage_of(
    amount: Decimal,
    percentage: Decimal,
) -> Decimal {
    amount * percentage / dec!(100)
}

/// `part` as a percentage of `whole`, rounded half-up to two places.
/// Returns `None` when `whole` is zero.
pub fn percent_of_total(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    if whole.is_zero() {
        None
    } else {
        Some(round_half_up(part * dec!(100) / whole))
    }
}

/// Largest currency amount a calculator accepts: £1 trillion. Per-person
/// figures stay far enough inside `Decimal`'s range that multiplying them by
/// any `u32` headcount cannot overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Currency amounts must lie in [0, [`MAX_AMOUNT`]].
pub fn ensure_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field,
            value,
            limit: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// `a × b`, or [`ValidationError::Overflow`] naming `field`.
pub fn checked_mul(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, ValidationError> {
    a.checked_mul(b).ok_or(ValidationError::Overflow { field })
}

/// `a + b`, or [`ValidationError::Overflow`] naming `field`.
pub fn checked_add(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, ValidationError> {
    a.checked_add(b).ok_or(ValidationError::Overflow { field })
}

/// `a ÷ b`, or [`ValidationError::Overflow`] naming `field`. `b` must be
/// non-zero.
pub fn checked_div(
    field: &'static str,
    a: Decimal,
    b: Decimal,
) -> Result<Decimal, ValidationError> {
    a.checked_div(b).ok_or(ValidationError::Overflow { field })
}

/// Percentages are expressed on a 0–100 scale.
pub fn ensure_percentage(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(ValidationError::PercentageOutOfRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // round_ni tests
    // =========================================================================

    #[test]
    fn round_ni_rounds_half_penny_down() {
        assert_eq!(round_ni(dec!(0.005)), dec!(0.00));
        assert_eq!(round_ni(dec!(1450.125)), dec!(1450.12));
    }

    #[test]
    fn round_ni_rounds_above_half_penny_up() {
        assert_eq!(round_ni(dec!(0.0051)), dec!(0.01));
        assert_eq!(round_ni(dec!(99.996)), dec!(100.00));
    }

    // =========================================================================
    // round_tax tests
    // =========================================================================

    #[test]
    fn round_tax_truncates_fractional_pennies() {
        assert_eq!(round_tax(dec!(5486.009)), dec!(5486.00));
        assert_eq!(round_tax(dec!(5486.999)), dec!(5486.99));
    }

    // =========================================================================
    // percentage helpers
    // =========================================================================

    #[test]
    fn percentage_of_scales_by_hundred() {
        assert_eq!(percentage_of(dec!(40000), dec!(5)), dec!(2000));
        assert_eq!(percentage_of(dec!(23760), dec!(3)), dec!(712.8));
    }

    #[test]
    fn percent_of_total_handles_zero_whole() {
        assert_eq!(percent_of_total(dec!(10), dec!(0)), None);
        assert_eq!(percent_of_total(dec!(1), dec!(3)), Some(dec!(33.33)));
    }

    // =========================================================================
    // validation helpers
    // =========================================================================

    #[test]
    fn ensure_amount_accepts_zero_and_limit() {
        assert_eq!(ensure_amount("gross_salary", dec!(0)), Ok(()));
        assert_eq!(ensure_amount("gross_salary", MAX_AMOUNT), Ok(()));
    }

    #[test]
    fn ensure_amount_rejects_negative() {
        assert_eq!(
            ensure_amount("gross_salary", dec!(-0.01)),
            Err(ValidationError::NegativeAmount {
                field: "gross_salary",
                value: dec!(-0.01),
            })
        );
    }

    #[test]
    fn ensure_amount_rejects_above_limit() {
        assert_eq!(
            ensure_amount("gross_salary", dec!(1000000000000.01)),
            Err(ValidationError::AmountTooLarge {
                field: "gross_salary",
                value: dec!(1000000000000.01),
                limit: MAX_AMOUNT,
            })
        );
    }

    #[test]
    fn checked_helpers_report_overflow() {
        assert_eq!(checked_mul("x", dec!(2), dec!(3)), Ok(dec!(6)));
        assert_eq!(
            checked_mul("x", Decimal::MAX, dec!(2)),
            Err(ValidationError::Overflow { field: "x" })
        );
        assert_eq!(
            checked_add("y", Decimal::MAX, dec!(1)),
            Err(ValidationError::Overflow { field: "y" })
        );
        assert_eq!(
            checked_div("z", Decimal::MAX, dec!(0.1)),
            Err(ValidationError::Overflow { field: "z" })
        );
    }

    #[test]
    fn ensure_percentage_accepts_closed_range() {
        assert_eq!(ensure_percentage("p", dec!(0)), Ok(()));
        assert_eq!(ensure_percentage("p", dec!(100)), Ok(()));
    }

    #[test]
    fn ensure_percentage_rejects_outside_range() {
        assert!(ensure_percentage("p", dec!(100.01)).is_err());
        assert!(ensure_percentage("p", dec!(-1)).is_err());
    }
}
