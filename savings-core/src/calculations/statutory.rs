//! Statutory deductions for one tax year: Class 1 and 1A NI, income tax and
//! auto-enrolment qualifying earnings.
//!
//! Every figure is annual. Schedules are derived from [`TaxYearConstants`]:
//!
//! | Schedule      | Bands                                                      |
//! |---------------|------------------------------------------------------------|
//! | Employee NI   | 0 → PT at 0%, PT → UEL at main rate, above UEL at upper rate |
//! | Employer NI   | 0 → ST at 0%, above ST at employer rate                      |
//! | Income tax    | on taxable income: basic band, higher band, additional rate  |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::calculations::common::{max, round_ni, round_tax};
use crate::calculations::schedule::BandSchedule;
use crate::error::ValidationError;
use crate::{Band, TaxYear, TaxYearConstants};

/// Statutory rules for a single tax year, built once per calculation.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::{TaxYear, TaxYearTable};
/// use savings_core::calculations::Statutory;
///
/// let table = TaxYearTable::builtin();
/// let constants = table.get(TaxYear::starting(2025)).unwrap();
/// let rules = Statutory::new(constants).unwrap();
///
/// assert_eq!(rules.employer_ni(dec!(40000)), dec!(5250.00));
/// assert_eq!(rules.employee_ni(dec!(40000)), dec!(2194.40));
/// assert_eq!(rules.income_tax(dec!(40000)), dec!(5486.00));
/// ```
#[derive(Debug, Clone)]
pub struct Statutory<'a> {
    constants: &'a TaxYearConstants,
    employee_ni: BandSchedule,
    employer_ni: BandSchedule,
    income_tax: BandSchedule,
}

impl<'a> Statutory<'a> {
    /// Validates the constants and derives the rate schedules.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConstants`] if the constants fail
    /// [`TaxYearConstants::validate`].
    pub fn new(constants: &'a TaxYearConstants) -> Result<Self, ValidationError> {
        constants.validate()?;

        let employee_ni = BandSchedule::new(vec![
            Band::new(Decimal::ZERO, Some(constants.primary_threshold), Decimal::ZERO),
            Band::new(
                constants.primary_threshold,
                Some(constants.upper_earnings_limit),
                constants.employee_main_rate,
            ),
            Band::new(
                constants.upper_earnings_limit,
                None,
                constants.employee_upper_rate,
            ),
        ])?;

        let employer_ni = BandSchedule::new(vec![
            Band::new(Decimal::ZERO, Some(constants.secondary_threshold), Decimal::ZERO),
            Band::new(constants.secondary_threshold, None, constants.employer_rate),
        ])?;

        let income_tax = BandSchedule::new(vec![
            Band::new(Decimal::ZERO, Some(constants.basic_rate_band), constants.basic_rate),
            Band::new(
                constants.basic_rate_band,
                Some(constants.additional_rate_threshold),
                constants.higher_rate,
            ),
            Band::new(
                constants.additional_rate_threshold,
                None,
                constants.additional_rate,
            ),
        ])?;

        Ok(Self {
            constants,
            employee_ni,
            employer_ni,
            income_tax,
        })
    }

    pub fn constants(&self) -> &'a TaxYearConstants {
        self.constants
    }

    /// Returns the tax year these rules cover. Calculations always use these
    /// rules; a different `requested` year is logged and otherwise ignored.
    pub fn applied_tax_year(
        &self,
        calculator: &'static str,
        requested: TaxYear,
    ) -> TaxYear {
        let applied = self.constants.tax_year;
        if requested != applied {
            warn!(
                calculator,
                requested = %requested,
                applied = %applied,
                "input tax year differs from the constants supplied"
            );
        }
        applied
    }

    /// Class 1 primary contributions on annual earnings.
    pub fn employee_ni(
        &self,
        earnings: Decimal,
    ) -> Decimal {
        round_ni(self.employee_ni.charge(earnings))
    }

    /// Class 1 secondary contributions on annual earnings.
    pub fn employer_ni(
        &self,
        earnings: Decimal,
    ) -> Decimal {
        round_ni(self.employer_ni.charge(earnings))
    }

    pub fn employee_marginal_rate(
        &self,
        earnings: Decimal,
    ) -> Decimal {
        self.employee_ni.marginal_rate(earnings)
    }

    pub fn employer_marginal_rate(
        &self,
        earnings: Decimal,
    ) -> Decimal {
        self.employer_ni.marginal_rate(earnings)
    }

    /// Class 1A contributions on a benefit in kind. There is no threshold.
    pub fn class_1a_ni(
        &self,
        benefit_value: Decimal,
    ) -> Decimal {
        round_ni(max(benefit_value, Decimal::ZERO) * self.constants.employer_rate)
    }

    /// Personal allowance after the high-income taper: reduced by £1 for
    /// every whole £2 of income above the taper threshold.
    pub fn personal_allowance_for(
        &self,
        income: Decimal,
    ) -> Decimal {
        let excess = income - self.constants.allowance_taper_threshold;
        if excess <= Decimal::ZERO {
            return self.constants.personal_allowance;
        }
        let reduction = (excess / dec!(2)).floor();
        max(self.constants.personal_allowance - reduction, Decimal::ZERO)
    }

    pub fn taxable_income(
        &self,
        income: Decimal,
    ) -> Decimal {
        max(income - self.personal_allowance_for(income), Decimal::ZERO)
    }

    /// Income tax on annual taxable pay (before the personal allowance).
    pub fn income_tax(
        &self,
        income: Decimal,
    ) -> Decimal {
        round_tax(self.income_tax.charge(self.taxable_income(income)))
    }

    /// Income-tax rate on the last penny of `income`, ignoring the
    /// allowance taper.
    pub fn income_tax_marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let taxable = self.taxable_income(income);
        if taxable.is_zero() {
            return Decimal::ZERO;
        }
        self.income_tax.marginal_rate(taxable)
    }

    /// Earnings inside the auto-enrolment qualifying band.
    pub fn qualifying_earnings(
        &self,
        salary: Decimal,
    ) -> Decimal {
        let lower = self.constants.pension_lower_qualifying;
        let upper = self.constants.pension_upper_qualifying;
        max(salary.min(upper) - lower, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TaxYearTable;

    fn with_rules<T>(
        start: u16,
        f: impl FnOnce(&Statutory<'_>) -> T,
    ) -> T {
        let table = TaxYearTable::builtin();
        let constants = table.get(TaxYear::starting(start)).unwrap();
        let rules = Statutory::new(constants).unwrap();
        f(&rules)
    }

    // =========================================================================
    // employee NI
    // =========================================================================

    #[test]
    fn employee_ni_zero_at_primary_threshold() {
        with_rules(2025, |r| assert_eq!(r.employee_ni(dec!(12570)), dec!(0)));
    }

    #[test]
    fn employee_ni_main_rate_band() {
        with_rules(2025, |r| assert_eq!(r.employee_ni(dec!(30000)), dec!(1394.40)));
    }

    #[test]
    fn employee_ni_above_upper_earnings_limit() {
        // 37,700 × 8% + 49,730 × 2%
        with_rules(2025, |r| assert_eq!(r.employee_ni(dec!(100000)), dec!(4010.60)));
    }

    #[test]
    fn employee_ni_half_penny_rounds_down() {
        // (12,570.0625 - 12,570) × 8% = 0.005
        with_rules(2025, |r| assert_eq!(r.employee_ni(dec!(12570.0625)), dec!(0.00)));
    }

    #[test]
    fn employee_marginal_rate_at_upper_earnings_limit_is_main_rate() {
        with_rules(2025, |r| {
            assert_eq!(r.employee_marginal_rate(dec!(50270)), dec!(0.08));
            assert_eq!(r.employee_marginal_rate(dec!(50271)), dec!(0.02));
        });
    }

    // =========================================================================
    // employer NI
    // =========================================================================

    #[test]
    fn employer_ni_uses_year_specific_threshold_and_rate() {
        with_rules(2024, |r| assert_eq!(r.employer_ni(dec!(40000)), dec!(4264.20)));
        with_rules(2025, |r| assert_eq!(r.employer_ni(dec!(40000)), dec!(5250.00)));
    }

    #[test]
    fn employer_ni_zero_at_secondary_threshold() {
        with_rules(2025, |r| {
            assert_eq!(r.employer_ni(dec!(5000)), dec!(0));
            assert_eq!(r.employer_marginal_rate(dec!(5000)), dec!(0));
            assert_eq!(r.employer_marginal_rate(dec!(5000.01)), dec!(0.15));
        });
    }

    #[test]
    fn class_1a_ni_has_no_threshold() {
        with_rules(2025, |r| {
            assert_eq!(r.class_1a_ni(dec!(1200)), dec!(180.00));
            assert_eq!(r.class_1a_ni(dec!(-1)), dec!(0));
        });
    }

    // =========================================================================
    // income tax
    // =========================================================================

    #[test]
    fn income_tax_zero_within_personal_allowance() {
        with_rules(2025, |r| assert_eq!(r.income_tax(dec!(12570)), dec!(0)));
    }

    #[test]
    fn income_tax_basic_rate() {
        with_rules(2025, |r| assert_eq!(r.income_tax(dec!(40000)), dec!(5486.00)));
    }

    #[test]
    fn income_tax_higher_rate() {
        // 37,700 × 20% + 9,730 × 40%
        with_rules(2025, |r| assert_eq!(r.income_tax(dec!(60000)), dec!(11432.00)));
    }

    #[test]
    fn income_tax_exactly_at_higher_rate_threshold_is_all_basic_rate() {
        with_rules(2025, |r| {
            assert_eq!(r.income_tax(dec!(50270)), dec!(7540.00));
            assert_eq!(r.income_tax_marginal_rate(dec!(50270)), dec!(0.20));
        });
    }

    #[test]
    fn personal_allowance_tapers_above_threshold() {
        with_rules(2025, |r| {
            assert_eq!(r.personal_allowance_for(dec!(100000)), dec!(12570));
            assert_eq!(r.personal_allowance_for(dec!(100001)), dec!(12570));
            assert_eq!(r.personal_allowance_for(dec!(110000)), dec!(7570));
            assert_eq!(r.personal_allowance_for(dec!(125140)), dec!(0));
            assert_eq!(r.personal_allowance_for(dec!(200000)), dec!(0));
        });
    }

    #[test]
    fn income_tax_additional_rate() {
        // 37,700 × 20% + 87,440 × 40% + 24,860 × 45%
        with_rules(2025, |r| assert_eq!(r.income_tax(dec!(150000)), dec!(53703.00)));
    }

    #[test]
    fn income_tax_marginal_rate_zero_when_untaxed() {
        with_rules(2025, |r| assert_eq!(r.income_tax_marginal_rate(dec!(10000)), dec!(0)));
    }

    // =========================================================================
    // pension
    // =========================================================================

    #[test]
    fn qualifying_earnings_clamped_to_band() {
        with_rules(2025, |r| {
            assert_eq!(r.qualifying_earnings(dec!(5000)), dec!(0));
            assert_eq!(r.qualifying_earnings(dec!(30000)), dec!(23760));
            assert_eq!(r.qualifying_earnings(dec!(80000)), dec!(44030));
        });
    }

    #[test]
    fn applied_tax_year_is_always_the_rules_year() {
        with_rules(2024, |r| {
            assert_eq!(
                r.applied_tax_year("payroll", TaxYear::starting(2024)),
                TaxYear::starting(2024)
            );
            assert_eq!(
                r.applied_tax_year("payroll", TaxYear::starting(2025)),
                TaxYear::starting(2024)
            );
        });
    }

    #[test]
    fn new_rejects_invalid_constants() {
        let table = TaxYearTable::builtin();
        let mut constants = table.get(TaxYear::starting(2025)).unwrap().clone();
        constants.basic_rate = dec!(2);

        assert!(Statutory::new(&constants).is_err());
    }
}
