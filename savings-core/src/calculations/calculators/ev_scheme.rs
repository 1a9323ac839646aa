//! Electric vehicle salary sacrifice with a benefit-in-kind charge.
//!
//! The employee sacrifices the lease cost from gross pay. In return they are
//! taxed (but not NI'd) on the car's benefit in kind, and the employer pays
//! Class 1A NI on that benefit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{checked_mul, ensure_amount, percent_of_total, round_half_up};
use crate::calculations::statutory::Statutory;
use crate::error::ValidationError;
use crate::{TaxYear, TaxYearConstants};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvSchemeInput {
    pub tax_year: TaxYear,
    pub gross_salary: Decimal,
    pub participants: u32,
    /// List price of the car for benefit purposes.
    pub p11d_value: Decimal,
    /// Gross monthly lease cost, sacrificed from salary.
    pub monthly_lease_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvSchemeResult {
    pub tax_year: TaxYear,

    pub annual_sacrifice: Decimal,
    pub bik_value: Decimal,
    pub bik_tax: Decimal,
    pub income_tax_saving: Decimal,
    pub employee_ni_saving: Decimal,

    /// Fall in take-home pay once the BiK tax is included.
    pub employee_net_cost: Decimal,
    /// Compared with paying the same lease out of net pay.
    pub employee_saving: Decimal,
    pub employee_saving_percentage: Option<Decimal>,

    pub employer_ni_saving: Decimal,
    pub class_1a_ni: Decimal,
    /// Employer NI saving less Class 1A. Negative when the salary was
    /// already below the secondary threshold.
    pub employer_net_saving: Decimal,

    pub total_employee_saving: Decimal,
    pub total_employer_saving: Decimal,
}

/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::{EvSchemeCalculator, EvSchemeInput};
/// use savings_core::{TaxYear, TaxYearTable};
///
/// let table = TaxYearTable::builtin();
/// let constants = table.get(TaxYear::starting(2025)).unwrap();
///
/// let input = EvSchemeInput {
///     tax_year: TaxYear::starting(2025),
///     gross_salary: dec!(45000),
///     participants: 20,
///     p11d_value: dec!(40000),
///     monthly_lease_cost: dec!(500),
/// };
///
/// let result = EvSchemeCalculator::new(constants).unwrap().calculate(&input).unwrap();
///
/// assert_eq!(result.bik_value, dec!(1200.00));
/// assert_eq!(result.employee_net_cost, dec!(4560.00));
/// assert_eq!(result.employer_net_saving, dec!(720.00));
/// ```
#[derive(Debug, Clone)]
pub struct EvSchemeCalculator<'a> {
    rules: Statutory<'a>,
}

impl<'a> EvSchemeCalculator<'a> {
    pub fn new(constants: &'a TaxYearConstants) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: Statutory::new(constants)?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] if an amount is negative or above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT), or the annual
    /// lease cost exceeds the salary.
    pub fn calculate(
        &self,
        input: &EvSchemeInput,
    ) -> Result<EvSchemeResult, ValidationError> {
        ensure_amount("gross_salary", input.gross_salary)?;
        ensure_amount("p11d_value", input.p11d_value)?;
        ensure_amount("monthly_lease_cost", input.monthly_lease_cost)?;
        let tax_year = self.rules.applied_tax_year("ev_scheme", input.tax_year);

        let salary = input.gross_salary;
        let annual_sacrifice = round_half_up(input.monthly_lease_cost * dec!(12));
        if annual_sacrifice > salary {
            return Err(ValidationError::SacrificeExceedsSalary {
                sacrifice: annual_sacrifice,
                salary,
            });
        }
        let reduced_salary = salary - annual_sacrifice;

        let bik_value = round_half_up(input.p11d_value * self.rules.constants().ev_bik_rate);
        let income_tax_saving = self.rules.income_tax(salary) - self.rules.income_tax(reduced_salary);
        let bik_tax =
            self.rules.income_tax(reduced_salary + bik_value) - self.rules.income_tax(reduced_salary);
        let employee_ni_saving =
            self.rules.employee_ni(salary) - self.rules.employee_ni(reduced_salary);

        let employee_net_cost = annual_sacrifice - income_tax_saving - employee_ni_saving + bik_tax;
        let employee_saving = annual_sacrifice - employee_net_cost;

        let employer_ni_saving =
            self.rules.employer_ni(salary) - self.rules.employer_ni(reduced_salary);
        let class_1a_ni = self.rules.class_1a_ni(bik_value);
        let employer_net_saving = employer_ni_saving - class_1a_ni;

        let participants = Decimal::from(input.participants);

        Ok(EvSchemeResult {
            tax_year,
            annual_sacrifice,
            bik_value,
            bik_tax,
            income_tax_saving,
            employee_ni_saving,
            employee_net_cost,
            employee_saving,
            employee_saving_percentage: percent_of_total(employee_saving, annual_sacrifice),
            employer_ni_saving,
            class_1a_ni,
            employer_net_saving,
            total_employee_saving: round_half_up(checked_mul(
                "total_employee_saving",
                employee_saving,
                participants,
            )?),
            total_employer_saving: round_half_up(checked_mul(
                "total_employer_saving",
                employer_net_saving,
                participants,
            )?),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TaxYearTable;

    fn test_input() -> EvSchemeInput {
        EvSchemeInput {
            tax_year: TaxYear::starting(2025),
            gross_salary: dec!(45000),
            participants: 20,
            p11d_value: dec!(40000),
            monthly_lease_cost: dec!(500),
        }
    }

    fn calculate(input: &EvSchemeInput) -> Result<EvSchemeResult, ValidationError> {
        let table = TaxYearTable::builtin();
        let constants = table.get(input.tax_year).unwrap();
        EvSchemeCalculator::new(constants)?.calculate(input)
    }

    #[test]
    fn basic_rate_worked_example() {
        let result = calculate(&test_input()).unwrap();

        assert_eq!(result.annual_sacrifice, dec!(6000.00));
        assert_eq!(result.bik_value, dec!(1200.00));
        assert_eq!(result.income_tax_saving, dec!(1200.00));
        assert_eq!(result.bik_tax, dec!(240.00));
        assert_eq!(result.employee_ni_saving, dec!(480.00));
        assert_eq!(result.employee_net_cost, dec!(4560.00));
        assert_eq!(result.employee_saving, dec!(1440.00));
        assert_eq!(result.employee_saving_percentage, Some(dec!(24.00)));
        assert_eq!(result.employer_ni_saving, dec!(900.00));
        assert_eq!(result.class_1a_ni, dec!(180.00));
        assert_eq!(result.employer_net_saving, dec!(720.00));
        assert_eq!(result.total_employee_saving, dec!(28800.00));
        assert_eq!(result.total_employer_saving, dec!(14400.00));
    }

    #[test]
    fn higher_rate_taxpayer_saves_more() {
        let mut input = test_input();
        input.gross_salary = dec!(60000);

        let result = calculate(&input).unwrap();

        assert_eq!(result.income_tax_saving, dec!(2400.00));
        assert_eq!(result.bik_tax, dec!(480.00));
        assert_eq!(result.employee_ni_saving, dec!(120.00));
        assert_eq!(result.employee_net_cost, dec!(3960.00));
        assert_eq!(result.employee_saving, dec!(2040.00));
    }

    #[test]
    fn bik_rate_follows_tax_year() {
        let mut input = test_input();
        input.tax_year = TaxYear::starting(2026);

        let result = calculate(&input).unwrap();

        assert_eq!(result.bik_value, dec!(1600.00));
        assert_eq!(result.bik_tax, dec!(320.00));
        assert_eq!(result.class_1a_ni, dec!(240.00));
    }

    #[test]
    fn employer_can_lose_money_below_secondary_threshold() {
        let mut input = test_input();
        input.gross_salary = dec!(6000);
        input.monthly_lease_cost = dec!(50);

        let result = calculate(&input).unwrap();

        // 6,000 → 5,400: 600 × 15% = 90.00 saved; 1,200 × 15% = 180.00 Class 1A
        assert_eq!(result.employer_ni_saving, dec!(90.00));
        assert_eq!(result.employer_net_saving, dec!(-90.00));
    }

    #[test]
    fn lease_exceeding_salary_is_rejected() {
        let mut input = test_input();
        input.gross_salary = dec!(5000);

        assert_eq!(
            calculate(&input),
            Err(ValidationError::SacrificeExceedsSalary {
                sacrifice: dec!(6000.00),
                salary: dec!(5000),
            })
        );
    }

    #[test]
    fn zero_lease_has_no_saving_percentage() {
        let mut input = test_input();
        input.monthly_lease_cost = dec!(0);

        let result = calculate(&input).unwrap();

        assert_eq!(result.employee_saving_percentage, None);
    }

    #[test]
    fn mismatched_input_year_uses_the_calculators_constants() {
        let table = TaxYearTable::builtin();
        let constants_2026 = table.get(TaxYear::starting(2026)).unwrap();

        let result = EvSchemeCalculator::new(constants_2026)
            .unwrap()
            .calculate(&test_input())
            .unwrap();

        assert_eq!(result.tax_year, TaxYear::starting(2026));
        assert_eq!(result.bik_value, dec!(1600.00));
    }

    #[test]
    fn p11d_above_limit_is_rejected() {
        let mut input = test_input();
        input.p11d_value = dec!(1000000000000000000000000000);

        assert!(matches!(
            calculate(&input),
            Err(ValidationError::AmountTooLarge {
                field: "p11d_value",
                ..
            })
        ));
    }

    #[test]
    fn negative_p11d_is_rejected() {
        let mut input = test_input();
        input.p11d_value = dec!(-1);

        assert!(matches!(
            calculate(&input),
            Err(ValidationError::NegativeAmount {
                field: "p11d_value",
                ..
            })
        ));
    }
}
