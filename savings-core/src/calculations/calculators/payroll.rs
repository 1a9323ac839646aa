//! Combined payroll cost, comparing pension arrangements.
//!
//! The same employee is costed twice:
//!
//! - **Net pay arrangement**: the employee pension contribution comes out of
//!   pay before income tax, but NI is charged on the full salary.
//! - **Salary sacrifice**: the employee contribution is sacrificed, so pay
//!   falls by that amount for both tax and NI, and the employer pays the
//!   sacrificed amount into the pension instead.
//!
//! Pension percentages apply to auto-enrolment qualifying earnings. When
//! the employment allowance is claimed it is offset against the workforce
//! employer NI bill, never taking it below zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{
    checked_mul, ensure_amount, ensure_percentage, max, percentage_of, round_half_up,
};
use crate::calculations::statutory::Statutory;
use crate::error::ValidationError;
use crate::{TaxYear, TaxYearConstants};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    pub tax_year: TaxYear,
    pub gross_salary: Decimal,
    pub employees: u32,

    /// Employee contribution as a percentage of qualifying earnings.
    pub employee_pension_percentage: Decimal,

    /// Employer contribution as a percentage of qualifying earnings.
    pub employer_pension_percentage: Decimal,

    #[serde(default)]
    pub claim_employment_allowance: bool,
}

/// Annual pay and cost figures for one employee under one arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipBreakdown {
    /// Cash pay after any sacrifice.
    pub gross_pay: Decimal,
    /// Pension contribution deducted from the employee's pay.
    pub employee_pension: Decimal,
    /// Everything the employer pays into the pension.
    pub employer_pension: Decimal,
    pub taxable_pay: Decimal,
    pub income_tax: Decimal,
    pub employee_ni: Decimal,
    pub net_pay: Decimal,
    pub employer_ni: Decimal,
    /// Gross pay plus employer NI plus employer pension.
    pub total_employer_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    pub tax_year: TaxYear,
    pub qualifying_earnings: Decimal,

    pub net_pay_arrangement: PayslipBreakdown,
    pub salary_sacrifice: PayslipBreakdown,

    /// Per employee, net pay arrangement minus salary sacrifice.
    pub employer_saving_per_employee: Decimal,
    /// Per employee, salary sacrifice minus net pay arrangement.
    pub take_home_gain_per_employee: Decimal,

    /// Workforce employer NI bills after any employment allowance.
    pub workforce_employer_ni_standard: Decimal,
    pub workforce_employer_ni_sacrifice: Decimal,
    pub employment_allowance_applied: Decimal,

    /// Workforce employer cost (pay, NI after allowance, pension).
    pub workforce_cost_standard: Decimal,
    pub workforce_cost_sacrifice: Decimal,
    pub workforce_employer_saving: Decimal,
    pub workforce_take_home_gain: Decimal,
}

/// Calculator for a combined payroll comparison.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::{PayrollCalculator, PayrollInput};
/// use savings_core::{TaxYear, TaxYearTable};
///
/// let table = TaxYearTable::builtin();
/// let constants = table.get(TaxYear::starting(2025)).unwrap();
///
/// let input = PayrollInput {
///     tax_year: TaxYear::starting(2025),
///     gross_salary: dec!(30000),
///     employees: 10,
///     employee_pension_percentage: dec!(5),
///     employer_pension_percentage: dec!(3),
///     claim_employment_allowance: true,
/// };
///
/// let result = PayrollCalculator::new(constants).unwrap().calculate(&input).unwrap();
///
/// assert_eq!(result.employer_saving_per_employee, dec!(178.20));
/// assert_eq!(result.take_home_gain_per_employee, dec!(95.04));
/// ```
#[derive(Debug, Clone)]
pub struct PayrollCalculator<'a> {
    rules: Statutory<'a>,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(constants: &'a TaxYearConstants) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: Statutory::new(constants)?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] if the salary is negative or above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT), a pension
    /// percentage is outside [0, 100], or the contributions fall below the
    /// auto-enrolment minimums.
    pub fn calculate(
        &self,
        input: &PayrollInput,
    ) -> Result<PayrollResult, ValidationError> {
        self.validate(input)?;
        let tax_year = self.rules.applied_tax_year("payroll", input.tax_year);

        let qualifying_earnings = self.rules.qualifying_earnings(input.gross_salary);
        let employee_contribution = round_half_up(percentage_of(
            qualifying_earnings,
            input.employee_pension_percentage,
        ));
        let employer_contribution = round_half_up(percentage_of(
            qualifying_earnings,
            input.employer_pension_percentage,
        ));

        let net_pay_arrangement =
            self.net_pay_arrangement(input.gross_salary, employee_contribution, employer_contribution);
        let salary_sacrifice =
            self.salary_sacrifice(input.gross_salary, employee_contribution, employer_contribution);

        let headcount = Decimal::from(input.employees);
        let allowance = if input.claim_employment_allowance {
            self.rules.constants().employment_allowance
        } else {
            Decimal::ZERO
        };

        let (workforce_employer_ni_standard, allowance_standard) = self.apply_allowance(
            checked_mul("workforce_employer_ni", net_pay_arrangement.employer_ni, headcount)?,
            allowance,
        );
        let (workforce_employer_ni_sacrifice, _) = self.apply_allowance(
            checked_mul("workforce_employer_ni", salary_sacrifice.employer_ni, headcount)?,
            allowance,
        );

        let workforce_cost_standard = round_half_up(
            checked_mul(
                "workforce_cost",
                net_pay_arrangement.gross_pay + net_pay_arrangement.employer_pension,
                headcount,
            )? + workforce_employer_ni_standard,
        );
        let workforce_cost_sacrifice = round_half_up(
            checked_mul(
                "workforce_cost",
                salary_sacrifice.gross_pay + salary_sacrifice.employer_pension,
                headcount,
            )? + workforce_employer_ni_sacrifice,
        );

        let take_home_gain_per_employee = salary_sacrifice.net_pay - net_pay_arrangement.net_pay;
        let workforce_take_home_gain = round_half_up(checked_mul(
            "workforce_take_home_gain",
            take_home_gain_per_employee,
            headcount,
        )?);

        Ok(PayrollResult {
            tax_year,
            qualifying_earnings,
            employer_saving_per_employee: net_pay_arrangement.total_employer_cost
                - salary_sacrifice.total_employer_cost,
            take_home_gain_per_employee,
            workforce_employer_ni_standard,
            workforce_employer_ni_sacrifice,
            employment_allowance_applied: allowance_standard,
            workforce_employer_saving: workforce_cost_standard - workforce_cost_sacrifice,
            workforce_take_home_gain,
            workforce_cost_standard,
            workforce_cost_sacrifice,
            net_pay_arrangement,
            salary_sacrifice,
        })
    }

    fn validate(
        &self,
        input: &PayrollInput,
    ) -> Result<(), ValidationError> {
        ensure_amount("gross_salary", input.gross_salary)?;
        ensure_percentage("employee_pension_percentage", input.employee_pension_percentage)?;
        ensure_percentage("employer_pension_percentage", input.employer_pension_percentage)?;

        let constants = self.rules.constants();
        let employer_minimum = constants.pension_employer_rate * dec!(100);
        let total_minimum =
            (constants.pension_employee_rate + constants.pension_employer_rate) * dec!(100);

        if input.employer_pension_percentage < employer_minimum {
            return Err(ValidationError::BelowPensionMinimum(format!(
                "employer contribution {}% is below the {}% minimum",
                input.employer_pension_percentage,
                employer_minimum.normalize()
            )));
        }
        let total = input.employee_pension_percentage + input.employer_pension_percentage;
        if total < total_minimum {
            return Err(ValidationError::BelowPensionMinimum(format!(
                "total contribution {}% is below the {}% minimum",
                total,
                total_minimum.normalize()
            )));
        }
        Ok(())
    }

    fn net_pay_arrangement(
        &self,
        salary: Decimal,
        employee_pension: Decimal,
        employer_pension: Decimal,
    ) -> PayslipBreakdown {
        let taxable_pay = max(salary - employee_pension, Decimal::ZERO);
        let income_tax = self.rules.income_tax(taxable_pay);
        let employee_ni = self.rules.employee_ni(salary);
        let employer_ni = self.rules.employer_ni(salary);

        PayslipBreakdown {
            gross_pay: salary,
            employee_pension,
            employer_pension,
            taxable_pay,
            income_tax,
            employee_ni,
            net_pay: salary - employee_pension - income_tax - employee_ni,
            employer_ni,
            total_employer_cost: salary + employer_ni + employer_pension,
        }
    }

    fn salary_sacrifice(
        &self,
        salary: Decimal,
        employee_pension: Decimal,
        employer_pension: Decimal,
    ) -> PayslipBreakdown {
        let gross_pay = max(salary - employee_pension, Decimal::ZERO);
        let employer_pension = employer_pension + employee_pension;
        let income_tax = self.rules.income_tax(gross_pay);
        let employee_ni = self.rules.employee_ni(gross_pay);
        let employer_ni = self.rules.employer_ni(gross_pay);

        PayslipBreakdown {
            gross_pay,
            employee_pension: Decimal::ZERO,
            employer_pension,
            taxable_pay: gross_pay,
            income_tax,
            employee_ni,
            net_pay: gross_pay - income_tax - employee_ni,
            employer_ni,
            total_employer_cost: gross_pay + employer_ni + employer_pension,
        }
    }

    /// Returns the bill after the allowance and the part of the allowance used.
    fn apply_allowance(
        &self,
        bill: Decimal,
        allowance: Decimal,
    ) -> (Decimal, Decimal) {
        let used = allowance.min(bill);
        (bill - used, used)
    }
}
