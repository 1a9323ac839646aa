//! Employer NI savings from a salary sacrifice scheme.
//!
//! Participants give up a percentage of gross salary in exchange for a
//! non-cash benefit (typically pension). Both employer and employee stop
//! paying NI on the sacrificed pay, and the employee stops paying income tax
//! on it.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Sacrifice = gross salary × sacrifice % |
//! | 2    | Salary after sacrifice = gross − sacrifice |
//! | 3    | Employer NI before and after (Class 1 secondary) |
//! | 4    | Employee NI before and after (Class 1 primary) |
//! | 5    | Income tax before and after |
//! | 6    | Employee net cost = sacrifice − tax saving − NI saving |
//! | 7    | Participants = ⌊employees × participation %⌋ |
//! | 8    | Workforce totals = per-participant figures × participants |
//! | 9    | Employer saving as a % of the whole workforce's employer NI bill |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use savings_core::calculations::{SalarySacrificeCalculator, SalarySacrificeInput};
//! use savings_core::{TaxYear, TaxYearTable};
//!
//! let table = TaxYearTable::builtin();
//! let constants = table.get(TaxYear::starting(2025)).unwrap();
//!
//! let input = SalarySacrificeInput {
//!     tax_year: TaxYear::starting(2025),
//!     gross_salary: dec!(40000.00),
//!     employees: 100,
//!     sacrifice_percentage: dec!(5),
//!     participation_percentage: dec!(50),
//! };
//!
//! let calculator = SalarySacrificeCalculator::new(constants).unwrap();
//! let result = calculator.calculate(&input).unwrap();
//!
//! assert_eq!(result.employer_ni_saving, dec!(300.00));
//! assert_eq!(result.participants, 50);
//! assert_eq!(result.total_employer_saving, dec!(15000.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{
    checked_mul, ensure_amount, ensure_percentage, percent_of_total, percentage_of, round_half_up,
};
use crate::calculations::statutory::Statutory;
use crate::error::ValidationError;
use crate::{Benchmark, BenchmarkComparison, TaxYear, TaxYearConstants};

fn full_participation() -> Decimal {
    dec!(100)
}

/// Inputs for the salary sacrifice calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySacrificeInput {
    pub tax_year: TaxYear,

    /// Annual gross salary of a typical participant.
    pub gross_salary: Decimal,

    /// Headcount eligible for the scheme.
    pub employees: u32,

    /// Share of gross salary sacrificed, 0–100.
    pub sacrifice_percentage: Decimal,

    /// Share of eligible employees who join, 0–100.
    #[serde(default = "full_participation")]
    pub participation_percentage: Decimal,
}

/// Per-participant and workforce savings from salary sacrifice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySacrificeResult {
    pub tax_year: TaxYear,

    pub sacrifice_amount: Decimal,
    pub salary_after_sacrifice: Decimal,

    pub employer_ni_before: Decimal,
    pub employer_ni_after: Decimal,
    pub employer_ni_saving: Decimal,

    /// Employer NI rate on the last pound of the pre-sacrifice salary.
    pub employer_marginal_rate: Decimal,

    pub employee_ni_saving: Decimal,
    pub income_tax_saving: Decimal,

    /// Drop in take-home pay for the participant.
    pub employee_net_cost: Decimal,

    pub participants: u32,
    pub total_employer_saving: Decimal,

    /// Income tax plus NI saved across all participants.
    pub total_employee_saving: Decimal,

    /// Total employer saving as a percentage of the employer NI bill for the
    /// whole workforce before sacrifice. `None` when that bill is zero.
    pub employer_saving_percentage: Option<Decimal>,

    pub participation_benchmark: BenchmarkComparison,
}

/// Calculator for employer and employee savings under salary sacrifice.
#[derive(Debug, Clone)]
pub struct SalarySacrificeCalculator<'a> {
    rules: Statutory<'a>,
}

impl<'a> SalarySacrificeCalculator<'a> {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConstants`] if the constants are
    /// invalid.
    pub fn new(constants: &'a TaxYearConstants) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: Statutory::new(constants)?,
        })
    }

    /// Runs the full calculation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the salary is negative or above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT), or either
    /// percentage is outside [0, 100].
    pub fn calculate(
        &self,
        input: &SalarySacrificeInput,
    ) -> Result<SalarySacrificeResult, ValidationError> {
        self.validate(input)?;
        let tax_year = self.rules.applied_tax_year("salary_sacrifice", input.tax_year);

        let salary = input.gross_salary;
        let sacrifice_amount = self.sacrifice_amount(salary, input.sacrifice_percentage);
        let salary_after_sacrifice = salary - sacrifice_amount;

        let employer_ni_before = self.rules.employer_ni(salary);
        let employer_ni_after = self.rules.employer_ni(salary_after_sacrifice);
        let employer_ni_saving = employer_ni_before - employer_ni_after;

        let employee_ni_saving =
            self.rules.employee_ni(salary) - self.rules.employee_ni(salary_after_sacrifice);
        let income_tax_saving =
            self.rules.income_tax(salary) - self.rules.income_tax(salary_after_sacrifice);

        let employee_net_cost = sacrifice_amount - income_tax_saving - employee_ni_saving;

        let participants = self.participants(input.employees, input.participation_percentage);
        let headcount = Decimal::from(participants);
        let total_employer_saving = round_half_up(checked_mul(
            "total_employer_saving",
            employer_ni_saving,
            headcount,
        )?);
        let total_employee_saving = round_half_up(checked_mul(
            "total_employee_saving",
            income_tax_saving + employee_ni_saving,
            headcount,
        )?);

        let workforce_bill = checked_mul(
            "employer_ni_before",
            employer_ni_before,
            Decimal::from(input.employees),
        )?;
        let employer_saving_percentage = percent_of_total(total_employer_saving, workforce_bill);

        Ok(SalarySacrificeResult {
            tax_year,
            sacrifice_amount,
            salary_after_sacrifice,
            employer_ni_before,
            employer_ni_after,
            employer_ni_saving,
            employer_marginal_rate: self.rules.employer_marginal_rate(salary),
            employee_ni_saving,
            income_tax_saving,
            employee_net_cost,
            participants,
            total_employer_saving,
            total_employee_saving,
            employer_saving_percentage,
            participation_benchmark: Benchmark::sacrifice_participation()
                .compare(input.participation_percentage),
        })
    }

    fn validate(
        &self,
        input: &SalarySacrificeInput,
    ) -> Result<(), ValidationError> {
        ensure_amount("gross_salary", input.gross_salary)?;
        ensure_percentage("sacrifice_percentage", input.sacrifice_percentage)?;
        ensure_percentage("participation_percentage", input.participation_percentage)?;
        Ok(())
    }

    fn sacrifice_amount(
        &self,
        salary: Decimal,
        percentage: Decimal,
    ) -> Decimal {
        round_half_up(percentage_of(salary, percentage))
    }

    /// Whole participants only; a fractional employee does not join.
    fn participants(
        &self,
        employees: u32,
        participation_percentage: Decimal,
    ) -> u32 {
        percentage_of(Decimal::from(employees), participation_percentage)
            .floor()
            .to_u32()
            .unwrap_or(employees)
    }
}
