//! Return on investment for an HR information system.
//!
//! Benefits come from HR staff time freed by automation and from fewer
//! payroll/admin errors. HR time is valued at its fully loaded cost: salary
//! plus employer NI plus the auto-enrolment minimum employer pension.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Loaded HR cost = salary + employer NI + employer pension minimum |
//! | 2    | Hourly cost = loaded cost ÷ (contracted hours × 52), to the penny |
//! | 3    | Annual time saving = hourly cost × hours saved × 52 × HR staff |
//! | 4    | Annual error saving = annual error cost × error reduction % |
//! | 5    | Annual subscription = employees × annual cost per employee |
//! | 6    | Period cost = implementation + subscription × years |
//! | 7    | Period benefit = (time saving + error saving) × years |
//! | 8    | ROI % = (period benefit − period cost) ÷ period cost × 100 |
//! | 9    | Payback months = implementation ÷ monthly net running benefit |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use savings_core::calculations::{HrisRoiCalculator, HrisRoiInput};
//! use savings_core::{TaxYear, TaxYearTable};
//!
//! let table = TaxYearTable::builtin();
//! let constants = table.get(TaxYear::starting(2025)).unwrap();
//!
//! let input = HrisRoiInput {
//!     tax_year: TaxYear::starting(2025),
//!     employees: 250,
//!     hr_staff: 3,
//!     average_hr_salary: dec!(35000),
//!     hours_saved_per_week: dec!(5),
//!     contracted_hours_per_week: dec!(37.5),
//!     annual_error_cost: dec!(10000),
//!     error_reduction_percentage: dec!(50),
//!     implementation_cost: dec!(15000),
//!     annual_cost_per_employee: dec!(60),
//!     analysis_years: 3,
//! };
//!
//! let result = HrisRoiCalculator::new(constants).unwrap().calculate(&input).unwrap();
//!
//! assert_eq!(result.hourly_cost, dec!(20.70));
//! assert_eq!(result.roi_percentage, Some(dec!(5.73)));
//! assert_eq!(result.payback_months, Some(dec!(29.29)));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{
    checked_add, checked_div, checked_mul, ensure_amount, ensure_percentage, percentage_of,
    round_half_up,
};
use crate::calculations::statutory::Statutory;
use crate::error::ValidationError;
use crate::{Benchmark, BenchmarkComparison, TaxYear, TaxYearConstants};

const WEEKS_PER_YEAR: Decimal = dec!(52);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const HOURS_PER_WEEK: Decimal = dec!(168);

fn default_contracted_hours() -> Decimal {
    dec!(37.5)
}

fn default_analysis_years() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrisRoiInput {
    pub tax_year: TaxYear,

    /// Headcount the system is licensed for.
    pub employees: u32,
    pub hr_staff: u32,
    pub average_hr_salary: Decimal,

    /// Hours each HR staff member saves per week.
    pub hours_saved_per_week: Decimal,

    #[serde(default = "default_contracted_hours")]
    pub contracted_hours_per_week: Decimal,

    /// Yearly cost of payroll and admin errors today.
    #[serde(default)]
    pub annual_error_cost: Decimal,

    /// Expected cut in that cost, 0–100.
    #[serde(default)]
    pub error_reduction_percentage: Decimal,

    /// One-off setup, migration and training cost.
    pub implementation_cost: Decimal,
    pub annual_cost_per_employee: Decimal,

    #[serde(default = "default_analysis_years")]
    pub analysis_years: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrisRoiResult {
    pub tax_year: TaxYear,

    /// Salary plus employer NI plus employer pension minimum, per HR staff member.
    pub loaded_hr_cost: Decimal,
    pub hourly_cost: Decimal,

    pub annual_time_saving: Decimal,
    pub annual_error_saving: Decimal,
    pub annual_benefit: Decimal,
    pub annual_subscription: Decimal,

    pub total_cost: Decimal,
    pub total_benefit: Decimal,
    pub net_benefit: Decimal,

    /// `None` when the total cost over the period is zero.
    pub roi_percentage: Option<Decimal>,

    /// Months until the implementation cost is recovered. `None` when the
    /// running benefit never exceeds the subscription.
    pub payback_months: Option<Decimal>,

    /// Only set for a [`Benchmark::HRIS_ROI_YEARS`]-year analysis, the period
    /// the published range covers.
    pub roi_benchmark: Option<BenchmarkComparison>,
    pub payback_benchmark: Option<BenchmarkComparison>,
}

#[derive(Debug, Clone)]
pub struct HrisRoiCalculator<'a> {
    rules: Statutory<'a>,
}

impl<'a> HrisRoiCalculator<'a> {
    pub fn new(constants: &'a TaxYearConstants) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: Statutory::new(constants)?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] if any amount is negative or above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT), the error
    /// reduction is outside [0, 100], the weekly hours are zero or above 168,
    /// the analysis period is zero, or a derived figure overflows.
    pub fn calculate(
        &self,
        input: &HrisRoiInput,
    ) -> Result<HrisRoiResult, ValidationError> {
        self.validate(input)?;
        let tax_year = self.rules.applied_tax_year("hris_roi", input.tax_year);

        let loaded_hr_cost = self.loaded_hr_cost(input.average_hr_salary);
        let hourly_cost = round_half_up(checked_div(
            "hourly_cost",
            loaded_hr_cost,
            input.contracted_hours_per_week * WEEKS_PER_YEAR,
        )?);

        let annual_hours_saved =
            input.hours_saved_per_week * WEEKS_PER_YEAR * Decimal::from(input.hr_staff);
        let annual_time_saving = round_half_up(checked_mul(
            "annual_time_saving",
            hourly_cost,
            annual_hours_saved,
        )?);
        let annual_error_saving = round_half_up(percentage_of(
            input.annual_error_cost,
            input.error_reduction_percentage,
        ));
        let annual_benefit = checked_add("annual_benefit", annual_time_saving, annual_error_saving)?;
        let annual_subscription = round_half_up(checked_mul(
            "annual_subscription",
            Decimal::from(input.employees),
            input.annual_cost_per_employee,
        )?);

        let years = Decimal::from(input.analysis_years);
        let total_cost = checked_add(
            "total_cost",
            input.implementation_cost,
            checked_mul("total_cost", annual_subscription, years)?,
        )?;
        let total_benefit = checked_mul("total_benefit", annual_benefit, years)?;
        let net_benefit = total_benefit - total_cost;

        let roi_percentage = self.roi_percentage(net_benefit, total_cost)?;
        let payback_months = self.payback_months(
            input.implementation_cost,
            annual_benefit - annual_subscription,
        );

        let roi_benchmark = roi_percentage
            .filter(|_| input.analysis_years == Benchmark::HRIS_ROI_YEARS)
            .map(|roi| Benchmark::hris_roi().compare(roi));

        Ok(HrisRoiResult {
            tax_year,
            loaded_hr_cost,
            hourly_cost,
            annual_time_saving,
            annual_error_saving,
            annual_benefit,
            annual_subscription,
            total_cost,
            total_benefit,
            net_benefit,
            roi_percentage,
            payback_months,
            roi_benchmark,
            payback_benchmark: payback_months
                .map(|months| Benchmark::hris_payback().compare(months)),
        })
    }

    fn validate(
        &self,
        input: &HrisRoiInput,
    ) -> Result<(), ValidationError> {
        ensure_amount("average_hr_salary", input.average_hr_salary)?;
        ensure_amount("annual_error_cost", input.annual_error_cost)?;
        ensure_percentage("error_reduction_percentage", input.error_reduction_percentage)?;
        ensure_amount("implementation_cost", input.implementation_cost)?;
        ensure_amount("annual_cost_per_employee", input.annual_cost_per_employee)?;

        if input.hours_saved_per_week < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "hours_saved_per_week",
                value: input.hours_saved_per_week,
            });
        }
        if input.contracted_hours_per_week <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "contracted_hours_per_week",
            });
        }
        for (field, hours) in [
            ("hours_saved_per_week", input.hours_saved_per_week),
            ("contracted_hours_per_week", input.contracted_hours_per_week),
        ] {
            if hours > HOURS_PER_WEEK {
                return Err(ValidationError::AmountTooLarge {
                    field,
                    value: hours,
                    limit: HOURS_PER_WEEK,
                });
            }
        }
        if input.analysis_years == 0 {
            return Err(ValidationError::MustBePositive {
                field: "analysis_years",
            });
        }
        Ok(())
    }

    fn loaded_hr_cost(
        &self,
        salary: Decimal,
    ) -> Decimal {
        let pension = round_half_up(
            self.rules.qualifying_earnings(salary) * self.rules.constants().pension_employer_rate,
        );
        salary + self.rules.employer_ni(salary) + pension
    }

    /// `None` when the period cost is zero.
    fn roi_percentage(
        &self,
        net_benefit: Decimal,
        total_cost: Decimal,
    ) -> Result<Option<Decimal>, ValidationError> {
        if total_cost.is_zero() {
            return Ok(None);
        }
        let scaled = checked_mul("roi_percentage", net_benefit, dec!(100))?;
        Ok(Some(round_half_up(checked_div("roi_percentage", scaled, total_cost)?)))
    }

    fn payback_months(
        &self,
        implementation_cost: Decimal,
        annual_net_running_benefit: Decimal,
    ) -> Option<Decimal> {
        if annual_net_running_benefit <= Decimal::ZERO {
            return None;
        }
        Some(round_half_up(
            implementation_cost * MONTHS_PER_YEAR / annual_net_running_benefit,
        ))
    }
}
