//! Calculation engine facade.
//!
//! The engine owns a [`TaxYearRepository`], resolves the tax year carried by
//! each input, and hands the matching constants to the right calculator.
//! It keeps no state between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{
    EvSchemeCalculator, EvSchemeInput, EvSchemeResult, HrisRoiCalculator, HrisRoiInput,
    HrisRoiResult, PayrollCalculator, PayrollInput, PayrollResult, SalarySacrificeCalculator,
    SalarySacrificeInput, SalarySacrificeResult,
};
use crate::error::ValidationError;
use crate::source::{TaxYearRepository, TaxYearTable};
use crate::{TaxYear, TaxYearConstants};

/// Input for any calculator, tagged by `calculator` when serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorInput {
    SalarySacrifice(SalarySacrificeInput),
    HrisRoi(HrisRoiInput),
    Payroll(PayrollInput),
    EvScheme(EvSchemeInput),
}

impl CalculatorInput {
    pub fn tax_year(&self) -> TaxYear {
        match self {
            Self::SalarySacrifice(input) => input.tax_year,
            Self::HrisRoi(input) => input.tax_year,
            Self::Payroll(input) => input.tax_year,
            Self::EvScheme(input) => input.tax_year,
        }
    }

    pub fn calculator_name(&self) -> &'static str {
        match self {
            Self::SalarySacrifice(_) => "salary_sacrifice",
            Self::HrisRoi(_) => "hris_roi",
            Self::Payroll(_) => "payroll",
            Self::EvScheme(_) => "ev_scheme",
        }
    }
}

/// Output of any calculator, tagged the same way as [`CalculatorInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationResult {
    SalarySacrifice(SalarySacrificeResult),
    HrisRoi(HrisRoiResult),
    Payroll(PayrollResult),
    EvScheme(EvSchemeResult),
}

impl CalculationResult {
    pub fn tax_year(&self) -> TaxYear {
        match self {
            Self::SalarySacrifice(result) => result.tax_year,
            Self::HrisRoi(result) => result.tax_year,
            Self::Payroll(result) => result.tax_year,
            Self::EvScheme(result) => result.tax_year,
        }
    }
}

/// Runs calculators against constants from a [`TaxYearRepository`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use savings_core::calculations::SalarySacrificeInput;
/// use savings_core::{CalculationEngine, CalculationResult, CalculatorInput, TaxYear};
///
/// let engine = CalculationEngine::builtin();
/// let input = CalculatorInput::SalarySacrifice(SalarySacrificeInput {
///     tax_year: TaxYear::starting(2025),
///     gross_salary: dec!(40000),
///     employees: 10,
///     sacrifice_percentage: dec!(5),
///     participation_percentage: dec!(100),
/// });
///
/// let CalculationResult::SalarySacrifice(result) = engine.calculate(&input).unwrap() else {
///     panic!("wrong result variant");
/// };
/// assert_eq!(result.total_employer_saving, dec!(3000.00));
/// ```
pub struct CalculationEngine {
    repository: Box<dyn TaxYearRepository>,
}

impl CalculationEngine {
    pub fn new(repository: Box<dyn TaxYearRepository>) -> Self {
        Self { repository }
    }

    /// Engine over the compiled-in tax-year table.
    pub fn builtin() -> Self {
        Self::new(Box::new(TaxYearTable::builtin()))
    }

    pub fn repository(&self) -> &dyn TaxYearRepository {
        self.repository.as_ref()
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTaxYear`] when the repository has no
    /// table for `year`.
    pub fn constants(
        &self,
        year: TaxYear,
    ) -> Result<&TaxYearConstants, ValidationError> {
        self.repository.get_constants(year)
    }

    pub fn salary_sacrifice(
        &self,
        input: &SalarySacrificeInput,
    ) -> Result<SalarySacrificeResult, ValidationError> {
        let constants = self.resolve("salary_sacrifice", input.tax_year)?;
        SalarySacrificeCalculator::new(constants)?.calculate(input)
    }

    pub fn hris_roi(
        &self,
        input: &HrisRoiInput,
    ) -> Result<HrisRoiResult, ValidationError> {
        let constants = self.resolve("hris_roi", input.tax_year)?;
        HrisRoiCalculator::new(constants)?.calculate(input)
    }

    pub fn payroll(
        &self,
        input: &PayrollInput,
    ) -> Result<PayrollResult, ValidationError> {
        let constants = self.resolve("payroll", input.tax_year)?;
        PayrollCalculator::new(constants)?.calculate(input)
    }

    pub fn ev_scheme(
        &self,
        input: &EvSchemeInput,
    ) -> Result<EvSchemeResult, ValidationError> {
        let constants = self.resolve("ev_scheme", input.tax_year)?;
        EvSchemeCalculator::new(constants)?.calculate(input)
    }

    /// Dispatches to the calculator matching the input variant.
    pub fn calculate(
        &self,
        input: &CalculatorInput,
    ) -> Result<CalculationResult, ValidationError> {
        match input {
            CalculatorInput::SalarySacrifice(input) => {
                self.salary_sacrifice(input).map(CalculationResult::SalarySacrifice)
            }
            CalculatorInput::HrisRoi(input) => self.hris_roi(input).map(CalculationResult::HrisRoi),
            CalculatorInput::Payroll(input) => self.payroll(input).map(CalculationResult::Payroll),
            CalculatorInput::EvScheme(input) => {
                self.ev_scheme(input).map(CalculationResult::EvScheme)
            }
        }
    }

    fn resolve(
        &self,
        calculator: &'static str,
        year: TaxYear,
    ) -> Result<&TaxYearConstants, ValidationError> {
        debug!(calculator, tax_year = %year, "running calculator");
        self.repository.get_constants(year)
    }
}
