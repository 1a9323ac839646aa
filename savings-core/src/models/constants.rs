use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxYear;
use crate::error::ValidationError;

/// Published UK payroll figures for a single tax year.
///
/// All amounts are annual and in pounds. Rates are fractions (`0.15` is 15%).
/// Income tax figures are the rest-of-UK bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConstants {
    pub tax_year: TaxYear,

    // Income tax
    pub personal_allowance: Decimal,
    /// Adjusted net income above which the personal allowance is withdrawn
    /// at £1 for every £2.
    pub allowance_taper_threshold: Decimal,
    /// Width of the basic-rate band, measured on taxable income.
    pub basic_rate_band: Decimal,
    /// Taxable income above which the additional rate applies.
    pub additional_rate_threshold: Decimal,
    pub basic_rate: Decimal,
    pub higher_rate: Decimal,
    pub additional_rate: Decimal,

    // Class 1 primary (employee) NI
    pub primary_threshold: Decimal,
    pub upper_earnings_limit: Decimal,
    pub employee_main_rate: Decimal,
    pub employee_upper_rate: Decimal,

    // Class 1 secondary (employer) NI, also the Class 1A rate
    pub secondary_threshold: Decimal,
    pub employer_rate: Decimal,
    pub employment_allowance: Decimal,

    // Auto-enrolment qualifying earnings and minimum contributions
    pub pension_lower_qualifying: Decimal,
    pub pension_upper_qualifying: Decimal,
    pub pension_employee_rate: Decimal,
    pub pension_employer_rate: Decimal,

    /// Appropriate percentage for zero-emission company cars.
    pub ev_bik_rate: Decimal,
}

impl TaxYearConstants {
    /// Checks that every rate is a fraction in [0, 1], every threshold is
    /// non-negative, and paired limits are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConstants`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("basic_rate", self.basic_rate),
            ("higher_rate", self.higher_rate),
            ("additional_rate", self.additional_rate),
            ("employee_main_rate", self.employee_main_rate),
            ("employee_upper_rate", self.employee_upper_rate),
            ("employer_rate", self.employer_rate),
            ("pension_employee_rate", self.pension_employee_rate),
            ("pension_employer_rate", self.pension_employer_rate),
            ("ev_bik_rate", self.ev_bik_rate),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(self.invalid(format!("{name} must be between 0 and 1, got {rate}")));
            }
        }

        let amounts = [
            ("personal_allowance", self.personal_allowance),
            ("allowance_taper_threshold", self.allowance_taper_threshold),
            ("basic_rate_band", self.basic_rate_band),
            ("additional_rate_threshold", self.additional_rate_threshold),
            ("primary_threshold", self.primary_threshold),
            ("upper_earnings_limit", self.upper_earnings_limit),
            ("secondary_threshold", self.secondary_threshold),
            ("employment_allowance", self.employment_allowance),
            ("pension_lower_qualifying", self.pension_lower_qualifying),
            ("pension_upper_qualifying", self.pension_upper_qualifying),
        ];
        for (name, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(self.invalid(format!("{name} must not be negative, got {amount}")));
            }
        }

        if self.upper_earnings_limit < self.primary_threshold {
            return Err(self.invalid(format!(
                "upper_earnings_limit {} is below primary_threshold {}",
                self.upper_earnings_limit, self.primary_threshold
            )));
        }
        if self.additional_rate_threshold < self.basic_rate_band {
            return Err(self.invalid(format!(
                "additional_rate_threshold {} is below basic_rate_band {}",
                self.additional_rate_threshold, self.basic_rate_band
            )));
        }
        if self.pension_upper_qualifying < self.pension_lower_qualifying {
            return Err(self.invalid(format!(
                "pension_upper_qualifying {} is below pension_lower_qualifying {}",
                self.pension_upper_qualifying, self.pension_lower_qualifying
            )));
        }

        Ok(())
    }

    fn invalid(
        &self,
        detail: String,
    ) -> ValidationError {
        ValidationError::InvalidConstants(format!("{}: {detail}", self.tax_year))
    }
}
