use rust_decimal_macros::dec;

use crate::{TaxYear, TaxYearConstants};

use super::TaxYearTable;

impl TaxYearTable {
    /// Published HMRC figures for the tax years this crate ships with.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for constants in [year_2024_25(), year_2025_26(), year_2026_27()] {
            table.years.insert(constants.tax_year, constants);
        }
        table
    }
}

fn year_2024_25() -> TaxYearConstants {
    TaxYearConstants {
        tax_year: TaxYear::starting(2024),
        personal_allowance: dec!(12570),
        allowance_taper_threshold: dec!(100000),
        basic_rate_band: dec!(37700),
        additional_rate_threshold: dec!(125140),
        basic_rate: dec!(0.20),
        higher_rate: dec!(0.40),
        additional_rate: dec!(0.45),
        primary_threshold: dec!(12570),
        upper_earnings_limit: dec!(50270),
        employee_main_rate: dec!(0.08),
        employee_upper_rate: dec!(0.02),
        secondary_threshold: dec!(9100),
        employer_rate: dec!(0.138),
        employment_allowance: dec!(5000),
        pension_lower_qualifying: dec!(6240),
        pension_upper_qualifying: dec!(50270),
        pension_employee_rate: dec!(0.05),
        pension_employer_rate: dec!(0.03),
        ev_bik_rate: dec!(0.02),
    }
}

// Employer rate rises to 15% and the secondary threshold drops to £5,000.
fn year_2025_26() -> TaxYearConstants {
    TaxYearConstants {
        tax_year: TaxYear::starting(2025),
        secondary_threshold: dec!(5000),
        employer_rate: dec!(0.15),
        employment_allowance: dec!(10500),
        ev_bik_rate: dec!(0.03),
        ..year_2024_25()
    }
}

fn year_2026_27() -> TaxYearConstants {
    TaxYearConstants {
        tax_year: TaxYear::starting(2026),
        ev_bik_rate: dec!(0.04),
        ..year_2025_26()
    }
}
