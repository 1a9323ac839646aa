use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when calculator inputs or tax-year constants are out of domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A currency amount that must be zero or more was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A percentage fell outside the closed range [0, 100].
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentageOutOfRange { field: &'static str, value: Decimal },

    /// A currency amount exceeded [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT).
    #[error("{field} must not exceed {limit}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: Decimal,
        limit: Decimal,
    },

    /// A derived figure does not fit in a `Decimal`.
    #[error("{field} is too large to calculate")]
    Overflow { field: &'static str },

    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },

    /// The tax-year key could not be parsed.
    #[error("malformed tax year '{0}' (expected e.g. 2025-2026)")]
    InvalidTaxYear(String),

    /// The tax-year key parsed but no constants table exists for it.
    #[error("no constants available for tax year {0}")]
    UnknownTaxYear(String),

    #[error("sacrifice of {sacrifice} exceeds gross salary of {salary}")]
    SacrificeExceedsSalary { sacrifice: Decimal, salary: Decimal },

    #[error("pension contributions below the auto-enrolment minimum: {0}")]
    BelowPensionMinimum(String),

    #[error("invalid tax-year constants: {0}")]
    InvalidConstants(String),
}
