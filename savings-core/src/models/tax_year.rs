use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UK tax year, running 6 April to 5 April.
///
/// The canonical key is `"2025-2026"`. Parsing also accepts the short form
/// `"2025-26"` and a slash separator (`"2025/26"`); the second year must
/// follow the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxYear {
    start: u16,
}

impl TaxYear {
    /// The tax year that begins in April of `start`.
    pub const fn starting(start: u16) -> Self {
        Self { start }
    }

    pub fn start_year(&self) -> u16 {
        self.start
    }

    /// Widened so the year after `u16::MAX` is representable.
    pub fn end_year(&self) -> u32 {
        u32::from(self.start) + 1
    }

    /// Parses a tax-year key.
    ///
    /// ```
    /// use savings_core::TaxYear;
    ///
    /// assert_eq!(TaxYear::parse("2025-2026").unwrap(), TaxYear::starting(2025));
    /// assert_eq!(TaxYear::parse("2025-26").unwrap(), TaxYear::starting(2025));
    /// assert!(TaxYear::parse("2025-2027").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTaxYear(s.to_string());

        let (first, second) = s.trim().split_once(['-', '/']).ok_or_else(invalid)?;
        if first.len() != 4 || !first.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !second.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let start: u16 = first.parse().map_err(|_| invalid())?;
        let end: u16 = second.parse().map_err(|_| invalid())?;
        let follows = match second.len() {
            4 => end == start + 1,
            2 => end == (start + 1) % 100,
            _ => false,
        };
        if !follows {
            return Err(invalid());
        }

        Ok(Self { start })
    }
}

impl fmt::Display for TaxYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end_year())
    }
}

impl FromStr for TaxYear {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxYear {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxYear> for String {
    fn from(value: TaxYear) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_canonical_key() {
        let year = TaxYear::parse("2025-2026").unwrap();

        assert_eq!(year.start_year(), 2025);
        assert_eq!(year.end_year(), 2026);
    }

    #[test]
    fn parse_accepts_short_and_slash_forms() {
        assert_eq!(TaxYear::parse("2024-25"), Ok(TaxYear::starting(2024)));
        assert_eq!(TaxYear::parse("2024/25"), Ok(TaxYear::starting(2024)));
        assert_eq!(TaxYear::parse(" 2024/2025 "), Ok(TaxYear::starting(2024)));
    }

    #[test]
    fn parse_handles_century_rollover_in_short_form() {
        assert_eq!(TaxYear::parse("2099-00"), Ok(TaxYear::starting(2099)));
    }

    #[test]
    fn parse_rejects_non_consecutive_years() {
        assert_eq!(
            TaxYear::parse("2025-2027"),
            Err(ValidationError::InvalidTaxYear("2025-2027".to_string()))
        );
        assert!(TaxYear::parse("2025-25").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TaxYear::parse("").is_err());
        assert!(TaxYear::parse("2025").is_err());
        assert!(TaxYear::parse("twenty-five").is_err());
        assert!(TaxYear::parse("25-26").is_err());
        assert!(TaxYear::parse("2025-+26").is_err());
    }

    #[test]
    fn display_uses_canonical_key() {
        assert_eq!(TaxYear::starting(2026).to_string(), "2026-2027");
    }

    #[test]
    fn display_handles_the_last_start_year() {
        assert_eq!(TaxYear::starting(u16::MAX).end_year(), 65536);
        assert_eq!(TaxYear::starting(u16::MAX).to_string(), "65535-65536");
    }

    #[test]
    fn serde_uses_string_key() {
        let json = serde_json::to_string(&TaxYear::starting(2025)).unwrap();
        assert_eq!(json, "\"2025-2026\"");

        let parsed: TaxYear = serde_json::from_str("\"2025-26\"").unwrap();
        assert_eq!(parsed, TaxYear::starting(2025));

        assert!(serde_json::from_str::<TaxYear>("\"nope\"").is_err());
    }

    #[test]
    fn years_order_chronologically() {
        assert!(TaxYear::starting(2024) < TaxYear::starting(2025));
    }
}
