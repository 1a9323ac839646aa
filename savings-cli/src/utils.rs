use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Optional sign, optional pound sign, digits either plain or grouped in
/// threes by commas, optional fraction.
static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?£?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").expect("currency pattern is valid")
});

static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?%?$").expect("percentage pattern is valid"));

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("'{0}' is not a valid amount (expected e.g. 45000, 45,000.50 or £45,000)")]
    Currency(String),

    #[error("'{0}' is not a valid percentage (expected e.g. 5 or 5%)")]
    Percentage(String),

    #[error("invalid decimal '{input}': {source}")]
    Decimal {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

fn to_decimal(
    input: &str,
    cleaned: &str,
) -> Result<Decimal, ParseAmountError> {
    cleaned.parse().map_err(|source| {
        tracing::error!(input = %input, "invalid decimal: {}", source);
        ParseAmountError::Decimal {
            input: input.to_string(),
            source,
        }
    })
}

/// Parses a pound amount into a [`Decimal`].
///
/// Accepts a leading `£` and commas as thousands separators
/// (e.g. `"£45,000.50"`). Surrounding whitespace is ignored.
pub fn parse_currency(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim();
    if !CURRENCY.is_match(trimmed) {
        return Err(ParseAmountError::Currency(s.to_string()));
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != '£' && *c != ',').collect();
    to_decimal(s, &cleaned)
}

/// Parses a percentage such as `"5"` or `"5%"`. The result is on the
/// 0–100 scale; range checks are left to the calculators.
pub fn parse_percentage(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim();
    if !PERCENTAGE.is_match(trimmed) {
        return Err(ParseAmountError::Percentage(s.to_string()));
    }
    to_decimal(s, trimmed.trim_end_matches('%'))
}

/// Formats an amount as pounds and pence with thousands separators, e.g.
/// `£1,234.56` or `-£90.00`.
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");
    let (whole, pence) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}£{grouped}.{pence}")
}

pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value)
}

/// Formats an optional value, using "—" when `None`.
pub fn opt_display(
    value: Option<Decimal>,
    format: fn(Decimal) -> String,
) -> String {
    value.map(format).unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_currency_accepts_pound_sign_and_separators() {
        assert_eq!(parse_currency("£45,000.50").unwrap(), dec!(45000.50));
        assert_eq!(parse_currency("1,234,567").unwrap(), dec!(1234567));
        assert_eq!(parse_currency("45000").unwrap(), dec!(45000));
    }

    #[test]
    fn parse_currency_trims_whitespace() {
        assert_eq!(parse_currency("  £500 ").unwrap(), dec!(500));
    }

    #[test]
    fn parse_currency_keeps_sign_for_validation() {
        assert_eq!(parse_currency("-100").unwrap(), dec!(-100));
    }

    #[test]
    fn parse_currency_rejects_malformed_grouping() {
        assert!(parse_currency("45,00").is_err());
        assert!(parse_currency("1,2345").is_err());
        assert!(parse_currency("").is_err());
        assert!(parse_currency("abc").is_err());
        assert!(parse_currency("$100").is_err());
    }

    #[test]
    fn parse_percentage_accepts_optional_percent_sign() {
        assert_eq!(parse_percentage("5").unwrap(), dec!(5));
        assert_eq!(parse_percentage("7.5%").unwrap(), dec!(7.5));
        assert!(parse_percentage("five").is_err());
    }

    #[test]
    fn format_gbp_groups_thousands() {
        assert_eq!(format_gbp(dec!(1234.56)), "£1,234.56");
        assert_eq!(format_gbp(dec!(1234567)), "£1,234,567.00");
        assert_eq!(format_gbp(dec!(999.999)), "£1,000.00");
        assert_eq!(format_gbp(dec!(0)), "£0.00");
        assert_eq!(format_gbp(dec!(12)), "£12.00");
    }

    #[test]
    fn format_gbp_negative() {
        assert_eq!(format_gbp(dec!(-90)), "-£90.00");
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn opt_display_uses_dash_for_none() {
        assert_eq!(opt_display(None, format_percent), "—");
        assert_eq!(opt_display(Some(dec!(5.7)), format_percent), "5.70%");
    }
}
