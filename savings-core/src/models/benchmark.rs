//! Reference ranges shown alongside calculator results.
//!
//! The figures are indicative industry ranges, not statutory values, and
//! are only used to place a result below, within or above typical outcomes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkUnit {
    Percent,
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkPosition {
    Below,
    Within,
    Above,
}

/// An inclusive `[low, high]` reference range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    pub key: String,
    pub label: String,
    pub low: Decimal,
    pub high: Decimal,
    pub unit: BenchmarkUnit,
}

impl Benchmark {
    fn new(
        key: &str,
        label: &str,
        low: Decimal,
        high: Decimal,
        unit: BenchmarkUnit,
    ) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            low,
            high,
            unit,
        }
    }

    /// Analysis period, in years, that [`Benchmark::hris_roi`] describes.
    pub const HRIS_ROI_YEARS: u32 = 3;

    /// Three-year return on an HRIS investment.
    pub fn hris_roi() -> Self {
        Self::new(
            "hris_roi",
            "HRIS return on investment (3 years)",
            dec!(100),
            dec!(300),
            BenchmarkUnit::Percent,
        )
    }

    /// Months for an HRIS rollout to recover its implementation cost.
    pub fn hris_payback() -> Self {
        Self::new(
            "hris_payback",
            "HRIS payback period",
            dec!(6),
            dec!(18),
            BenchmarkUnit::Months,
        )
    }

    /// Share of eligible staff who join a salary sacrifice scheme.
    pub fn sacrifice_participation() -> Self {
        Self::new(
            "sacrifice_participation",
            "Salary sacrifice participation",
            dec!(40),
            dec!(70),
            BenchmarkUnit::Percent,
        )
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::hris_roi(),
            Self::hris_payback(),
            Self::sacrifice_participation(),
        ]
    }

    pub fn position(
        &self,
        value: Decimal,
    ) -> BenchmarkPosition {
        if value < self.low {
            BenchmarkPosition::Below
        } else if value > self.high {
            BenchmarkPosition::Above
        } else {
            BenchmarkPosition::Within
        }
    }

    pub fn compare(
        self,
        value: Decimal,
    ) -> BenchmarkComparison {
        let position = self.position(value);
        BenchmarkComparison {
            benchmark: self,
            value,
            position,
        }
    }
}

/// A calculated value placed against a [`Benchmark`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub benchmark: Benchmark,
    pub value: Decimal,
    pub position: BenchmarkPosition,
}
