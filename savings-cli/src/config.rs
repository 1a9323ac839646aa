//! `payroll-savings.toml` configuration.
//!
//! ```toml
//! [calculator]
//! default_tax_year = "2025-26"
//!
//! [constants]
//! backend = "csv"
//! location = "tax_years.csv"
//!
//! [logging]
//! level = "debug"
//! file = "payroll-savings.log"
//! ```
//!
//! Every section and key is optional. Relative paths are resolved against
//! the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use savings_core::TaxYear;
use savings_core::source::SourceConfig;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "payroll-savings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub calculator: CalculatorSection,
    pub constants: SourceConfig,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorSection {
    /// Used when a command omits `--tax-year`. Falls back to the latest year
    /// the constants source knows.
    pub default_tax_year: Option<TaxYear>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Append log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Loads `path` if given, otherwise `payroll-savings.toml` in the working
    /// directory. A missing default file yields the defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config = Self::parse(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;

        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.resolve_paths(&base);
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        if let Some(location) = self.constants.location.as_mut() {
            if Path::new(location.as_str()).is_relative() {
                *location = base.join(location.as_str()).display().to_string();
            }
        }
        if let Some(file) = self.logging.file.as_mut() {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }
}
