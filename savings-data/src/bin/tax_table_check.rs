use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use savings_core::{TaxYearRepository, TaxYearTable};
use savings_data::CsvTaxYears;

/// Validate a tax-year constants CSV file.
///
/// The header row must name every constants field (tax_year,
/// personal_allowance, ..., ev_bik_rate). Rates are fractions, amounts are
/// annual pounds.
#[derive(Parser, Debug)]
#[command(name = "tax-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax-year constants
    #[arg(short, long)]
    file: PathBuf,

    /// Report rows that differ from the compiled-in figures
    #[arg(short, long, default_value_t = false)]
    compare_builtin: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking tax-year constants in: {}", args.file.display());

    let table = CsvTaxYears::from_path(&args.file)
        .with_context(|| format!("Failed to load: {}", args.file.display()))?;

    let years = table.list_tax_years();
    println!("Loaded {} tax years:", years.len());
    for year in &years {
        println!("  {year}");
    }

    if args.compare_builtin {
        let builtin = TaxYearTable::builtin();
        for year in &years {
            match (table.get(*year), builtin.get(*year)) {
                (Some(loaded), Some(shipped)) if loaded == shipped => {
                    println!("{year}: matches built-in figures");
                }
                (Some(_), Some(_)) => println!("{year}: differs from built-in figures"),
                _ => println!("{year}: not in built-in table"),
            }
        }
    }

    println!("All rows valid.");

    Ok(())
}
