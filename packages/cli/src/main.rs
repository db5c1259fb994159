#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the letzgrade catalog tool.
//!
//! Uses `indicatif-log-bridge` (via [`letzgrade_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the page progress bar never fight for the terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use letzgrade_catalog::output::CoeffStyle;
use letzgrade_catalog::rules::{CompiledRules, DEFAULT_RULES_TOML};
use letzgrade_catalog::{build_document, load_document, load_grid, load_rules, write_document};
use letzgrade_cli_utils::IndicatifProgress;

#[derive(Parser)]
#[command(
    name = "letzgrade",
    about = "Extract school classes and coefficients from curriculum grids"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a course catalog from a detected-table grid file
    Extract {
        /// Grid JSON produced by the table detector (pages with text and tables)
        #[arg(long)]
        grid: PathBuf,
        /// Output catalog JSON path
        #[arg(long)]
        out: PathBuf,
        /// Version field of the catalog
        #[arg(long = "version", default_value = "2025")]
        catalog_version: String,
        /// System field of the catalog
        #[arg(long, default_value = "LUX")]
        system: String,
        /// Extraction rules TOML (defaults to the embedded Luxembourg rules)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// How absent coefficients are written: `omit` or `null`
        #[arg(long, default_value = "omit")]
        coeff_style: CoeffStyle,
    },
    /// Sum the coefficients of one year in an existing catalog
    Sum {
        /// Catalog JSON path
        #[arg(long)]
        catalog: PathBuf,
        /// Year label (e.g., "7C", "6CL", "5C")
        #[arg(long)]
        year: String,
    },
    /// Print the embedded default extraction rules
    Rules,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = letzgrade_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            grid,
            out,
            catalog_version,
            system,
            rules,
            coeff_style,
        } => {
            let rules = match rules {
                Some(path) => load_rules(&path)?,
                None => CompiledRules::default_set()?,
            };
            log::info!("Using rules '{}'", rules.rules().id);

            let grid = load_grid(&grid)?;
            let progress = IndicatifProgress::pages_bar(&multi, "Extracting pages");
            let document = build_document(&grid, &rules, &catalog_version, &system, &progress);

            write_document(&out, &document, coeff_style)?;
            println!(
                "✓ Wrote {} with {} year blocks",
                out.display(),
                document.years.len()
            );
        }
        Commands::Sum { catalog, year } => {
            let document = load_document(&catalog)?;
            let Some(block) = document.year(&year) else {
                println!("Year '{year}' not found.");
                return Ok(());
            };

            let unweighted = block.courses.iter().filter(|c| c.coeff.is_none()).count();
            println!(
                "Total coeff for year {}: {}",
                block.year,
                block.total_coefficient()
            );
            if unweighted > 0 {
                println!("({unweighted} course(s) without a coefficient)");
            }
        }
        Commands::Rules => {
            print!("{DEFAULT_RULES_TOML}");
        }
    }

    Ok(())
}
