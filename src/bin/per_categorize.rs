//! Categorize a directory of bank and credit card statement exports.

use clap::Parser;
use log::info;
use per_statements::{aggregator, report, rules, workbook, Error, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory name searched for when no source directory is given.
const DEFAULT_SOURCE_DIR: &str = "Files";

#[derive(Parser, Debug)]
#[command(name = "per_categorize")]
#[command(about = "Categorize expenses from bank and credit card statement exports", long_about = None)]
struct Cli {
    /// Folder containing files to import (defaults to the nearest `Files` folder)
    #[arg(long = "source-dir")]
    source_dir: Option<PathBuf>,

    /// Folder the categorized and uncategorized CSVs are written to
    #[arg(long = "output-dir", default_value = "output")]
    output_dir: PathBuf,

    /// Excel workbook to update; pass an empty value to be asked for one
    #[arg(long = "destination-file", default_value = "output/BudgetAndTracking-Q.xlsx")]
    destination_file: String,

    /// YAML file mapping categories to place substrings
    #[arg(long, default_value = "categories.yml")]
    categories: PathBuf,

    /// YAML file mapping clean merchant names to place substrings
    #[arg(long, default_value = "place_mappings.yml")]
    cleanup: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    info!("{:?}", cli);

    let source_dir = match cli.source_dir {
        Some(dir) => dir,
        None => find_source_dir()?,
    };

    let destination = if cli.destination_file.trim().is_empty() {
        prompt_destination(&source_dir)?
    } else {
        PathBuf::from(cli.destination_file)
    };

    let category_rules = rules::load_rules(&cli.categories)?;
    let cleanup_rules = rules::load_rules(&cli.cleanup)?;

    info!("Processing statements in {}", source_dir.display());
    let partition = aggregator::process_statements(&source_dir, &category_rules, &cleanup_rules)?;
    report::write_partition(&cli.output_dir, &partition)?;
    workbook::update_workbook(&destination, &partition)?;

    info!(
        "Done: {} categorized, {} uncategorized",
        partition.categorized.len(),
        partition.uncategorized.len()
    );
    Ok(())
}

/// Ask which workbook to update. Names that do not exist as typed are looked
/// for next to the statement folder.
fn prompt_destination(source_dir: &Path) -> Result<PathBuf> {
    print!(
        "What file would you like to update? (Default) {}:",
        workbook::DEFAULT_WORKBOOK
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    let fallback_dir = source_dir.parent().unwrap_or(source_dir);
    Ok(workbook::resolve_destination(&answer, fallback_dir))
}

/// Walk up from the working directory to the first ancestor holding a `Files` folder.
fn find_source_dir() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    cwd.ancestors()
        .map(|dir| dir.join(DEFAULT_SOURCE_DIR))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no '{}' folder above {}", DEFAULT_SOURCE_DIR, cwd.display()),
            ))
        })
}
