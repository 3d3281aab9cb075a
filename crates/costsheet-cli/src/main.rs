//! Costsheet CLI - schedule workbook repair tool

use anyhow::{bail, Context, Result};
use clap::Parser;
use costsheet_core::SheetScanner;
use costsheet_xlsx::XlsxGrid;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "costsheet")]
#[command(
    author,
    version,
    about = "Validates and repairs maintenance cost schedule workbooks"
)]
struct Cli {
    /// Workbook to repair; prompted for interactively when omitted
    input: Option<PathBuf>,

    /// Attach dropdown validators to the periodicity and unit columns
    #[arg(long)]
    validators: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (path, attach_validators) = match cli.input {
        Some(path) => (path, cli.validators),
        None => prompt_for_input()?,
    };

    let grid =
        XlsxGrid::open(&path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let scanner = SheetScanner::open(grid, attach_validators)
        .context("Failed to read the schedule sheet")?;
    let (outcome, _grid) = scanner.scan().context("Scan failed")?;

    if outcome.numeric_modified {
        eprintln!("Numeric cells were corrected or marked.");
    }
    if outcome.other_modified {
        eprintln!("Periodicity/unit cells were marked.");
    }
    if outcome.saved {
        eprintln!("Saved '{}'.", path.display());
    } else {
        eprintln!("Nothing to repair; workbook left untouched.");
    }

    Ok(())
}

/// Initialize the tracing subscriber for logging
///
/// Library crates log through `log`; the subscriber's default `tracing-log`
/// feature forwards those records here. Level comes from the environment,
/// defaulting to `info`.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Read the combined `<path>, y|n` prompt from stdin
fn prompt_for_input() -> Result<(PathBuf, bool)> {
    eprint!("input path to .xlsx file and write y/n separated by comma whether you need or not to add validator: ");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;
    parse_prompt(&line)
}

/// Parse the combined prompt line: a path and a y/n validator flag
fn parse_prompt(line: &str) -> Result<(PathBuf, bool)> {
    let mut parts = line.split(',');
    let (Some(path), Some(flag), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Expected '<path>, y|n', got '{}'", line.trim());
    };

    let path = path.trim();
    if path.is_empty() {
        bail!("Expected '<path>, y|n', got '{}'", line.trim());
    }

    let attach = match flag.trim() {
        "y" => true,
        "n" => false,
        other => bail!("Validator flag must be 'y' or 'n', got '{}'", other),
    };

    Ok((PathBuf::from(path), attach))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validators_flag() {
        let cli = Cli::try_parse_from(["costsheet", "book.xlsx", "--validators"]).unwrap();
        assert!(cli.validators);
        assert_eq!(cli.input, Some(PathBuf::from("book.xlsx")));

        let cli = Cli::try_parse_from(["costsheet", "book.xlsx"]).unwrap();
        assert!(!cli.validators);
    }

    #[test]
    fn test_parse_prompt() {
        let (path, attach) = parse_prompt("schedule.xlsx, y\n").unwrap();
        assert_eq!(path, PathBuf::from("schedule.xlsx"));
        assert!(attach);

        let (_, attach) = parse_prompt("schedule.xlsx,n").unwrap();
        assert!(!attach);
    }

    #[test]
    fn test_parse_prompt_rejects_bad_shapes() {
        assert!(parse_prompt("schedule.xlsx").is_err());
        assert!(parse_prompt("a.xlsx, y, extra").is_err());
        assert!(parse_prompt("a.xlsx, maybe").is_err());
        assert!(parse_prompt(", y").is_err());
    }
}
