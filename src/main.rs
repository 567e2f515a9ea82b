//! `version-checkr` — scan dependency manifests and report version divergence.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load and merge configuration ([`config::load_config`]).
//! 3. Enumerate `packages.config` manifests below the scan root ([`scanner`]).
//! 4. Parse each manifest into declarations ([`reader`]).
//! 5. Fold every declaration into the scan aggregate ([`aggregate`]).
//! 6. Select divergent packages, flatten to rows, render CSV ([`report`]).
//! 7. Write the date-stamped report, rotating prior output ([`report::writer`]).
//! 8. Print the terminal summary (or JSON rows with `--json`).
//!
//! Any failure aborts the run with a single message; no partial report is
//! ever written.

mod aggregate;
mod cli;
mod config;
mod error;
mod reader;
mod report;
mod scanner;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use aggregate::ScanResult;
use cli::Cli;
use config::load_config;
use reader::packages_config::PackagesConfigReader;
use reader::ManifestReader;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if !cli.quiet {
        eprintln!(
            " {} Scanning for {} below {}",
            "→".cyan(),
            scanner::MANIFEST_FILE_NAME,
            config.scan_root.display()
        );
    }

    let manifests = scanner::find_manifests(&config.scan_root)?;
    let scan = aggregate_manifests(&manifests, cli.quiet)?;

    let selected = scan.select_divergent();
    let rows = report::flatten(&selected);

    let written = report::writer::write_report(
        &report::to_csv(&rows),
        &config.output_dir,
        &config.report_name,
        chrono::Local::now().date_naive(),
    )?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        if !cli.quiet {
            eprintln!(" {} Report written to {}", "✓".green(), written.display());
        }
    } else {
        report::terminal::render(
            manifests.len(),
            scan.package_count(),
            &rows,
            &written,
            cli.verbose,
            cli.quiet,
        )?;
    }

    Ok(())
}

/// Parse every discovered manifest and fold its declarations into one
/// [`ScanResult`], strictly sequentially. A single unreadable or malformed
/// manifest aborts the whole run.
fn aggregate_manifests(manifests: &[PathBuf], quiet: bool) -> Result<ScanResult> {
    let reader = PackagesConfigReader::new();
    let mut scan = ScanResult::new();

    let pb = if !quiet && !manifests.is_empty() {
        let pb = ProgressBar::new(manifests.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    for path in manifests {
        for declaration in reader.read(path)? {
            scan.record(path, &declaration.package_id, &declaration.version);
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(scan)
}
