use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use indexmap::IndexMap;

use super::ReportRow;

/// Render the colored terminal summary of a completed scan.
///
/// Default output is the summary box plus a compact per-package table;
/// `verbose` expands to one table row per divergent declaration and `quiet`
/// collapses everything to a single line.
pub fn render(
    manifest_count: usize,
    package_count: usize,
    rows: &[ReportRow],
    written: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let by_package = group_rows(rows);
    let divergent_count = by_package.len();

    if quiet {
        println!(
            "Manifests: {}  Packages: {}  Divergent: {}  Report: {}",
            manifest_count,
            package_count,
            if divergent_count > 0 {
                divergent_count.to_string().red().to_string()
            } else {
                divergent_count.to_string().green().to_string()
            },
            written.display(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "version-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Manifests scanned  : {}", manifest_count)
    );
    println!(
        " │  {:<48} │",
        format!("Packages seen      : {}", package_count)
    );
    println!(
        " │  {:<48} │",
        format!("Divergent packages : {}", divergent_count)
    );
    println!(" │  {:<48} │", format!("Report rows        : {}", rows.len()));
    println!(" └────────────────────────────────────────────────────┘\n");

    if rows.is_empty() {
        println!(
            " {} No version divergence detected.\n",
            "✓".green().bold()
        );
    } else if verbose {
        println!(
            " {} Divergent declarations:\n",
            "[DIVERGENT]".red().bold()
        );
        render_declaration_table(rows);
        println!();
    } else {
        println!(" {} Divergent packages:\n", "[DIVERGENT]".red().bold());
        render_package_table(&by_package);
        println!();
    }

    println!(
        " {} Report written to {}\n",
        "✓".green(),
        written.display().to_string().bold()
    );

    Ok(())
}

/// Group rows by package, keeping row order: package → distinct versions in
/// first-seen order, plus the declaration count.
fn group_rows(rows: &[ReportRow]) -> IndexMap<&str, (Vec<&str>, usize)> {
    let mut by_package: IndexMap<&str, (Vec<&str>, usize)> = IndexMap::new();
    for row in rows {
        let entry = by_package.entry(row.package_id.as_str()).or_default();
        if !entry.0.contains(&row.version.as_str()) {
            entry.0.push(row.version.as_str());
        }
        entry.1 += 1;
    }
    by_package
}

fn render_package_table(by_package: &IndexMap<&str, (Vec<&str>, usize)>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Versions").add_attribute(Attribute::Bold),
            Cell::new("Declarations").add_attribute(Attribute::Bold),
        ]);

    for (package, (versions, declarations)) in by_package {
        table.add_row(vec![
            Cell::new(package),
            Cell::new(versions.join(", ")),
            Cell::new(declarations.to_string()),
        ]);
    }

    println!("{}", table);
}

fn render_declaration_table(rows: &[ReportRow]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Manifest").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.package_id),
            Cell::new(&row.manifest_path),
            Cell::new(&row.version),
        ]);
    }

    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(package: &str, manifest: &str, version: &str) -> ReportRow {
        ReportRow {
            package_id: package.into(),
            manifest_path: manifest.into(),
            version: version.into(),
        }
    }

    #[test]
    fn test_group_rows_keeps_first_seen_order() {
        let rows = vec![
            row("Zebra", "m1", "1.0"),
            row("Zebra", "m2", "2.0"),
            row("Alpha", "m1", "3.0"),
            row("Alpha", "m2", "4.0"),
        ];

        let grouped = group_rows(&rows);
        let packages: Vec<&str> = grouped.keys().copied().collect();
        assert_eq!(packages, vec!["Zebra", "Alpha"]);
        assert_eq!(grouped["Zebra"], (vec!["1.0", "2.0"], 2));
    }

    #[test]
    fn test_group_rows_counts_duplicate_declarations() {
        let rows = vec![
            row("P", "m1", "1.0"),
            row("P", "m1", "1.0"),
            row("P", "m2", "2.0"),
        ];

        let grouped = group_rows(&rows);
        // Two distinct versions, three declarations
        assert_eq!(grouped["P"], (vec!["1.0", "2.0"], 3));
    }

    #[test]
    fn test_render_does_not_fail_on_empty_rows() {
        render(0, 0, &[], Path::new("out/inventory_2026_8_24.csv"), false, true).unwrap();
    }
}
