//! Report pipeline for version-divergence findings.
//!
//! - [`flatten`] — turn the selected packages into flat rows, one per
//!   original manifest declaration.
//! - [`to_csv`] — render rows in the fixed CSV record format.
//! - [`writer`] — persist the rendered report with date stamping and backup
//!   rotation.
//! - [`terminal`] — colored console summary.

pub mod terminal;
pub mod writer;

use serde::Serialize;

use crate::aggregate::PackageRecord;

/// One report record. Field order is a format contract:
/// package identifier, manifest path, version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub package_id: String,
    pub manifest_path: String,
    pub version: String,
}

/// Flatten the selected packages into report rows.
///
/// Versions iterate in first-observed order and paths in append order, so one
/// row comes out per original declaration of a divergent package, not one per
/// distinct version.
pub fn flatten(selected: &[(&str, &PackageRecord)]) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for (package_id, record) in selected {
        for (version, paths) in record.versions() {
            for path in paths {
                rows.push(ReportRow {
                    package_id: (*package_id).to_string(),
                    manifest_path: path.display().to_string(),
                    version: version.to_string(),
                });
            }
        }
    }
    rows
}

/// Render rows as CSV text: comma-joined fields in the contract order, one
/// record per line, `\n` terminated, no header row.
pub fn to_csv(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            row.package_id, row.manifest_path, row.version
        ));
    }
    out
}
