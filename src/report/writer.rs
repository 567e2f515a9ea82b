use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::ScanError;

const SEPARATOR: &str = "_";
const REPORT_EXTENSION: &str = "csv";
const BACKUP_EXTENSION: &str = "bak";

/// Compute the report file name: `<base>_<year>_<month>_<day>.csv`, each
/// date part as plain decimal with no zero padding.
pub fn report_file_name(base_name: &str, date: NaiveDate) -> String {
    format!(
        "{base}{sep}{y}{sep}{m}{sep}{d}.{ext}",
        base = base_name,
        sep = SEPARATOR,
        y = date.year(),
        m = date.month(),
        d = date.day(),
        ext = REPORT_EXTENSION,
    )
}

/// Write the rendered report under `output_dir`, creating the directory if
/// needed and rotating any same-named prior report to a numbered `.bak`.
///
/// Returns the path actually written. An empty `content` still produces a
/// (zero-row) report file. The date is passed in so callers and tests control
/// the stamp; the driver passes the current local date.
pub fn write_report(
    content: &str,
    output_dir: &Path,
    base_name: &str,
    date: NaiveDate,
) -> Result<PathBuf, ScanError> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        ScanError::io(
            format!("failed to create report directory `{}`", output_dir.display()),
            e,
        )
    })?;

    let file_name = report_file_name(base_name, date);
    let destination = output_dir.join(&file_name);

    if destination.exists() {
        rotate_backup(output_dir, &file_name)?;
    }

    std::fs::write(&destination, content).map_err(|e| {
        ScanError::io(
            format!("failed to write report `{}`", destination.display()),
            e,
        )
    })?;

    Ok(destination)
}

/// Rename an existing report to `<stem>_<n>.bak` for the first free `n`,
/// starting at 0. Prior output is never overwritten: repeated same-day runs
/// accumulate `_0`, `_1`, `_2`, … backups.
fn rotate_backup(output_dir: &Path, file_name: &str) -> Result<(), ScanError> {
    let stem = Path::new(file_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let mut count = 0;
    let backup = loop {
        let candidate = format!("{stem}{SEPARATOR}{count}.{BACKUP_EXTENSION}");
        if !output_dir.join(&candidate).exists() {
            break candidate;
        }
        count += 1;
    };

    std::fs::rename(output_dir.join(file_name), output_dir.join(&backup)).map_err(|e| {
        ScanError::io(
            format!("failed to back up prior report `{file_name}` as `{backup}`"),
            e,
        )
    })
}
