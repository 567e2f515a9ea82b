use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;

/// Fixed manifest file name the scan looks for, at any depth.
pub const MANIFEST_FILE_NAME: &str = "packages.config";

/// Recursively enumerate every manifest file below `root`.
///
/// Traversal is sorted by file name so the enumeration order, and with it the
/// report row order, is deterministic across runs over the same tree. Any
/// directory that cannot be read aborts the scan.
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut manifests = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let context = match e.path() {
                Some(p) => format!("failed to scan `{}`", p.display()),
                None => format!("failed to scan `{}`", root.display()),
            };
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            ScanError::io(context, source)
        })?;

        if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE_NAME {
            manifests.push(entry.into_path());
        }
    }

    Ok(manifests)
}
