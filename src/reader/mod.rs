use std::path::Path;

use crate::error::ScanError;

pub mod packages_config;

/// One dependency declaration as it appears in a manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub package_id: String,
    pub version: String,
}

/// Extracts (package identifier, version) pairs from one manifest file.
///
/// Implementations preserve document order, never yield an empty package
/// identifier, and keep duplicate declarations as-is. A file that cannot be
/// read or parsed is a [`ScanError::ManifestRead`]; the caller aborts the
/// whole run rather than skipping the file.
pub trait ManifestReader {
    fn read(&self, path: &Path) -> Result<Vec<Declaration>, ScanError>;
}
