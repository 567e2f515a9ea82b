use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// All versions observed for one package, keyed by exact version string.
///
/// Iteration order is the order versions were first observed; each version
/// maps to the manifest paths that declared it, in append order, one entry
/// per declaration (duplicates from the same manifest are kept).
#[derive(Debug, Default)]
pub struct PackageRecord {
    versions: IndexMap<String, Vec<PathBuf>>,
}

impl PackageRecord {
    /// Number of distinct version strings observed for this package.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Iterate (version, declaring manifest paths) in first-observed order.
    pub fn versions(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.versions.iter().map(|(v, p)| (v.as_str(), p.as_slice()))
    }
}

/// The complete in-memory aggregate for one run.
///
/// Built incrementally as each manifest is read, then filtered and rendered
/// once at the end. Append-only: recording never removes or deduplicates
/// entries, and packages iterate in the order they were first seen, which is
/// what makes report output reproducible for a fixed enumeration order.
#[derive(Debug, Default)]
pub struct ScanResult {
    packages: IndexMap<String, PackageRecord>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one observed declaration.
    ///
    /// Creates the package record and version group on first sight and
    /// appends the manifest path unconditionally.
    pub fn record(&mut self, manifest_path: &Path, package_id: &str, version: &str) {
        self.packages
            .entry(package_id.to_string())
            .or_default()
            .versions
            .entry(version.to_string())
            .or_default()
            .push(manifest_path.to_path_buf());
    }

    /// Total number of distinct packages seen.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Packages declared at strictly more than one distinct version, in the
    /// order they were first observed.
    pub fn select_divergent(&self) -> Vec<(&str, &PackageRecord)> {
        self.packages
            .iter()
            .filter(|(_, record)| record.version_count() > 1)
            .map(|(id, record)| (id.as_str(), record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_version_packages_are_not_selected() {
        let mut scan = ScanResult::new();
        scan.record(Path::new("a/packages.config"), "Serilog", "2.12.0");
        scan.record(Path::new("b/packages.config"), "Serilog", "2.12.0");
        scan.record(Path::new("a/packages.config"), "NUnit", "3.13.3");

        assert_eq!(scan.package_count(), 2);
        assert!(scan.select_divergent().is_empty());
    }

    #[test]
    fn test_two_versions_select_one_package() {
        let mut scan = ScanResult::new();
        scan.record(Path::new("a/packages.config"), "Newtonsoft.Json", "1.0");
        scan.record(Path::new("b/packages.config"), "Newtonsoft.Json", "2.0");
        scan.record(Path::new("a/packages.config"), "NUnit", "3.13.3");

        let selected = scan.select_divergent();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, "Newtonsoft.Json");
        assert_eq!(selected[0].1.version_count(), 2);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let mut scan = ScanResult::new();
        scan.record(Path::new("m1"), "Zebra", "1.0");
        scan.record(Path::new("m1"), "Alpha", "1.0");
        scan.record(Path::new("m2"), "Zebra", "2.0");
        scan.record(Path::new("m2"), "Alpha", "2.0");

        let selected = scan.select_divergent();
        let ids: Vec<&str> = selected.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["Zebra", "Alpha"]);

        // Versions iterate in first-observed order too
        let versions: Vec<&str> = selected[0].1.versions().map(|(v, _)| v).collect();
        assert_eq!(versions, vec!["1.0", "2.0"]);
    }

    #[test]
    fn test_identical_triples_are_both_kept() {
        let mut scan = ScanResult::new();
        scan.record(Path::new("m1"), "Serilog", "1.0");
        scan.record(Path::new("m1"), "Serilog", "1.0");
        scan.record(Path::new("m2"), "Serilog", "2.0");

        let selected = scan.select_divergent();
        let (_, record) = selected[0];
        let (_, paths) = record.versions().next().unwrap();
        assert_eq!(paths, [PathBuf::from("m1"), PathBuf::from("m1")]);
    }

    #[test]
    fn test_exact_string_semantics_no_semver_folding() {
        let mut scan = ScanResult::new();
        scan.record(Path::new("m1"), "Serilog", "1.0");
        scan.record(Path::new("m2"), "Serilog", "1.0.0");

        // "1.0" and "1.0.0" are distinct versions
        assert_eq!(scan.select_divergent().len(), 1);
    }
}
