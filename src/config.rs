use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ScanError;

/// The three settings every run requires, fully resolved.
///
/// There are no built-in defaults: each value must come from a CLI flag or a
/// config file, and a missing one is a startup failure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where the recursive manifest scan starts.
    pub scan_root: PathBuf,
    /// Directory the report file is written into (created if absent).
    pub output_dir: PathBuf,
    /// Report base name; the date stamp and `.csv` extension are appended.
    pub report_name: String,
}

/// On-disk config file shape. All fields optional; CLI flags take precedence.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    scan: ScanSection,
    #[serde(default)]
    report: ReportSection,
}

#[derive(Debug, Default, Deserialize)]
struct ScanSection {
    root: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ReportSection {
    output_dir: Option<PathBuf>,
    name: Option<String>,
}

/// Load and merge configuration, searching config files in order:
///
/// 1. `--config` path (must exist and parse)
/// 2. `./.version-checkr/config.toml`
/// 3. `~/.config/version-checkr/config.toml`
///
/// CLI flags override file values field by field. Any of the three settings
/// still unset after merging is a [`ScanError::ConfigurationMissing`].
pub fn load_config(cli: &Cli) -> Result<Config, ScanError> {
    let raw = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => find_config_file()?.unwrap_or_default(),
    };

    let scan_root = cli
        .root
        .clone()
        .or(raw.scan.root)
        .ok_or(ScanError::ConfigurationMissing("scan root"))?;
    let output_dir = cli
        .output_dir
        .clone()
        .or(raw.report.output_dir)
        .ok_or(ScanError::ConfigurationMissing("report output directory"))?;
    let report_name = cli
        .report_name
        .clone()
        .or(raw.report.name)
        .ok_or(ScanError::ConfigurationMissing("report base name"))?;

    Ok(Config {
        scan_root,
        output_dir,
        report_name,
    })
}

fn read_config_file(path: &Path) -> Result<RawConfig, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::ConfigurationInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ScanError::ConfigurationInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn find_config_file() -> Result<Option<RawConfig>, ScanError> {
    let project_config = Path::new(".version-checkr").join("config.toml");
    if project_config.exists() {
        return read_config_file(&project_config).map(Some);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("version-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config_file(&home_config).map(Some);
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli_with(config: Option<PathBuf>) -> Cli {
        Cli {
            root: None,
            output_dir: None,
            report_name: None,
            config,
            json: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_config_file_provides_all_values() {
        let toml = r#"
[scan]
root = "/src/projects"

[report]
output_dir = "/reports"
name = "inventory"
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", toml).unwrap();

        let config = load_config(&cli_with(Some(f.path().to_path_buf()))).unwrap();
        assert_eq!(config.scan_root, PathBuf::from("/src/projects"));
        assert_eq!(config.output_dir, PathBuf::from("/reports"));
        assert_eq!(config.report_name, "inventory");
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let toml = r#"
[scan]
root = "/src/projects"

[report]
output_dir = "/reports"
name = "inventory"
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", toml).unwrap();

        let mut cli = cli_with(Some(f.path().to_path_buf()));
        cli.report_name = Some("audit".to_string());

        let config = load_config(&cli).unwrap();
        assert_eq!(config.report_name, "audit");
        assert_eq!(config.scan_root, PathBuf::from("/src/projects"));
    }

    #[test]
    fn test_missing_value_is_a_startup_failure() {
        let toml = r#"
[report]
output_dir = "/reports"
name = "inventory"
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", toml).unwrap();

        let err = load_config(&cli_with(Some(f.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, ScanError::ConfigurationMissing("scan root")));
    }

    #[test]
    fn test_unparseable_config_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "not = [valid").unwrap();

        let err = load_config(&cli_with(Some(f.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, ScanError::ConfigurationInvalid { .. }));
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let err = load_config(&cli_with(Some(PathBuf::from("/does/not/exist.toml")))).unwrap_err();
        assert!(matches!(err, ScanError::ConfigurationInvalid { .. }));
    }

    #[test]
    fn test_cli_alone_is_sufficient() {
        let mut cli = cli_with(None);
        cli.root = Some(PathBuf::from("/src"));
        cli.output_dir = Some(PathBuf::from("/out"));
        cli.report_name = Some("inventory".to_string());

        let config = load_config(&cli).unwrap();
        assert_eq!(config.scan_root, PathBuf::from("/src"));
    }
}
