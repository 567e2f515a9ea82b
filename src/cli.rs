use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "version-checkr",
    about = "Scan dependency manifests across a directory tree and report version divergence",
    version
)]
pub struct Cli {
    /// Directory where the manifest scan starts
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory where the report file is written
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base name of the report file (date stamp and .csv extension are appended)
    #[arg(long, value_name = "NAME")]
    pub report_name: Option<String>,

    /// Config file [default: ./.version-checkr/config.toml, fallback ~/.config/version-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report rows as JSON on stdout instead of the terminal summary
    #[arg(long)]
    pub json: bool,

    /// Show every divergent declaration, not just the per-package summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}
