//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "metascoop", version)]
#[command(about = "Mirror upstream APK releases into an F-Droid repository", long_about = None)]
pub(crate) struct Cli {
    /// List of tracked apps
    #[arg(short, long, default_value = "apps.yaml")]
    pub apps: PathBuf,

    /// F-Droid repo directory holding artifacts and the index
    #[arg(short, long, default_value = "fdroid/repo")]
    pub repo_dir: PathBuf,

    /// GitHub access token (falls back to $METASCOOP_GITHUB_TOKEN, $GITHUB_TOKEN, then settings)
    #[arg(long)]
    pub token: Option<String>,

    /// Don't run the catalog tool
    #[arg(long)]
    pub debug: bool,

    /// README to write the app listing into (default: <repo-dir>/../../README.md)
    #[arg(long)]
    pub readme: Option<PathBuf>,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,
}
