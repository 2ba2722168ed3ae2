#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::BridgeSettings;

#[cfg(feature = "cli")]
use crate::utils::logger::parse_level;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mvn-ivy-bridge")]
#[command(
    about = "Place a locally-installed artifact in a local Ivy repository, taking metadata from Maven"
)]
pub struct CliConfig {
    /// Maven groupId of the artifact
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Maven artifactId of the artifact
    #[arg(value_name = "ARTIFACT")]
    pub artifact: String,

    /// Root of the destination Ivy repository
    #[arg(value_name = "REPO")]
    pub repo_dir: PathBuf,

    /// Version to publish, overriding the POM
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Extra info attribute for the generated descriptor (repeatable)
    #[arg(long = "meta", value_name = "K=V")]
    pub meta: Vec<String>,

    /// Local jar to link instead of asking the classpath resolver
    #[arg(long = "jarfile", value_name = "JAR")]
    pub jar_file: Option<PathBuf>,

    /// POM to read instead of asking the descriptor resolver
    #[arg(long = "pomfile", value_name = "POM")]
    pub pom_file: Option<PathBuf>,

    /// Publication status (defaults to the settings file, then "release")
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long = "log", value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: tracing::Level,

    /// Print the planned entry and descriptor without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
