pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tm-wizard")]
#[command(about = "Render the installation wizard admin page")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "tm-wizard.toml")]
    pub config: String,

    /// Request query string, e.g. "page=tm-wizard&step=2&skin=default"
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Override the settings file from the config
    #[arg(long)]
    pub settings: Option<String>,

    /// Override the template directory from the config
    #[arg(long)]
    pub templates: Option<String>,

    /// List registered admin menu pages instead of rendering
    #[arg(long)]
    pub list_menu: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

