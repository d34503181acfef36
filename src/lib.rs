pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::WizardConfig};
pub use core::{
    menu::AdminMenu,
    request::{RequestContext, WizardRequest},
    settings::JsonSettings,
    templates::TemplateSet,
    wizard::{load_wizard, WizardInterface},
};
pub use utils::error::{Result, WizardError};
