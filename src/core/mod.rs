pub mod dispatcher;
pub mod menu;
pub mod registry;
pub mod request;
pub mod settings;
pub mod templates;
pub mod wizard;

pub use crate::domain::model::{InstallType, MenuPage, Plugin, Skin, SkinSelection};
pub use crate::domain::ports::{MenuRegistrar, SettingsStore, Storage};
pub use crate::utils::error::Result;
