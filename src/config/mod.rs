//! Workspace configuration (`.ts-catalog.json`).
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    CatalogSettings,
    ChecksConfig,
    ConfigError,
    ValidationError,
};
