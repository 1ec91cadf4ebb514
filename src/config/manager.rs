//! Owns the resolved settings for a workspace.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CatalogSettings,
    ConfigError,
    loader,
};

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: CatalogSettings,
    workspace_root: Option<PathBuf>,
    /// Set when the settings came from a file rather than the defaults.
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates settings for a workspace.
    ///
    /// Falls back to defaults when `workspace_root` is `None` or has no
    /// configuration file.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let loaded = match &workspace_root {
            Some(root) => loader::load_from_workspace(root)?,
            None => None,
        };
        let (config_path, settings) = match loaded {
            Some((path, settings)) => {
                tracing::debug!("Loaded workspace settings from {:?}: {:?}", path, settings);
                (Some(path), settings)
            }
            None => (None, CatalogSettings::default()),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        self.config_path = config_path;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &CatalogSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// The file the current settings were read from, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
