//! Reads workspace configuration from disk.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CatalogSettings,
    ConfigError,
};

/// File name looked up at the workspace root.
pub(super) const CONFIG_FILE_NAME: &str = ".ts-catalog.json";

/// Looks for [`CONFIG_FILE_NAME`] at the workspace root.
///
/// # Returns
/// - `Ok(Some((path, settings)))`: file found and parsed
/// - `Ok(None)`: no configuration file present
/// - `Err(ConfigError)`: read or parse failure, carrying the file path
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<(PathBuf, CatalogSettings)>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)
        .map_err(|source| ConfigError::Io { path: config_path.clone(), source })?;
    let settings: CatalogSettings = serde_json::from_str(&content)
        .map_err(|source| ConfigError::Parse { path: config_path.clone(), source })?;

    Ok(Some((config_path, settings)))
}
