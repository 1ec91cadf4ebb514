use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.ts-catalog.json` at the workspace root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    /// Glob selecting the catalog files to process.
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,

    /// Languages every message must be translated into.
    ///
    /// - `None`: All detected languages are required (default)
    /// - `Some([...])`: Only specified languages are required
    pub required_languages: Option<Vec<String>>,

    pub checks: ChecksConfig,
}

/// Per-rule toggles for [`crate::lint::check_document`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecksConfig {
    pub duplicate_message: bool,
    pub placeholder_mismatch: bool,
    pub numerus_forms: bool,
    pub empty_translation: bool,
    pub missing_language: bool,
    pub unfinished: bool,
    pub obsolete: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            duplicate_message: true,
            placeholder_mismatch: true,
            numerus_forms: true,
            empty_translation: true,
            missing_language: true,
            unfinished: true,
            obsolete: true,
        }
    }
}

impl CatalogSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Empty language code in `requiredLanguages`
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"**/*.ts\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if let Some(languages) = &self.required_languages {
            for (index, language) in languages.iter().enumerate() {
                if language.is_empty() {
                    errors.push(ValidationError::new(
                        format!("requiredLanguages[{index}]"),
                        "Language code cannot be empty. Example: \"tr\" or \"mk_MK\"",
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            file_pattern: "**/*.ts".to_string(),
            exclude_patterns: vec!["target/**".to_string()],
            required_languages: None,
            checks: ChecksConfig::default(),
        }
    }
}
