//! Scans a directory tree for catalog files and reports on them.

use std::collections::BTreeSet;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use serde::Serialize;
use thiserror::Error;

use crate::config::CatalogSettings;
use crate::lint::{
    self,
    Diagnostic,
    Severity,
};
use crate::ts::{
    self,
    TranslationStatus,
    TsDocument,
};
use crate::types::LineIndex;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("workspace path {} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSet(#[from] globset::Error),
}

/// Per-message completion counters for one file or a whole workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
}

impl MessageStats {
    pub fn record(&mut self, doc: &TsDocument) {
        for context in &doc.contexts {
            for message in &context.messages {
                self.total += 1;
                match message.translation.status {
                    TranslationStatus::Finished => self.finished += 1,
                    TranslationStatus::Unfinished => self.unfinished += 1,
                    TranslationStatus::Obsolete => self.obsolete += 1,
                }
            }
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.total += other.total;
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.obsolete += other.obsolete;
    }

    /// Percentage of finished messages. Obsolete entries no longer ship, so
    /// they are left out of the denominator.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion(&self) -> f64 {
        let active = self.total - self.obsolete;
        if active == 0 {
            100.0
        } else {
            self.finished as f64 / active as f64 * 100.0
        }
    }
}

/// Everything learned about one catalog file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Option<String>,
    pub stats: MessageStats,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceReport {
    pub files: Vec<FileReport>,
    pub stats: MessageStats,
    /// Required languages with no catalog file in the workspace.
    pub missing_languages: Vec<String>,
}

impl WorkspaceReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.files
            .iter()
            .flat_map(|f| &f.diagnostics)
            .any(|d| d.severity == Severity::Error)
            || !self.missing_languages.is_empty()
    }
}

/// Finds every catalog file under `workspace_path` matching the configured
/// patterns. Paths come back sorted, relative matching is done against the
/// workspace root.
///
/// # Errors
/// - The workspace path does not exist
/// - Invalid glob pattern in the settings
pub fn find_catalog_files(
    workspace_path: &Path,
    settings: &CatalogSettings,
) -> Result<Vec<PathBuf>, WorkspaceError> {
    if !workspace_path.exists() {
        return Err(WorkspaceError::NotFound { path: workspace_path.to_path_buf() });
    }

    let include_set = build_glob_set(std::slice::from_ref(&settings.file_pattern))?;
    let exclude_set = build_glob_set(&settings.exclude_patterns)?;

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(workspace_path)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(workspace_path) else {
            continue;
        };
        if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    Ok(found_files)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, WorkspaceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|source| WorkspaceError::Pattern { pattern: pattern.clone(), source })?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Parses and checks every catalog file in the workspace.
///
/// A file path scans just that file, skipping pattern matching. Unreadable
/// or unparsable files become error diagnostics in their file's report
/// rather than aborting the scan.
///
/// # Errors
/// - The workspace path does not exist
/// - Invalid glob pattern in the settings
pub fn scan_workspace(
    workspace_path: &Path,
    settings: &CatalogSettings,
) -> Result<WorkspaceReport, WorkspaceError> {
    let files = if workspace_path.is_file() {
        vec![workspace_path.to_path_buf()]
    } else {
        find_catalog_files(workspace_path, settings)?
    };
    tracing::debug!(count = files.len(), "Scanning catalog files");

    let mut report = WorkspaceReport::default();
    let mut seen_languages: BTreeSet<String> = BTreeSet::new();

    for path in files {
        let file_report = report_file(&path, settings);
        if let Some(language) = &file_report.language {
            seen_languages.insert(ts::base_language(language).into_owned());
        }
        report.stats.merge(file_report.stats);
        report.files.push(file_report);
    }

    if let Some(required) = &settings.required_languages {
        for language in required {
            if !seen_languages.contains(ts::base_language(language).as_ref()) {
                report.missing_languages.push(language.clone());
            }
        }
    }

    Ok(report)
}

fn report_file(path: &Path, settings: &CatalogSettings) -> FileReport {
    let file_name = path.display().to_string();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("Failed to read file {:?}: {}", path, err);
            return FileReport {
                path: path.to_path_buf(),
                language: None,
                stats: MessageStats::default(),
                diagnostics: vec![
                    Diagnostic::new(Severity::Error, "read-error", err.to_string())
                        .in_file(file_name),
                ],
            };
        }
    };

    let doc = match ts::read_ts_str(&text) {
        Ok(doc) => doc,
        Err(err) => {
            return FileReport {
                path: path.to_path_buf(),
                language: ts::detect_language_from_path(path),
                stats: MessageStats::default(),
                diagnostics: vec![
                    Diagnostic::new(Severity::Error, "parse-error", err.to_string())
                        .in_file(file_name),
                ],
            };
        }
    };

    let index = LineIndex::new(&text);
    let diagnostics = lint::check_document(&doc, &index, &settings.checks)
        .into_iter()
        .map(|d| d.in_file(file_name.clone()))
        .collect();

    let mut stats = MessageStats::default();
    stats.record(&doc);

    let language = doc.language.clone().or_else(|| ts::detect_language_from_path(path));

    FileReport { path: path.to_path_buf(), language, stats, diagnostics }
}
