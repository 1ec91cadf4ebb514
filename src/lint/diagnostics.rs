//! Diagnostic types emitted by the catalog checks.

use std::fmt;

use serde::Serialize;

use crate::types::SourcePosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Error,
    Warning,
    /// Workflow-state markers (`unfinished`, `obsolete`) are surfaced as
    /// hints: they describe translation progress, not faults.
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

/// One finding of one check against one message (or a whole file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable rule name, e.g. `placeholder-mismatch`.
    pub rule: &'static str,
    /// Catalog file the finding belongs to, filled in by the workspace run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, rule: &'static str, message: impl Into<String>) -> Self {
        Self { severity, rule, file: None, position: None, message: message.into() }
    }

    #[must_use]
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    /// `file:line: severity [rule] message`, with 1-indexed lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:")?;
            if let Some(position) = self.position {
                write!(f, "{}:", position.line + 1)?;
            }
            write!(f, " ")?;
        } else if let Some(position) = self.position {
            write!(f, "line {}: ", position.line + 1)?;
        }
        write!(f, "{} [{}] {}", self.severity, self.rule, self.message)
    }
}
