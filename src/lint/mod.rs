//! Consistency checks for translation catalogs.

pub mod checks;
pub mod diagnostics;
pub mod placeholders;

pub use checks::check_document;
pub use diagnostics::{
    Diagnostic,
    Severity,
};
pub use placeholders::PlaceholderSet;
