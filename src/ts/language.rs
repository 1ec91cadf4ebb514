//! Heuristic language detection for catalog files.
//!
//! The `language` attribute on the `<TS>` root is authoritative, but plenty
//! of real catalogs in the wild omit it. Those almost always encode the
//! language in the file name instead (`smplayer_mk.ts`, `tr.ts`,
//! `locale/tr_TR/app.ts`), which is what this fallback recovers.

use std::path::Path;

use crate::plural::PluralRule;
use crate::ts::model::base_language;

/// Detect the target language from a file path.
///
/// Splits the path by `/`, `.`, `_` and `-`, then searches backwards for a
/// part whose base language has a known plural rule.
///
/// # Examples
/// - `smplayer_mk.ts` -> `mk`
/// - `translations/tr_TR/app.ts` -> `tr_TR`
/// - `notes.ts` -> `None`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let path_str = file_path.to_string_lossy();
    let parts: Vec<&str> = path_str.split(['/', '.']).collect();

    for part in parts.iter().rev() {
        if part.is_empty() || *part == "ts" {
            continue;
        }
        // Whole part first (may carry a region like tr_TR), then its
        // underscore-separated tail (smplayer_mk).
        if looks_like_language(part) {
            return Some((*part).to_string());
        }
        if let Some(tail) = part.rsplit(['_', '-']).next()
            && tail.len() < part.len()
            && looks_like_language(tail)
        {
            return Some(tail.to_string());
        }
    }

    None
}

/// A part looks like a language code when it is short enough to be one and
/// its base language has a plural rule we know.
fn looks_like_language(part: &str) -> bool {
    let base = base_language(part);
    (2..=3).contains(&base.len()) && PluralRule::for_language(&base).is_some()
}
