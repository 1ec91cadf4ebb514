//! Qt placeholder token extraction.
//!
//! Source strings carry `%1`..`%99` argument markers, `%n` (or `%Ln`) count
//! markers, and `%%` as an escaped percent. A translation that drops or
//! invents a numbered marker will garble `QString::arg` substitution at
//! runtime, which is the main thing worth checking in a catalog.

use std::collections::BTreeSet;

/// The placeholder tokens found in one string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceholderSet {
    /// Numbered argument markers, e.g. {1, 2} for "%1 of %2".
    pub numbered: BTreeSet<u8>,
    /// Whether `%n` / `%Ln` occurs.
    pub has_count: bool,
}

impl PlaceholderSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbered.is_empty() && !self.has_count
    }
}

/// Extracts all placeholder tokens from a string.
#[must_use]
pub fn extract(text: &str) -> PlaceholderSet {
    let mut set = PlaceholderSet::default();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let rest = &bytes[i + 1..];
        match rest.first() {
            Some(b'%') => i += 2,
            Some(b'n') => {
                set.has_count = true;
                i += 2;
            }
            Some(b'L') if rest.get(1) == Some(&b'n') => {
                set.has_count = true;
                i += 3;
            }
            Some(d) if d.is_ascii_digit() => {
                let mut value = d - b'0';
                let mut consumed = 1;
                if let Some(d2) = rest.get(1)
                    && d2.is_ascii_digit()
                {
                    value = value * 10 + (d2 - b'0');
                    consumed = 2;
                }
                if value >= 1 {
                    set.numbered.insert(value);
                }
                i += 1 + consumed;
            }
            _ => i += 1,
        }
    }
    set
}

/// Numbered markers present in `source` but not in `translation`.
#[must_use]
pub fn missing_from(source: &PlaceholderSet, translation: &PlaceholderSet) -> Vec<u8> {
    source.numbered.difference(&translation.numbered).copied().collect()
}

/// Numbered markers the translation invented.
#[must_use]
pub fn extra_in(source: &PlaceholderSet, translation: &PlaceholderSet) -> Vec<u8> {
    translation.numbered.difference(&source.numbered).copied().collect()
}
