//! Data model for Qt Linguist TS documents.
//!
//! A TS file is a flat set of `(context, source, comment) -> translation`
//! records grouped by context. Everything the reader sees is kept, including
//! workflow state and location metadata, so a document can be written back
//! without losing information.

use std::borrow::Cow;

/// A parsed TS document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsDocument {
    /// `version` attribute of the `<TS>` root (e.g. "1.1", "2.1").
    pub version: Option<String>,

    /// Target language attribute (e.g. "mk_MK", "tr").
    pub language: Option<String>,

    /// `sourcelanguage` attribute, rarely present in older files.
    pub source_language: Option<String>,

    pub contexts: Vec<Context>,
}

/// A group of messages originating from one UI component of the host
/// application (class or dialog name, e.g. `BaseGui`, `PrefGeneral`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

/// One translatable string unit and its translation status.
///
/// Equality covers the record's content only; the byte `offset` is
/// diagnostic metadata and ignored, so a document written out and re-read
/// compares equal to the original.
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Where the string originates in the host source tree. Traceability
    /// metadata only; never part of the lookup key.
    pub locations: Vec<Location>,

    /// The original (English) text, possibly with `%1`/`%n` placeholders
    /// and rich-text markup.
    pub source: String,

    /// Disambiguation hint for translators when the same source text
    /// recurs with different meanings in the same context.
    pub comment: Option<String>,

    pub translation: Translation,

    /// Marks a message as requiring plural-form variants.
    pub numerus: bool,

    /// Byte offset of the `<message>` tag in the file, for diagnostics.
    /// Not part of equality.
    pub offset: usize,
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.locations == other.locations
            && self.source == other.source
            && self.comment == other.comment
            && self.translation == other.translation
            && self.numerus == other.numerus
    }
}

impl Eq for Message {}

/// File/line reference into the host application's source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: String,
    pub line: Option<u32>,
}

/// Translation workflow state, as carried by the `type` attribute.
///
/// These are status markers maintained by the translation tooling, not
/// fault conditions: `Unfinished` text may still be empty, `Obsolete`
/// entries no longer match any string in the host sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationStatus {
    #[default]
    Finished,
    Unfinished,
    Obsolete,
}

/// A translation, singular or plural.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    pub status: TranslationStatus,

    /// Translated text for a plain message. Empty when untranslated.
    pub text: String,

    /// Plural variants for a `numerus="yes"` message, in rule order.
    pub numerus_forms: Vec<String>,
}

/// The identity of a message within a catalog: the host tool's lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
}

impl Message {
    /// The `(source, comment)` pair that must be unique within a context.
    #[must_use]
    pub fn id(&self) -> (&str, Option<&str>) {
        (&self.source, self.comment.as_deref())
    }

    /// Returns the finished translation text, if there is one to install.
    ///
    /// Unfinished and obsolete entries fall through to the source text at
    /// lookup time, as Qt's runtime does.
    #[must_use]
    pub fn finished_text(&self) -> Option<&str> {
        if self.translation.status == TranslationStatus::Finished
            && !self.translation.text.is_empty()
        {
            Some(&self.translation.text)
        } else {
            None
        }
    }
}

impl TsDocument {
    /// Language code of the document with the region part stripped,
    /// normalized to lowercase (`mk_MK` -> `mk`).
    #[must_use]
    pub fn language_code(&self) -> Option<Cow<'_, str>> {
        self.language.as_deref().map(base_language)
    }
}

/// Strips region/script subtags and lowercases: `mk_MK` and `pt-BR` become
/// `mk` and `pt`.
#[must_use]
pub fn base_language(code: &str) -> Cow<'_, str> {
    let base = code.split(['_', '-']).next().unwrap_or(code);
    if base.chars().all(|c| c.is_ascii_lowercase()) {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(base.to_ascii_lowercase())
    }
}
