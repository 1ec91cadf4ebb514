//! Runtime lookup table built from one or more TS documents.
//!
//! This is the consumer side of the translation workflow: the same role
//! Qt's compiled catalogs play at application startup. Only finished
//! translations are installed; unfinished and obsolete entries fall through
//! to the source (English) text, exactly like Qt's runtime behaves when a
//! string was never translated.

use std::collections::HashMap;

use crate::plural::PluralRule;
use crate::ts::{
    MessageKey,
    TsDocument,
};

/// An installed translation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Single(String),
    Numerus(Vec<String>),
}

/// A `(context, source, comment)` keyed lookup table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Language of the installed documents, from the first one that has it.
    language: Option<String>,
    rule: Option<PluralRule>,
    entries: HashMap<MessageKey, Entry>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a single document.
    #[must_use]
    pub fn from_document(doc: &TsDocument) -> Self {
        let mut catalog = Self::new();
        catalog.install(doc);
        catalog
    }

    /// Installs every finished message of a document.
    ///
    /// Later installs win on key collisions, mirroring how loading a second
    /// catalog file overrides the first.
    pub fn install(&mut self, doc: &TsDocument) {
        if self.language.is_none()
            && let Some(language) = &doc.language
        {
            self.language = Some(language.clone());
            self.rule = PluralRule::for_language(language);
        }

        let mut installed = 0usize;
        for context in &doc.contexts {
            for message in &context.messages {
                let entry = if message.translation.numerus_forms.is_empty() {
                    message.finished_text().map(|text| Entry::Single(text.to_string()))
                } else if message.translation.status == crate::ts::TranslationStatus::Finished {
                    Some(Entry::Numerus(message.translation.numerus_forms.clone()))
                } else {
                    None
                };
                if let Some(entry) = entry {
                    installed += 1;
                    self.entries.insert(
                        MessageKey {
                            context: context.name.clone(),
                            source: message.source.clone(),
                            comment: message.comment.clone(),
                        },
                        entry,
                    );
                }
            }
        }
        tracing::debug!(language = ?doc.language, installed, "Installed catalog document");
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a translation, falling back to the source text.
    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.translate_with_comment(context, source, None)
    }

    /// Looks up a translation disambiguated by a comment.
    #[must_use]
    pub fn translate_with_comment<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> &'a str {
        match self.lookup(context, source, comment) {
            Some(Entry::Single(text)) => text,
            // A numerus message queried without a count gets its first form.
            Some(Entry::Numerus(forms)) => forms.first().map_or(source, String::as_str),
            None => source,
        }
    }

    /// Looks up a plural-sensitive translation and substitutes `%n`.
    ///
    /// The numerus form is selected by the catalog language's plural rule;
    /// without a known rule the count picks between the first two forms the
    /// way English would. Falls back to the source text with `%n` replaced.
    #[must_use]
    pub fn translate_n(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: u32,
    ) -> String {
        let text = match self.lookup(context, source, comment) {
            Some(Entry::Single(text)) => text.as_str(),
            Some(Entry::Numerus(forms)) => {
                let rule = self.rule.unwrap_or(PluralRule::English);
                let index = rule.select(n).min(forms.len().saturating_sub(1));
                forms.get(index).map_or(source, String::as_str)
            }
            None => source,
        };
        substitute_count(text, n)
    }

    fn lookup(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Entry> {
        let key = MessageKey {
            context: context.to_string(),
            source: source.to_string(),
            comment: comment.map(str::to_string),
        };
        if let Some(entry) = self.entries.get(&key) {
            return Some(entry);
        }
        // Qt falls back to the comment-less variant when the disambiguated
        // lookup misses.
        if comment.is_some() {
            return self.entries.get(&MessageKey { comment: None, ..key });
        }
        None
    }
}

/// Replaces `%n` (and localized `%Ln`) with the count. `%%` stays an
/// escaped percent and is left for the caller's argument substitution.
#[must_use]
fn substitute_count(text: &str, n: u32) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                out.push_str("%%");
                chars.next();
            }
            Some('n') => {
                out.push_str(&n.to_string());
                chars.next();
            }
            Some('L') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek() == Some(&'n') {
                    out.push_str(&n.to_string());
                    chars.next();
                    chars.next();
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
