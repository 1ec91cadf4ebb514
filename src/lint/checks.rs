//! Data-integrity checks over a parsed TS document.
//!
//! These verify what the format itself cannot: uniqueness of the
//! `(source, comment)` key within a context, placeholder agreement between
//! source and translation, and numerus form counts against the document
//! language's plural rule. Workflow states are reported as hints so a
//! catalog's progress shows up in the same stream.

use std::collections::HashMap;

use crate::config::ChecksConfig;
use crate::lint::diagnostics::{
    Diagnostic,
    Severity,
};
use crate::lint::placeholders;
use crate::plural::PluralRule;
use crate::ts::{
    Context,
    Message,
    TranslationStatus,
    TsDocument,
};
use crate::types::LineIndex;

/// Runs every enabled check against one document.
///
/// `index` must be built from the same text the document was parsed from,
/// so that message byte offsets resolve to the right lines.
#[must_use]
pub fn check_document(
    doc: &TsDocument,
    index: &LineIndex,
    config: &ChecksConfig,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let rule = doc.language.as_deref().and_then(PluralRule::for_language);

    if config.missing_language && rule.is_none() {
        let message = match &doc.language {
            Some(language) => format!("unrecognized language attribute \"{language}\""),
            None => "missing language attribute on <TS> root".to_string(),
        };
        diagnostics.push(Diagnostic::new(Severity::Warning, "missing-language", message));
    }

    for context in &doc.contexts {
        check_context(context, rule, index, config, &mut diagnostics);
    }

    diagnostics
}

fn check_context(
    context: &Context,
    rule: Option<PluralRule>,
    index: &LineIndex,
    config: &ChecksConfig,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut seen: HashMap<(&str, Option<&str>), &Message> = HashMap::new();

    for message in &context.messages {
        if config.duplicate_message
            && let Some(first) = seen.insert(message.id(), message)
        {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Error,
                    "duplicate-message",
                    format!(
                        "duplicate message \"{}\" in context \"{}\" (first at line {})",
                        message.source,
                        context.name,
                        index.position(first.offset).line + 1,
                    ),
                )
                .at(index.position(message.offset)),
            );
        }

        check_message(message, context, rule, index, config, diagnostics);
    }
}

fn check_message(
    message: &Message,
    context: &Context,
    rule: Option<PluralRule>,
    index: &LineIndex,
    config: &ChecksConfig,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let position = index.position(message.offset);
    let push = |diagnostics: &mut Vec<Diagnostic>, severity, rule_name, text: String| {
        diagnostics.push(Diagnostic::new(severity, rule_name, text).at(position));
    };

    match message.translation.status {
        TranslationStatus::Unfinished => {
            if config.unfinished {
                push(
                    diagnostics,
                    Severity::Hint,
                    "unfinished",
                    format!("\"{}\" in context \"{}\" is unfinished", message.source, context.name),
                );
            }
            return;
        }
        TranslationStatus::Obsolete => {
            if config.obsolete {
                push(
                    diagnostics,
                    Severity::Hint,
                    "obsolete",
                    format!("\"{}\" in context \"{}\" is obsolete", message.source, context.name),
                );
            }
            return;
        }
        TranslationStatus::Finished => {}
    }

    let forms = &message.translation.numerus_forms;

    if config.numerus_forms {
        if !message.numerus && !forms.is_empty() {
            push(
                diagnostics,
                Severity::Warning,
                "numerus-forms",
                format!(
                    "\"{}\" carries numerus forms but is not marked numerus=\"yes\"",
                    message.source
                ),
            );
        }
        if message.numerus
            && !forms.is_empty()
            && let Some(rule) = rule
            && forms.len() != rule.form_count()
        {
            push(
                diagnostics,
                Severity::Warning,
                "numerus-forms",
                format!(
                    "\"{}\" has {} numerus form(s), language expects {}",
                    message.source,
                    forms.len(),
                    rule.form_count(),
                ),
            );
        }
    }

    if config.empty_translation
        && message.translation.text.is_empty()
        && forms.iter().all(String::is_empty)
    {
        push(
            diagnostics,
            Severity::Warning,
            "empty-translation",
            format!(
                "\"{}\" in context \"{}\" is marked finished but has no translation",
                message.source, context.name
            ),
        );
        return;
    }

    if config.placeholder_mismatch {
        check_placeholders(message, index, diagnostics);
    }
}

fn check_placeholders(message: &Message, index: &LineIndex, diagnostics: &mut Vec<Diagnostic>) {
    let position = index.position(message.offset);
    let source_set = placeholders::extract(&message.source);
    let forms = &message.translation.numerus_forms;

    let mut report = |detail: String| {
        diagnostics.push(
            Diagnostic::new(
                Severity::Warning,
                "placeholder-mismatch",
                format!("\"{}\": {detail}", message.source),
            )
            .at(position),
        );
    };

    if forms.is_empty() {
        if message.translation.text.is_empty() {
            return;
        }
        let translated = placeholders::extract(&message.translation.text);
        for marker in placeholders::missing_from(&source_set, &translated) {
            report(format!("translation drops placeholder %{marker}"));
        }
        for marker in placeholders::extra_in(&source_set, &translated) {
            report(format!("translation has dangling placeholder %{marker}"));
        }
        return;
    }

    // Numerus forms: numbered markers are checked per form; a single form
    // may legitimately spell out the count ("one file"), so a missing %n is
    // only reported when no form carries it.
    let mut any_count = false;
    for (i, form) in forms.iter().enumerate() {
        if form.is_empty() {
            continue;
        }
        let translated = placeholders::extract(form);
        any_count |= translated.has_count;
        for marker in placeholders::missing_from(&source_set, &translated) {
            report(format!("numerus form {} drops placeholder %{marker}", i + 1));
        }
        for marker in placeholders::extra_in(&source_set, &translated) {
            report(format!("numerus form {} has dangling placeholder %{marker}", i + 1));
        }
    }
    if source_set.has_count && !any_count && forms.iter().any(|f| !f.is_empty()) {
        report("no numerus form carries %n".to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::ts::read_ts_str;

    fn check(text: &str) -> Vec<Diagnostic> {
        let doc = read_ts_str(text).unwrap();
        check_document(&doc, &LineIndex::new(text), &ChecksConfig::default())
    }

    fn rules(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
        diagnostics.iter().map(|d| d.rule).collect()
    }

    #[googletest::test]
    fn test_clean_document_has_no_findings() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>Volume: %1</source>
        <translation>Ses: %1</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(diagnostics, is_empty());
    }

    #[googletest::test]
    fn test_duplicate_message_is_an_error() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>Play</source>
        <translation>Oynat</translation>
    </message>
    <message>
        <source>Play</source>
        <translation>Çal</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["duplicate-message"]));
        expect_that!(diagnostics[0].severity, eq(Severity::Error));
        expect_that!(diagnostics[0].message, contains_substring("BaseGui"));
        // Points at the second occurrence, names the first.
        expect_that!(diagnostics[0].message, contains_substring("first at line"));
    }

    #[googletest::test]
    fn test_same_source_different_comment_is_fine() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>Clear</source>
        <comment>playlist</comment>
        <translation>Temizle</translation>
    </message>
    <message>
        <source>Clear</source>
        <comment>history</comment>
        <translation>Temizle</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(diagnostics, is_empty());
    }

    #[googletest::test]
    fn test_placeholder_mismatch_both_directions() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>%1 of %2</source>
        <translation>%1 / %3</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["placeholder-mismatch", "placeholder-mismatch"]));
        expect_that!(diagnostics[0].message, contains_substring("drops placeholder %2"));
        expect_that!(diagnostics[1].message, contains_substring("dangling placeholder %3"));
    }

    #[googletest::test]
    fn test_unfinished_translation_skips_placeholder_check() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>Volume: %1</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["unfinished"]));
        expect_that!(diagnostics[0].severity, eq(Severity::Hint));
    }

    #[googletest::test]
    fn test_obsolete_translation_is_a_hint() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>Old</name>
    <message>
        <source>Gone</source>
        <translation type="obsolete">Gitti</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["obsolete"]));
    }

    #[googletest::test]
    fn test_empty_finished_translation() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>Play</source>
        <translation></translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["empty-translation"]));
    }

    #[googletest::test]
    fn test_numerus_form_count_against_language_rule() {
        // Macedonian expects three forms; only two provided.
        let diagnostics = check(
            r#"<TS version="1.1" language="mk_MK">
<context>
    <name>Playlist</name>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n датотека</numerusform>
            <numerusform>%n датотеки</numerusform>
        </translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["numerus-forms"]));
        expect_that!(diagnostics[0].message, contains_substring("has 2 numerus form(s)"));
        expect_that!(diagnostics[0].message, contains_substring("expects 3"));
    }

    #[googletest::test]
    fn test_numerus_form_may_spell_out_singular() {
        // The singular form has no %n, but another form does: fine.
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>Playlist</name>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n dosya</numerusform>
        </translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(diagnostics, is_empty());
    }

    #[googletest::test]
    fn test_no_form_carries_count_marker() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>Playlist</name>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>dosyalar</numerusform>
        </translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["placeholder-mismatch"]));
        expect_that!(diagnostics[0].message, contains_substring("no numerus form carries %n"));
    }

    #[googletest::test]
    fn test_plain_message_with_numerus_forms() {
        let diagnostics = check(
            r#"<TS version="1.1" language="tr">
<context>
    <name>Playlist</name>
    <message>
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n dosya</numerusform>
        </translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["numerus-forms"]));
        expect_that!(
            diagnostics[0].message,
            contains_substring("not marked numerus=\"yes\"")
        );
    }

    #[googletest::test]
    fn test_unrecognized_language_attribute() {
        let diagnostics = check(
            r#"<TS version="1.1" language="xx">
<context>
    <name>BaseGui</name>
    <message>
        <source>Play</source>
        <translation>Ohranju</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["missing-language"]));
        expect_that!(
            diagnostics[0].message,
            contains_substring("unrecognized language attribute \"xx\"")
        );
    }

    #[googletest::test]
    fn test_missing_language_attribute() {
        let diagnostics = check(
            r#"<TS version="1.1">
<context>
    <name>BaseGui</name>
    <message>
        <source>Play</source>
        <translation>Пушти</translation>
    </message>
</context>
</TS>"#,
        );

        expect_that!(rules(&diagnostics), eq(&vec!["missing-language"]));
    }

    #[googletest::test]
    fn test_checks_can_be_disabled() {
        let text = r#"<TS version="1.1">
<context>
    <name>BaseGui</name>
    <message>
        <source>Play</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>"#;
        let doc = read_ts_str(text).unwrap();
        let config = ChecksConfig {
            missing_language: false,
            unfinished: false,
            ..ChecksConfig::default()
        };

        let diagnostics = check_document(&doc, &LineIndex::new(text), &config);

        expect_that!(diagnostics, is_empty());
    }

    #[googletest::test]
    fn test_diagnostic_points_at_message_line() {
        let text = r#"<TS version="1.1" language="tr">
<context>
    <name>BaseGui</name>
    <message>
        <source>Play</source>
        <translation></translation>
    </message>
</context>
</TS>"#;
        let doc = read_ts_str(text).unwrap();

        let diagnostics = check_document(&doc, &LineIndex::new(text), &ChecksConfig::default());

        let position = diagnostics[0].position.unwrap();
        // The <message> element opens on line 4 (first line is line 1).
        expect_that!(position.line + 1, eq(4));
    }
}
