//! Event-loop parser for the Qt Linguist TS schema.
//!
//! The reader walks quick-xml events and assembles a [`TsDocument`]. Only
//! the elements named by the schema are interpreted; anything else (e.g.
//! `<extracomment>`, `<lengthvariant>`, vendor extensions) is skipped with
//! its whole subtree so that files written by newer Linguist versions still
//! load. Text is never trimmed: leading and trailing whitespace inside
//! `<source>` and `<translation>` is significant.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};

use super::error::TsError;
use super::model::{
    Context,
    Location,
    Message,
    Translation,
    TranslationStatus,
    TsDocument,
};

/// Reads a TS document from a file.
pub fn read_ts_file(path: &Path) -> Result<TsDocument, TsError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| TsError::Read { path: path.to_path_buf(), source })?;
    read_ts_str(&text)
}

/// What the text currently being collected belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    ContextName,
    Source,
    Translation,
    NumerusForm,
    Comment,
}

/// Accumulates a `<context>` until its closing tag proves it had a name.
#[derive(Debug, Default)]
struct PendingContext {
    name: Option<String>,
    messages: Vec<Message>,
}

/// Parses a TS document from its XML text.
///
/// # Errors
/// Returns [`TsError`] on malformed XML or on recognized elements that
/// violate the TS structure (a `<message>` outside `<context>`, a nested
/// `<TS>`, a context without a name).
#[allow(clippy::too_many_lines, clippy::cast_possible_truncation)]
pub fn read_ts_str(text: &str) -> Result<TsDocument, TsError> {
    let mut reader = Reader::from_str(text);

    let mut doc = TsDocument::default();
    let mut seen_root = false;
    let mut open_root = false;
    let mut context: Option<PendingContext> = None;
    let mut message: Option<Message> = None;
    let mut forms: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut target = Target::None;
    let mut skip_depth = 0usize;

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| TsError::Xml { offset, source: e })?;
        match event {
            Event::Start(e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                    continue;
                }
                match e.local_name().as_ref() {
                    b"TS" => {
                        if seen_root {
                            return Err(unexpected(&e, offset));
                        }
                        seen_root = true;
                        open_root = true;
                        doc.version = attr_value(&e, b"version", offset)?;
                        doc.language = attr_value(&e, b"language", offset)?;
                        doc.source_language = attr_value(&e, b"sourcelanguage", offset)?;
                    }
                    b"context" => {
                        if !seen_root || context.is_some() || message.is_some() {
                            return Err(unexpected(&e, offset));
                        }
                        context = Some(PendingContext::default());
                    }
                    b"name" => {
                        if context.is_none() || message.is_some() {
                            return Err(unexpected(&e, offset));
                        }
                        target = Target::ContextName;
                        buf.clear();
                    }
                    b"message" => {
                        if context.is_none() || message.is_some() {
                            return Err(unexpected(&e, offset));
                        }
                        let numerus = attr_value(&e, b"numerus", offset)?
                            .is_some_and(|v| v == "yes");
                        message = Some(Message { numerus, offset, ..Message::default() });
                    }
                    b"location" => {
                        let Some(msg) = message.as_mut() else {
                            return Err(unexpected(&e, offset));
                        };
                        msg.locations.push(parse_location(&e, offset)?);
                    }
                    b"source" => {
                        if message.is_none() {
                            return Err(unexpected(&e, offset));
                        }
                        target = Target::Source;
                        buf.clear();
                    }
                    b"comment" => {
                        if message.is_none() {
                            return Err(unexpected(&e, offset));
                        }
                        target = Target::Comment;
                        buf.clear();
                    }
                    b"translation" => {
                        let Some(msg) = message.as_mut() else {
                            return Err(unexpected(&e, offset));
                        };
                        msg.translation.status = parse_status(&e, offset)?;
                        forms.clear();
                        target = Target::Translation;
                        buf.clear();
                    }
                    b"numerusform" => {
                        if target != Target::Translation {
                            return Err(unexpected(&e, offset));
                        }
                        target = Target::NumerusForm;
                        buf.clear();
                    }
                    other => {
                        tracing::debug!(
                            element = %String::from_utf8_lossy(other),
                            offset,
                            "Skipping unrecognized element"
                        );
                        skip_depth = 1;
                    }
                }
            }
            Event::Empty(e) => {
                if skip_depth > 0 {
                    continue;
                }
                match e.local_name().as_ref() {
                    b"TS" => {
                        if seen_root {
                            return Err(unexpected(&e, offset));
                        }
                        seen_root = true;
                        doc.version = attr_value(&e, b"version", offset)?;
                        doc.language = attr_value(&e, b"language", offset)?;
                        doc.source_language = attr_value(&e, b"sourcelanguage", offset)?;
                    }
                    b"location" => {
                        let Some(msg) = message.as_mut() else {
                            return Err(unexpected(&e, offset));
                        };
                        msg.locations.push(parse_location(&e, offset)?);
                    }
                    b"translation" => {
                        let Some(msg) = message.as_mut() else {
                            return Err(unexpected(&e, offset));
                        };
                        msg.translation.status = parse_status(&e, offset)?;
                    }
                    b"numerusform" => {
                        if target != Target::Translation {
                            return Err(unexpected(&e, offset));
                        }
                        forms.push(String::new());
                    }
                    b"message" => {
                        let Some(ctx) = context.as_mut() else {
                            return Err(unexpected(&e, offset));
                        };
                        ctx.messages.push(Message { offset, ..Message::default() });
                    }
                    b"context" => {
                        return Err(TsError::MissingContextName { offset });
                    }
                    // An empty <source/>, <comment/> or <name/> carries an
                    // empty string; unknown empties carry nothing.
                    b"source" => {}
                    b"comment" => {
                        if let Some(msg) = message.as_mut() {
                            msg.comment = Some(String::new());
                        }
                    }
                    b"name" => {
                        if let Some(ctx) = context.as_mut() {
                            ctx.name = Some(String::new());
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                match e.local_name().as_ref() {
                    b"name" => {
                        if let Some(ctx) = context.as_mut() {
                            ctx.name = Some(std::mem::take(&mut buf));
                        }
                        target = Target::None;
                    }
                    b"source" => {
                        if let Some(msg) = message.as_mut() {
                            msg.source = std::mem::take(&mut buf);
                        }
                        target = Target::None;
                    }
                    b"comment" => {
                        if let Some(msg) = message.as_mut() {
                            msg.comment = Some(std::mem::take(&mut buf));
                        }
                        target = Target::None;
                    }
                    b"numerusform" => {
                        forms.push(std::mem::take(&mut buf));
                        target = Target::Translation;
                    }
                    b"translation" => {
                        if let Some(msg) = message.as_mut() {
                            finish_translation(
                                &mut msg.translation,
                                msg.numerus,
                                &mut forms,
                                &mut buf,
                            );
                        }
                        target = Target::None;
                    }
                    b"message" => {
                        if let (Some(ctx), Some(msg)) = (context.as_mut(), message.take()) {
                            ctx.messages.push(msg);
                        }
                    }
                    b"context" => {
                        if let Some(pending) = context.take() {
                            let name = pending
                                .name
                                .ok_or(TsError::MissingContextName { offset })?;
                            doc.contexts.push(Context { name, messages: pending.messages });
                        }
                    }
                    b"TS" => {
                        open_root = false;
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if skip_depth > 0 {
                    continue;
                }
                let decoded =
                    t.unescape().map_err(|e| TsError::Xml { offset, source: e.into() })?;
                if target == Target::None {
                    if !decoded.trim().is_empty() {
                        return Err(TsError::UnexpectedText { offset });
                    }
                } else {
                    buf.push_str(&decoded);
                }
            }
            Event::CData(t) => {
                if skip_depth > 0 || target == Target::None {
                    continue;
                }
                buf.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Eof => {
                // quick-xml does not fault unclosed tags at end of input;
                // a truncated file must not parse as a smaller catalog.
                if open_root || context.is_some() || message.is_some() {
                    return Err(TsError::UnexpectedEof { offset });
                }
                break;
            }
        }
    }

    if seen_root { Ok(doc) } else { Err(TsError::MissingRoot) }
}

/// A numerus translation keeps its `<numerusform>` children and drops the
/// indentation whitespace between them; a plain one keeps its text as-is.
fn finish_translation(
    translation: &mut Translation,
    numerus: bool,
    forms: &mut Vec<String>,
    buf: &mut String,
) {
    let text = std::mem::take(buf);
    if forms.is_empty() {
        if !(numerus && text.trim().is_empty()) {
            translation.text = text;
        }
    } else {
        translation.numerus_forms = std::mem::take(forms);
    }
}

fn unexpected(e: &BytesStart<'_>, offset: usize) -> TsError {
    TsError::UnexpectedElement {
        element: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
        offset,
    }
}

fn attr_value(
    e: &BytesStart<'_>,
    name: &[u8],
    offset: usize,
) -> Result<Option<String>, TsError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|source| TsError::Attribute { offset, source })?;
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| TsError::Xml { offset, source: e.into() })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn parse_location(e: &BytesStart<'_>, offset: usize) -> Result<Location, TsError> {
    let filename = attr_value(e, b"filename", offset)?.unwrap_or_default();
    let line = attr_value(e, b"line", offset)?.and_then(|v| v.parse().ok());
    Ok(Location { filename, line })
}

fn parse_status(e: &BytesStart<'_>, offset: usize) -> Result<TranslationStatus, TsError> {
    Ok(match attr_value(e, b"type", offset)?.as_deref() {
        Some("unfinished") => TranslationStatus::Unfinished,
        Some("obsolete") => TranslationStatus::Obsolete,
        _ => TranslationStatus::Finished,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="1.1" language="mk_MK">
<context>
    <name>BaseGui</name>
    <message>
        <location filename="../basegui.cpp" line="1543"/>
        <source>&amp;Play</source>
        <translation>&amp;Пушти</translation>
    </message>
    <message>
        <location filename="../basegui.cpp" line="1601"/>
        <source>Volume: %1</source>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>Playlist</name>
    <message numerus="yes">
        <location filename="../playlist.cpp" line="310"/>
        <source>%n file(s)</source>
        <comment>status bar</comment>
        <translation>
            <numerusform>%n датотека</numerusform>
            <numerusform>%n датотеки</numerusform>
            <numerusform>%n датотеки</numerusform>
        </translation>
    </message>
</context>
</TS>
"#;

    #[googletest::test]
    fn test_parse_sample_document() {
        let doc = read_ts_str(SAMPLE).unwrap();

        expect_that!(doc.version, some(eq("1.1")));
        expect_that!(doc.language, some(eq("mk_MK")));
        expect_that!(doc.contexts, len(eq(2)));
        expect_that!(doc.contexts[0].name, eq("BaseGui"));
        expect_that!(doc.contexts[0].messages, len(eq(2)));
        expect_that!(doc.contexts[1].name, eq("Playlist"));
    }

    #[googletest::test]
    fn test_parse_entities_and_locations() {
        let doc = read_ts_str(SAMPLE).unwrap();
        let message = &doc.contexts[0].messages[0];

        expect_that!(message.source, eq("&Play"));
        expect_that!(message.translation.text, eq("&Пушти"));
        expect_that!(message.locations, len(eq(1)));
        expect_that!(message.locations[0].filename, eq("../basegui.cpp"));
        expect_that!(message.locations[0].line, some(eq(1543)));
        expect_that!(message.translation.status, eq(TranslationStatus::Finished));
    }

    #[googletest::test]
    fn test_parse_unfinished_status() {
        let doc = read_ts_str(SAMPLE).unwrap();
        let message = &doc.contexts[0].messages[1];

        expect_that!(message.translation.status, eq(TranslationStatus::Unfinished));
        expect_that!(message.translation.text, eq(""));
        expect_that!(message.finished_text(), none());
    }

    #[googletest::test]
    fn test_parse_numerus_message() {
        let doc = read_ts_str(SAMPLE).unwrap();
        let message = &doc.contexts[1].messages[0];

        expect_that!(message.numerus, eq(true));
        expect_that!(message.comment, some(eq("status bar")));
        expect_that!(
            message.translation.numerus_forms,
            elements_are![eq("%n датотека"), eq("%n датотеки"), eq("%n датотеки")]
        );
        expect_that!(message.translation.text, eq(""));
    }

    #[googletest::test]
    fn test_message_offsets_increase() {
        let doc = read_ts_str(SAMPLE).unwrap();

        let first = doc.contexts[0].messages[0].offset;
        let second = doc.contexts[0].messages[1].offset;
        expect_that!(first, lt(second));
        expect_that!(first, gt(0));
    }

    #[googletest::test]
    fn test_self_closing_unfinished_translation() {
        let doc = read_ts_str(
            r#"<TS version="2.1" language="tr">
<context><name>About</name>
<message><source>Version</source><translation type="unfinished"/></message>
</context>
</TS>"#,
        )
        .unwrap();

        let message = &doc.contexts[0].messages[0];
        expect_that!(message.translation.status, eq(TranslationStatus::Unfinished));
    }

    #[googletest::test]
    fn test_obsolete_translation() {
        let doc = read_ts_str(
            r#"<TS version="1.1">
<context><name>Old</name>
<message><source>Gone</source><translation type="obsolete">Besegone</translation></message>
</context>
</TS>"#,
        )
        .unwrap();

        let message = &doc.contexts[0].messages[0];
        expect_that!(message.translation.status, eq(TranslationStatus::Obsolete));
        expect_that!(message.translation.text, eq("Besegone"));
    }

    #[googletest::test]
    fn test_unknown_elements_are_skipped() {
        let doc = read_ts_str(
            r#"<TS version="2.1" language="tr">
<extra-something><deep><deeper>ignored</deeper></deep></extra-something>
<context><name>About</name>
<message>
    <extracomment>for translators</extracomment>
    <source>Version</source>
    <translation>Versiyon</translation>
</message>
</context>
</TS>"#,
        )
        .unwrap();

        expect_that!(doc.contexts, len(eq(1)));
        expect_that!(doc.contexts[0].messages[0].translation.text, eq("Versiyon"));
    }

    #[googletest::test]
    fn test_whitespace_in_text_is_preserved() {
        let doc = read_ts_str(
            "<TS version=\"2.1\"><context><name>C</name><message>\
             <source> seconds</source><translation> секунди</translation>\
             </message></context></TS>",
        )
        .unwrap();

        expect_that!(doc.contexts[0].messages[0].source, eq(" seconds"));
        expect_that!(doc.contexts[0].messages[0].translation.text, eq(" секунди"));
    }

    #[rstest]
    #[case::message_outside_context("<TS version=\"2.1\"><message/></TS>")]
    #[case::nested_ts("<TS version=\"2.1\"><TS version=\"2.1\"/></TS>")]
    #[case::numerusform_outside_translation(
        "<TS version=\"2.1\"><context><name>C</name><message><numerusform>x</numerusform></message></context></TS>"
    )]
    fn test_structural_errors(#[case] input: &str) {
        let result = read_ts_str(input);

        assert_that!(result, err(matches_pattern!(TsError::UnexpectedElement { .. })));
    }

    #[googletest::test]
    fn test_context_without_name_is_an_error() {
        let result = read_ts_str("<TS version=\"2.1\"><context></context></TS>");

        expect_that!(result, err(matches_pattern!(TsError::MissingContextName { .. })));
    }

    #[rstest]
    #[case::inside_message(
        "<TS version=\"2.1\" language=\"tr\"><context><name>BaseGui</name>\
         <message><source>Play</source><translation>Oynat</translation>"
    )]
    #[case::inside_context(
        "<TS version=\"2.1\" language=\"tr\"><context><name>BaseGui</name>\
         <message><source>Play</source><translation>Oynat</translation></message>"
    )]
    #[case::unclosed_root("<TS version=\"2.1\"><context><name>C</name></context>")]
    fn test_truncated_document_is_an_error(#[case] input: &str) {
        let result = read_ts_str(input);

        assert_that!(result, err(matches_pattern!(TsError::UnexpectedEof { .. })));
    }

    #[googletest::test]
    fn test_missing_root_is_an_error() {
        let result = read_ts_str("<?xml version=\"1.0\"?><!DOCTYPE TS>");

        expect_that!(result, err(matches_pattern!(TsError::MissingRoot)));
    }

    #[googletest::test]
    fn test_stray_text_is_an_error() {
        let result = read_ts_str("<TS version=\"2.1\">loose text</TS>");

        expect_that!(result, err(matches_pattern!(TsError::UnexpectedText { .. })));
    }

    #[googletest::test]
    fn test_malformed_xml_reports_offset() {
        let result = read_ts_str("<TS version=\"2.1\"><context></TS>");

        expect_that!(result, err(matches_pattern!(TsError::Xml { .. })));
    }
}
