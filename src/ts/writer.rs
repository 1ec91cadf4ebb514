//! Canonical serialization of TS documents.
//!
//! The output follows what Qt Linguist itself writes: XML declaration,
//! `<!DOCTYPE TS>`, one element per line with four-space indentation, and
//! self-closing `<location/>` tags. Re-parsing the output yields a document
//! equal to the input, which is what round-tripping with Qt tooling needs.

use quick_xml::Writer;
use quick_xml::events::{
    BytesDecl,
    BytesEnd,
    BytesStart,
    BytesText,
    Event,
};

use super::error::TsError;
use super::model::{
    Message,
    TranslationStatus,
    TsDocument,
};

/// Serializes a document to TS XML.
#[allow(clippy::missing_errors_doc)]
pub fn write_ts_string(doc: &TsDocument) -> Result<String, TsError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(serialize_err)?;
    writer
        .write_event(Event::DocType(BytesText::new("TS")))
        .map_err(serialize_err)?;

    let mut root = BytesStart::new("TS");
    if let Some(version) = &doc.version {
        root.push_attribute(("version", version.as_str()));
    }
    if let Some(language) = &doc.language {
        root.push_attribute(("language", language.as_str()));
    }
    if let Some(source_language) = &doc.source_language {
        root.push_attribute(("sourcelanguage", source_language.as_str()));
    }
    writer.write_event(Event::Start(root)).map_err(serialize_err)?;

    for context in &doc.contexts {
        writer.write_event(Event::Start(BytesStart::new("context"))).map_err(serialize_err)?;
        write_text_element(&mut writer, "name", &context.name)?;
        for message in &context.messages {
            write_message(&mut writer, message)?;
        }
        writer.write_event(Event::End(BytesEnd::new("context"))).map_err(serialize_err)?;
    }

    writer.write_event(Event::End(BytesEnd::new("TS"))).map_err(serialize_err)?;

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| TsError::Serialize(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

fn write_message(writer: &mut Writer<Vec<u8>>, message: &Message) -> Result<(), TsError> {
    let mut start = BytesStart::new("message");
    if message.numerus {
        start.push_attribute(("numerus", "yes"));
    }
    writer.write_event(Event::Start(start)).map_err(serialize_err)?;

    for location in &message.locations {
        let mut loc = BytesStart::new("location");
        loc.push_attribute(("filename", location.filename.as_str()));
        if let Some(line) = location.line {
            loc.push_attribute(("line", line.to_string().as_str()));
        }
        writer.write_event(Event::Empty(loc)).map_err(serialize_err)?;
    }

    write_text_element(writer, "source", &message.source)?;
    if let Some(comment) = &message.comment {
        write_text_element(writer, "comment", comment)?;
    }

    let mut translation = BytesStart::new("translation");
    match message.translation.status {
        TranslationStatus::Finished => {}
        TranslationStatus::Unfinished => translation.push_attribute(("type", "unfinished")),
        TranslationStatus::Obsolete => translation.push_attribute(("type", "obsolete")),
    }
    writer.write_event(Event::Start(translation)).map_err(serialize_err)?;
    if message.translation.numerus_forms.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&message.translation.text)))
            .map_err(serialize_err)?;
    } else {
        for form in &message.translation.numerus_forms {
            write_text_element(writer, "numerusform", form)?;
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new("translation")))
        .map_err(serialize_err)?;

    writer.write_event(Event::End(BytesEnd::new("message"))).map_err(serialize_err)?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), TsError> {
    writer.write_event(Event::Start(BytesStart::new(name))).map_err(serialize_err)?;
    writer.write_event(Event::Text(BytesText::new(text))).map_err(serialize_err)?;
    writer.write_event(Event::End(BytesEnd::new(name))).map_err(serialize_err)?;
    Ok(())
}

fn serialize_err(e: impl std::fmt::Display) -> TsError {
    TsError::Serialize(e.to_string())
}
