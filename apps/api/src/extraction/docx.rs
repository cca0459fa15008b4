//! DOCX text extraction: a DOCX file is a ZIP archive whose body lives in
//! `word/document.xml`. Text runs are `<w:t>` elements, paragraphs end at `</w:p>`.

use std::io::{Cursor, Read};

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::{DocumentFormat, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

static WORD_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab\s*/>|<w:br\s*/>|</w:p>")
        .expect("docx markup pattern is valid")
});

fn unreadable(reason: impl ToString) -> ExtractionError {
    ExtractionError::Unreadable {
        format: DocumentFormat::Docx,
        reason: reason.to_string(),
    }
}

/// Extracts paragraph text from DOCX bytes, one paragraph per line. Blocking.
pub fn extract_docx_text(bytes: &Bytes) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_ref())).map_err(unreadable)?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(unreadable)?
        .read_to_string(&mut xml)
        .map_err(unreadable)?;

    Ok(document_xml_to_text(&xml))
}

fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for caps in WORD_MARKUP.captures_iter(xml) {
        match caps.get(1) {
            Some(run) => text.push_str(&decode_entities(run.as_str())),
            None if caps[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push('\n'),
        }
    }
    text.trim_end_matches('\n').to_string()
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
