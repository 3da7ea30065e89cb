//! DOCX text extraction: reads `word/document.xml` out of the OOXML zip
//! container and flattens its runs into one line per paragraph.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Matches text runs (capture 1) and the elements that break them up:
/// paragraph ends (including empty `<w:p/>` paragraphs), tabs, and
/// line/carriage breaks.
fn body_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|</w:p>|<w:p\b[^>]*/>|<w:tab\s*/>|<w:(?:br|cr)\b[^>]*/>")
            .expect("static regex is valid")
    })
}

fn xml_entity() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("static regex is valid")
    })
}

/// Extracts paragraph text from a DOCX document held in memory.
/// Blocking; call through `extract_document`.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Unreadable(format!("not a DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractionError::Unreadable(format!("DOCX is missing {DOCUMENT_PART}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Unreadable(format!("DOCX body is unreadable: {e}")))?;

    Ok(document_text(&xml))
}

fn document_text(xml: &str) -> String {
    let mut text = String::new();

    for token in body_token().captures_iter(xml) {
        match token.get(1) {
            Some(run) => text.push_str(&decode_entities(run.as_str())),
            None if token[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push('\n'),
        }
    }

    text
}

fn decode_entities(raw: &str) -> String {
    xml_entity()
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
        .into_owned()
}
