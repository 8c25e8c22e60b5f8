//! PDF text extraction.
//!
//! Primary: `lopdf`, page by page, so page order is explicit.
//! Fallback: `pdf-extract` over the whole document, only when the file loads
//! but lopdf decodes no text from any page (unusual font encodings).

use lopdf::Document;
use tracing::{debug, info, warn};

use super::{DocumentExtractor, ExtractedText, ExtractionError, UploadedDocument};

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<ExtractedText, ExtractionError> {
        extract_pdf_text(&document.bytes)
    }
}

/// Extracts the text of every page and joins it in page order.
///
/// A page that yields no text contributes an empty string. Bytes that do not
/// parse as a PDF, or a PDF without pages, are an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Load(e.to_string()))?;

    // get_pages() is a BTreeMap keyed by 1-based page number, so iteration is page order
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractionError::NoPages);
    }
    let page_count = pages.len();

    let mut text = String::new();
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(page_text.trim_end()),
            Err(e) => warn!("Page {page_number} has no extractable text: {e}"),
        }
    }

    if text.trim().is_empty() {
        debug!("lopdf found no text in {page_count} pages, trying pdf-extract");
        if let Some(fallback) = extract_with_pdf_extract(bytes) {
            text = fallback;
        }
    }

    info!(
        "Extracted {} chars from {} page(s)",
        text.chars().count(),
        page_count
    );

    Ok(ExtractedText { text, page_count })
}

/// Whole-document extraction via pdf-extract. Any failure, including a panic
/// inside the crate, yields `None`.
fn extract_with_pdf_extract(bytes: &[u8]) -> Option<String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) if !text.trim().is_empty() => Some(text.trim_end().to_string()),
        Ok(Ok(_)) => None,
        Ok(Err(e)) => {
            warn!("pdf-extract fallback failed: {e}");
            None
        }
        Err(_) => {
            warn!("pdf-extract fallback panicked");
            None
        }
    }
}

/// In-memory PDF builder shared by tests across the crate.
#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::{
        content::{Content, Operation},
        dictionary, Dictionary, Document, Object, Stream, StringFormat,
    };

    /// Builds a PDF with one page per entry; an empty entry gives a page with no text.
    pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids = Vec::new();
        for page_text in pages {
            let operations = if page_text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 700.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            page_text.as_bytes().to_vec(),
                            StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).expect("save pdf");
        buffer
    }
}
