//! Text extraction: every page in order, concatenated into one string.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, info, warn};

use crate::PdfError;

/// Extract all text from the PDF at `path`.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    if !path.is_file() {
        return Err(PdfError::NotFound(path.to_path_buf()));
    }
    let doc = Document::load(path)?;
    let text = pages_text(&doc)?;
    info!(path = %path.display(), chars = text.len(), "extracted PDF text");
    Ok(text)
}

/// Extract all text from an in-memory PDF.
pub fn extract_text_from_mem(bytes: &[u8]) -> Result<String, PdfError> {
    let doc = Document::load_mem(bytes)?;
    pages_text(&doc)
}

fn pages_text(doc: &Document) -> Result<String, PdfError> {
    let mut text = String::new();
    for (&number, _) in doc.get_pages().iter() {
        match doc.extract_text(&[number]) {
            Ok(page) => {
                debug!(page = number, chars = page.len(), "page text");
                text.push_str(&page);
            }
            Err(e) => {
                warn!(page = number, error = %e, "skipping page without extractable text");
            }
        }
    }
    Ok(text)
}
