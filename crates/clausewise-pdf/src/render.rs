//! Minimal flowing-text PDF writer on top of lopdf.
//!
//! Lays out titles, headings and wrapped paragraphs on US Letter pages using
//! the base-14 Helvetica fonts (no embedding needed). Every output line is its
//! own `BT … ET` text object so extracted text keeps one line per row.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use tracing::debug;

use crate::PdfError;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
/// Average Helvetica advance as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.52;

/// A unit of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    Paragraph(String),
    /// Vertical gap in points.
    Spacer(i64),
    PageBreak,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    font: Font,
    size: i64,
    x: i64,
    y: i64,
    text: String,
}

/// Collects blocks and renders them to a PDF file.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Render to an in-memory lopdf document.
    pub fn build(&self) -> Result<Document, PdfError> {
        let pages = layout(&self.blocks);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for lines in &pages {
            let page_id = add_page(&mut doc, pages_id, resources_id, lines)?;
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        debug!(pages = pages.len(), blocks = self.blocks.len(), "rendered document");
        Ok(doc)
    }

    /// Render and write to `path`.
    pub fn save(&self, path: &Path) -> Result<(), PdfError> {
        let mut doc = self.build()?;
        let mut file = std::fs::File::create(path).map_err(|e| PdfError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        doc.save_to(&mut file).map_err(|e| PdfError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    lines: &[Line],
) -> Result<ObjectId, PdfError> {
    let mut operations = Vec::with_capacity(lines.len() * 4);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.font.resource().into(), line.size.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    }))
}

/// ASCII passes through; anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

fn style(block: &Block) -> (Font, i64, i64) {
    // (font, size, leading)
    match block {
        Block::Title(_) => (Font::Bold, 18, 24),
        Block::Heading(_) => (Font::Bold, 14, 20),
        Block::Subheading(_) => (Font::Bold, 12, 16),
        _ => (Font::Regular, 10, 14),
    }
}

/// Flow blocks onto pages, top to bottom.
fn layout(blocks: &[Block]) -> Vec<Vec<Line>> {
    let usable = PAGE_WIDTH - 2 * MARGIN;
    let mut pages: Vec<Vec<Line>> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;

    for block in blocks {
        let text = match block {
            Block::Spacer(points) => {
                y -= points;
                continue;
            }
            Block::PageBreak => {
                pages.push(Vec::new());
                y = PAGE_HEIGHT - MARGIN;
                continue;
            }
            Block::Title(t) | Block::Heading(t) | Block::Subheading(t) | Block::Paragraph(t) => t,
        };

        let (font, size, leading) = style(block);
        let max_chars = ((usable as f32) / (size as f32 * AVG_CHAR_WIDTH)).floor() as usize;
        for chunk in wrap(text, max_chars) {
            if y - leading < MARGIN {
                pages.push(Vec::new());
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= leading;
            let x = match block {
                Block::Title(_) => {
                    let width = (chunk.len() as f32 * size as f32 * AVG_CHAR_WIDTH) as i64;
                    ((PAGE_WIDTH - width) / 2).max(MARGIN)
                }
                _ => MARGIN,
            };
            if let Some(page) = pages.last_mut() {
                page.push(Line {
                    font,
                    size,
                    x,
                    y,
                    text: chunk,
                });
            }
        }
    }
    pages
}

/// Greedy word wrap. Words longer than the line are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(i, _)| i);
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let text = "The Receiving Party shall maintain the confidentiality of all disclosed proprietary information.";
        let lines = wrap(text, 30);
        assert!(lines.len() > 1);
        for l in &lines {
            assert!(l.chars().count() <= 30, "{l:?}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_long_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_empty() {
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn page_break_starts_new_page() {
        let pages = layout(&[
            Block::Title("MSA - Acme".into()),
            Block::PageBreak,
            Block::Heading("Signatures".into()),
        ]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0][0].font, Font::Bold);
        assert_eq!(pages[1][0].text, "Signatures");
    }

    #[test]
    fn long_content_overflows_onto_new_pages() {
        let blocks: Vec<Block> = (0..80)
            .map(|i| Block::Paragraph(format!("Paragraph number {i}")))
            .collect();
        let pages = layout(&blocks);
        assert!(pages.len() > 1);
        for page in &pages {
            for line in page {
                assert!(line.y >= MARGIN, "{line:?}");
            }
        }
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(win_ansi("Consultant\u{2019}s"), b"Consultant?s".to_vec());
    }
}
