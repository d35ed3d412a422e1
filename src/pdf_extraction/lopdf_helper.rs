// lopdf helper - Pure Rust PDF loading and per-page text
use lopdf::{Document, Object, ObjectId};
use std::collections::{btree_map, BTreeMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// A parsed PDF plus the path it came from.
pub struct PdfDocument {
    path: PathBuf,
    inner: Document,
}

impl PdfDocument {
    /// Read and parse a PDF. IO failures and parse failures are kept apart.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let bytes = fs::read(path).map_err(|e| ExtractError::fs(path, "read", e))?;
        Self::from_bytes(path, &bytes)
    }

    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, ExtractError> {
        let inner = Document::load_mem(bytes).map_err(|e| ExtractError::parse(path, e))?;
        Ok(Self { path: path.to_path_buf(), inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Pages in document order. Text is decoded only when [`PdfPage::text`] is called.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            doc: self,
            ids: self.inner.get_pages().into_iter(),
        }
    }
}

pub struct Pages<'a> {
    doc: &'a PdfDocument,
    ids: btree_map::IntoIter<u32, ObjectId>,
}

impl<'a> Iterator for Pages<'a> {
    type Item = PdfPage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (number, id) = self.ids.next()?;
        Some(PdfPage { doc: self.doc, number, id })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

#[derive(Clone, Copy)]
pub struct PdfPage<'a> {
    doc: &'a PdfDocument,
    number: u32,
    id: ObjectId,
}

impl PdfPage<'_> {
    /// 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Text of this page, in content-stream order.
    ///
    /// Strings shown by `Tj`, `TJ`, `'` and `"` are decoded with the encoding
    /// of the current `Tf` font and appended as-is. Numeric `TJ` adjustments
    /// are ignored, so no space is ever synthesized between glyph runs.
    /// Each text object ends a line; the page's last break is dropped.
    pub fn text(&self) -> Result<String, ExtractError> {
        let doc = &self.doc.inner;
        let encodings: BTreeMap<Vec<u8>, &str> = doc
            .get_page_fonts(self.id)
            .into_iter()
            .map(|(name, font)| (name, font.get_font_encoding()))
            .collect();
        let content = doc
            .get_and_decode_page_content(self.id)
            .map_err(|e| ExtractError::page(&self.doc.path, self.number, e))?;

        let mut text = String::new();
        let mut encoding = None;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    encoding = operation
                        .operands
                        .first()
                        .and_then(|font| font.as_name().ok())
                        .and_then(|name| encodings.get(name).copied());
                }
                "Tj" | "TJ" => push_strings(&mut text, encoding, &operation.operands),
                "'" | "\"" => {
                    end_line(&mut text);
                    push_strings(&mut text, encoding, &operation.operands);
                }
                "ET" => end_line(&mut text),
                _ => {}
            }
        }
        if text.ends_with('\n') {
            text.pop();
        }
        tracing::trace!(page = self.number, chars = text.len(), "decoded page");
        Ok(text)
    }
}

fn end_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

// Only strings contribute; kerning numbers and `"` spacing operands are skipped.
fn push_strings(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)),
            Object::Array(items) => push_strings(text, encoding, items),
            _ => {}
        }
    }
}
