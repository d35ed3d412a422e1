// PDF extraction module
pub mod lopdf_helper;

pub use lopdf_helper::{PdfDocument, PdfPage};

use std::path::Path;

use crate::error::ExtractError;
use crate::normalize;

/// Turns a document on disk into raw text: each page's text followed by `\n`.
///
/// The result is not normalized yet; see [`normalize::flatten`].
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Default extractor backed by lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let document = PdfDocument::open(path)?;
        tracing::debug!(path = %path.display(), pages = document.page_count(), "parsed document");

        let pages = document
            .pages()
            .map(|page| page.text())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(normalize::join_pages(pages))
    }
}
