//! PDF document type: opens a file and extracts its pages.

use std::path::Path;

use resumetext_core::{
    Char, ExtractError, PageText, WordExtractor, detect_column_edges, document_text,
};
use resumetext_parse::{CollectingHandler, LopdfBackend, LopdfDocument, PdfBackend, char_from_event};
use tracing::{debug, warn};

use crate::options::ExtractOptions;
use crate::page::Page;

/// A PDF document opened for text extraction.
///
/// ```ignore
/// let pdf = PdfDocument::open(&bytes, ExtractOptions::default())?;
/// let text = pdf.extract_text()?;
/// ```
pub struct PdfDocument {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("doc", &self.doc)
            .field("options", &self.options)
            .finish()
    }
}

impl PdfDocument {
    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ResourceLimitExceeded`] if the input is larger than
    /// `max_input_bytes`, [`ExtractError::PasswordRequired`] for encrypted
    /// documents, [`ExtractError::ParseError`] for anything unreadable.
    pub fn open(bytes: &[u8], options: ExtractOptions) -> Result<Self, ExtractError> {
        options.check_input_size(bytes.len())?;
        let doc = LopdfBackend::open(bytes).map_err(ExtractError::from)?;
        Ok(Self { doc, options })
    }

    /// Read and open a PDF file.
    pub fn open_file(path: impl AsRef<Path>, options: ExtractOptions) -> Result<Self, ExtractError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, options)
    }

    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract one page by 0-based index.
    ///
    /// A page whose content produces no words takes the backend's plain text
    /// instead; if even that fails the page text is empty.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or the content stream cannot be
    /// interpreted.
    pub fn page(&self, index: usize) -> Result<Page, ExtractError> {
        let page = LopdfBackend::get_page(&self.doc, index)?;
        let media_box = LopdfBackend::page_media_box(&self.doc, &page)?;

        let mut handler = CollectingHandler::default();
        LopdfBackend::interpret_page(
            &self.doc,
            &page,
            &mut handler,
            self.options.max_recursion_depth,
        )?;

        // media box is stored bottom-left origin: `top` holds y0, `bottom` y1
        let chars: Vec<Char> = handler
            .chars
            .iter()
            .map(|event| char_from_event(event, media_box.x0, media_box.bottom))
            .collect();
        let words = WordExtractor::extract(&chars, &self.options.words);

        let text = PageText::build(&words, &self.options.layout, || {
            debug!(page = index, "no positioned words, using plain page text");
            self.page_plain_text(index).unwrap_or_else(|e| {
                warn!(page = index, error = %e, "plain page text unavailable");
                String::new()
            })
        });

        debug!(
            page = index,
            chars = chars.len(),
            words = words.len(),
            columns = detect_column_edges(&words, self.options.layout.column_gap).len(),
            "extracted page"
        );

        Ok(Page::new(
            index,
            media_box.width(),
            media_box.height(),
            words,
            text,
        ))
    }

    /// Unpositioned text of one page, in content-stream order with one line
    /// per text object. Pages without positioned words fall back to this.
    pub fn page_plain_text(&self, index: usize) -> Result<String, ExtractError> {
        let page = LopdfBackend::get_page(&self.doc, index)?;
        Ok(LopdfBackend::page_plain_text(&self.doc, &page)?)
    }

    /// Extract every page, in page order.
    ///
    /// With the `parallel` feature and `ExtractOptions::parallel` set, pages
    /// are extracted on the rayon pool; the result order is unchanged.
    pub fn pages(&self) -> Result<Vec<Page>, ExtractError> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            if self.options.parallel {
                return (0..self.page_count())
                    .into_par_iter()
                    .map(|i| self.page(i))
                    .collect();
            }
        }

        (0..self.page_count()).map(|i| self.page(i)).collect()
    }

    /// Reading-order text of the whole document, before normalization.
    pub fn extract_text(&self) -> Result<String, ExtractError> {
        let pages: Vec<PageText> = self
            .pages()?
            .into_iter()
            .map(Page::into_text)
            .collect();
        Ok(document_text(&pages))
    }
}
