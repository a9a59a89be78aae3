//! PDF parsing backend trait.
//!
//! [`PdfBackend`] abstracts the handful of operations text extraction needs
//! from a PDF library, so the facade does not depend on lopdf directly.

use resumetext_core::{BBox, ExtractError};

use crate::handler::ContentHandler;

/// Trait abstracting PDF parsing operations.
///
/// A backend opens documents, enumerates pages, reports each page's MediaBox
/// and feeds the page content stream through a [`ContentHandler`]. It also
/// offers an unpositioned plain-text rendering of a page, used when the
/// positional path yields nothing.
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let media_box = MyBackend::page_media_box(&doc, &page)?;
/// MyBackend::interpret_page(&doc, &page, &mut handler, 10)?;
/// ```
pub trait PdfBackend {
    type Document;
    type Page;
    /// Backend-specific error type, convertible to [`ExtractError`].
    type Error: std::error::Error + Into<ExtractError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable PDF, or if the
    /// document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// The page's MediaBox in PDF coordinates (`x0, y0, x1, y1`, stored in a
    /// [`BBox`] as `x0, top, x1, bottom`), inherited from ancestors if needed.
    fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<BBox, Self::Error>;

    /// Interpret the page content, emitting glyphs to `handler`.
    ///
    /// # Errors
    ///
    /// Fails if the content cannot be decoded or Form XObjects nest deeper
    /// than `max_depth`.
    fn interpret_page(
        doc: &Self::Document,
        page: &Self::Page,
        handler: &mut dyn ContentHandler,
        max_depth: usize,
    ) -> Result<(), Self::Error>;

    /// The page text without any positional reconstruction.
    fn page_plain_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error>;
}
