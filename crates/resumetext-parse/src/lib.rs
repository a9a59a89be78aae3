//! resumetext-parse: document readers for resumetext.
//!
//! The PDF side is layered the usual way: a pluggable [`PdfBackend`] (with
//! [`LopdfBackend`] as the implementation) opens the document, the content
//! stream [`tokenizer`] and [`interpreter`] turn each page into glyph events,
//! and [`char_extraction`] places those glyphs on the page. The DOCX side is a
//! single streaming pass over `word/document.xml` in [`docx`].

pub mod backend;
pub mod char_extraction;
pub mod cmap;
pub mod docx;
pub mod encoding;
pub mod error;
pub mod fonts;
pub mod handler;
mod interpreter;
pub mod lopdf_backend;
pub mod state;
pub mod tokenizer;

pub use backend::PdfBackend;
pub use char_extraction::char_from_event;
pub use docx::read_docx;
pub use error::BackendError;
pub use handler::{CharEvent, CollectingHandler, ContentHandler};
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use resumetext_core;
