//! resumetext: recover reading-order text from resume uploads.
//!
//! Resumes are often laid out in two or three columns. Reading a PDF's text
//! in content-stream order interleaves those columns line by line; this crate
//! rebuilds each page column by column from positioned words instead, then
//! cleans the result up (letter-spaced headings, bullets, section spacing).
//! Word documents are read paragraph by paragraph, followed by their tables.
//!
//! ```ignore
//! let bytes = std::fs::read("jane_doe.pdf")?;
//! let text = resumetext::parse_resume(&bytes, "jane_doe.pdf")?;
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the data model and options.
//! - `parallel`: extract pages on the rayon pool when
//!   [`ExtractOptions::parallel`] is set.

mod document;
mod format;
mod options;
mod page;
mod resume;

pub use document::PdfDocument;
pub use format::{Format, UNSUPPORTED_FORMAT_MESSAGE};
pub use options::{DEFAULT_MAX_RECURSION_DEPTH, ExtractOptions};
pub use page::Page;
pub use resume::{extract_raw_text, parse_resume, parse_resume_with_options};

pub use resumetext_core::{
    BBox, Char, ColumnBand, DEFAULT_COLUMN_GAP, DEFAULT_LINE_TOLERANCE, ExtractError,
    LayoutOptions, LineBand, PageText, StructuredDocument, Table, Word, WordOptions,
    assemble_page, detect_column_edges, document_text, find_column, normalize, partition_columns,
};
pub use resumetext_parse::read_docx;

pub use resumetext_core;
pub use resumetext_parse;
