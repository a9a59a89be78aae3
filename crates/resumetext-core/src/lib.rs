//! resumetext-core: backend-independent types and layout algorithms.
//!
//! This crate holds the data model shared by every resumetext crate (geometry,
//! chars, words, structured documents) and the text pipeline that runs on it:
//! column detection, line grouping and line assembly in [`layout`], and the
//! clean-up passes in [`normalize`]. It performs no I/O.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod normalize;
pub mod structured;
pub mod text;
pub mod words;

pub use error::ExtractError;
pub use geometry::{BBox, Ctm, Point};
pub use layout::{
    ColumnBand, DEFAULT_COLUMN_GAP, DEFAULT_LINE_TOLERANCE, LayoutOptions, LineBand, PageText,
    assemble_page, column_text, detect_column_edges, document_text, find_column, group_lines,
    partition_columns,
};
pub use normalize::{enforce_line_structure, normalize, repair_letter_spacing, space_section_headers};
pub use structured::{StructuredDocument, Table};
pub use text::Char;
pub use words::{Word, WordExtractor, WordOptions};
