//! Input format detection from the upload's filename.

use std::path::Path;

/// Returned in place of text when the filename has no supported extension.
/// Callers detect it by its `"Unsupported"` prefix.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file type. Please upload a PDF or DOCX.";

/// A supported input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Positioned text; goes through column and line reconstruction.
    Pdf,
    /// A Word document; paragraphs and tables are read in document order.
    Docx,
}

impl Format {
    /// Detect the format from the filename's extension, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(Format::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(Format::Docx)
        } else {
            None
        }
    }

    /// File suffix for temporary copies of this format.
    pub fn suffix(self) -> &'static str {
        match self {
            Format::Pdf => ".pdf",
            Format::Docx => ".docx",
        }
    }
}
