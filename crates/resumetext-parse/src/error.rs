//! Error type shared by the PDF and DOCX readers.
//!
//! [`BackendError`] is derived with [`thiserror`] and folds into the
//! backend-independent [`ExtractError`] at the crate boundary.

use resumetext_core::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// PDF structure, syntax or object resolution failed.
    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("font error: {0}")]
    Font(String),

    /// A content stream could not be interpreted.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    /// The DOCX container or its XML could not be read.
    #[error("document error: {0}")]
    Document(String),

    #[error(transparent)]
    Core(#[from] ExtractError),
}

impl From<BackendError> for ExtractError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => ExtractError::ParseError(msg),
            BackendError::Io(e) => ExtractError::IoError(e.to_string()),
            BackendError::Font(msg) => ExtractError::FontError(msg),
            BackendError::Interpreter(msg) => ExtractError::InterpreterError(msg),
            BackendError::Document(msg) => ExtractError::DocumentError(msg),
            BackendError::Core(e) => e,
        }
    }
}

impl From<zip::result::ZipError> for BackendError {
    fn from(err: zip::result::ZipError) -> Self {
        BackendError::Document(format!("invalid DOCX container: {err}"))
    }
}

impl From<quick_xml::Error> for BackendError {
    fn from(err: quick_xml::Error) -> Self {
        BackendError::Document(format!("malformed document XML: {err}"))
    }
}
