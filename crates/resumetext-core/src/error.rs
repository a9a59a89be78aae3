//! Errors raised while turning a resume file into text.

use std::fmt;

/// An extraction failure.
///
/// Any of these aborts the whole document: there is no meaningful partial text
/// to hand back. Pages without positional data are not errors; they fall back
/// to unpositioned text instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Malformed PDF structure or content stream syntax.
    ParseError(String),
    /// Reading the input or spooling it to disk failed.
    IoError(String),
    /// A font or its encoding could not be resolved.
    FontError(String),
    /// A content stream could not be interpreted.
    InterpreterError(String),
    /// The PDF is encrypted; no password support is offered.
    PasswordRequired,
    /// The structured document (DOCX) container or its XML is unreadable.
    DocumentError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit (e.g. "max_input_bytes").
        limit_name: String,
        limit_value: usize,
        actual_value: usize,
    },
    Other(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::ParseError(msg) => write!(f, "parse error: {msg}"),
            ExtractError::IoError(msg) => write!(f, "I/O error: {msg}"),
            ExtractError::FontError(msg) => write!(f, "font error: {msg}"),
            ExtractError::InterpreterError(msg) => write!(f, "interpreter error: {msg}"),
            ExtractError::PasswordRequired => {
                write!(f, "PDF is encrypted and requires a password")
            }
            ExtractError::DocumentError(msg) => write!(f, "document error: {msg}"),
            ExtractError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            ExtractError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::IoError(err.to_string())
    }
}
