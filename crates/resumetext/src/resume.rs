//! The `(bytes, filename) -> text` entry point.

use std::io::Write;
use std::path::Path;

use resumetext_core::{ExtractError, normalize};
use resumetext_parse::read_docx;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::document::PdfDocument;
use crate::format::{Format, UNSUPPORTED_FORMAT_MESSAGE};
use crate::options::ExtractOptions;

/// Extract normalized reading-order text from an uploaded resume.
///
/// The filename only selects the format. Unsupported extensions are not an
/// error: the returned text is [`UNSUPPORTED_FORMAT_MESSAGE`].
///
/// ```ignore
/// let text = resumetext::parse_resume(&bytes, "jane_doe.pdf")?;
/// if text.starts_with("Unsupported") { /* show it to the user */ }
/// ```
///
/// # Errors
///
/// Any failure to read the document, e.g. a corrupt or encrypted PDF.
pub fn parse_resume(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    parse_resume_with_options(bytes, filename, &ExtractOptions::default())
}

/// [`parse_resume`] with explicit options.
pub fn parse_resume_with_options(
    bytes: &[u8],
    filename: &str,
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let Some(format) = Format::from_filename(filename) else {
        info!(filename, "unsupported file type");
        return Ok(UNSUPPORTED_FORMAT_MESSAGE.to_string());
    };
    let raw = extract_raw_text(bytes, format, options)?;
    Ok(normalize(&raw))
}

/// Reading-order text of a document before normalization.
///
/// The bytes are spooled to a named temporary file which extraction reads
/// back; the file is removed when this returns, whether or not extraction
/// succeeded.
pub fn extract_raw_text(
    bytes: &[u8],
    format: Format,
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    // before spooling, so oversized uploads never touch the disk
    options.check_input_size(bytes.len())?;
    let spooled = spool(bytes, format, options)?;
    debug!(path = %spooled.path().display(), ?format, "spooled upload");
    extract_from_path(spooled.path(), format, options)
}

fn spool(bytes: &[u8], format: Format, options: &ExtractOptions) -> Result<NamedTempFile, ExtractError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("resumetext-").suffix(format.suffix());
    let mut file = match &options.temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

fn extract_from_path(path: &Path, format: Format, options: &ExtractOptions) -> Result<String, ExtractError> {
    match format {
        Format::Pdf => PdfDocument::open_file(path, options.clone())?.extract_text(),
        Format::Docx => {
            let bytes = std::fs::read(path)?;
            Ok(read_docx(&bytes)?.to_text())
        }
    }
}
