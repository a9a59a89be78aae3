use std::path::Path;

use resumetext::{ExtractOptions, PdfDocument};

use crate::page_range::parse_page_range;

/// Read an input file, printing a friendly error and returning exit code 1
/// when it cannot be read.
pub fn read_input(file: &Path) -> Result<Vec<u8>, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    std::fs::read(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })
}

/// The name used for format detection: the path's final component.
pub fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn open_pdf(file: &Path, options: ExtractOptions) -> Result<PdfDocument, i32> {
    let bytes = read_input(file)?;
    PdfDocument::open(&bytes, options).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Resolve `--pages` into 0-based indices; all pages when absent.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Quote a CSV field when it contains a comma, a quote or a newline.
pub fn csv_escape(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
