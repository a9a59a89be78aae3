//! End-to-end PDF extraction: bytes → PdfDocument → pages → reading-order text.
//!
//! Test PDFs are created programmatically using lopdf.

mod common;

use common::{pdf_with_pages, show_text, two_column_pdf};
use resumetext::{ExtractError, ExtractOptions, LayoutOptions, PdfDocument};

fn open(pdf: &[u8]) -> PdfDocument {
    PdfDocument::open(pdf, ExtractOptions::default()).unwrap()
}

#[test]
fn two_columns_are_read_one_after_the_other() {
    let doc = open(&two_column_pdf());
    assert_eq!(doc.extract_text().unwrap(), "Name\nDoe\nSkills\nPython");
}

#[test]
fn page_exposes_words_and_columns() {
    let doc = open(&two_column_pdf());
    let page = doc.page(0).unwrap();
    assert_eq!(page.index(), 0);
    assert_eq!(page.width(), 612.0);
    assert_eq!(page.height(), 792.0);

    let texts: Vec<&str> = page.words().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts.len(), 4);
    assert!(texts.contains(&"Python"));

    let columns = page.columns(&LayoutOptions::default());
    assert_eq!(columns.len(), 2);
    assert!((columns[0].edge - 72.0).abs() < 0.01);
    assert!((columns[1].edge - 372.0).abs() < 0.01);
    assert!(!page.text().is_fallback());
}

#[test]
fn word_positions_use_top_left_origin() {
    let content = show_text(&[(72.0, 700.0, "Top"), (72.0, 100.0, "Bottom")]);
    let doc = open(&pdf_with_pages(&[&content]));
    let page = doc.page(0).unwrap();
    let top = page.words().iter().find(|w| w.text == "Top").unwrap();
    let bottom = page.words().iter().find(|w| w.text == "Bottom").unwrap();
    assert!(top.top() < bottom.top());
    assert!((top.left() - 72.0).abs() < 0.01);
    assert_eq!(page.text().as_str(), "Top\nBottom\n");
}

#[test]
fn lines_within_tolerance_are_merged() {
    // baselines 2 units apart still read as one line
    let content = show_text(&[(72.0, 700.0, "Sr"), (96.0, 698.0, "Dev")]);
    let doc = open(&pdf_with_pages(&[&content]));
    assert_eq!(doc.extract_text().unwrap(), "Sr Dev");
}

#[test]
fn wider_column_gap_merges_columns() {
    let opts = ExtractOptions::default().with_layout(LayoutOptions::default().with_column_gap(400.0));
    let doc = PdfDocument::open(&two_column_pdf(), opts).unwrap();
    assert_eq!(doc.extract_text().unwrap(), "Name Skills\nDoe Python");
}

#[test]
fn pages_are_concatenated_in_order() {
    let first = show_text(&[(72.0, 700.0, "First")]);
    let second = show_text(&[(72.0, 700.0, "Second")]);
    let doc = open(&pdf_with_pages(&[&first, &second]));
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.extract_text().unwrap(), "First\n\nSecond");
}

#[test]
fn page_without_words_falls_back() {
    let first = show_text(&[(72.0, 700.0, "Only")]);
    let doc = open(&pdf_with_pages(&[&first, b""]));
    let empty = doc.page(1).unwrap();
    assert!(empty.words().is_empty());
    assert!(empty.text().is_fallback());
    assert_eq!(empty.text().as_str().trim(), "");
    assert_eq!(doc.extract_text().unwrap(), "Only");
}

#[test]
fn page_index_out_of_range() {
    let doc = open(&two_column_pdf());
    assert!(doc.page(5).is_err());
}

#[test]
fn plain_page_text_follows_content_order() {
    let doc = open(&two_column_pdf());
    // one line per text object, columns interleaved as drawn
    assert_eq!(doc.page_plain_text(0).unwrap(), "Name\nSkills\nDoe\nPython\n");
    assert!(doc.page_plain_text(1).is_err());
}

#[test]
fn garbage_bytes_are_a_parse_error() {
    let err = PdfDocument::open(b"definitely not a pdf", ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, ExtractError::ParseError(_)));
}

#[test]
fn input_size_limit() {
    let pdf = two_column_pdf();
    let opts = ExtractOptions::default().with_max_input_bytes(16);
    let err = PdfDocument::open(&pdf, opts).unwrap_err();
    match err {
        ExtractError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
        } => {
            assert_eq!(limit_name, "max_input_bytes");
            assert_eq!(limit_value, 16);
            assert_eq!(actual_value, pdf.len());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn open_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, two_column_pdf()).unwrap();
    let doc = PdfDocument::open_file(&path, ExtractOptions::default()).unwrap();
    assert_eq!(doc.page_count(), 1);
}

#[test]
fn open_file_missing_is_io_error() {
    let err = PdfDocument::open_file("/nonexistent/resume.pdf", ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, ExtractError::IoError(_)));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_pages_keep_order() {
    let contents: Vec<Vec<u8>> = (0..8)
        .map(|i| show_text(&[(72.0, 700.0, &format!("Page{i}"))]))
        .collect();
    let refs: Vec<&[u8]> = contents.iter().map(Vec::as_slice).collect();
    let pdf = pdf_with_pages(&refs);
    let sequential = PdfDocument::open(&pdf, ExtractOptions::default()).unwrap();
    let parallel = PdfDocument::open(&pdf, ExtractOptions::default().with_parallel(true)).unwrap();
    assert_eq!(parallel.pages().unwrap(), sequential.pages().unwrap());
    assert!(parallel.extract_text().unwrap().starts_with("Page0\n\nPage1"));
}

#[cfg(feature = "serde")]
#[test]
fn page_serializes_to_json() {
    let doc = open(&two_column_pdf());
    let page = doc.page(0).unwrap();
    let json = serde_json::to_string(&page).unwrap();
    assert!(json.contains("\"Python\""));
    let back: resumetext::Page = serde_json::from_str(&json).unwrap();
    assert_eq!(back, page);
}
