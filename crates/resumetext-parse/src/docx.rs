//! DOCX reader.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml`. Only
//! text matters here, so the XML is streamed once and reduced to body
//! paragraphs plus top-level tables. Formatting, headers and footers,
//! footnotes and text boxes are not read. Text that does not unescape is an
//! error rather than being dropped.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use resumetext_core::{StructuredDocument, Table};
use tracing::debug;
use zip::ZipArchive;

use crate::error::BackendError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the paragraphs and top-level tables of a DOCX file.
///
/// Paragraph text is the concatenation of its runs' `w:t` text, with `w:tab`
/// as `\t` and `w:br`/`w:cr` as `\n`. A table cell's text is its own
/// paragraphs joined by `\n`; tables nested inside a cell are skipped.
///
/// # Errors
///
/// Returns [`BackendError::Document`] if the bytes are not a ZIP archive, the
/// archive has no `word/document.xml`, or the XML is malformed.
pub fn read_docx(bytes: &[u8]) -> Result<StructuredDocument, BackendError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    let doc = parse_document_xml(&xml)?;
    debug!(
        paragraphs = doc.paragraphs.len(),
        tables = doc.tables.len(),
        "read DOCX"
    );
    Ok(doc)
}

#[derive(Default)]
struct BodyCollector {
    doc: StructuredDocument,
    table_depth: usize,
    text_box_depth: usize,
    paragraph: Option<String>,
    in_run: bool,
    in_text: bool,
    rows: Vec<Vec<String>>,
    cells: Vec<String>,
    cell_paragraphs: Vec<String>,
}

impl BodyCollector {
    /// Paragraphs of the body or of a top-level table cell are collected.
    fn collecting(&self) -> bool {
        self.text_box_depth == 0 && self.table_depth <= 1
    }

    fn push_run_char(&mut self, c: char) {
        if self.in_run && self.text_box_depth == 0 {
            if let Some(p) = self.paragraph.as_mut() {
                p.push(c);
            }
        }
    }

    fn start(&mut self, name: &[u8]) {
        match name {
            b"tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.rows.clear();
                }
            }
            b"tr" if self.table_depth == 1 => self.cells.clear(),
            b"tc" if self.table_depth == 1 => self.cell_paragraphs.clear(),
            b"p" if self.collecting() => self.paragraph = Some(String::new()),
            b"r" => self.in_run = true,
            b"t" => self.in_text = true,
            b"txbxContent" => self.text_box_depth += 1,
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"tbl" => {
                if self.table_depth == 1 {
                    let rows = std::mem::take(&mut self.rows);
                    self.doc.tables.push(Table::new(rows));
                }
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            b"tr" if self.table_depth == 1 => {
                let cells = std::mem::take(&mut self.cells);
                self.rows.push(cells);
            }
            b"tc" if self.table_depth == 1 => {
                let text = std::mem::take(&mut self.cell_paragraphs).join("\n");
                self.cells.push(text);
            }
            b"p" if self.collecting() => {
                if let Some(text) = self.paragraph.take() {
                    if self.table_depth == 0 {
                        self.doc.paragraphs.push(text);
                    } else {
                        self.cell_paragraphs.push(text);
                    }
                }
            }
            b"r" => self.in_run = false,
            b"t" => self.in_text = false,
            b"txbxContent" => self.text_box_depth = self.text_box_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        match name {
            b"tab" => self.push_run_char('\t'),
            b"br" | b"cr" => self.push_run_char('\n'),
            b"noBreakHyphen" => self.push_run_char('-'),
            b"p" | b"tc" | b"tr" | b"tbl" => {
                self.start(name);
                self.end(name);
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text && self.in_run && self.text_box_depth == 0 {
            if let Some(p) = self.paragraph.as_mut() {
                p.push_str(text);
            }
        }
    }
}

/// Reduce `word/document.xml` to paragraphs and tables.
pub fn parse_document_xml(xml: &str) -> Result<StructuredDocument, BackendError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut body = BodyCollector::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => body.start(e.local_name().as_ref()),
            Event::End(e) => body.end(e.local_name().as_ref()),
            Event::Empty(e) => body.empty(e.local_name().as_ref()),
            Event::Text(e) => body.text(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(body.doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn document(body: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NS}><w:body>{body}</w:body></w:document>"#)
    }

    fn para(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn paragraphs_in_document_order() {
        let xml = document(&format!("{}{}", para("Jane Doe"), para("Engineer")));
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Jane Doe", "Engineer"]);
        assert!(doc.tables.is_empty());
    }

    #[test]
    fn runs_are_concatenated_with_tabs_and_breaks() {
        let xml = document(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
               <w:r><w:t>Rust</w:t></w:r><w:r><w:tab/><w:t>Go</w:t><w:br/><w:t>C</w:t></w:r>
               <w:r><w:t xml:space="preserve"> &amp; more</w:t></w:r></w:p>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Rust\tGo\nC & more"]);
    }

    #[test]
    fn hyperlink_runs_count() {
        let xml = document(
            r#"<w:p><w:r><w:t xml:space="preserve">Site: </w:t></w:r><w:hyperlink><w:r><w:t>example.com</w:t></w:r></w:hyperlink></w:p>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Site: example.com"]);
    }

    #[test]
    fn tables_are_separate_from_paragraphs() {
        let xml = document(&format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}{}</w:tc></w:tr><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            para("Intro"),
            para("Skill"),
            para("Rust"),
            para("Go"),
            para("Python"),
            para("Outro"),
        ));
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Intro", "Outro"]);
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(
            doc.tables[0].rows,
            vec![vec!["Skill".to_string(), "Rust\nGo".to_string()], vec!["Python".to_string()]]
        );
        assert_eq!(doc.to_text(), "Intro\nOutro\nSkill\tRust\nGo\nPython");
    }

    #[test]
    fn nested_tables_are_not_emitted() {
        let xml = document(&format!(
            "<w:tbl><w:tr><w:tc>{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>",
            para("outer"),
            para("inner"),
        ));
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].rows, vec![vec!["outer".to_string()]]);
        assert!(doc.paragraphs.is_empty());
    }

    #[test]
    fn text_boxes_are_skipped() {
        let xml = document(
            r#"<w:p><w:r><w:t>Body</w:t></w:r><w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Body"]);
    }

    #[test]
    fn text_box_tabs_and_breaks_are_skipped() {
        let xml = document(
            r#"<w:p><w:r><w:t>Body</w:t></w:r><w:r><w:drawing><w:txbxContent><w:p><w:r><w:tab/><w:t>Box</w:t><w:br/><w:noBreakHyphen/></w:r></w:p></w:txbxContent></w:drawing></w:r><w:r><w:tab/><w:t>End</w:t></w:r></w:p>"#,
        );
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["Body\tEnd"]);
    }

    #[test]
    fn unknown_entity_is_a_document_error() {
        let xml = document(&para("Caf&eacute;"));
        let err = parse_document_xml(&xml).unwrap_err();
        assert!(matches!(err, BackendError::Document(_)));
    }

    #[test]
    fn empty_paragraph_element() {
        let xml = document(&format!("<w:p/>{}", para("x")));
        let doc = parse_document_xml(&xml).unwrap();
        assert_eq!(doc.paragraphs, vec!["", "x"]);
        assert_eq!(doc.to_text(), "x");
    }

    #[test]
    fn read_docx_from_archive() {
        let xml = document(&para("Hello"));
        let bytes = zip_with(&[("[Content_Types].xml", "<Types/>"), ("word/document.xml", &xml)]);
        let doc = read_docx(&bytes).unwrap();
        assert_eq!(doc.paragraphs, vec!["Hello"]);
    }

    #[test]
    fn not_a_zip_is_a_document_error() {
        let err = read_docx(b"plain text").unwrap_err();
        assert!(matches!(err, BackendError::Document(_)));
    }

    #[test]
    fn archive_without_document_part() {
        let bytes = zip_with(&[("word/other.xml", "<x/>")]);
        let err = read_docx(&bytes).unwrap_err();
        assert!(matches!(err, BackendError::Document(_)));
    }

    #[test]
    fn malformed_xml_is_a_document_error() {
        let bytes = zip_with(&[("word/document.xml", "<w:document><w:body></w:document>")]);
        let err = read_docx(&bytes).unwrap_err();
        assert!(matches!(err, BackendError::Document(_)));
    }
}
