use std::path::Path;

use resumetext::{
    ExtractOptions, Format, LayoutOptions, Page, Word, detect_column_edges, find_column,
};

use crate::cli::WordsFormat;
use crate::shared::{csv_escape, file_name, open_pdf, resolve_pages};

/// One output row: a word tagged with its page and column.
struct Row<'a> {
    page: usize,
    column: usize,
    word: &'a Word,
}

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &WordsFormat,
    column_gap: f64,
) -> Result<(), i32> {
    if Format::from_filename(&file_name(file)) != Some(Format::Pdf) {
        eprintln!("Error: words needs a PDF file: {}", file.display());
        return Err(1);
    }

    let layout = LayoutOptions::default().with_column_gap(column_gap);
    let pdf = open_pdf(file, ExtractOptions::default().with_layout(layout.clone()))?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;

    let mut extracted = Vec::with_capacity(page_indices.len());
    for &idx in &page_indices {
        let page = pdf.page(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;
        extracted.push(page);
    }

    let rows: Vec<Row<'_>> = extracted
        .iter()
        .flat_map(|page| rows_of(page, &layout))
        .collect();

    match format {
        WordsFormat::Text => write_text(&rows),
        WordsFormat::Json => write_json(&rows),
        WordsFormat::Csv => write_csv(&rows),
    }
    Ok(())
}

fn rows_of<'a>(page: &'a Page, layout: &LayoutOptions) -> Vec<Row<'a>> {
    let edges = detect_column_edges(page.words(), layout.column_gap);
    page.words()
        .iter()
        .map(|word| Row {
            page: page.index() + 1,
            column: find_column(word.left(), &edges, layout.column_gap),
            word,
        })
        .collect()
}

fn write_text(rows: &[Row<'_>]) {
    println!("page\tcolumn\ttext\tx0\ttop\tx1\tbottom");
    for r in rows {
        let b = &r.word.bbox;
        println!(
            "{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            r.page, r.column, r.word.text, b.x0, b.top, b.x1, b.bottom,
        );
    }
}

fn write_json(rows: &[Row<'_>]) {
    let words: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "page": r.page,
                "column": r.column,
                "text": r.word.text,
                "x0": r.word.bbox.x0,
                "top": r.word.bbox.top,
                "x1": r.word.bbox.x1,
                "bottom": r.word.bbox.bottom,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(words));
}

fn write_csv(rows: &[Row<'_>]) {
    println!("page,column,text,x0,top,x1,bottom");
    for r in rows {
        let b = &r.word.bbox;
        println!(
            "{},{},{},{:.2},{:.2},{:.2},{:.2}",
            r.page,
            r.column,
            csv_escape(&r.word.text),
            b.x0,
            b.top,
            b.x1,
            b.bottom,
        );
    }
}
