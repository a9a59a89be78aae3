//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use lopdf::{Document, Object, Stream, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("resumetext").unwrap()
}

/// A PDF with one page per item list; each `(x, y, text)` is shown in
/// Helvetica 12pt on a US Letter page.
pub fn pdf_with_pages(pages: &[&[(f64, f64, &str)]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = Vec::new();
    for items in pages {
        let mut content = String::new();
        for (x, y, text) in *items {
            content.push_str(&format!("BT /F1 12 Tf {x} {y} Td ({text}) Tj ET\n"));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(pages.len() as i64),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

pub fn two_column_resume() -> Vec<u8> {
    pdf_with_pages(&[&[
        (72.0, 700.0, "Name"),
        (372.0, 700.0, "Skills"),
        (72.0, 680.0, "Doe"),
        (372.0, 680.0, "Python"),
    ]])
}

/// Write `bytes` to `name` inside a fresh temp dir; keep the dir alive.
pub fn write_temp(name: &str, bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    (dir, path)
}
