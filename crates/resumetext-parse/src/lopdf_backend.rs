//! lopdf-based PDF parsing backend.
//!
//! Implements [`PdfBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId};
use resumetext_core::{BBox, ExtractError};
use tracing::debug;

use crate::backend::PdfBackend;
use crate::error::BackendError;
use crate::handler::ContentHandler;
use crate::interpreter::interpret_content_stream;
use crate::state::State;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    inner: Document,
    /// Page object ids in document order.
    page_ids: Vec<ObjectId>,
}

impl LopdfDocument {
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// A single page within a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    pub object_id: ObjectId,
    /// 0-based page index.
    pub index: usize,
}

/// The lopdf-based PDF backend.
pub struct LopdfBackend;

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Follow an indirect reference, returning the object itself otherwise.
pub(crate) fn resolve_ref<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Stream content, decompressed if the stream has a `/Filter`.
pub(crate) fn decode_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("failed to decompress stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

fn bbox_from_array(array: &[Object]) -> Result<BBox, BackendError> {
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element array for box, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(&array[0])?;
    let y0 = object_to_f64(&array[1])?;
    let x1 = object_to_f64(&array[2])?;
    let y1 = object_to_f64(&array[3])?;
    Ok(BBox::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)))
}

/// Look up a key on the page, walking up the page tree via `/Parent`.
///
/// A `/Parent` chain that revisits a node is a parse error.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, BackendError> {
    let mut visited = HashSet::new();
    let mut current_id = page_id;
    loop {
        if !visited.insert(current_id) {
            return Err(BackendError::Parse(format!(
                "cyclic /Parent chain at object {} {}",
                current_id.0, current_id.1
            )));
        }
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current_id = parent
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

fn page_resources(doc: &Document, page_id: ObjectId) -> Result<&Dictionary, BackendError> {
    static EMPTY: LazyLock<Dictionary> = LazyLock::new(Dictionary::new);

    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => resolve_ref(doc, obj)
            .as_dict()
            .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string())),
        None => Ok(&EMPTY),
    }
}

/// Concatenated content stream bytes of a page. `/Contents` may be a single
/// stream or an array of streams.
fn page_content_bytes(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>, BackendError> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };

    match resolve_ref(doc, contents) {
        Object::Stream(stream) => decode_stream(stream),
        Object::Array(items) => {
            let mut content = Vec::new();
            for item in items {
                let stream = resolve_ref(doc, item).as_stream().map_err(|e| {
                    BackendError::Parse(format!("/Contents array item is not a stream: {e}"))
                })?;
                let bytes = decode_stream(stream)?;
                if !content.is_empty() {
                    content.push(b' ');
                }
                content.extend_from_slice(&bytes);
            }
            Ok(content)
        }
        _ => Err(BackendError::Parse(
            "/Contents is not a stream or array".to_string(),
        )),
    }
}

/// lopdf encodings of the fonts in `resources`, keyed by resource name.
/// Fonts lopdf cannot build an encoding for are left out.
fn font_encodings<'a>(doc: &'a Document, resources: &'a Dictionary) -> HashMap<Vec<u8>, Encoding<'a>> {
    let Some(fonts) = resources
        .get(b"Font")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
    else {
        return HashMap::new();
    };

    fonts
        .iter()
        .filter_map(|(name, obj)| {
            let dict = resolve_ref(doc, obj).as_dict().ok()?;
            match dict.get_font_encoding(doc) {
                Ok(encoding) => Some((name.clone(), encoding)),
                Err(e) => {
                    debug!(font = %String::from_utf8_lossy(name), error = %e, "no plain-text encoding");
                    None
                }
            }
        })
        .collect()
}

/// Unpositioned text of a content stream: shown strings in stream order, one
/// line per text object.
///
/// Resources come from the page tree, inherited ones included, so this works
/// where lopdf's own `extract_text` only sees page-level fonts.
fn plain_text(doc: &Document, content: &[u8], resources: &Dictionary) -> Result<String, BackendError> {
    let encodings = font_encodings(doc, resources);
    let content = Content::decode(content)
        .map_err(|e| BackendError::Parse(format!("failed to decode content stream: {e}")))?;

    let mut text = String::new();
    let mut encoding = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => {
                encoding = op
                    .operands
                    .first()
                    .and_then(|o| o.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Tj" | "TJ" | "'" | "\"" => {
                if matches!(op.operator.as_str(), "'" | "\"") {
                    end_line(&mut text);
                }
                if let Some(encoding) = encoding {
                    push_shown(&mut text, encoding, &op.operands, false);
                }
            }
            "ET" => end_line(&mut text),
            _ => {}
        }
    }
    Ok(text)
}

fn end_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Append the strings among `operands`. Inside a `TJ` array, a kerning
/// adjustment wider than a tenth of an em reads as a word space.
fn push_shown(text: &mut String, encoding: &Encoding, operands: &[Object], in_array: bool) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => match Document::decode_text(encoding, bytes) {
                Ok(s) => text.push_str(&s),
                Err(e) => debug!(error = %e, "undecodable string skipped"),
            },
            Object::Array(items) => push_shown(text, encoding, items, true),
            Object::Integer(_) | Object::Real(_) if in_array => {
                if object_to_f64(operand).is_ok_and(|adjust| adjust < -100.0) {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
}

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page = LopdfPage;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(ExtractError::PasswordRequired));
        }

        // get_pages is keyed by 1-based page number
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        debug!(pages = page_ids.len(), "opened PDF");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
        let object_id = doc.page_ids.get(index).copied().ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                doc.page_ids.len()
            ))
        })?;
        Ok(LopdfPage { object_id, index })
    }

    fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<BBox, Self::Error> {
        let obj = resolve_inherited(&doc.inner, page.object_id, b"MediaBox")?
            .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))?;
        let array = resolve_ref(&doc.inner, obj)
            .as_array()
            .map_err(|e| BackendError::Parse(format!("MediaBox is not an array: {e}")))?;
        bbox_from_array(array)
    }

    fn interpret_page(
        doc: &Self::Document,
        page: &Self::Page,
        handler: &mut dyn ContentHandler,
        max_depth: usize,
    ) -> Result<(), Self::Error> {
        let inner = &doc.inner;
        let page_dict = inner
            .get_object(page.object_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        let content = page_content_bytes(inner, page_dict)?;
        let resources = page_resources(inner, page.object_id)?;

        let mut state = State::new();
        interpret_content_stream(inner, &content, resources, handler, max_depth, 0, &mut state)
    }

    fn page_plain_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error> {
        let inner = &doc.inner;
        let page_dict = inner
            .get_object(page.object_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        let content = page_content_bytes(inner, page_dict)?;
        let resources = page_resources(inner, page.object_id)?;
        plain_text(inner, &content, resources)
    }
}
