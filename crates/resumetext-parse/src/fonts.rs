//! Font loading from PDF font dictionaries.
//!
//! A [`LoadedFont`] bundles everything the interpreter needs per glyph: how to
//! split a string into character codes, how to map a code to Unicode and how
//! wide the glyph is. Simple fonts (Type1, TrueType, Type3) use one byte per
//! code; Type0 composite fonts use two.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object};

use crate::cmap::ToUnicode;
use crate::encoding::{BaseEncoding, SimpleEncoding};
use crate::lopdf_backend::{decode_stream, object_to_f64, resolve_ref};

/// Default descent when the font has no descriptor (glyph space units).
const DEFAULT_DESCENT: f64 = -250.0;

/// Default glyph width when neither `/Widths` nor `/MissingWidth` covers a code.
const DEFAULT_WIDTH: f64 = 600.0;

/// Default width of a CID font glyph (`/DW`).
const DEFAULT_CID_WIDTH: f64 = 1000.0;

/// Glyph widths and vertical extent, in glyph space units (1/1000 em).
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    widths: HashMap<u32, f64>,
    default_width: f64,
    descent: f64,
}

impl FontMetrics {
    pub fn new(widths: HashMap<u32, f64>, default_width: f64, descent: f64) -> Self {
        Self {
            widths,
            default_width,
            descent,
        }
    }

    /// Metrics used when the font dictionary is missing or unusable.
    pub fn default_metrics() -> Self {
        Self::new(HashMap::new(), DEFAULT_WIDTH, DEFAULT_DESCENT)
    }

    pub fn width(&self, code: u32) -> f64 {
        self.widths.get(&code).copied().unwrap_or(self.default_width)
    }

    pub fn descent(&self) -> f64 {
        self.descent
    }

    /// Glyph boxes are one em tall, starting at the descent.
    pub fn ascent(&self) -> f64 {
        1000.0 + self.descent
    }
}

/// A font resolved from a page or form resource dictionary.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    /// `/BaseFont` without any subset prefix.
    pub base_name: String,
    metrics: FontMetrics,
    to_unicode: Option<ToUnicode>,
    encoding: Option<SimpleEncoding>,
    composite: bool,
}

impl LoadedFont {
    /// Placeholder for a font name that is not present in the resources.
    pub fn missing(resource_name: &str) -> Self {
        Self {
            base_name: resource_name.to_string(),
            metrics: FontMetrics::default_metrics(),
            to_unicode: None,
            encoding: None,
            composite: false,
        }
    }

    /// Load a font dictionary. Unreadable parts fall back to defaults.
    pub fn from_dict(doc: &Document, dict: &Dictionary, resource_name: &str) -> Self {
        let base_name = dict
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| strip_subset_prefix(&String::from_utf8_lossy(n)).to_string())
            .unwrap_or_else(|| resource_name.to_string());

        let to_unicode = dict
            .get(b"ToUnicode")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_stream().ok())
            .and_then(|s| decode_stream(s).ok())
            .map(|data| ToUnicode::parse(&data))
            .filter(|cmap| !cmap.is_empty());

        let composite = matches!(
            dict.get(b"Subtype").ok().and_then(|o| o.as_name().ok()),
            Some(b"Type0")
        );

        if composite {
            let descendant = descendant_font(doc, dict);
            let metrics = descendant
                .map(|d| cid_metrics(doc, d))
                .unwrap_or_else(FontMetrics::default_metrics);
            Self {
                base_name,
                metrics,
                to_unicode,
                encoding: None,
                composite: true,
            }
        } else {
            Self {
                base_name,
                metrics: simple_metrics(doc, dict),
                to_unicode,
                encoding: Some(
                    simple_encoding(doc, dict).unwrap_or_else(|| SimpleEncoding::new(None)),
                ),
                composite: false,
            }
        }
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Split a shown string into character codes.
    pub fn codes(&self, bytes: &[u8]) -> Vec<u32> {
        if self.composite {
            bytes
                .chunks(2)
                .map(|pair| match pair {
                    [hi, lo] => (u32::from(*hi) << 8) | u32::from(*lo),
                    [single] => u32::from(*single),
                    _ => 0,
                })
                .collect()
        } else {
            bytes.iter().map(|b| u32::from(*b)).collect()
        }
    }

    /// Unicode text for a code: ToUnicode first, then the simple encoding
    /// (StandardEncoding when the font names none).
    pub fn decode(&self, code: u32) -> Option<String> {
        if let Some(text) = self.to_unicode.as_ref().and_then(|m| m.get(code)) {
            return Some(text.to_string());
        }
        let byte = u8::try_from(code).ok()?;
        self.encoding.as_ref().and_then(|e| e.decode(byte))
    }

    pub fn width(&self, code: u32) -> f64 {
        self.metrics.width(code)
    }
}

/// Remove a six-letter subset tag such as `ABCDEF+`.
pub fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => {
            rest
        }
        _ => name,
    }
}

fn descriptor_descent(doc: &Document, font: &Dictionary) -> f64 {
    let Some(descriptor) = font
        .get(b"FontDescriptor")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
    else {
        return DEFAULT_DESCENT;
    };
    descriptor
        .get(b"Descent")
        .ok()
        .and_then(|o| object_to_f64(resolve_ref(doc, o)).ok())
        .unwrap_or(0.0)
}

fn simple_metrics(doc: &Document, dict: &Dictionary) -> FontMetrics {
    let first_char = dict
        .get(b"FirstChar")
        .ok()
        .and_then(|o| object_to_f64(resolve_ref(doc, o)).ok())
        .map_or(0, |v| v.max(0.0) as u32);

    let widths: HashMap<u32, f64> = dict
        .get(b"Widths")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_array().ok())
        .map(|arr| {
            arr.iter()
                .enumerate()
                .filter_map(|(i, w)| {
                    let w = object_to_f64(resolve_ref(doc, w)).ok()?;
                    Some((first_char + i as u32, w))
                })
                .collect()
        })
        .unwrap_or_default();

    let missing_width = dict
        .get(b"FontDescriptor")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|d| d.get(b"MissingWidth").ok())
        .and_then(|o| object_to_f64(o).ok())
        .filter(|w| *w > 0.0)
        .unwrap_or(DEFAULT_WIDTH);

    FontMetrics::new(widths, missing_width, descriptor_descent(doc, dict))
}

fn descendant_font<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    let descendants = resolve_ref(doc, dict.get(b"DescendantFonts").ok()?);
    let first = descendants.as_array().ok()?.first()?;
    resolve_ref(doc, first).as_dict().ok()
}

/// Metrics of a CIDFont from `/DW` and `/W`.
///
/// `/W` mixes two forms: `c [w1 w2 ...]` assigns consecutive widths starting
/// at `c`, and `c_first c_last w` assigns one width to a range.
fn cid_metrics(doc: &Document, cid_font: &Dictionary) -> FontMetrics {
    let default_width = cid_font
        .get(b"DW")
        .ok()
        .and_then(|o| object_to_f64(o).ok())
        .unwrap_or(DEFAULT_CID_WIDTH);

    let mut widths = HashMap::new();
    if let Some(entries) = cid_font
        .get(b"W")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_array().ok())
    {
        let mut i = 0;
        while i < entries.len() {
            let Ok(start) = object_to_f64(&entries[i]) else {
                i += 1;
                continue;
            };
            let start = start.max(0.0) as u32;
            match entries.get(i + 1).map(|o| resolve_ref(doc, o)) {
                Some(Object::Array(list)) => {
                    for (offset, w) in list.iter().enumerate() {
                        if let Ok(w) = object_to_f64(w) {
                            widths.insert(start + offset as u32, w);
                        }
                    }
                    i += 2;
                }
                Some(end) => {
                    let end = object_to_f64(end).map_or(start, |v| v.max(0.0) as u32);
                    if let Some(Ok(w)) = entries.get(i + 2).map(object_to_f64) {
                        // cap pathological ranges
                        for cid in start..=end.min(start.saturating_add(0xFFFF)) {
                            widths.insert(cid, w);
                        }
                    }
                    i += 3;
                }
                None => break,
            }
        }
    }

    FontMetrics::new(widths, default_width, descriptor_descent(doc, cid_font))
}

fn simple_encoding(doc: &Document, dict: &Dictionary) -> Option<SimpleEncoding> {
    let encoding = resolve_ref(doc, dict.get(b"Encoding").ok()?);
    match encoding {
        Object::Name(name) => Some(SimpleEncoding::new(Some(BaseEncoding::from_name(name)?))),
        Object::Dictionary(enc) => {
            let base = enc
                .get(b"BaseEncoding")
                .ok()
                .and_then(|o| o.as_name().ok())
                .and_then(BaseEncoding::from_name);
            let mut simple = SimpleEncoding::new(base);
            if let Some(diffs) = enc
                .get(b"Differences")
                .ok()
                .map(|o| resolve_ref(doc, o))
                .and_then(|o| o.as_array().ok())
            {
                simple.apply_differences(differences(diffs));
            }
            Some(simple)
        }
        _ => None,
    }
}

/// Flatten a `/Differences` array into `(code, glyph name)` pairs.
fn differences(array: &[Object]) -> Vec<(u8, String)> {
    let mut out = Vec::new();
    let mut code: Option<u32> = None;
    for item in array {
        match item {
            Object::Integer(n) => code = u32::try_from(*n).ok(),
            Object::Name(name) => {
                if let Some(c) = code {
                    if let Ok(byte) = u8::try_from(c) {
                        out.push((byte, String::from_utf8_lossy(name).into_owned()));
                    }
                    code = Some(c + 1);
                }
            }
            _ => {}
        }
    }
    out
}
