//! Single-byte encodings of simple fonts.
//!
//! Resolves a font's `/Encoding` (a base encoding name, optionally patched by a
//! `/Differences` array) into a 256-entry code to Unicode table. WinAnsi and
//! MacRoman are decoded with `encoding_rs`; StandardEncoding is tabulated here.

use std::collections::HashMap;

/// The predefined base encodings a simple font may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseEncoding {
    WinAnsi,
    MacRoman,
    Standard,
}

impl BaseEncoding {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"WinAnsiEncoding" => Some(Self::WinAnsi),
            b"MacRomanEncoding" => Some(Self::MacRoman),
            b"StandardEncoding" => Some(Self::Standard),
            _ => None,
        }
    }

    fn decode(self, code: u8) -> Option<char> {
        match self {
            Self::WinAnsi => decode_with(encoding_rs::WINDOWS_1252, code),
            Self::MacRoman => decode_with(encoding_rs::MACINTOSH, code),
            Self::Standard => standard_encoding(code),
        }
    }
}

fn decode_with(encoding: &'static encoding_rs::Encoding, code: u8) -> Option<char> {
    if code < 0x20 {
        return None;
    }
    let buf = [code];
    let (text, had_errors) = encoding.decode_without_bom_handling(&buf);
    if had_errors {
        return None;
    }
    text.chars().next()
}

/// Adobe StandardEncoding. Printable ASCII apart from the two quotes, plus a
/// sparse upper half.
fn standard_encoding(code: u8) -> Option<char> {
    let c = match code {
        0x27 => '\u{2019}',
        0x60 => '\u{2018}',
        0x20..=0x7E => char::from(code),
        0xA1 => '¡',
        0xA2 => '¢',
        0xA3 => '£',
        0xA4 => '\u{2044}',
        0xA5 => '¥',
        0xA6 => 'ƒ',
        0xA7 => '§',
        0xA8 => '¤',
        0xA9 => '\'',
        0xAA => '\u{201C}',
        0xAB => '«',
        0xAC => '\u{2039}',
        0xAD => '\u{203A}',
        0xAE => '\u{FB01}',
        0xAF => '\u{FB02}',
        0xB1 => '\u{2013}',
        0xB2 => '†',
        0xB3 => '‡',
        0xB4 => '·',
        0xB6 => '¶',
        0xB7 => '\u{2022}',
        0xB8 => '\u{201A}',
        0xB9 => '\u{201E}',
        0xBA => '\u{201D}',
        0xBB => '»',
        0xBC => '\u{2026}',
        0xBD => '\u{2030}',
        0xBF => '¿',
        0xC1 => '`',
        0xC2 => '´',
        0xC3 => 'ˆ',
        0xC4 => '˜',
        0xC5 => '¯',
        0xC6 => '˘',
        0xC7 => '˙',
        0xC8 => '¨',
        0xCA => '˚',
        0xCB => '¸',
        0xCD => '˝',
        0xCE => '˛',
        0xCF => 'ˇ',
        0xD0 => '\u{2014}',
        0xE1 => 'Æ',
        0xE3 => 'ª',
        0xE8 => 'Ł',
        0xE9 => 'Ø',
        0xEA => 'Œ',
        0xEB => 'º',
        0xF1 => 'æ',
        0xF5 => 'ı',
        0xF8 => 'ł',
        0xF9 => 'ø',
        0xFA => 'œ',
        0xFB => 'ß',
        _ => return None,
    };
    Some(c)
}

/// A resolved simple-font encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleEncoding {
    base: Option<BaseEncoding>,
    differences: HashMap<u8, String>,
}

impl SimpleEncoding {
    pub fn new(base: Option<BaseEncoding>) -> Self {
        Self {
            base,
            differences: HashMap::new(),
        }
    }

    /// Apply a `/Differences` array given as `(code, glyph name)` runs.
    pub fn apply_differences(&mut self, entries: impl IntoIterator<Item = (u8, String)>) {
        for (code, glyph) in entries {
            if let Some(text) = glyph_to_unicode(&glyph) {
                self.differences.insert(code, text);
            }
        }
    }

    pub fn decode(&self, code: u8) -> Option<String> {
        if let Some(text) = self.differences.get(&code) {
            return Some(text.clone());
        }
        self.base
            .unwrap_or(BaseEncoding::Standard)
            .decode(code)
            .map(String::from)
    }
}

/// Map an Adobe glyph name to Unicode text.
///
/// Handles `uniXXXX` (one or more code units), `uXXXX[XX]`, ligature names
/// joined by `_`, suffixed variants like `a.sc`, and a table of common names.
pub fn glyph_to_unicode(name: &str) -> Option<String> {
    let base = name.split('.').next().unwrap_or(name);
    if base.is_empty() {
        return None;
    }
    if base.contains('_') {
        return base
            .split('_')
            .map(glyph_to_unicode)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat());
    }
    if let Some(hex) = base.strip_prefix("uni") {
        if !hex.is_empty() && hex.len() % 4 == 0 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            let units: Vec<u16> = (0..hex.len())
                .step_by(4)
                .filter_map(|i| u16::from_str_radix(&hex[i..i + 4], 16).ok())
                .collect();
            return Some(String::from_utf16_lossy(&units));
        }
    }
    if let Some(hex) = base.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from);
        }
    }
    if base.len() == 1 && base.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Some(base.to_string());
    }
    GLYPH_NAMES
        .iter()
        .find(|(glyph, _)| *glyph == base)
        .map(|(_, text)| (*text).to_string())
}

static GLYPH_NAMES: &[(&str, &str)] = &[
    ("space", " "),
    ("nbspace", "\u{00A0}"),
    ("exclam", "!"),
    ("quotedbl", "\""),
    ("numbersign", "#"),
    ("dollar", "$"),
    ("percent", "%"),
    ("ampersand", "&"),
    ("quotesingle", "'"),
    ("parenleft", "("),
    ("parenright", ")"),
    ("asterisk", "*"),
    ("plus", "+"),
    ("comma", ","),
    ("hyphen", "-"),
    ("minus", "\u{2212}"),
    ("period", "."),
    ("slash", "/"),
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("colon", ":"),
    ("semicolon", ";"),
    ("less", "<"),
    ("equal", "="),
    ("greater", ">"),
    ("question", "?"),
    ("at", "@"),
    ("bracketleft", "["),
    ("backslash", "\\"),
    ("bracketright", "]"),
    ("asciicircum", "^"),
    ("underscore", "_"),
    ("grave", "`"),
    ("braceleft", "{"),
    ("bar", "|"),
    ("braceright", "}"),
    ("asciitilde", "~"),
    ("bullet", "\u{2022}"),
    ("endash", "\u{2013}"),
    ("emdash", "\u{2014}"),
    ("quoteleft", "\u{2018}"),
    ("quoteright", "\u{2019}"),
    ("quotedblleft", "\u{201C}"),
    ("quotedblright", "\u{201D}"),
    ("quotesinglbase", "\u{201A}"),
    ("quotedblbase", "\u{201E}"),
    ("ellipsis", "\u{2026}"),
    ("fi", "fi"),
    ("fl", "fl"),
    ("ff", "ff"),
    ("ffi", "ffi"),
    ("ffl", "ffl"),
    ("copyright", "\u{00A9}"),
    ("registered", "\u{00AE}"),
    ("trademark", "\u{2122}"),
    ("degree", "\u{00B0}"),
    ("section", "\u{00A7}"),
    ("paragraph", "\u{00B6}"),
    ("periodcentered", "\u{00B7}"),
    ("middot", "\u{00B7}"),
    ("Euro", "\u{20AC}"),
    ("sterling", "\u{00A3}"),
    ("yen", "\u{00A5}"),
    ("cent", "\u{00A2}"),
    ("germandbls", "\u{00DF}"),
    ("aacute", "\u{00E1}"),
    ("agrave", "\u{00E0}"),
    ("acircumflex", "\u{00E2}"),
    ("adieresis", "\u{00E4}"),
    ("atilde", "\u{00E3}"),
    ("aring", "\u{00E5}"),
    ("ccedilla", "\u{00E7}"),
    ("eacute", "\u{00E9}"),
    ("egrave", "\u{00E8}"),
    ("ecircumflex", "\u{00EA}"),
    ("edieresis", "\u{00EB}"),
    ("iacute", "\u{00ED}"),
    ("igrave", "\u{00EC}"),
    ("icircumflex", "\u{00EE}"),
    ("idieresis", "\u{00EF}"),
    ("ntilde", "\u{00F1}"),
    ("oacute", "\u{00F3}"),
    ("ograve", "\u{00F2}"),
    ("ocircumflex", "\u{00F4}"),
    ("odieresis", "\u{00F6}"),
    ("otilde", "\u{00F5}"),
    ("oslash", "\u{00F8}"),
    ("uacute", "\u{00FA}"),
    ("ugrave", "\u{00F9}"),
    ("ucircumflex", "\u{00FB}"),
    ("udieresis", "\u{00FC}"),
    ("Aacute", "\u{00C1}"),
    ("Adieresis", "\u{00C4}"),
    ("Ccedilla", "\u{00C7}"),
    ("Eacute", "\u{00C9}"),
    ("Ntilde", "\u{00D1}"),
    ("Odieresis", "\u{00D6}"),
    ("Udieresis", "\u{00DC}"),
];
