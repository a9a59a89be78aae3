//! `/ToUnicode` CMap parsing.
//!
//! Only the `bfchar` and `bfrange` sections matter for text extraction; code
//! space ranges and CID mappings are ignored.

use std::collections::HashMap;

/// Character code to Unicode string mapping read from a ToUnicode stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToUnicode {
    map: HashMap<u32, String>,
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Hex(&'a str),
    ArrayStart,
    ArrayEnd,
    Word(&'a str),
}

impl ToUnicode {
    /// Parse CMap stream content. Malformed entries are skipped.
    pub fn parse(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(data);
        let tokens = lex(&text);
        let mut map = HashMap::new();

        let mut i = 0;
        while i < tokens.len() {
            match tokens[i] {
                Token::Word("beginbfchar") => i = read_bfchar(&tokens, i + 1, &mut map),
                Token::Word("beginbfrange") => i = read_bfrange(&tokens, i + 1, &mut map),
                _ => i += 1,
            }
        }

        Self { map }
    }

    pub fn get(&self, code: u32) -> Option<&str> {
        self.map.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn lex(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => {
                let start = i + 1;
                let end = text[start..].find('>').map_or(bytes.len(), |e| start + e);
                tokens.push(Token::Hex(&text[start..end]));
                i = end + 1;
            }
            b'[' => {
                tokens.push(Token::ArrayStart);
                i += 1;
            }
            b']' => {
                tokens.push(Token::ArrayEnd);
                i += 1;
            }
            b'%' => {
                while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'<' | b'[' | b']' | b'%')
                {
                    i += 1;
                }
                tokens.push(Token::Word(&text[start..i]));
            }
        }
    }
    tokens
}

fn hex_code(hex: &str) -> Option<u32> {
    let digits: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Decode a UTF-16BE hex destination string.
fn hex_unicode(hex: &str) -> Option<String> {
    let digits: Vec<u8> = hex
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let units: Vec<u16> = digits
        .chunks(4)
        .map(|chunk| {
            let s = std::str::from_utf8(chunk).ok()?;
            u16::from_str_radix(s, 16).ok()
        })
        .collect::<Option<_>>()?;
    if units.is_empty() {
        return None;
    }
    Some(String::from_utf16_lossy(&units))
}

/// Add `offset` to the last UTF-16 unit of a destination, as `bfrange` does.
fn offset_unicode(base: &str, offset: u32) -> Option<String> {
    let mut units: Vec<u16> = base.encode_utf16().collect();
    let last = units.last_mut()?;
    *last = last.checked_add(u16::try_from(offset).ok()?)?;
    Some(String::from_utf16_lossy(&units))
}

fn read_bfchar(tokens: &[Token<'_>], mut i: usize, map: &mut HashMap<u32, String>) -> usize {
    while i + 1 < tokens.len() {
        match (&tokens[i], &tokens[i + 1]) {
            (Token::Hex(src), Token::Hex(dst)) => {
                if let (Some(code), Some(text)) = (hex_code(src), hex_unicode(dst)) {
                    map.insert(code, text);
                }
                i += 2;
            }
            (Token::Word("endbfchar"), _) => return i + 1,
            _ => i += 1,
        }
    }
    tokens.len()
}

fn read_bfrange(tokens: &[Token<'_>], mut i: usize, map: &mut HashMap<u32, String>) -> usize {
    while i < tokens.len() {
        if tokens[i] == Token::Word("endbfrange") {
            return i + 1;
        }
        let (Some(Token::Hex(lo)), Some(Token::Hex(hi))) = (tokens.get(i), tokens.get(i + 1))
        else {
            i += 1;
            continue;
        };
        let (Some(lo), Some(hi)) = (hex_code(lo), hex_code(hi)) else {
            i += 2;
            continue;
        };
        match tokens.get(i + 2) {
            Some(Token::Hex(dst)) => {
                if let Some(base) = hex_unicode(dst) {
                    for code in lo..=hi.min(lo.saturating_add(0xFFFF)) {
                        if let Some(text) = offset_unicode(&base, code - lo) {
                            map.insert(code, text);
                        }
                    }
                }
                i += 3;
            }
            Some(Token::ArrayStart) => {
                let mut j = i + 3;
                let mut code = lo;
                while let Some(Token::Hex(dst)) = tokens.get(j) {
                    if code <= hi {
                        if let Some(text) = hex_unicode(dst) {
                            map.insert(code, text);
                        }
                    }
                    code = code.saturating_add(1);
                    j += 1;
                }
                if tokens.get(j) == Some(&Token::ArrayEnd) {
                    j += 1;
                }
                i = j;
            }
            _ => i += 2,
        }
    }
    tokens.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOILERPLATE: &str = "/CIDInit /ProcSet findresource begin\n\
        12 dict begin\nbegincmap\n\
        /CMapName /Adobe-Identity-UCS def\n\
        1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n";

    #[test]
    fn empty_stream() {
        assert!(ToUnicode::parse(b"").is_empty());
    }

    #[test]
    fn bfchar_entries() {
        let data = format!(
            "{BOILERPLATE}3 beginbfchar\n<0003> <0020>\n<0024> <0041>\n<01> <00660069>\nendbfchar\nendcmap"
        );
        let cmap = ToUnicode::parse(data.as_bytes());
        assert_eq!(cmap.len(), 3);
        assert_eq!(cmap.get(0x03), Some(" "));
        assert_eq!(cmap.get(0x24), Some("A"));
        assert_eq!(cmap.get(0x01), Some("fi"));
        assert_eq!(cmap.get(0x99), None);
    }

    #[test]
    fn bfchar_surrogate_pair() {
        let cmap = ToUnicode::parse(b"1 beginbfchar <0001> <D83DDE00> endbfchar");
        assert_eq!(cmap.get(1), Some("\u{1F600}"));
    }

    #[test]
    fn bfrange_incrementing_destination() {
        let cmap = ToUnicode::parse(b"1 beginbfrange\n<0041> <0043> <0061>\nendbfrange");
        assert_eq!(cmap.get(0x41), Some("a"));
        assert_eq!(cmap.get(0x42), Some("b"));
        assert_eq!(cmap.get(0x43), Some("c"));
        assert_eq!(cmap.get(0x44), None);
    }

    #[test]
    fn bfrange_array_destination() {
        let cmap =
            ToUnicode::parse(b"1 beginbfrange\n<0010> <0012> [<0058> <0059> <005A>]\nendbfrange");
        assert_eq!(cmap.get(0x10), Some("X"));
        assert_eq!(cmap.get(0x11), Some("Y"));
        assert_eq!(cmap.get(0x12), Some("Z"));
    }

    #[test]
    fn multiple_sections() {
        let cmap = ToUnicode::parse(
            b"1 beginbfchar <01> <0048> endbfchar\n\
              1 beginbfrange <02> <03> <0069> endbfrange\n\
              1 beginbfchar <04> <0021> endbfchar",
        );
        assert_eq!(cmap.get(1), Some("H"));
        assert_eq!(cmap.get(2), Some("i"));
        assert_eq!(cmap.get(3), Some("j"));
        assert_eq!(cmap.get(4), Some("!"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let cmap = ToUnicode::parse(b"2 beginbfchar <zz> <0041> <05> <0042> endbfchar");
        assert_eq!(cmap.len(), 1);
        assert_eq!(cmap.get(5), Some("B"));
    }
}
