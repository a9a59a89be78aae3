//! Content stream tokenizer.
//!
//! Splits raw (decoded) content stream bytes into [`Operator`]s, each carrying
//! the operands that preceded it. Comments are dropped and inline images
//! (`BI ... ID ... EI`) are skipped since they never contribute text.

use crate::error::BackendError;

/// A content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Integer(i64),
    Real(f64),
    /// Name without the leading `/`, `#xx` escapes decoded.
    Name(String),
    /// String bytes from a literal `(...)` or hex `<...>` string.
    Str(Vec<u8>),
    Array(Vec<Operand>),
    Boolean(bool),
    Null,
    /// Inline dictionary (`<< ... >>`), as used by `BDC`.
    Dictionary(Vec<(String, Operand)>),
}

impl Operand {
    /// Numeric value of an integer or real operand.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Operand::Integer(i) => Some(*i as f64),
            Operand::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Operand::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Operand::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// An operator and its operands, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub name: String,
    pub operands: Vec<Operand>,
}

impl Operator {
    /// The `index`-th operand as a number.
    pub fn num(&self, index: usize) -> Option<f64> {
        self.operands.get(index).and_then(Operand::as_f64)
    }
}

/// Tokenize a content stream.
///
/// # Errors
///
/// Returns [`BackendError::Interpreter`] for unterminated strings, arrays or
/// dictionaries and for stray `]`.
pub fn tokenize(input: &[u8]) -> Result<Vec<Operator>, BackendError> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut ops = Vec::new();
    let mut stack: Vec<Operand> = Vec::new();

    loop {
        lexer.skip_blank();
        let Some(b) = lexer.peek() else { break };
        match b {
            b']' => {
                return Err(BackendError::Interpreter(
                    "unexpected ']' outside array".to_string(),
                ));
            }
            _ if is_keyword_start(b) => {
                let keyword = lexer.keyword();
                match keyword.as_str() {
                    "true" => stack.push(Operand::Boolean(true)),
                    "false" => stack.push(Operand::Boolean(false)),
                    "null" => stack.push(Operand::Null),
                    "BI" => {
                        lexer.skip_inline_image();
                        stack.clear();
                    }
                    _ => ops.push(Operator {
                        name: keyword,
                        operands: std::mem::take(&mut stack),
                    }),
                }
            }
            _ => match lexer.operand()? {
                Some(operand) => stack.push(operand),
                None => lexer.pos += 1,
            },
        }
    }

    Ok(ops)
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_keyword_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'*' | b'\'' | b'"')
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn skip_blank(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'%' {
                while self.peek().is_some_and(|c| c != b'\n' && c != b'\r') {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Parse one operand at the cursor. Returns `None` for a byte that cannot
    /// start an operand (left for the caller to skip).
    fn operand(&mut self) -> Result<Option<Operand>, BackendError> {
        let Some(b) = self.peek() else {
            return Ok(None);
        };
        let operand = match b {
            b'(' => Operand::Str(self.literal_string()?),
            b'<' if self.peek_at(1) == Some(b'<') => Operand::Dictionary(self.dictionary()?),
            b'<' => Operand::Str(self.hex_string()?),
            b'[' => Operand::Array(self.array()?),
            b'/' => Operand::Name(self.name()),
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.number()?,
            _ => return Ok(None),
        };
        Ok(Some(operand))
    }

    fn literal_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1;
        let mut out = Vec::new();
        let mut depth = 1u32;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'(' => {
                    depth += 1;
                    out.push(b);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                    out.push(b);
                }
                b'\\' => self.escape(&mut out)?,
                _ => out.push(b),
            }
        }
        Err(BackendError::Interpreter(
            "unterminated literal string".to_string(),
        ))
    }

    /// Decode the escape sequence following a backslash.
    fn escape(&mut self, out: &mut Vec<u8>) -> Result<(), BackendError> {
        let Some(b) = self.peek() else {
            return Err(BackendError::Interpreter(
                "unterminated escape in literal string".to_string(),
            ));
        };
        self.pos += 1;
        match b {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            // line continuation
            b'\r' => {
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            b'\n' => {}
            b'0'..=b'7' => {
                let mut value = u32::from(b - b'0');
                for _ in 0..2 {
                    match self.peek() {
                        Some(d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                out.push((value & 0xFF) as u8);
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn hex_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1;
        let mut nibbles = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(BackendError::Interpreter(
                    "unterminated hex string".to_string(),
                ));
            };
            self.pos += 1;
            if b == b'>' {
                break;
            }
            if is_whitespace(b) {
                continue;
            }
            let nibble = hex_value(b).ok_or_else(|| {
                BackendError::Interpreter(format!("invalid hex digit: {:?}", b as char))
            })?;
            nibbles.push(nibble);
        }
        if nibbles.len() % 2 != 0 {
            nibbles.push(0);
        }
        Ok(nibbles.chunks(2).map(|p| (p[0] << 4) | p[1]).collect())
    }

    /// Parse an array. Bare keywords inside are kept as names.
    fn array(&mut self) -> Result<Vec<Operand>, BackendError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_blank();
            match self.peek() {
                None => {
                    return Err(BackendError::Interpreter("unterminated array".to_string()));
                }
                Some(b']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(b) if b.is_ascii_alphabetic() => items.push(self.bare_word()),
                Some(b) => match self.operand()? {
                    Some(operand) => items.push(operand),
                    None => {
                        return Err(BackendError::Interpreter(format!(
                            "unexpected byte in array: 0x{b:02X}"
                        )));
                    }
                },
            }
        }
    }

    fn dictionary(&mut self) -> Result<Vec<(String, Operand)>, BackendError> {
        self.pos += 2;
        let mut entries = Vec::new();
        loop {
            self.skip_blank();
            match (self.peek(), self.peek_at(1)) {
                (None, _) => {
                    return Err(BackendError::Interpreter(
                        "unterminated dictionary".to_string(),
                    ));
                }
                (Some(b'>'), Some(b'>')) => {
                    self.pos += 2;
                    return Ok(entries);
                }
                (Some(b'/'), _) => {}
                _ => {
                    return Err(BackendError::Interpreter(
                        "expected name key in dictionary".to_string(),
                    ));
                }
            }
            let key = self.name();
            self.skip_blank();
            let value = match self.peek() {
                Some(b) if b.is_ascii_alphabetic() => self.bare_word(),
                _ => self.operand()?.ok_or_else(|| {
                    BackendError::Interpreter("missing dictionary value".to_string())
                })?,
            };
            entries.push((key, value));
        }
    }

    /// `true`, `false`, `null` or any other bare word (kept as a name).
    fn bare_word(&mut self) -> Operand {
        match self.keyword().as_str() {
            "true" => Operand::Boolean(true),
            "false" => Operand::Boolean(false),
            "null" => Operand::Null,
            other => Operand::Name(other.to_string()),
        }
    }

    fn name(&mut self) -> String {
        self.pos += 1;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !is_whitespace(b) && !is_delimiter(b))
        {
            self.pos += 1;
        }
        let raw = &self.input[start..self.pos];
        let mut decoded = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'#' && i + 2 < raw.len() {
                if let (Some(hi), Some(lo)) = (hex_value(raw[i + 1]), hex_value(raw[i + 2])) {
                    decoded.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
            decoded.push(raw[i]);
            i += 1;
        }
        String::from_utf8_lossy(&decoded).into_owned()
    }

    fn number(&mut self) -> Result<Operand, BackendError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            match b {
                b'.' if !seen_dot => seen_dot = true,
                b'0'..=b'9' => {}
                _ => break,
            }
            self.pos += 1;
        }
        let token = String::from_utf8_lossy(&self.input[start..self.pos]);
        // A lone sign or dot reads as zero, as most viewers do.
        if !token.bytes().any(|b| b.is_ascii_digit()) {
            return Ok(Operand::Integer(0));
        }
        if seen_dot {
            token
                .parse::<f64>()
                .map(Operand::Real)
                .map_err(|_| BackendError::Interpreter(format!("invalid real number: {token}")))
        } else {
            token
                .parse::<i64>()
                .map(Operand::Integer)
                .map_err(|_| BackendError::Interpreter(format!("invalid integer: {token}")))
        }
    }

    fn keyword(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_keyword_start) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Skip an inline image: everything up to and including an `EI` that sits
    /// between whitespace (or the end of input) after the `ID` marker.
    fn skip_inline_image(&mut self) {
        while self.pos + 1 < self.input.len() {
            let at_id = self.input[self.pos] == b'I'
                && self.input[self.pos + 1] == b'D'
                && self.peek_at(2).is_none_or(is_whitespace)
                && self.pos > 0
                && is_whitespace(self.input[self.pos - 1]);
            self.pos += 1;
            if at_id {
                self.pos += 2;
                break;
            }
        }
        while self.pos + 1 < self.input.len() {
            let at_ei = self.input[self.pos] == b'E'
                && self.input[self.pos + 1] == b'I'
                && is_whitespace(self.input[self.pos - 1])
                && self
                    .peek_at(2)
                    .is_none_or(|b| is_whitespace(b) || is_delimiter(b));
            if at_ei {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
        self.pos = self.input.len();
    }
}
