//! Clean-up passes over assembled document text.
//!
//! [`normalize`] runs [`repair_letter_spacing`], [`space_section_headers`] and
//! [`enforce_line_structure`] in that order. Header detection relies on
//! letter-spaced headings having been rejoined first, and blank-line collapsing
//! has to see the blank lines the header pass inserted. Splitting bullets can
//! leave a new header line behind, so the passes repeat until the text stops
//! changing.

use std::sync::LazyLock;

use regex::Regex;

/// Two or more single capitals each followed by whitespace, then a final capital.
static LETTER_SPACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]\s+){2,}[A-Z]$").expect("valid pattern"));

/// A capital followed by at least two capitals, whitespace or hyphens.
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s\-]{2,}$").expect("valid pattern"));

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));

const BULLET: &str = "- ";

/// Upper bound on pass rounds; real input settles within three.
const MAX_ROUNDS: usize = 8;

/// Run all normalization passes until the text is stable.
///
/// The result is a fixed point: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_once(text);
    for _ in 1..MAX_ROUNDS {
        let next = normalize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_once(text: &str) -> String {
    let text = repair_letter_spacing(text);
    let text = space_section_headers(&text);
    enforce_line_structure(&text)
}

/// Rejoin letter-spaced headings such as `E D U C A T I O N`.
///
/// A line qualifies only if, once trimmed, it is nothing but single uppercase
/// ASCII letters separated by whitespace (at least three letters). Spaces are
/// removed from the whole line; any other line is kept as is. Lines are
/// rejoined with `\n`.
pub fn repair_letter_spacing(text: &str) -> String {
    text.lines()
        .map(|line| {
            if LETTER_SPACED.is_match(line.trim()) {
                line.replace(' ', "")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert an empty line before every line that looks like a section header.
pub fn space_section_headers(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in text.lines() {
        if SECTION_HEADER.is_match(line.trim()) {
            out.push("");
        }
        out.push(line);
    }
    out.join("\n")
}

/// Put inline `- ` bullets on their own line and cap blank runs at one line.
///
/// Every `- ` ends up at the start of a line: spaces or tabs before it are
/// dropped, and a `\n` is inserted unless one is already there. An indented
/// bullet therefore loses its indent. Runs of three or more newlines collapse
/// to two and the result is trimmed.
pub fn enforce_line_structure(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for (idx, _) in text.match_indices(BULLET) {
        out.push_str(&text[last..idx]);
        let kept = out.trim_end_matches([' ', '\t']).len();
        out.truncate(kept);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        last = idx;
    }
    out.push_str(&text[last..]);

    BLANK_LINE_RUN
        .replace_all(&out, "\n\n")
        .trim()
        .to_string()
}
