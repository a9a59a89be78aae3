use crate::geometry::BBox;
use crate::text::Char;

/// Options for grouping characters into words.
///
/// The defaults are the tolerances the resume reader asks of its word
/// extractor: 2 units horizontally and vertically, blanks split words.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordOptions {
    /// Maximum horizontal gap between characters of the same word.
    pub x_tolerance: f64,
    /// Maximum vertical distance between characters of the same line.
    pub y_tolerance: f64,
    /// If true, blank characters become part of words instead of splitting them.
    pub keep_blank_chars: bool,
    /// If true, expand Latin ligatures (U+FB00–U+FB06) to their letter sequences.
    pub expand_ligatures: bool,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 2.0,
            y_tolerance: 2.0,
            keep_blank_chars: false,
            expand_ligatures: true,
        }
    }
}

impl WordOptions {
    /// Set both tolerances at once.
    pub fn with_tolerances(mut self, x_tolerance: f64, y_tolerance: f64) -> Self {
        self.x_tolerance = x_tolerance;
        self.y_tolerance = y_tolerance;
        self
    }

    pub fn with_keep_blank_chars(mut self, keep: bool) -> Self {
        self.keep_blank_chars = keep;
        self
    }
}

/// A word on a page: its text and where it sits.
///
/// `left` and `top` are page-relative, top-left origin, in PDF points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    /// The text content of this word.
    pub text: String,
    /// Bounding box encompassing all constituent characters.
    pub bbox: BBox,
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// A word known only by its left and top edges (zero-sized box).
    pub fn at(text: impl Into<String>, left: f64, top: f64) -> Self {
        Self::new(text, BBox::new(left, top, left, top))
    }

    /// Left edge of the word.
    pub fn left(&self) -> f64 {
        self.bbox.x0
    }

    /// Top edge of the word.
    pub fn top(&self) -> f64 {
        self.bbox.top
    }
}

/// Groups positioned characters into words.
pub struct WordExtractor;

impl WordExtractor {
    /// Extract words from the given characters.
    ///
    /// Characters are first clustered into lines: sorted by `top`, a new line
    /// starts whenever a character sits more than `y_tolerance` below the
    /// previous one. Within a line characters are read left to right and a word
    /// ends at a blank character (unless `keep_blank_chars`) or at a horizontal
    /// gap wider than `x_tolerance`.
    pub fn extract(chars: &[Char], options: &WordOptions) -> Vec<Word> {
        let mut words = Vec::new();
        for mut line in Self::cluster_lines(chars, options.y_tolerance) {
            line.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));

            let mut current: Vec<&Char> = Vec::new();
            for ch in line {
                if ch.is_blank() && !options.keep_blank_chars {
                    Self::flush(&mut current, &mut words, options);
                    continue;
                }
                if let Some(last) = current.last() {
                    if Self::should_split(last, ch, options) {
                        Self::flush(&mut current, &mut words, options);
                    }
                }
                current.push(ch);
            }
            Self::flush(&mut current, &mut words, options);
        }
        words
    }

    fn cluster_lines(chars: &[Char], y_tolerance: f64) -> Vec<Vec<&Char>> {
        let mut sorted: Vec<&Char> = chars.iter().collect();
        sorted.sort_by(|a, b| a.bbox.top.total_cmp(&b.bbox.top));

        let mut lines: Vec<Vec<&Char>> = Vec::new();
        let mut last_top = f64::NEG_INFINITY;
        for ch in sorted {
            match lines.last_mut() {
                Some(line) if ch.bbox.top - last_top <= y_tolerance => line.push(ch),
                _ => lines.push(vec![ch]),
            }
            last_top = ch.bbox.top;
        }
        lines
    }

    /// Overlapping or touching characters (gap 0) always stay together, which
    /// keeps fake-bold double strikes in one word.
    fn should_split(last: &Char, current: &Char, options: &WordOptions) -> bool {
        let x_gap =
            (last.bbox.x0.max(current.bbox.x0) - last.bbox.x1.min(current.bbox.x1)).max(0.0);
        let y_diff = (current.bbox.top - last.bbox.top).abs();
        x_gap > options.x_tolerance || y_diff > options.y_tolerance
    }

    fn flush(current: &mut Vec<&Char>, words: &mut Vec<Word>, options: &WordOptions) {
        let Some(first) = current.first() else {
            return;
        };
        let raw: String = current.iter().map(|c| c.text.as_str()).collect();
        let text = if options.expand_ligatures {
            expand_ligatures(&raw)
        } else {
            raw
        };
        let bbox = current
            .iter()
            .skip(1)
            .fold(first.bbox, |acc, c| acc.union(&c.bbox));
        words.push(Word::new(text, bbox));
        current.clear();
    }
}

/// Expand common Latin ligatures (U+FB00–U+FB06) to their multi-character equivalents.
fn expand_ligatures(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{FB00}' => result.push_str("ff"),
            '\u{FB01}' => result.push_str("fi"),
            '\u{FB02}' => result.push_str("fl"),
            '\u{FB03}' => result.push_str("ffi"),
            '\u{FB04}' => result.push_str("ffl"),
            '\u{FB05}' => result.push_str("\u{017F}t"),
            '\u{FB06}' => result.push_str("st"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_char(text: &str, x0: f64, top: f64, x1: f64, bottom: f64) -> Char {
        Char {
            text: text.to_string(),
            bbox: BBox::new(x0, top, x1, bottom),
            fontname: "TestFont".to_string(),
            size: 12.0,
            upright: true,
        }
    }

    #[test]
    fn test_default_options() {
        let opts = WordOptions::default();
        assert_eq!(opts.x_tolerance, 2.0);
        assert_eq!(opts.y_tolerance, 2.0);
        assert!(!opts.keep_blank_chars);
    }

    #[test]
    fn test_empty_chars() {
        assert!(WordExtractor::extract(&[], &WordOptions::default()).is_empty());
    }

    #[test]
    fn test_simple_horizontal_text() {
        let chars = vec![
            make_char("H", 10.0, 100.0, 20.0, 112.0),
            make_char("e", 20.0, 100.0, 30.0, 112.0),
            make_char("y", 30.0, 100.0, 40.0, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Hey");
        assert_eq!(words[0].bbox, BBox::new(10.0, 100.0, 40.0, 112.0));
        assert_eq!(words[0].left(), 10.0);
        assert_eq!(words[0].top(), 100.0);
    }

    #[test]
    fn test_split_on_space_char() {
        let chars = vec![
            make_char("A", 10.0, 100.0, 20.0, 112.0),
            make_char(" ", 20.0, 100.0, 25.0, 112.0),
            make_char("B", 25.0, 100.0, 35.0, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
    }

    #[test]
    fn test_keep_blank_chars_joins_across_spaces() {
        let chars = vec![
            make_char("A", 10.0, 100.0, 20.0, 112.0),
            make_char(" ", 20.0, 100.0, 25.0, 112.0),
            make_char("B", 25.0, 100.0, 35.0, 112.0),
        ];
        let opts = WordOptions::default().with_keep_blank_chars(true);
        let words = WordExtractor::extract(&chars, &opts);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "A B");
    }

    #[test]
    fn test_gap_larger_than_tolerance_splits() {
        let chars = vec![
            make_char("A", 10.0, 100.0, 20.0, 112.0),
            make_char("B", 23.0, 100.0, 33.0, 112.0), // gap 3 > 2
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_gap_within_tolerance_joins() {
        let chars = vec![
            make_char("A", 10.0, 100.0, 20.0, 112.0),
            make_char("B", 21.5, 100.0, 31.5, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "AB");
    }

    #[test]
    fn test_small_vertical_jitter_stays_on_one_line() {
        // Second glyph sits 1pt lower (e.g. a different font on the same baseline)
        // and is still read after the first one.
        let chars = vec![
            make_char("b", 20.0, 101.0, 30.0, 113.0),
            make_char("a", 10.0, 100.0, 20.0, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "ab");
    }

    #[test]
    fn test_multi_line_text() {
        let chars = vec![
            make_char("L", 10.0, 120.0, 20.0, 132.0),
            make_char("o", 20.0, 120.0, 30.0, 132.0),
            make_char("H", 10.0, 100.0, 20.0, 112.0),
            make_char("i", 20.0, 100.0, 30.0, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["Hi", "Lo"]);
    }

    #[test]
    fn test_overlapping_chars_stay_together() {
        let chars = vec![
            make_char("B", 10.0, 100.0, 20.0, 112.0),
            make_char("o", 10.5, 100.0, 20.5, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn test_ligature_expansion() {
        let chars = vec![
            make_char("\u{FB01}", 10.0, 100.0, 20.0, 112.0),
            make_char("x", 20.0, 100.0, 30.0, 112.0),
        ];
        let words = WordExtractor::extract(&chars, &WordOptions::default());
        assert_eq!(words[0].text, "fix");

        let opts = WordOptions {
            expand_ligatures: false,
            ..WordOptions::default()
        };
        let words = WordExtractor::extract(&chars, &opts);
        assert_eq!(words[0].text, "\u{FB01}x");
    }

    #[test]
    fn test_word_at_builds_zero_sized_box() {
        let w = Word::at("Name", 12.0, 30.0);
        assert_eq!(w.left(), 12.0);
        assert_eq!(w.top(), 30.0);
        assert_eq!(w.bbox.width(), 0.0);
    }
}
