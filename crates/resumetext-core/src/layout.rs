//! Column-aware reading-order reconstruction.
//!
//! A page's words are split into vertical column bands by their left edges,
//! each band is split into line bands by their top edges, and the page is read
//! one column at a time: column 0 top to bottom in full, then column 1, and so
//! on. This keeps a resume's sidebar and main body from being interleaved row
//! by row.

use crate::words::Word;

/// Default horizontal gap (in points) between sorted left edges that opens a new column.
pub const DEFAULT_COLUMN_GAP: f64 = 40.0;

/// Default vertical distance (in points) within which words share a line.
pub const DEFAULT_LINE_TOLERANCE: f64 = 3.0;

/// Thresholds for column detection and line grouping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// A jump between consecutive sorted left edges larger than this starts a new column.
    /// Fixed, not adaptive: a wide centered title can produce a spurious column.
    pub column_gap: f64,
    /// Words whose top is within this distance of a line's anchor join that line.
    pub line_tolerance: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            column_gap: DEFAULT_COLUMN_GAP,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
        }
    }
}

impl LayoutOptions {
    pub fn with_column_gap(mut self, column_gap: f64) -> Self {
        self.column_gap = column_gap;
        self
    }

    pub fn with_line_tolerance(mut self, line_tolerance: f64) -> Self {
        self.line_tolerance = line_tolerance;
        self
    }
}

/// Words assigned to one inferred column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnBand {
    /// Position of this column's edge among all detected edges (0 = leftmost).
    pub index: usize,
    /// The detected left edge of the column.
    pub edge: f64,
    /// Words in page order (not yet sorted).
    pub words: Vec<Word>,
}

/// Words within a column that share a text line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineBand {
    /// The `top` of the first word placed on this line. Never updated afterwards.
    pub top: f64,
    /// Words sorted left to right.
    pub words: Vec<Word>,
}

impl LineBand {
    /// The words joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Detect column edges on a page.
///
/// Left edges are sorted ascending; the first one, and every one that jumps
/// more than `column_gap` past its predecessor, becomes an edge. The result is
/// sorted and free of duplicates. A page with no words has no edges.
pub fn detect_column_edges(words: &[Word], column_gap: f64) -> Vec<f64> {
    let mut lefts: Vec<f64> = words.iter().map(Word::left).collect();
    lefts.sort_by(f64::total_cmp);

    let mut edges = Vec::new();
    let mut prev: Option<f64> = None;
    for left in lefts {
        if prev.is_none_or(|p| (left - p).abs() > column_gap) {
            edges.push(left);
        }
        prev = Some(left);
    }
    edges.sort_by(f64::total_cmp);
    edges.dedup();
    edges
}

/// Find the column a left edge belongs to.
///
/// Returns the first edge index `i` with `left < edges[i] + column_gap`, or the
/// last column when none qualifies. With closely spaced edges the first match
/// wins even if a later edge is nearer.
pub fn find_column(left: f64, edges: &[f64], column_gap: f64) -> usize {
    edges
        .iter()
        .position(|&edge| left < edge + column_gap)
        .unwrap_or_else(|| edges.len().saturating_sub(1))
}

/// Partition a page's words into column bands.
///
/// Every word lands in exactly one band. Only non-empty bands are returned,
/// ordered by their edge.
pub fn partition_columns(words: &[Word], column_gap: f64) -> Vec<ColumnBand> {
    let edges = detect_column_edges(words, column_gap);
    let mut buckets: Vec<Vec<Word>> = vec![Vec::new(); edges.len()];
    for word in words {
        let column = find_column(word.left(), &edges, column_gap);
        if let Some(bucket) = buckets.get_mut(column) {
            bucket.push(word.clone());
        }
    }

    edges
        .into_iter()
        .zip(buckets)
        .enumerate()
        .filter(|(_, (_, words))| !words.is_empty())
        .map(|(index, (edge, words))| ColumnBand { index, edge, words })
        .collect()
}

/// Group one column's words into line bands.
///
/// Words are visited in `(top, left)` order. A word joins the first existing
/// line whose anchor `top` is within `tolerance`; otherwise it anchors a new
/// line. Anchors never move, so a run of small jitters cannot drift a line
/// into its neighbour. Lines come back sorted by anchor, words by `left`.
pub fn group_lines(words: &[Word], tolerance: f64) -> Vec<LineBand> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| {
        a.top()
            .total_cmp(&b.top())
            .then(a.left().total_cmp(&b.left()))
    });

    let mut lines: Vec<LineBand> = Vec::new();
    for word in sorted {
        match lines
            .iter_mut()
            .find(|line| (word.top() - line.top).abs() <= tolerance)
        {
            Some(line) => line.words.push(word.clone()),
            None => lines.push(LineBand {
                top: word.top(),
                words: vec![word.clone()],
            }),
        }
    }

    for line in &mut lines {
        line.words.sort_by(|a, b| a.left().total_cmp(&b.left()));
    }
    lines.sort_by(|a, b| a.top.total_cmp(&b.top));
    lines
}

/// Render one column: each line trimmed and terminated by `\n`.
pub fn column_text(column: &ColumnBand, line_tolerance: f64) -> String {
    let mut out = String::new();
    for line in group_lines(&column.words, line_tolerance) {
        out.push_str(line.text().trim());
        out.push('\n');
    }
    out
}

/// Render a page's words in column-then-line reading order.
///
/// Returns an empty string when there are no words.
pub fn assemble_page(words: &[Word], options: &LayoutOptions) -> String {
    partition_columns(words, options.column_gap)
        .iter()
        .map(|column| column_text(column, options.line_tolerance))
        .collect()
}

/// The reading-order text of one page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageText {
    /// Text rebuilt from positioned words.
    Assembled(String),
    /// The extractor's unpositioned text, used when the page had no words.
    Fallback(String),
}

impl PageText {
    /// Assemble a page, or use `fallback` when `words` is empty.
    pub fn build(
        words: &[Word],
        options: &LayoutOptions,
        fallback: impl FnOnce() -> String,
    ) -> Self {
        if words.is_empty() {
            PageText::Fallback(fallback())
        } else {
            PageText::Assembled(assemble_page(words, options))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PageText::Assembled(s) | PageText::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PageText::Fallback(_))
    }
}

/// Concatenate pages into document text.
///
/// Assembled pages are followed by a separating `\n`; fallback text is
/// appended as-is. The result is trimmed.
pub fn document_text(pages: &[PageText]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(page.as_str());
        if !page.is_fallback() {
            out.push('\n');
        }
    }
    out.trim().to_string()
}
