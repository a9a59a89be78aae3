//! A single extracted PDF page.

use resumetext_core::{ColumnBand, LayoutOptions, PageText, Word, partition_columns};

/// One page of a [`PdfDocument`](crate::PdfDocument): its words and its
/// reading-order text.
///
/// Word coordinates are page-relative with a top-left origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    index: usize,
    width: f64,
    height: f64,
    words: Vec<Word>,
    text: PageText,
}

impl Page {
    pub(crate) fn new(index: usize, width: f64, height: f64, words: Vec<Word>, text: PageText) -> Self {
        Self {
            index,
            width,
            height,
            words,
            text,
        }
    }

    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The page text, assembled from words or taken from the fallback.
    pub fn text(&self) -> &PageText {
        &self.text
    }

    pub fn into_text(self) -> PageText {
        self.text
    }

    /// The page's words partitioned into column bands.
    pub fn columns(&self, options: &LayoutOptions) -> Vec<ColumnBand> {
        partition_columns(&self.words, options.column_gap)
    }
}
