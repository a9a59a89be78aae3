//! Extraction options for the whole pipeline.

use std::path::PathBuf;

use resumetext_core::{ExtractError, LayoutOptions, WordOptions};

/// Default limit on nested Form XObjects.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 10;

/// Options controlling extraction, from glyph grouping to page assembly.
///
/// `Default` gives the tuning the resume reader was built with: words split at
/// 2-unit gaps, columns at 40-unit gaps, lines within 3 units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractOptions {
    pub layout: LayoutOptions,
    pub words: WordOptions,
    /// Maximum nesting of Form XObjects before extraction fails.
    pub max_recursion_depth: usize,
    /// Reject inputs larger than this many bytes.
    pub max_input_bytes: Option<usize>,
    /// Directory for the spooled upload; the OS temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
    /// Process pages on the rayon pool (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            words: WordOptions::default(),
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            max_input_bytes: None,
            temp_dir: None,
            parallel: false,
        }
    }
}

impl ExtractOptions {
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_words(mut self, words: WordOptions) -> Self {
        self.words = words;
        self
    }

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enforce `max_input_bytes` on an input of `len` bytes.
    pub fn check_input_size(&self, len: usize) -> Result<(), ExtractError> {
        match self.max_input_bytes {
            Some(limit) if len > limit => Err(ExtractError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: limit,
                actual_value: len,
            }),
            _ => Ok(()),
        }
    }
}
