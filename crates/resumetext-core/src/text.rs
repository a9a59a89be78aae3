use crate::geometry::BBox;

/// A single character extracted from a PDF page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Char {
    /// The text content of this character (may be more than one code point for ligatures).
    pub text: String,
    /// Bounding box in top-left origin coordinates.
    pub bbox: BBox,
    /// Font name with any subset prefix removed.
    pub fontname: String,
    /// Effective font size in points.
    pub size: f64,
    /// Whether the character is upright (not rotated).
    pub upright: bool,
}

impl Char {
    /// Returns `true` if the character is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}
