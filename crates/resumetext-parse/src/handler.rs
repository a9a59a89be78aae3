//! Callback trait through which the interpreter reports rendered glyphs.

use resumetext_core::Ctm;

/// A glyph painted by `Tj`, `TJ`, `'` or `"`.
///
/// Carries everything needed to place the glyph on the page: the text matrix
/// and CTM at the time of rendering, the text state parameters that shape the
/// glyph box, and the font metrics for its vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct CharEvent {
    /// Character code from the content stream (one or two bytes).
    pub char_code: u32,
    /// Unicode text resolved through ToUnicode or the font encoding.
    pub unicode: Option<String>,
    /// Base font name with any subset prefix removed.
    pub font_name: String,
    pub font_size: f64,
    pub text_matrix: Ctm,
    pub ctm: Ctm,
    /// Glyph width in glyph space units (1/1000 of text space).
    pub width: f64,
    /// Horizontal scaling as a fraction (1.0 = 100%).
    pub h_scaling: f64,
    pub rise: f64,
    /// Font ascent and descent in glyph space units.
    pub ascent: f64,
    pub descent: f64,
}

/// Receives interpreter output.
pub trait ContentHandler {
    fn on_char(&mut self, event: CharEvent);
}

/// Collects every event, in content stream order.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    pub chars: Vec<CharEvent>,
}

impl ContentHandler for CollectingHandler {
    fn on_char(&mut self, event: CharEvent) {
        self.chars.push(event);
    }
}
