//! Graphics and text state tracked by the interpreter.
//!
//! Only the parts of the PDF graphics state that move glyphs are modelled:
//! the current transformation matrix and the text state parameters set by
//! `Tc`, `Tw`, `Tz`, `TL`, `Tf`, `Tr` and `Ts`. Colours, line styles and
//! clipping play no role in reading order and are ignored.

use resumetext_core::Ctm;

/// Text state parameters. Saved and restored by `q`/`Q` with the rest of the
/// graphics state; the text and line matrices are not.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParams {
    pub char_spacing: f64,
    pub word_spacing: f64,
    /// Horizontal scaling in percent (100 = normal).
    pub h_scaling: f64,
    pub leading: f64,
    /// Resource name of the current font (e.g. `F1`).
    pub font: String,
    pub font_size: f64,
    /// `Tr` value; 3 is invisible text, which is still extracted.
    pub render_mode: i64,
    pub rise: f64,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 100.0,
            leading: 0.0,
            font: String::new(),
            font_size: 0.0,
            render_mode: 0,
            rise: 0.0,
        }
    }
}

/// One entry of the graphics state stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsState {
    pub ctm: Ctm,
    pub text: TextParams,
}

/// The graphics state stack plus the text object matrices.
#[derive(Debug, Clone, Default)]
pub struct State {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
    text_matrix: Ctm,
    line_matrix: Ctm,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    pub fn text(&self) -> &TextParams {
        &self.current.text
    }

    pub fn text_mut(&mut self) -> &mut TextParams {
        &mut self.current.text
    }

    pub fn ctm(&self) -> Ctm {
        self.current.ctm
    }

    pub fn text_matrix(&self) -> Ctm {
        self.text_matrix
    }

    /// Number of saved states (`q` without matching `Q`).
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// `q`
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// `Q`. Returns `false` if there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    /// `cm`: the new matrix applies before the current one.
    pub fn concat(&mut self, m: Ctm) {
        self.current.ctm = m.concat(&self.current.ctm);
    }

    /// `BT`
    pub fn begin_text(&mut self) {
        self.text_matrix = Ctm::identity();
        self.line_matrix = Ctm::identity();
    }

    /// `Tm`: replaces both text matrices.
    pub fn set_text_matrix(&mut self, m: Ctm) {
        self.text_matrix = m;
        self.line_matrix = m;
    }

    /// `Td`: offset from the start of the current line.
    pub fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Ctm::new(1.0, 0.0, 0.0, 1.0, tx, ty).concat(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    /// `TD`: like `Td`, also setting the leading to `-ty`.
    pub fn move_line_set_leading(&mut self, tx: f64, ty: f64) {
        self.current.text.leading = -ty;
        self.move_line(tx, ty);
    }

    /// `T*`
    pub fn next_line(&mut self) {
        let leading = self.current.text.leading;
        self.move_line(0.0, -leading);
    }

    /// Advance the text matrix by `tx` text space units after a glyph.
    pub fn advance(&mut self, tx: f64) {
        self.text_matrix = Ctm::new(1.0, 0.0, 0.0, 1.0, tx, 0.0).concat(&self.text_matrix);
    }
}
