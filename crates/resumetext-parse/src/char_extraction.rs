//! Character bounding boxes from interpreter events.
//!
//! Combines font metrics, text state and CTM into a [`Char`] whose box is in
//! top-left origin page coordinates.

use resumetext_core::{BBox, Char, Ctm, Point};

use crate::handler::CharEvent;

/// Convert a [`CharEvent`] into a [`Char`].
///
/// The text rendering matrix is `[Tfs*Th 0 0 Tfs 0 Trise] x Tm x CTM`. The glyph
/// box spans `[0, w]` horizontally and `[descent, ascent]` vertically in glyph
/// space. PDF space has its origin at the bottom left, so `y` is flipped against
/// the page box: `top = page_top - max_y`, and `x` is shifted by `page_left` so
/// that pages with a non-zero media box origin still start at 0.
pub fn char_from_event(event: &CharEvent, page_left: f64, page_top: f64) -> Char {
    let font_matrix = Ctm::new(
        event.font_size * event.h_scaling,
        0.0,
        0.0,
        event.font_size,
        0.0,
        event.rise,
    );
    let trm = font_matrix.concat(&event.text_matrix).concat(&event.ctm);

    let w = event.width / 1000.0;
    let ascent = event.ascent / 1000.0;
    let descent = event.descent / 1000.0;

    let corners = [
        trm.transform_point(Point::new(0.0, descent)),
        trm.transform_point(Point::new(w, descent)),
        trm.transform_point(Point::new(w, ascent)),
        trm.transform_point(Point::new(0.0, ascent)),
    ];

    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let bbox = BBox::new(
        min_x - page_left,
        page_top - max_y,
        max_x - page_left,
        page_top - min_y,
    );

    let upright = trm.b.abs() < 1e-6 && trm.c.abs() < 1e-6;

    let text = event.unicode.clone().unwrap_or_else(|| {
        char::from_u32(event.char_code)
            .filter(|c| !c.is_control())
            .map(String::from)
            .unwrap_or_else(|| "\u{FFFD}".to_string())
    });

    // effective size is the vertical scale of the rendering matrix
    let size = (trm.c * trm.c + trm.d * trm.d).sqrt();

    Char {
        text,
        bbox,
        fontname: event.font_name.clone(),
        size,
        upright,
    }
}
