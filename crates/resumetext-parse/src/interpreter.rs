//! Content stream interpreter.
//!
//! Walks tokenized operators, maintaining graphics and text state, and emits a
//! [`CharEvent`] per rendered glyph. Path painting, colours and images have no
//! bearing on text and are skipped. Form XObjects are interpreted recursively
//! via `Do`.

use std::collections::HashMap;

use lopdf::{Dictionary, Document};
use resumetext_core::Ctm;
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::fonts::LoadedFont;
use crate::handler::{CharEvent, ContentHandler};
use crate::lopdf_backend::{decode_stream, object_to_f64, resolve_ref};
use crate::state::State;
use crate::tokenizer::{Operand, Operator, tokenize};

/// Interpret one content stream.
///
/// `depth` is 0 for the page itself and grows by one for every nested Form
/// XObject; exceeding `max_depth` is an error.
pub(crate) fn interpret_content_stream(
    doc: &Document,
    stream_bytes: &[u8],
    resources: &Dictionary,
    handler: &mut dyn ContentHandler,
    max_depth: usize,
    depth: usize,
    state: &mut State,
) -> Result<(), BackendError> {
    if depth > max_depth {
        return Err(BackendError::Interpreter(format!(
            "Form XObject recursion depth {depth} exceeds limit {max_depth}"
        )));
    }

    let operators = tokenize(stream_bytes)?;
    let mut fonts: HashMap<String, LoadedFont> = HashMap::new();

    for op in &operators {
        match op.name.as_str() {
            "q" => state.save(),
            "Q" => {
                if !state.restore() {
                    warn!(depth, "unbalanced Q operator ignored");
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(op) {
                    state.concat(m);
                }
            }

            "BT" => state.begin_text(),
            "ET" => {}
            "Tf" => {
                if let Some(name) = op.operands.first().and_then(Operand::as_name) {
                    load_font(doc, resources, name, &mut fonts);
                    let text = state.text_mut();
                    text.font = name.to_string();
                    text.font_size = op.num(1).unwrap_or(0.0);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operands(op) {
                    state.set_text_matrix(m);
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.num(0), op.num(1)) {
                    state.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.num(0), op.num(1)) {
                    state.move_line_set_leading(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "Tc" => set_param(op, |s, v| s.text_mut().char_spacing = v, state),
            "Tw" => set_param(op, |s, v| s.text_mut().word_spacing = v, state),
            "Tz" => set_param(op, |s, v| s.text_mut().h_scaling = v, state),
            "TL" => set_param(op, |s, v| s.text_mut().leading = v, state),
            "Ts" => set_param(op, |s, v| s.text_mut().rise = v, state),
            "Tr" => set_param(op, |s, v| s.text_mut().render_mode = v as i64, state),

            "Tj" => {
                if let Some(bytes) = op.operands.first().and_then(Operand::as_bytes) {
                    let font = current_font(doc, resources, state, &mut fonts);
                    show_string(bytes, font, state, handler);
                }
            }
            "TJ" => {
                if let Some(Operand::Array(items)) = op.operands.first() {
                    let font = current_font(doc, resources, state, &mut fonts);
                    show_positioned(items, font, state, handler);
                }
            }
            "'" => {
                state.next_line();
                if let Some(bytes) = op.operands.first().and_then(Operand::as_bytes) {
                    let font = current_font(doc, resources, state, &mut fonts);
                    show_string(bytes, font, state, handler);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac)) = (op.num(0), op.num(1)) {
                    let text = state.text_mut();
                    text.word_spacing = aw;
                    text.char_spacing = ac;
                }
                state.next_line();
                if let Some(bytes) = op.operands.get(2).and_then(Operand::as_bytes) {
                    let font = current_font(doc, resources, state, &mut fonts);
                    show_string(bytes, font, state, handler);
                }
            }

            "Do" => {
                if let Some(name) = op.operands.first().and_then(Operand::as_name) {
                    handle_do(doc, resources, handler, max_depth, depth, state, name)?;
                }
            }

            _ => {}
        }
    }

    Ok(())
}

fn matrix_operands(op: &Operator) -> Option<Ctm> {
    let mut m = [0.0; 6];
    for (i, slot) in m.iter_mut().enumerate() {
        *slot = op.num(i)?;
    }
    Some(Ctm::from_array(m))
}

fn set_param(op: &Operator, apply: impl FnOnce(&mut State, f64), state: &mut State) {
    if let Some(v) = op.num(0) {
        apply(state, v);
    }
}

fn load_font(
    doc: &Document,
    resources: &Dictionary,
    name: &str,
    cache: &mut HashMap<String, LoadedFont>,
) {
    if cache.contains_key(name) {
        return;
    }

    let dict = resources
        .get(b"Font")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|fonts| fonts.get(name.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok());

    let font = match dict {
        Some(dict) => LoadedFont::from_dict(doc, dict, name),
        None => {
            warn!(font = name, "font not found in resources, using default metrics");
            LoadedFont::missing(name)
        }
    };
    cache.insert(name.to_string(), font);
}

/// The font selected by the last `Tf`, loading it on first use.
fn current_font<'c>(
    doc: &Document,
    resources: &Dictionary,
    state: &State,
    cache: &'c mut HashMap<String, LoadedFont>,
) -> &'c LoadedFont {
    let name = state.text().font.clone();
    load_font(doc, resources, &name, cache);
    cache
        .entry(name)
        .or_insert_with_key(|key| LoadedFont::missing(key))
}

fn emit_glyph(code: u32, font: &LoadedFont, state: &mut State, handler: &mut dyn ContentHandler) {
    let params = state.text();
    let width = font.width(code);
    let h_scaling = params.h_scaling / 100.0;
    let mut tx = width / 1000.0 * params.font_size + params.char_spacing;
    if !font.is_composite() && code == 32 {
        tx += params.word_spacing;
    }
    tx *= h_scaling;

    handler.on_char(CharEvent {
        char_code: code,
        unicode: font.decode(code),
        font_name: font.base_name.clone(),
        font_size: params.font_size,
        text_matrix: state.text_matrix(),
        ctm: state.ctm(),
        width,
        h_scaling,
        rise: params.rise,
        ascent: font.metrics().ascent(),
        descent: font.metrics().descent(),
    });

    state.advance(tx);
}

fn show_string(bytes: &[u8], font: &LoadedFont, state: &mut State, handler: &mut dyn ContentHandler) {
    for code in font.codes(bytes) {
        emit_glyph(code, font, state, handler);
    }
}

/// `TJ`: strings interleaved with adjustments in thousandths of an em.
fn show_positioned(
    items: &[Operand],
    font: &LoadedFont,
    state: &mut State,
    handler: &mut dyn ContentHandler,
) {
    for item in items {
        match item {
            Operand::Str(bytes) => show_string(bytes, font, state, handler),
            other => {
                if let Some(adjust) = other.as_f64() {
                    let params = state.text();
                    let tx = -(adjust / 1000.0) * params.font_size * (params.h_scaling / 100.0);
                    state.advance(tx);
                }
            }
        }
    }
}

fn handle_do(
    doc: &Document,
    resources: &Dictionary,
    handler: &mut dyn ContentHandler,
    max_depth: usize,
    depth: usize,
    state: &mut State,
    name: &str,
) -> Result<(), BackendError> {
    let stream = resources
        .get(b"XObject")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|xobjects| xobjects.get(name.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_stream().ok());

    let Some(stream) = stream else {
        warn!(xobject = name, "XObject not found in resources, skipping");
        return Ok(());
    };

    let subtype = stream
        .dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        .unwrap_or(b"");

    match subtype {
        b"Form" => {}
        b"Image" => return Ok(()),
        other => {
            warn!(
                xobject = name,
                subtype = %String::from_utf8_lossy(other),
                "unknown XObject subtype, skipping"
            );
            return Ok(());
        }
    }

    debug!(xobject = name, depth = depth + 1, "entering form XObject");

    let content = decode_stream(stream).map_err(|e| {
        BackendError::Interpreter(format!("failed to decode Form XObject /{name}: {e}"))
    })?;

    let form_resources = stream
        .dict
        .get(b"Resources")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .unwrap_or(resources);

    state.save();
    if let Some(m) = form_matrix(stream) {
        state.concat(m);
    }
    let result = interpret_content_stream(
        doc,
        &content,
        form_resources,
        handler,
        max_depth,
        depth + 1,
        state,
    );
    state.restore();
    result
}

fn form_matrix(stream: &lopdf::Stream) -> Option<Ctm> {
    let arr = stream.dict.get(b"Matrix").ok()?.as_array().ok()?;
    if arr.len() != 6 {
        return None;
    }
    let mut m = [0.0; 6];
    for (slot, obj) in m.iter_mut().zip(arr) {
        *slot = object_to_f64(obj).ok()?;
    }
    Some(Ctm::from_array(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::CollectingHandler;
    use lopdf::{Object, dictionary};

    fn run(content: &[u8], resources: &Dictionary, doc: &Document) -> CollectingHandler {
        let mut handler = CollectingHandler::default();
        let mut state = State::new();
        interpret_content_stream(doc, content, resources, &mut handler, 10, 0, &mut state)
            .unwrap();
        handler
    }

    fn helvetica_resources(doc: &mut Document) -> Dictionary {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        dictionary! {
            "Font" => Object::Dictionary(dictionary! { "F1" => font_id }),
        }
    }

    fn text(handler: &CollectingHandler) -> String {
        handler
            .chars
            .iter()
            .map(|c| c.unicode.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn tj_emits_one_event_per_glyph() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(b"BT /F1 12 Tf 72 700 Td (Hi) Tj ET", &res, &doc);
        assert_eq!(h.chars.len(), 2);
        assert_eq!(h.chars[0].char_code, u32::from(b'H'));
        assert_eq!(h.chars[0].font_name, "Helvetica");
        assert_eq!(h.chars[0].font_size, 12.0);
        assert_eq!(h.chars[0].text_matrix.e, 72.0);
        // default width 600 at 12pt advances 7.2
        assert!((h.chars[1].text_matrix.e - 79.2).abs() < 1e-9);
    }

    #[test]
    fn tj_array_adjustments_move_glyphs() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(b"BT /F1 10 Tf [(A) -1000 (B)] TJ ET", &res, &doc);
        assert_eq!(text(&h), "AB");
        // 6.0 for A, then 10.0 from the adjustment
        assert!((h.chars[1].text_matrix.e - 16.0).abs() < 1e-9);
    }

    #[test]
    fn word_spacing_applies_to_space_only() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(b"BT /F1 10 Tf 5 Tw (a b) Tj ET", &res, &doc);
        let xs: Vec<f64> = h.chars.iter().map(|c| c.text_matrix.e).collect();
        assert_eq!(xs, vec![0.0, 6.0, 17.0]);
    }

    #[test]
    fn quote_operators_move_to_next_line() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(
            b"BT /F1 10 Tf 14 TL 72 700 Td (a) Tj (b) ' 1 2 (c) \" ET",
            &res,
            &doc,
        );
        assert_eq!(text(&h), "abc");
        assert_eq!(h.chars[1].text_matrix.f, 686.0);
        assert_eq!(h.chars[2].text_matrix.f, 672.0);
        assert_eq!(h.chars[2].text_matrix.e, 72.0);
    }

    #[test]
    fn graphics_state_is_restored_by_q() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(
            b"q 2 0 0 2 0 0 cm BT /F1 10 Tf (a) Tj ET Q BT /F1 10 Tf (b) Tj ET",
            &res,
            &doc,
        );
        assert_eq!(h.chars[0].ctm.a, 2.0);
        assert_eq!(h.chars[1].ctm, Ctm::identity());
    }

    #[test]
    fn unbalanced_q_is_tolerated() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(b"Q Q BT /F1 10 Tf (x) Tj ET", &res, &doc);
        assert_eq!(h.chars.len(), 1);
    }

    #[test]
    fn missing_font_falls_back_to_defaults() {
        let doc = Document::with_version("1.5");
        let h = run(b"BT /F9 10 Tf (x) Tj ET", &Dictionary::new(), &doc);
        assert_eq!(h.chars.len(), 1);
        assert_eq!(h.chars[0].font_name, "F9");
        assert_eq!(h.chars[0].width, 600.0);
    }

    #[test]
    fn invisible_text_is_still_reported() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(b"BT 3 Tr /F1 10 Tf (ocr) Tj ET", &res, &doc);
        assert_eq!(text(&h), "ocr");
    }

    #[test]
    fn horizontal_scaling_is_a_fraction_in_events() {
        let mut doc = Document::with_version("1.5");
        let res = helvetica_resources(&mut doc);
        let h = run(b"BT /F1 10 Tf 50 Tz (ab) Tj ET", &res, &doc);
        assert_eq!(h.chars[0].h_scaling, 0.5);
        assert!((h.chars[1].text_matrix.e - 3.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_xobject_is_skipped() {
        let doc = Document::with_version("1.5");
        let h = run(b"/Nope Do", &Dictionary::new(), &doc);
        assert!(h.chars.is_empty());
    }

    #[test]
    fn recursion_limit_is_enforced() {
        let mut handler = CollectingHandler::default();
        let mut state = State::new();
        let doc = Document::with_version("1.5");
        let err =
            interpret_content_stream(&doc, b"", &Dictionary::new(), &mut handler, 2, 3, &mut state)
                .unwrap_err();
        assert!(err.to_string().contains("recursion depth"));
    }
}
