//! [`TextState`]: decoded code points, resolved classes, the LB9/LB10 combining-sequence view,
//! and the two offset arrays that translate code-unit and code-point indices between spaces.
//!
//! `position` throughout this crate's public API is a UTF-16 code-unit index, matching the
//! vocabulary ("surrogate pair") the break rules are phrased in; a Rust caller holding a
//! native `&str` can get one via `s.encode_utf16()`, the same host-encoding decoding step this
//! crate treats as a supplied collaborator rather than reimplementing UTF-16 from bytes.

use std::sync::Arc;

use crate::class::{resolve_class, ClassCriterion, LineBreakClass};
use crate::tables::{ClassTable, EastAsianTable};

/// Everything the matcher needs about one piece of text: code points, resolved classes, the
/// combining-sequence-collapsed view, and the index-translation offset arrays.
#[derive(Debug)]
pub struct TextState {
    text: String,
    code_points: Vec<u32>,
    classes: Vec<LineBreakClass>,

    classes_wo_cs: Vec<LineBreakClass>,
    codepoints_wo_cs: Vec<u32>,
    offsets_combining_seqs: Vec<usize>,

    /// `offsets_surrogates[u]` = count of low surrogates among the first `u` UTF-16 code units.
    offsets_surrogates: Vec<usize>,
    /// `surrogate_interior[u]` = whether code-unit position `u` falls strictly between the two
    /// units of a surrogate pair.
    surrogate_interior: Vec<bool>,
    /// `byte_offsets[u]` = UTF-8 byte offset into `text` of code-unit position `u`.
    byte_offsets: Vec<usize>,
    unit_len: usize,

    /// When set, the matcher consults `classes_wo_cs`/`codepoints_wo_cs` and subtracts
    /// `offsets_combining_seqs[i]` from a code-point index before reading the base arrays.
    pub apply_offset: bool,
}

/// Code point LB10 synthesises a CM/ZWJ into when it has no preceding base to absorb into:
/// U+0041 "A", which is already `Lu`, narrow, and not Extended_Pictographic, so no further
/// special-casing is needed downstream.
const LB10_SYNTHETIC_CODE_POINT: u32 = 0x41;

impl TextState {
    /// Decodes `text`, resolves classes via `table`/`criterion`, and precomputes the
    /// combining-sequence view.
    pub fn new(text: &str, table: &ClassTable, criterion: Option<&ClassCriterion>) -> Self {
        let (code_points, offsets_surrogates, surrogate_interior, byte_offsets, unit_len) =
            decode_code_points(text);
        let classes: Vec<LineBreakClass> = code_points
            .iter()
            .map(|&cp| {
                let (raw, gc) = table.lookup(cp);
                resolve_class(raw, gc, criterion)
            })
            .collect();

        let (classes_wo_cs, codepoints_wo_cs, offsets_combining_seqs) =
            build_combining_sequence_view(&classes, &code_points);

        TextState {
            text: text.to_owned(),
            code_points,
            classes,
            classes_wo_cs,
            codepoints_wo_cs,
            offsets_combining_seqs,
            offsets_surrogates,
            surrogate_interior,
            byte_offsets,
            unit_len,
            apply_offset: false,
        }
    }

    /// The original input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The decoded code-point sequence (original, not combining-sequence-collapsed).
    pub fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    /// Number of UTF-16 code units `position` ranges over, `[0, code_unit_len()]`.
    pub fn code_unit_len(&self) -> usize {
        self.unit_len
    }

    /// `offsets_surrogates[position]`: count of low surrogates among the first `position` code
    /// units.
    pub fn offset_surrogates(&self, position: usize) -> usize {
        self.offsets_surrogates[position]
    }

    /// Whether `position` falls strictly between the two code units of a surrogate pair.
    pub fn is_surrogate_interior(&self, position: usize) -> bool {
        self.surrogate_interior.get(position).copied().unwrap_or(false)
    }

    /// UTF-8 byte offset of UTF-16 code-unit `position`, for slicing `text()`.
    pub fn byte_offset(&self, position: usize) -> usize {
        self.byte_offsets[position]
    }

    /// Active class array for the current view.
    pub fn classes(&self) -> &[LineBreakClass] {
        if self.apply_offset {
            &self.classes_wo_cs
        } else {
            &self.classes
        }
    }

    /// Active code-point array for the current view.
    pub fn active_code_points(&self) -> &[u32] {
        if self.apply_offset {
            &self.codepoints_wo_cs
        } else {
            &self.code_points
        }
    }

    /// Translates a code-point index in the original sequence to one in the combining-sequence
    /// view, when that view is active.
    pub fn translate_to_active(&self, i: usize) -> usize {
        if self.apply_offset {
            i.saturating_sub(*self.offsets_combining_seqs.get(i).unwrap_or(&0))
        } else {
            i
        }
    }

    /// Activates the combining-sequence-collapsed view for the remainder of the current
    /// `is_break_at` call. Idempotent.
    pub fn activate_combining_sequence_view(&mut self) {
        self.apply_offset = true;
    }

    /// Restores the original view and clears the flag. Called once at the end of every
    /// top-level `is_break_at`.
    pub fn deactivate_combining_sequence_view(&mut self) {
        self.apply_offset = false;
    }
}

/// Decodes `text` into scalar code points and builds the UTF-16 surrogate bookkeeping: for
/// each code point, its first UTF-16 code-unit index gets `offsets_surrogates[u] = running`
/// (count of low surrogates seen so far), and for a code point requiring a surrogate pair, the
/// position between its two units is flagged in `surrogate_interior` and `running` advances.
/// `byte_offsets[u]` records the UTF-8 byte offset corresponding to code-unit position `u`, so
/// callers can slice the original `&str` by code-unit position.
/// Returns `(code_points, offsets_surrogates, surrogate_interior, byte_offsets, unit_len)`.
fn decode_code_points(text: &str) -> (Vec<u32>, Vec<usize>, Vec<bool>, Vec<usize>, usize) {
    let mut code_points = Vec::new();
    let mut offsets_surrogates = Vec::new();
    let mut surrogate_interior = Vec::new();
    let mut byte_offsets = Vec::new();
    let mut running = 0usize;
    let mut unit_idx = 0usize;

    for (byte_idx, ch) in text.char_indices() {
        let cp = ch as u32;
        let len16 = ch.len_utf16();
        ensure_len(&mut offsets_surrogates, unit_idx + 1);
        ensure_len(&mut surrogate_interior, unit_idx + 1);
        ensure_len(&mut byte_offsets, unit_idx + 1);
        offsets_surrogates[unit_idx] = running;
        byte_offsets[unit_idx] = byte_idx;
        if len16 == 2 {
            ensure_len(&mut offsets_surrogates, unit_idx + 2);
            ensure_len(&mut surrogate_interior, unit_idx + 2);
            ensure_len(&mut byte_offsets, unit_idx + 2);
            surrogate_interior[unit_idx + 1] = true;
            offsets_surrogates[unit_idx + 1] = running;
            byte_offsets[unit_idx + 1] = byte_idx;
            running += 1;
        }
        code_points.push(cp);
        unit_idx += len16;
    }
    ensure_len(&mut offsets_surrogates, unit_idx + 1);
    ensure_len(&mut surrogate_interior, unit_idx + 1);
    ensure_len(&mut byte_offsets, unit_idx + 1);
    offsets_surrogates[unit_idx] = running;
    byte_offsets[unit_idx] = text.len();

    (code_points, offsets_surrogates, surrogate_interior, byte_offsets, unit_idx)
}

fn ensure_len<T: Default + Clone>(v: &mut Vec<T>, len: usize) {
    if v.len() < len {
        v.resize(len, T::default());
    }
}

fn build_combining_sequence_view(
    classes: &[LineBreakClass],
    code_points: &[u32],
) -> (Vec<LineBreakClass>, Vec<u32>, Vec<usize>) {
    use LineBreakClass::{BK, CM, CR, LF, NL, SP, ZW, ZWJ};

    let mut out_classes = Vec::with_capacity(classes.len());
    let mut out_codepoints = Vec::with_capacity(classes.len());
    let mut offsets = Vec::with_capacity(classes.len() + 1);
    let mut running = 0usize;
    let mut prev: Option<LineBreakClass> = None;

    for (idx, (&class, &cp)) in classes.iter().zip(code_points.iter()).enumerate() {
        offsets.push(running);
        if matches!(class, CM | ZWJ) {
            let starts_fresh = idx == 0 || matches!(prev, Some(SP | BK | CR | LF | NL | ZW));
            if starts_fresh {
                out_classes.push(LineBreakClass::AL);
                out_codepoints.push(LB10_SYNTHETIC_CODE_POINT);
            } else {
                running += 1;
                prev = Some(class);
                continue;
            }
        } else {
            out_classes.push(class);
            out_codepoints.push(cp);
        }
        prev = Some(class);
    }
    offsets.push(running);
    (out_classes, out_codepoints, offsets)
}

/// Whether `code_point` has the Extended_Pictographic property.
///
/// The bundled practical-subset data set does not carry a dedicated Extended_Pictographic
/// range table; this recognises the emoji-relevant classes and the common emoji code-point
/// block, which is sufficient for the LB30b interactions this crate's rule set exercises.
pub fn is_extended_pictographic(code_point: u32, classes_hint: Option<LineBreakClass>) -> bool {
    matches!(classes_hint, Some(LineBreakClass::EB | LineBreakClass::EM))
        || (0x1F300..0x1FAFF).contains(&code_point)
}

/// Convenience alias used by [`crate::Checker`] to own its loaded tables alongside a
/// [`TextState`].
pub type SharedClassTable = Arc<ClassTable>;
/// See [`SharedClassTable`].
pub type SharedEastAsianTable = Arc<EastAsianTable>;

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ClassTable {
        let json = r#"{
            "AL": { "Lu": [[65, 91]], "Ll": [[97, 123]] },
            "CM": { "Mn": [[768, 880]] },
            "SP": { "Zs": [[32, 33]] }
        }"#;
        ClassTable::from_json_str("test", json).unwrap()
    }

    #[test]
    fn decode_ascii_has_identity_offsets() {
        let (cps, offsets, interior, byte_offsets, unit_len) = decode_code_points("ab");
        assert_eq!(cps, vec![b'a' as u32, b'b' as u32]);
        assert_eq!(offsets, vec![0, 0, 0]);
        assert_eq!(byte_offsets, vec![0, 1, 2]);
        assert!(interior.iter().all(|&b| !b));
        assert_eq!(unit_len, 2);
    }

    #[test]
    fn decode_supplementary_char_increments_offset_and_flags_interior() {
        let s = "a\u{1F600}b";
        let (cps, offsets, interior, byte_offsets, unit_len) = decode_code_points(s);
        assert_eq!(cps.len(), 3);
        assert_eq!(unit_len, 4);
        assert_eq!(*offsets.last().unwrap(), 1);
        assert_eq!(byte_offsets, vec![0, 1, 1, 5, 6]);
        assert!(interior[2]);
        assert!(!interior[0] && !interior[1] && !interior[3]);
    }

    #[test]
    fn combining_mark_after_base_is_absorbed() {
        let t = table();
        let state = TextState::new("a\u{0301}b", &t, None);
        assert_eq!(state.code_points().len(), 3);
        // Not activated yet: the original view still carries all three code points.
        assert_eq!(state.classes().len(), 3);
    }

    #[test]
    fn activation_switches_to_collapsed_view() {
        let t = table();
        let mut state = TextState::new("a\u{0301}b", &t, None);
        state.activate_combining_sequence_view();
        // "a" absorbs the following combining mark: two entries remain.
        assert_eq!(state.classes().len(), 2);
        state.deactivate_combining_sequence_view();
        assert_eq!(state.classes().len(), 3);
    }

    #[test]
    fn leading_combining_mark_is_synthesised_as_al() {
        let t = table();
        let mut state = TextState::new("\u{0301}b", &t, None);
        state.activate_combining_sequence_view();
        assert_eq!(state.classes()[0], LineBreakClass::AL);
    }
}
