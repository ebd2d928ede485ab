//! End-to-end scenarios and cross-cutting invariants, exercised through the public API only.

use linebreak_checker::{make_checker, BreakType, ClassCriterion};

fn segments(text: &str) -> Vec<(usize, BreakType, String)> {
    let mut checker = make_checker(None, None, None, None).unwrap();
    checker.set_text(text);
    checker
        .iterate()
        .map(|s| {
            let s = s.unwrap();
            (s.index, s.break_type, s.text)
        })
        .collect()
}

#[test]
fn hello_breaker() {
    let segs = segments("Hello, breaker");
    assert_eq!(
        segs,
        vec![
            (7, BreakType::Allowed, "Hello, ".to_owned()),
            (14, BreakType::Mandatory, "breaker".to_owned()),
        ]
    );
}

#[test]
fn newline_splits_into_two_mandatory_segments() {
    let segs = segments("a\nb");
    assert_eq!(
        segs,
        vec![
            (2, BreakType::Mandatory, "a\n".to_owned()),
            (3, BreakType::Mandatory, "b".to_owned()),
        ]
    );
}

#[test]
fn crlf_is_one_hard_break() {
    let mut checker = make_checker(None, None, None, None).unwrap();
    checker.set_text("a\r\nb");
    assert_eq!(checker.is_break_at(0).unwrap(), BreakType::Forbidden);
    assert_eq!(checker.is_break_at(1).unwrap(), BreakType::Forbidden);
    assert_eq!(checker.is_break_at(2).unwrap(), BreakType::Forbidden);
    assert_eq!(checker.is_break_at(3).unwrap(), BreakType::Mandatory);
    assert_eq!(checker.is_break_at(4).unwrap(), BreakType::Mandatory);

    let segs = segments("a\r\nb");
    assert_eq!(
        segs,
        vec![
            (3, BreakType::Mandatory, "a\r\n".to_owned()),
            (4, BreakType::Mandatory, "b".to_owned()),
        ]
    );
}

#[test]
fn space_after_word_is_allowed() {
    let mut checker = make_checker(None, None, None, None).unwrap();
    checker.set_text("ab c");
    assert_eq!(checker.is_break_at(3).unwrap(), BreakType::Allowed);
}

#[test]
fn combining_mark_absorbs_into_preceding_base() {
    // No break between "a" and the combining mark, none between mark and "b": iterator only
    // yields eot.
    let segs = segments("a\u{0301}b");
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].0, 3);
    assert_eq!(segs[0].1, BreakType::Mandatory);
    assert_eq!(segs[0].2, "a\u{0301}b");
}

#[test]
fn regional_indicator_flag_pairs_allow_exactly_one_break_between_them() {
    let text = "\u{1F1EB}\u{1F1F7}\u{1F1EB}\u{1F1F7}";
    let mut checker = make_checker(None, None, None, None).unwrap();
    checker.set_text(text);
    let allowed_positions: Vec<usize> = (0..=checker.code_unit_len())
        .filter(|&p| checker.is_break_at(p).unwrap() == BreakType::Allowed)
        .collect();
    assert_eq!(allowed_positions, vec![4]);
}

#[test]
fn surrogate_pair_interior_is_always_forbidden() {
    let mut checker = make_checker(None, None, None, None).unwrap();
    checker.set_text("a\u{1F600}b");
    assert_eq!(checker.is_break_at(2).unwrap(), BreakType::Forbidden);
}

#[test]
fn boundary_verdicts() {
    let mut checker = make_checker(None, None, None, None).unwrap();
    checker.set_text("word");
    assert_eq!(checker.is_break_at(0).unwrap(), BreakType::Forbidden);
    assert_eq!(checker.is_break_at(checker.code_unit_len()).unwrap(), BreakType::Mandatory);
}

#[test]
fn set_text_is_idempotent() {
    let mut checker = make_checker(None, None, None, None).unwrap();
    let text = "Hello, breaker";
    checker.set_text(text);
    let first: Vec<_> =
        (0..=checker.code_unit_len()).map(|p| checker.is_break_at(p).unwrap()).collect();
    checker.set_text(text);
    let second: Vec<_> =
        (0..=checker.code_unit_len()).map(|p| checker.is_break_at(p).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn iterator_coverage_reconstructs_the_original_text() {
    for text in ["Hello, breaker", "a\nb", "a\r\nb", "ab ", "a\u{0301}b"] {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text(text);
        let segs: Vec<_> = checker.iterate().map(|s| s.unwrap()).collect();
        let joined: String = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, text);
        assert_eq!(segs.last().unwrap().index, checker.code_unit_len());
    }
}

#[test]
fn criterion_override_matches_manual_default_resolution() {
    use linebreak_checker::{GeneralCategory, LineBreakClass};

    let identity: Box<ClassCriterion> = Box::new(|raw, _gc| raw);
    let mut default_checker = make_checker(None, None, None, None).unwrap();
    let mut identity_checker = make_checker(None, Some(identity), None, None).unwrap();

    for text in ["Hello, breaker", "a\u{0301}b", "\u{1F1EB}\u{1F1F7}", "word café"] {
        default_checker.set_text(text);
        identity_checker.set_text(text);
        for p in 0..=default_checker.code_unit_len() {
            assert_eq!(
                default_checker.is_break_at(p).unwrap(),
                identity_checker.is_break_at(p).unwrap(),
                "mismatch at {p} in {text:?}"
            );
        }
    }

    // Sanity: the criterion receives the raw (unresolved) class/GC pair.
    let mut saw_ai = false;
    let recording: Box<ClassCriterion> = Box::new(move |raw, gc| {
        if raw == LineBreakClass::AI {
            saw_ai = true;
        }
        raw
    });
    let _ = recording(LineBreakClass::AI, GeneralCategory::Lo);
}

#[test]
fn determinism_across_repeated_checkers() {
    let text = "Hello, breaker\na\r\nb café \u{1F1EB}\u{1F1F7}";
    let mut runs = Vec::new();
    for _ in 0..3 {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text(text);
        runs.push(
            (0..=checker.code_unit_len())
                .map(|p| checker.is_break_at(p).unwrap())
                .collect::<Vec<_>>(),
        );
    }
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
}
