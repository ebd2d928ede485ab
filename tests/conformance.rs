//! Conformance against the official `LineBreakTest-<version>.0.0.txt` files.
//!
//! These files are large UCD artifacts, not vendored into this crate. The test runs only when
//! one is placed at `tests/fixtures/LineBreakTest-<version>.0.0.txt`; otherwise it is skipped.
//! Use `lbc-conformance` directly to check an arbitrary file path without vendoring anything.

use std::fs;
use std::path::Path;

use linebreak_checker::{make_checker, BreakType, RuleSet, UnicodeVersion};

fn run_conformance_file(path: &Path, rules: RuleSet) {
    let contents = fs::read_to_string(path).expect("fixture file should be readable");
    let mut checker = make_checker(Some(rules), None, None, None).unwrap();
    let mut checked_lines = 0usize;

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let mut expected_breaks =
            vec![matches!(tokens.next().expect("leading verdict"), "÷")];
        let mut text = String::new();

        while let Some(hex) = tokens.next() {
            let cp = u32::from_str_radix(hex, 16).expect("hex code point");
            let ch = char::from_u32(cp).expect("valid scalar value");
            text.push(ch);
            let is_break = matches!(tokens.next().expect("trailing verdict"), "÷");
            for _ in 0..ch.len_utf16() - 1 {
                expected_breaks.push(false);
            }
            expected_breaks.push(is_break);
        }

        checker.set_text(&text);
        for (position, &expected) in expected_breaks.iter().enumerate() {
            let verdict = checker.is_break_at(position).unwrap();
            let actual = verdict.matches(BreakType::Mandatory as u8 | BreakType::Allowed as u8);
            assert_eq!(
                actual,
                expected,
                "line {}: position {position} in {text:?}",
                line_no + 1
            );
        }
        checked_lines += 1;
    }

    assert!(checked_lines > 0, "fixture contained no test lines");
}

#[test]
#[ignore = "requires a vendored LineBreakTest-16.0.0.txt fixture"]
fn conformance_v16() {
    let path = Path::new("tests/fixtures/LineBreakTest-16.0.0.txt");
    if !path.exists() {
        return;
    }
    run_conformance_file(path, RuleSet::v16().unwrap());
}

#[test]
#[ignore = "requires a vendored LineBreakTest-17.0.0.txt fixture"]
fn conformance_v17() {
    let path = Path::new("tests/fixtures/LineBreakTest-17.0.0.txt");
    if !path.exists() {
        return;
    }
    run_conformance_file(path, RuleSet::v17().unwrap());
}
