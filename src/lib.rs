//! Computes UAX #14 line-breaking verdicts for Unicode text.
//!
//! Given a text and a code-unit position, [`Checker::is_break_at`] classifies that position as
//! FORBIDDEN, MANDATORY, ALLOWED, or UNKNOWN. [`Checker::iterate`] drives this across an entire
//! string and yields the segments between MANDATORY/ALLOWED breaks.
//!
//! The core is a small declarative rule-compiler and rule-matcher pair: UAX #14's LB1-LB31
//! statements are transliterated into a mini pattern language (`src/rules.rs`) and compiled to a
//! pattern tree (`src/parser.rs`), which a generic matcher (`src/matcher.rs`) evaluates around
//! each candidate break position.
//!
//! # Example
//!
//! ```
//! use linebreak_checker::make_checker;
//!
//! let mut checker = make_checker(None, None, None, None).unwrap();
//! checker.set_text("Hello, breaker");
//! let segments: Vec<_> = checker.iterate().collect::<Result<_, _>>().unwrap();
//! assert_eq!(segments[0].text, "Hello, ");
//! assert_eq!(segments[1].text, "breaker");
//! ```

#![deny(missing_docs, missing_debug_implementations)]

mod class;
mod error;
mod iter;
mod matcher;
mod parser;
mod pattern;
mod rules;
mod tables;
mod text;

use std::collections::HashMap;
use std::fmt;

pub use class::{BreakType, ClassCriterion, GeneralCategory, LineBreakClass};
pub use error::LbcError;
pub use iter::{Segment, Segments};
pub use parser::Rule;
pub use pattern::{BaseKind, ModifierKind, PatternNode, SideEffectArgs, SideEffectKind};
pub use rules::{RuleSet, UnicodeVersion};
pub use tables::{ClassTable, EastAsianTable};

use matcher::MatchContext;
use text::{SharedClassTable, SharedEastAsianTable, TextState};

/// Builds a [`Checker`]. Defaults: v17 rules, standard class-resolution, the v17 bundled class
/// table, and the bundled East-Asian-wide set.
///
/// `class_table_key`/`eastasian_table_key` select a bundled table by name (`"line_break-16.0.0"`,
/// `"line_break-17.0.0"`, `"east_asian_wide"`) or are read as a filesystem path when not a
/// recognised bundled key.
pub fn make_checker(
    rules: Option<RuleSet>,
    criterion: Option<Box<ClassCriterion>>,
    class_table_key: Option<&str>,
    eastasian_table_key: Option<&str>,
) -> Result<Checker, LbcError> {
    let rules = match rules {
        Some(r) => r,
        None => RuleSet::v17()?,
    };
    let class_key = class_table_key
        .map(str::to_owned)
        .unwrap_or_else(|| rules.version().default_table_key().to_owned());
    let eastasian_key = eastasian_table_key.unwrap_or("east_asian_wide");

    let class_table = tables::load_class_table(&class_key)?;
    let eastasian_table = tables::load_eastasian_table(eastasian_key)?;

    let text = TextState::new("", &class_table, criterion.as_deref());

    let mut side_effect_args = HashMap::new();
    for rule in rules.rules() {
        if let (Some(name), Some(_)) = (&rule.name, &rule.side_effect) {
            side_effect_args.entry(name.clone()).or_insert_with(Vec::new);
        }
    }

    Ok(Checker { rules, class_table, eastasian_table, criterion, side_effect_args, text })
}

/// Owns a compiled rule set, loaded data tables, and the text currently under examination.
///
/// Concurrent use of a single `Checker` from multiple threads is undefined; tables and rule sets
/// are immutable and safely shared between independently constructed checkers.
pub struct Checker {
    rules: RuleSet,
    class_table: SharedClassTable,
    eastasian_table: SharedEastAsianTable,
    criterion: Option<Box<ClassCriterion>>,
    side_effect_args: HashMap<String, SideEffectArgs>,
    text: TextState,
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("version", &self.rules.version())
            .field("text", &self.text.text())
            .field("has_criterion", &self.criterion.is_some())
            .finish()
    }
}

impl Checker {
    /// Replaces the text under examination. Resets any in-progress combining-sequence view.
    pub fn set_text(&mut self, text: &str) {
        self.text = TextState::new(text, &self.class_table, self.criterion.as_deref());
    }

    /// The current text.
    pub fn text(&self) -> &str {
        self.text.text()
    }

    /// The current text's decoded code points.
    pub fn code_points(&self) -> &[u32] {
        self.text.code_points()
    }

    /// Number of UTF-16 code units `is_break_at` accepts positions over, `[0, code_unit_len()]`.
    pub fn code_unit_len(&self) -> usize {
        self.text.code_unit_len()
    }

    /// The Unicode version this checker's rule set targets.
    pub fn version(&self) -> UnicodeVersion {
        self.rules.version()
    }

    /// Names of every rule that carries one, in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.rule_names()
    }

    /// Binds arguments for named side effects, merging into (rather than replacing) the
    /// bindings installed at construction.
    pub fn register_side_effect_arguments(&mut self, mapping: HashMap<String, SideEffectArgs>) {
        self.side_effect_args.extend(mapping);
    }

    /// Classifies `position`, a UTF-16 code-unit index in `[0, code_unit_len()]`.
    ///
    /// Evaluates the rule list in order, each rule's `before` leftward from `position - 1` and
    /// `after` rightward from `position`; the first rule whose both sides match decides the
    /// verdict. A rule that fails to match but carries a side effect has that side effect
    /// invoked before moving to the next rule.
    pub fn is_break_at(&mut self, position: usize) -> Result<BreakType, LbcError> {
        if position > self.text.code_unit_len() {
            return Err(LbcError::InvalidArgument(format!(
                "position {position} exceeds text length {}",
                self.text.code_unit_len()
            )));
        }
        if self.text.is_surrogate_interior(position) {
            return Ok(BreakType::Forbidden);
        }

        let cp_index = position - self.text.offset_surrogates(position);
        let mut result = BreakType::Unknown;

        for rule in self.rules.rules() {
            let active_i = self.text.translate_to_active(cp_index) as i64;
            let ctx = MatchContext {
                classes: self.text.classes(),
                code_points: self.text.active_code_points(),
                class_table: &self.class_table,
                eastasian_table: &self.eastasian_table,
            };
            if matcher::rule_matches(rule, active_i, &ctx) {
                result = rule.result;
                break;
            }
            if rule.side_effect.is_some() {
                self.text.activate_combining_sequence_view();
            }
        }

        self.text.deactivate_combining_sequence_view();
        Ok(result)
    }

    /// Slices `text()` between two UTF-16 code-unit positions.
    fn text_slice(&self, start: usize, end: usize) -> &str {
        let a = self.text.byte_offset(start);
        let b = self.text.byte_offset(end);
        &self.text.text()[a..b]
    }

    /// Returns an iterator yielding one [`Segment`] per MANDATORY/ALLOWED position.
    pub fn iterate(&mut self) -> Segments<'_> {
        Segments::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_verdicts_lb2_lb3() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("ab");
        assert_eq!(checker.is_break_at(0).unwrap(), BreakType::Forbidden);
        assert_eq!(checker.is_break_at(2).unwrap(), BreakType::Mandatory);
    }

    #[test]
    fn hard_break_after_bk() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("a\nb");
        assert_eq!(checker.is_break_at(2).unwrap(), BreakType::Mandatory);
    }

    #[test]
    fn cr_lf_atomicity() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("a\r\nb");
        assert_eq!(checker.is_break_at(1).unwrap(), BreakType::Forbidden);
        assert_eq!(checker.is_break_at(3).unwrap(), BreakType::Mandatory);
    }

    #[test]
    fn space_before_next_word_is_allowed_lb18() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("ab c");
        assert_eq!(checker.is_break_at(3).unwrap(), BreakType::Allowed);
    }

    #[test]
    fn combining_mark_is_absorbed_lb9() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("a\u{0301}b");
        assert_eq!(checker.is_break_at(1).unwrap(), BreakType::Forbidden);
    }

    #[test]
    fn position_out_of_range_is_invalid_argument() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("ab");
        assert!(matches!(checker.is_break_at(99), Err(LbcError::InvalidArgument(_))));
    }

    #[test]
    fn set_text_is_idempotent() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("Hello, breaker");
        let first: Vec<_> = (0..=checker.code_unit_len())
            .map(|p| checker.is_break_at(p).unwrap())
            .collect();
        checker.set_text("Hello, breaker");
        let second: Vec<_> = (0..=checker.code_unit_len())
            .map(|p| checker.is_break_at(p).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn identity_criterion_matches_default_resolution() {
        let identity: Box<ClassCriterion> = Box::new(|raw, _gc| raw);
        let mut default_checker = make_checker(None, None, None, None).unwrap();
        let mut identity_checker = make_checker(None, Some(identity), None, None).unwrap();
        for text in ["Hello, breaker", "a\u{0301}b", "ab "] {
            default_checker.set_text(text);
            identity_checker.set_text(text);
            for p in 0..=default_checker.code_unit_len() {
                assert_eq!(
                    default_checker.is_break_at(p).unwrap(),
                    identity_checker.is_break_at(p).unwrap()
                );
            }
        }
    }
}
