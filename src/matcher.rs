//! Pattern evaluation (`consume`) and the per-position rule matcher.
//!
//! Every leaf pattern tests a single code-point index without moving it; `sequence` and `set`
//! containers own cursor advancement, and unary modifiers (`^`, `*`) stay paired with the
//! operand they precede so a single evaluation pass can report both a boolean result and
//! (for index-consuming units) where it left the cursor.

use crate::class::GeneralCategory;
use crate::parser::Rule;
use crate::pattern::{BaseKind, ModifierKind, PatternNode};
use crate::tables::{ClassTable, EastAsianTable};
use crate::text::is_extended_pictographic;

/// Borrowed view the matcher evaluates patterns against: one text's active (possibly
/// combining-sequence-collapsed) class/code-point arrays, plus the two data tables `gc(...)`
/// and `eastasian` consult.
pub struct MatchContext<'a> {
    pub classes: &'a [crate::class::LineBreakClass],
    pub code_points: &'a [u32],
    pub class_table: &'a ClassTable,
    pub eastasian_table: &'a EastAsianTable,
}

impl MatchContext<'_> {
    fn len(&self) -> i64 {
        self.classes.len() as i64
    }

    fn general_category_at(&self, i: i64) -> Option<GeneralCategory> {
        let cp = self.code_point_at(i)?;
        Some(self.class_table.lookup(cp).1)
    }

    fn code_point_at(&self, i: i64) -> Option<u32> {
        if i < 0 || i >= self.len() {
            None
        } else {
            Some(self.code_points[i as usize])
        }
    }

    fn class_at(&self, i: i64) -> Option<crate::class::LineBreakClass> {
        if i < 0 || i >= self.len() {
            None
        } else {
            Some(self.classes[i as usize])
        }
    }
}

/// Evaluates a leaf pattern (everything except `modifier`, `set`, `sequence`) at a fixed index.
/// Never moves `i`.
fn eval_leaf(node: &PatternNode, i: i64, ctx: &MatchContext) -> bool {
    match node {
        PatternNode::Base(BaseKind::Any) => true,
        PatternNode::Base(BaseKind::Sot) => i < 0,
        PatternNode::Base(BaseKind::Eot) => i == ctx.len(),
        PatternNode::Class(c) => ctx.class_at(i) == Some(*c),
        PatternNode::Gc(g) => ctx.general_category_at(i) == Some(*g),
        PatternNode::CodePoint(cp) => ctx.code_point_at(i) == Some(*cp),
        PatternNode::EastAsian => ctx
            .code_point_at(i)
            .is_some_and(|cp| ctx.eastasian_table.contains(cp)),
        PatternNode::ExtPict => ctx
            .code_point_at(i)
            .is_some_and(|cp| is_extended_pictographic(cp, ctx.class_at(i))),
        PatternNode::Modifier(_) | PatternNode::Set(_) | PatternNode::Sequence(_) => {
            unreachable!("eval_leaf called on a non-leaf node")
        }
    }
}

/// Evaluates a non-modifier unit (leaf, `set`, or nested `sequence`) that may be an operand of
/// `^`/`*` or a plain sequence element. Returns `(result, new_index, self_advances)`: for a
/// leaf or `set`, `self_advances` is false (the caller must still advance by `step` on
/// success); for a nested `sequence`, it is true (the returned index already reflects however
/// many positions the nested sequence consumed).
fn eval_unit(node: &PatternNode, i: i64, step: i64, ctx: &MatchContext) -> (bool, i64, bool) {
    match node {
        PatternNode::Set(children) => (eval_set(children, i, step, ctx), i, false),
        PatternNode::Sequence(children) => {
            let (r, new_i) = eval_sequence(children, i, step, ctx);
            (r, new_i, true)
        }
        PatternNode::Modifier(_) => (false, i, false),
        leaf => (eval_leaf(leaf, i, ctx), i, false),
    }
}

fn eval_unit_bool(node: &PatternNode, i: i64, step: i64, ctx: &MatchContext) -> bool {
    eval_unit(node, i, step, ctx).0
}

fn step_cursor(i: i64, new_i: i64, step: i64, self_advances: bool) -> i64 {
    if self_advances {
        new_i
    } else {
        i + step
    }
}

/// `modifier *`: evaluates `operand` repeatedly, advancing the cursor between successful
/// matches, while the index stays in the strict interior `(0, n - 1)`. Always succeeds.
fn eval_star(operand: &PatternNode, i: i64, step: i64, ctx: &MatchContext) -> (bool, i64, bool) {
    let mut cur = i;
    loop {
        if !(cur > 0 && cur < ctx.len() - 1) {
            break;
        }
        let (r, new_i, sa) = eval_unit(operand, cur, step, ctx);
        if !r {
            break;
        }
        cur = step_cursor(cur, new_i, step, sa);
    }
    (true, cur, true)
}

/// Evaluates a `sequence`: children matched in order at consecutive indices, each advancing the
/// cursor by `step` (or, for a nested `sequence` child, by however far it advanced itself).
fn eval_sequence(children: &[PatternNode], i0: i64, step: i64, ctx: &MatchContext) -> (bool, i64) {
    let mut i = i0;
    let mut idx = 0;
    while idx < children.len() {
        let (result, new_i, self_advances) = match &children[idx] {
            PatternNode::Modifier(ModifierKind::Not) => {
                let operand = &children[idx + 1];
                let (r, new_i, sa) = eval_unit(operand, i, step, ctx);
                idx += 2;
                (!r, new_i, sa)
            }
            PatternNode::Modifier(ModifierKind::Star) => {
                let operand = &children[idx + 1];
                idx += 2;
                eval_star(operand, i, step, ctx)
            }
            PatternNode::Modifier(ModifierKind::And | ModifierKind::AndNot) => {
                // Binary modifiers are set-only; a well-formed rule never reaches here.
                return (false, i);
            }
            other => {
                idx += 1;
                eval_unit(other, i, step, ctx)
            }
        };
        if !result {
            return (false, i);
        }
        i = step_cursor(i, new_i, step, self_advances);
    }
    (true, i)
}

/// Evaluates a `set`: alternation over children at a single position, `&`/`-` combining a
/// child with the one immediately before it. Does not consume the index.
fn eval_set(children: &[PatternNode], i: i64, step: i64, ctx: &MatchContext) -> bool {
    let mut idx = 0;
    while idx < children.len() {
        let mut candidate = match &children[idx] {
            PatternNode::Modifier(ModifierKind::Not) => {
                let operand = &children[idx + 1];
                let r = !eval_unit_bool(operand, i, step, ctx);
                idx += 2;
                r
            }
            PatternNode::Modifier(ModifierKind::Star) => {
                let operand = &children[idx + 1];
                idx += 2;
                eval_star(operand, i, step, ctx).0
            }
            PatternNode::Modifier(ModifierKind::And | ModifierKind::AndNot) => {
                // A leading binary modifier has no left-hand side; malformed, never matches.
                idx += 1;
                false
            }
            other => {
                idx += 1;
                eval_unit_bool(other, i, step, ctx)
            }
        };

        if idx < children.len() {
            if let PatternNode::Modifier(kind @ (ModifierKind::And | ModifierKind::AndNot)) =
                &children[idx]
            {
                let is_and = *kind == ModifierKind::And;
                idx += 1;
                let rhs = &children[idx];
                idx += 1;
                let rhs_result = eval_unit_bool(rhs, i, step, ctx);
                candidate = candidate && if is_and { rhs_result } else { !rhs_result };
            }
        }

        if candidate {
            return true;
        }
    }
    false
}

/// Whether `rule` matches at break position `i` (a code-point index: `before` is evaluated
/// leftward from `i - 1`, `after` rightward from `i`).
pub fn rule_matches(rule: &Rule, i: i64, ctx: &MatchContext) -> bool {
    let before_ok = match &rule.before {
        PatternNode::Sequence(children) => eval_sequence(children, i - 1, -1, ctx).0,
        other => eval_unit_bool(other, i - 1, -1, ctx),
    };
    if !before_ok {
        return false;
    }
    match &rule.after {
        PatternNode::Sequence(children) => eval_sequence(children, i, 1, ctx).0,
        other => eval_unit_bool(other, i, 1, ctx),
    }
}
