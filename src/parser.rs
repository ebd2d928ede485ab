//! Tokeniser and rule compiler: turns a declarative rule string into a [`Rule`] with its
//! `before`/`after` [`PatternNode`] trees canonicalised and the `before` side reversed into
//! backward-traversal order.

use crate::class::{BreakType, GeneralCategory, LineBreakClass};
use crate::error::LbcError;
use crate::pattern::{BaseKind, ModifierKind, PatternNode, SideEffectKind};

/// A single compiled rule: `before × after`, `before ! after` or `before ÷ after`.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Pattern evaluated backward from `position - 1`, already in traversal order.
    pub before: PatternNode,
    /// Pattern evaluated forward from `position`.
    pub after: PatternNode,
    /// Verdict produced when both sides match.
    pub result: BreakType,
    /// Side effect invoked when this rule fails to match.
    pub side_effect: Option<SideEffectKind>,
    /// Optional rule name, used to register side-effect arguments and for diagnostics.
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Verdict(BreakType),
    Any,
    Sot,
    Eot,
    EastAsian,
    ExtPict,
    Modifier(ModifierKind),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Pipe,
    CodePoint(u32),
    Gc(GeneralCategory),
    Class(LineBreakClass),
}

fn tokenize(rule_name: Option<&str>, s: &str) -> Result<Vec<Token>, LbcError> {
    s.split_whitespace()
        .map(|w| tokenize_one(rule_name, w))
        .collect()
}

fn tokenize_one(rule_name: Option<&str>, w: &str) -> Result<Token, LbcError> {
    match w {
        "×" => return Ok(Token::Verdict(BreakType::Forbidden)),
        "!" => return Ok(Token::Verdict(BreakType::Mandatory)),
        "÷" => return Ok(Token::Verdict(BreakType::Allowed)),
        "any" => return Ok(Token::Any),
        "sot" => return Ok(Token::Sot),
        "eot" => return Ok(Token::Eot),
        "eastasian" => return Ok(Token::EastAsian),
        "extpict" => return Ok(Token::ExtPict),
        "^" => return Ok(Token::Modifier(ModifierKind::Not)),
        "*" => return Ok(Token::Modifier(ModifierKind::Star)),
        "&" => return Ok(Token::Modifier(ModifierKind::And)),
        "-" => return Ok(Token::Modifier(ModifierKind::AndNot)),
        "(" => return Ok(Token::LParen),
        ")" => return Ok(Token::RParen),
        "[" => return Ok(Token::LBracket),
        "]" => return Ok(Token::RBracket),
        "|" => return Ok(Token::Pipe),
        _ => {}
    }

    if let Some(hex) = w.strip_prefix("\\u") {
        if (4..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let cp = u32::from_str_radix(hex, 16)
                .map_err(|e| LbcError::parse(rule_name, format!("bad \\u literal {w:?}: {e}")))?;
            return Ok(Token::CodePoint(cp));
        }
    }

    if let Some(inner) = w.strip_prefix("gc(").and_then(|r| r.strip_suffix(')')) {
        return GeneralCategory::parse(inner)
            .map(Token::Gc)
            .ok_or_else(|| LbcError::parse(rule_name, format!("unknown general category {w:?}")));
    }

    if (2..=3).contains(&w.len()) && w.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        if let Some(class) = LineBreakClass::parse(w) {
            return Ok(Token::Class(class));
        }
    }

    Err(LbcError::parse(rule_name, format!("unrecognised token {w:?}")))
}

struct Frame {
    is_set: bool,
    items: Vec<PatternNode>,
}

/// Parses and compiles one `(pattern_string, side_effect, name)` rule.
pub fn compile_rule(
    pattern: &str,
    side_effect: Option<SideEffectKind>,
    name: Option<&str>,
) -> Result<Rule, LbcError> {
    let tokens = tokenize(name, pattern)?;

    let mut stack: Vec<Frame> = vec![Frame { is_set: false, items: Vec::new() }];
    let mut before: Option<PatternNode> = None;
    let mut result: Option<BreakType> = None;

    for tok in tokens {
        match tok {
            Token::LParen => stack.push(Frame { is_set: true, items: Vec::new() }),
            Token::LBracket => stack.push(Frame { is_set: false, items: Vec::new() }),
            Token::RParen => {
                let frame = pop_frame(&mut stack, name, true)?;
                push_item(&mut stack, PatternNode::Set(frame.items));
            }
            Token::RBracket => {
                let frame = pop_frame(&mut stack, name, false)?;
                push_item(&mut stack, PatternNode::Sequence(frame.items));
            }
            Token::Pipe => { /* default join within a set; carries no tree node */ }
            Token::Verdict(v) => {
                if stack.len() != 1 {
                    return Err(LbcError::parse(name, "unbalanced brackets before verdict"));
                }
                if before.is_some() {
                    return Err(LbcError::parse(name, "more than one verdict symbol"));
                }
                let content = std::mem::take(&mut stack[0].items);
                before = Some(PatternNode::Sequence(content));
                result = Some(v);
            }
            Token::Any => push_item(&mut stack, PatternNode::Base(BaseKind::Any)),
            Token::Sot => push_item(&mut stack, PatternNode::Base(BaseKind::Sot)),
            Token::Eot => push_item(&mut stack, PatternNode::Base(BaseKind::Eot)),
            Token::EastAsian => push_item(&mut stack, PatternNode::EastAsian),
            Token::ExtPict => push_item(&mut stack, PatternNode::ExtPict),
            Token::Modifier(m) => push_item(&mut stack, PatternNode::Modifier(m)),
            Token::CodePoint(cp) => push_item(&mut stack, PatternNode::CodePoint(cp)),
            Token::Gc(gc) => push_item(&mut stack, PatternNode::Gc(gc)),
            Token::Class(c) => push_item(&mut stack, PatternNode::Class(c)),
        }
    }

    if stack.len() != 1 {
        return Err(LbcError::parse(name, "unbalanced brackets"));
    }
    let before = before.ok_or_else(|| LbcError::parse(name, "rule has no verdict symbol"))?;
    let result = result.expect("verdict set together with before");
    let after_content = std::mem::take(&mut stack[0].items);
    if after_content.is_empty() {
        return Err(LbcError::parse(name, "empty after-side"));
    }
    if !sequence_nonempty(&before) {
        return Err(LbcError::parse(name, "empty before-side"));
    }
    let after = PatternNode::Sequence(after_content);

    let before = reverse_before(canonicalize(before));
    let after = canonicalize(after);

    Ok(Rule { before, after, result, side_effect, name: name.map(str::to_owned) })
}

fn sequence_nonempty(n: &PatternNode) -> bool {
    !matches!(n, PatternNode::Sequence(v) if v.is_empty())
}

fn pop_frame(stack: &mut Vec<Frame>, name: Option<&str>, expect_set: bool) -> Result<Frame, LbcError> {
    let frame = stack.pop().ok_or_else(|| LbcError::parse(name, "unbalanced closing bracket"))?;
    if frame.is_set != expect_set {
        return Err(LbcError::parse(name, "mismatched bracket kind"));
    }
    Ok(frame)
}

fn push_item(stack: &mut [Frame], item: PatternNode) {
    stack.last_mut().expect("stack always has a root frame").items.push(item);
}

/// Flattens a `sequence`/`set` whose sole child is a container of the same kind.
fn canonicalize(node: PatternNode) -> PatternNode {
    match node {
        PatternNode::Sequence(mut items) => {
            items = items.into_iter().map(canonicalize).collect();
            if let [PatternNode::Sequence(inner)] = items.as_mut_slice() {
                PatternNode::Sequence(std::mem::take(inner))
            } else {
                PatternNode::Sequence(items)
            }
        }
        PatternNode::Set(mut items) => {
            items = items.into_iter().map(canonicalize).collect();
            if let [PatternNode::Set(inner)] = items.as_mut_slice() {
                PatternNode::Set(std::mem::take(inner))
            } else {
                PatternNode::Set(items)
            }
        }
        other => other,
    }
}

/// Reverses every `sequence` node in the tree into backward-traversal order, keeping a unary
/// modifier adjacent to (and preceding) its operand.
///
/// The children of a `sequence` are first grouped into units — a standalone item, or a
/// `(modifier, operand)` pair when an item is a unary modifier — and the *units* are reversed,
/// so a modifier/operand pair travels together instead of being torn apart by a naive reversal.
fn reverse_before(node: PatternNode) -> PatternNode {
    match node {
        PatternNode::Sequence(items) => {
            let items: Vec<PatternNode> = items.into_iter().map(reverse_before).collect();
            let mut units: Vec<Vec<PatternNode>> = Vec::new();
            let mut i = 0;
            while i < items.len() {
                if let PatternNode::Modifier(m) = &items[i] {
                    if m.is_unary() && i + 1 < items.len() {
                        units.push(vec![items[i].clone(), items[i + 1].clone()]);
                        i += 2;
                        continue;
                    }
                }
                units.push(vec![items[i].clone()]);
                i += 1;
            }
            units.reverse();
            PatternNode::Sequence(units.into_iter().flatten().collect())
        }
        PatternNode::Set(items) => PatternNode::Set(items),
        other => other,
    }
}
