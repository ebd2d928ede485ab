//! The [`PatternNode`] tagged tree produced by the rule parser, and the closed set of
//! side-effect kinds a rule may carry.

use crate::class::{GeneralCategory, LineBreakClass};

/// One of the two virtual-position base patterns, or the unconditional `any` wildcard.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BaseKind {
    /// Matches unconditionally, at any index including out of range.
    Any,
    /// Matches only the virtual position before the first code point.
    Sot,
    /// Matches only the virtual position after the last code point.
    Eot,
}

/// A unary or binary pattern modifier.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ModifierKind {
    /// Unary `^`: negates the result of the following sibling.
    Not,
    /// Unary `*`: matches the following sibling zero or more times.
    Star,
    /// Binary `&`: set-only AND with the previously evaluated sibling.
    And,
    /// Binary `-`: set-only AND NOT with the previously evaluated sibling.
    AndNot,
}

impl ModifierKind {
    /// Whether this modifier is unary (precedes its operand) or binary (sits between two
    /// already-ordered operands and reads the left one's already-computed result).
    pub fn is_unary(self) -> bool {
        matches!(self, ModifierKind::Not | ModifierKind::Star)
    }
}

/// A node in the compiled pattern tree (spec §3's `Pattern`).
#[derive(Clone, Debug)]
pub enum PatternNode {
    /// `any` / `sot` / `eot`.
    Base(BaseKind),
    /// A bare Line_Break class token, e.g. `SP`.
    Class(LineBreakClass),
    /// A `gc(XX)` General_Category token.
    Gc(GeneralCategory),
    /// A `\uXXXX`–`\uXXXXXX` scalar code-point literal.
    CodePoint(u32),
    /// The `eastasian` token: membership in the East-Asian-wide set.
    EastAsian,
    /// The `extpict` token: Extended_Pictographic.
    ExtPict,
    /// A unary or binary modifier; its operand(s) are adjacent siblings, not children.
    Modifier(ModifierKind),
    /// `( ... )`: an alternation/combination list evaluated at a single position.
    Set(Vec<PatternNode>),
    /// `[ ... ]` or a rule's bare before/after content: children matched in order at
    /// consecutive positions.
    Sequence(Vec<PatternNode>),
}

impl PatternNode {
    /// True for container kinds (`Set`/`Sequence`).
    pub fn is_container(&self) -> bool {
        matches!(self, PatternNode::Set(_) | PatternNode::Sequence(_))
    }
}

/// The closed set of side effects a rule may trigger when it fails to match.
///
/// New kinds are added here, not through a dynamic callback registry, mirroring the pack's
/// preference for typed enums over runtime-typed dispatch.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SideEffectKind {
    /// Installs the combining-sequence-collapsed (LB9) view and reclassified (LB10) CM/ZWJ as
    /// the active one for the remainder of this `is_break_at` call.
    RemoveCombiningSequences,
}

/// Arguments bound to a named side effect via [`crate::Checker::register_side_effect_arguments`].
///
/// The only built-in side effect, [`SideEffectKind::RemoveCombiningSequences`], ignores its
/// arguments; the list is carried so the registration API stays meaningful if further side
/// effects are added.
pub type SideEffectArgs = Vec<String>;
