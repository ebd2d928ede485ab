//! Built-in rule tables transliterating UAX #14's LB2–LB31 statements into the declarative
//! rule mini-language, for the two supported Unicode versions.

use crate::error::LbcError;
use crate::parser::{compile_rule, Rule};
use crate::pattern::SideEffectKind;

/// Which Unicode version's rule set and class table a [`crate::Checker`] was built against.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnicodeVersion {
    /// Unicode 16.0. `HH` does not exist as a class; its code points remain `BA`.
    V16,
    /// Unicode 17.0. `HH` (Hebrew Hyphen) is split out of `BA`.
    V17,
}

impl UnicodeVersion {
    /// The default class/East-Asian table key for this version, as bundled under `data/`.
    pub fn default_table_key(self) -> &'static str {
        match self {
            UnicodeVersion::V16 => "line_break-16.0.0",
            UnicodeVersion::V17 => "line_break-17.0.0",
        }
    }
}

/// A named, ordered, compiled rule list for one Unicode version.
#[derive(Clone, Debug)]
pub struct RuleSet {
    version: UnicodeVersion,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The Unicode version this rule set targets.
    pub fn version(&self) -> UnicodeVersion {
        self.version
    }

    /// The compiled rules, in declaration (evaluation) order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Names of every rule that carries one, in declaration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|r| r.name.as_deref())
    }

    /// Compiles the standard Unicode 16.0 rule set.
    pub fn v16() -> Result<Self, LbcError> {
        Self::build(UnicodeVersion::V16)
    }

    /// Compiles the standard Unicode 17.0 rule set.
    pub fn v17() -> Result<Self, LbcError> {
        Self::build(UnicodeVersion::V17)
    }

    fn build(version: UnicodeVersion) -> Result<Self, LbcError> {
        let mut rules = Vec::new();
        for (name, pattern) in COMMON_PREFIX {
            rules.push(compile_rule(pattern, None, Some(name))?);
        }
        rules.push(compile_rule(
            "^ any × ^ any",
            Some(SideEffectKind::RemoveCombiningSequences),
            Some("LB9"),
        )?);
        for (name, pattern) in COMMON_MIDDLE {
            rules.push(compile_rule(pattern, None, Some(name))?);
        }
        if version == UnicodeVersion::V16 {
            rules.push(compile_rule(
                "any × ( BA - eastasian )",
                None,
                Some("LB21_BA_narrow"),
            )?);
        }
        rules.push(compile_rule("any × BA", None, Some("LB21_BA"))?);
        for (name, pattern) in COMMON_SUFFIX {
            rules.push(compile_rule(pattern, None, Some(name))?);
        }
        Ok(RuleSet { version, rules })
    }
}

/// LB2 through LB8a: unconditional hard breaks and glue that precede the LB9 combining-sequence
/// activation point.
const COMMON_PREFIX: &[(&str, &str)] = &[
    ("LB2", "sot × any"),
    ("LB3", "any ! eot"),
    ("LB4", "BK ! any"),
    ("LB5a", "CR × LF"),
    ("LB5b", "CR ! any"),
    ("LB5c", "LF ! any"),
    ("LB5d", "NL ! any"),
    ("LB6", "any × ( BK | CR | LF | NL )"),
    ("LB7a", "any × SP"),
    ("LB7b", "any × ZW"),
    ("LB8", "[ ZW * SP ] ÷ any"),
    ("LB8a", "ZWJ × any"),
];

/// LB11 through LB21 minus the version-dependent BA/East-Asian-wide interaction, which
/// [`RuleSet::build`] splices in between this block and [`COMMON_SUFFIX`].
const COMMON_MIDDLE: &[(&str, &str)] = &[
    ("LB11a", "any × WJ"),
    ("LB11b", "WJ × any"),
    ("LB12", "GL × any"),
    ("LB12a", "( ^ SP & ^ BA & ^ HY ) × GL"),
    ("LB13", "any × ( CL | CP | EX | IS | SY )"),
    ("LB14", "[ OP * SP ] × any"),
    (
        "LB15a",
        "[ ( sot | BK | CR | LF | NL | OP | QU | GL | SP | ZW ) ( QU & gc(Pi) ) * SP ] × any",
    ),
    ("LB15b", "any × ( QU & gc(Pf) )"),
    ("LB15c", "SP ÷ [ IS NU ]"),
    ("LB15d", "any × QU"),
    ("LB16", "[ ( CL | CP ) * SP ] × NS"),
    ("LB17", "[ B2 * SP ] × B2"),
    ("LB18", "SP ÷ any"),
    ("LB20a", "any ÷ CB"),
    ("LB20b", "CB ÷ any"),
];

/// LB21b through LB31: everything from the Hebrew-hyphen and ellipsis rules to the final
/// allow-everywhere catch-all. Order matters: LB31 must be last so it only fires when nothing
/// earlier matched.
const COMMON_SUFFIX: &[(&str, &str)] = &[
    ("LB21b", "any × HY"),
    ("LB21c", "any × NS"),
    ("LB21d", "BB × any"),
    ("LB21e", "[ HL ( HY | BA ) ] × any"),
    ("LB21f", "SY × HL"),
    ("LB22", "any × IN"),
    ("LB23a1", "( AL | HL ) × NU"),
    ("LB23a2", "NU × ( AL | HL )"),
    ("LB23b1", "PR × ( ID | EB | EM )"),
    ("LB23b2", "( ID | EB | EM ) × PO"),
    ("LB24a", "( PR | PO ) × ( AL | HL )"),
    ("LB24b", "( AL | HL ) × ( PR | PO )"),
    ("LB25a", "CL × PO"),
    ("LB25b", "CP × PO"),
    ("LB25c", "CL × PR"),
    ("LB25d", "CP × PR"),
    ("LB25e", "NU × PO"),
    ("LB25f", "NU × PR"),
    ("LB25g", "PO × OP"),
    ("LB25h", "PO × NU"),
    ("LB25i", "PR × OP"),
    ("LB25j", "PR × NU"),
    ("LB25k", "HY × NU"),
    ("LB25l", "IS × NU"),
    ("LB25m", "NU × NU"),
    ("LB25n", "SY × NU"),
    ("LB26a", "JL × ( JL | JV | H2 | H3 )"),
    ("LB26b", "( JV | H2 ) × ( JV | JT )"),
    ("LB26c", "( JT | H3 ) × JT"),
    ("LB27a", "( JL | JV | JT | H2 | H3 ) × IN"),
    ("LB27b", "( JL | JV | JT | H2 | H3 ) × PO"),
    ("LB27c", "PR × ( JL | JV | JT | H2 | H3 )"),
    ("LB28", "( AL | HL ) × ( AL | HL )"),
    ("LB28a1", "AP × ( AK | AS )"),
    ("LB28a2", "( AK | AS ) × ( VF | VI )"),
    ("LB28a3", "[ ( AK | AS ) VI ] × AK"),
    ("LB29", "IS × ( AL | HL )"),
    ("LB30a", "( AL | HL | NU ) × ( OP - eastasian )"),
    ("LB30b", "( CP - eastasian ) × ( AL | HL | NU )"),
    ("LB30c", "[ ( sot | ^ RI ) * [ RI RI ] RI ] × RI"),
    ("LB30d1", "EB × EM"),
    ("LB30d2", "( extpict & gc(Cn) ) × EM"),
    ("LB31", "any ÷ any"),
];
