//! [`BreakType`], [`LineBreakClass`], [`GeneralCategory`] and the LB1 class resolution step.

/// Verdict for a candidate break position.
///
/// Values are powers of two so that a caller can test for either of two verdicts with a single
/// bitmask, e.g. `verdict as u8 & (BreakType::Mandatory as u8 | BreakType::Allowed as u8)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum BreakType {
    /// No rule decided a verdict for this position.
    #[default]
    Unknown = 0,
    /// A break is never allowed here.
    Forbidden = 1,
    /// A break must occur here.
    Mandatory = 2,
    /// A break may occur here.
    Allowed = 4,
}

impl BreakType {
    /// Returns whether `self` is one of the verdicts set in `mask`.
    ///
    /// ```
    /// use linebreak_checker::BreakType;
    /// assert!(BreakType::Allowed.matches(BreakType::Mandatory as u8 | BreakType::Allowed as u8));
    /// assert!(!BreakType::Forbidden.matches(BreakType::Mandatory as u8 | BreakType::Allowed as u8));
    /// ```
    pub fn matches(self, mask: u8) -> bool {
        (self as u8) & mask != 0
    }
}

/// Unicode Line_Break class, including the unresolved values (`AI`, `SG`, `XX`, `SA`, `CJ`)
/// carried for data-table fidelity. Only resolved classes (see [`resolve_class`]) ever reach
/// the matcher.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum LineBreakClass {
    AL, HL, NU, SP, BK, CR, LF, NL, ZW, ZWJ, CM, GL, WJ, CL, CP, EX, SY, OP, QU, IS, NS, BA, BB,
    HY, HH, CB, IN, PR, PO, ID, EB, EM, JL, JV, JT, H2, H3, RI, AK, AS, AP, VF, VI, AI, SG, XX,
    SA, CJ, B2,
}

impl LineBreakClass {
    /// Parses a bare class identifier token (`"AL"`, `"NU"`, ...). Returns `None` for anything
    /// else, including the reserved keywords (`any`, `sot`, ...) which are not classes.
    pub fn parse(token: &str) -> Option<Self> {
        use LineBreakClass::*;
        Some(match token {
            "AL" => AL, "HL" => HL, "NU" => NU, "SP" => SP, "BK" => BK, "CR" => CR, "LF" => LF,
            "NL" => NL, "ZW" => ZW, "ZWJ" => ZWJ, "CM" => CM, "GL" => GL, "WJ" => WJ, "CL" => CL,
            "CP" => CP, "EX" => EX, "SY" => SY, "OP" => OP, "QU" => QU, "IS" => IS, "NS" => NS,
            "BA" => BA, "BB" => BB, "HY" => HY, "HH" => HH, "CB" => CB, "IN" => IN, "PR" => PR,
            "PO" => PO, "ID" => ID, "EB" => EB, "EM" => EM, "JL" => JL, "JV" => JV, "JT" => JT,
            "H2" => H2, "H3" => H3, "RI" => RI, "AK" => AK, "AS" => AS, "AP" => AP, "VF" => VF,
            "VI" => VI, "AI" => AI, "SG" => SG, "XX" => XX, "SA" => SA, "CJ" => CJ, "B2" => B2,
            _ => return None,
        })
    }

    /// Two/three-letter abbreviation, as used in data tables and rule strings.
    pub fn as_str(self) -> &'static str {
        use LineBreakClass::*;
        match self {
            AL => "AL", HL => "HL", NU => "NU", SP => "SP", BK => "BK", CR => "CR", LF => "LF",
            NL => "NL", ZW => "ZW", ZWJ => "ZWJ", CM => "CM", GL => "GL", WJ => "WJ", CL => "CL",
            CP => "CP", EX => "EX", SY => "SY", OP => "OP", QU => "QU", IS => "IS", NS => "NS",
            BA => "BA", BB => "BB", HY => "HY", HH => "HH", CB => "CB", IN => "IN", PR => "PR",
            PO => "PO", ID => "ID", EB => "EB", EM => "EM", JL => "JL", JV => "JV", JT => "JT",
            H2 => "H2", H3 => "H3", RI => "RI", AK => "AK", AS => "AS", AP => "AP", VF => "VF",
            VI => "VI", AI => "AI", SG => "SG", XX => "XX", SA => "SA", CJ => "CJ", B2 => "B2",
        }
    }
}

/// Unicode General_Category. Only a handful of values are ever consulted by rules
/// (`Pi`, `Pf`, `Mn`, `Mc`, `Cn`), but the full set is carried for data-table fidelity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum GeneralCategory {
    Lu, Ll, Lt, Lm, Lo, Mn, Mc, Me, Nd, Nl, No, Pc, Pd, Ps, Pe, Pi, Pf, Po, Sm, Sc, Sk, So, Zs,
    Zl, Zp, Cc, Cf, Cs, Co, Cn,
}

impl GeneralCategory {
    /// Parses a two-letter General_Category tag (`"Lu"`, `"Mn"`, ...).
    pub fn parse(token: &str) -> Option<Self> {
        use GeneralCategory::*;
        Some(match token {
            "Lu" => Lu, "Ll" => Ll, "Lt" => Lt, "Lm" => Lm, "Lo" => Lo, "Mn" => Mn, "Mc" => Mc,
            "Me" => Me, "Nd" => Nd, "Nl" => Nl, "No" => No, "Pc" => Pc, "Pd" => Pd, "Ps" => Ps,
            "Pe" => Pe, "Pi" => Pi, "Pf" => Pf, "Po" => Po, "Sm" => Sm, "Sc" => Sc, "Sk" => Sk,
            "So" => So, "Zs" => Zs, "Zl" => Zl, "Zp" => Zp, "Cc" => Cc, "Cf" => Cf, "Cs" => Cs,
            "Co" => Co, "Cn" => Cn,
            _ => return None,
        })
    }

    /// Two-letter abbreviation.
    pub fn as_str(self) -> &'static str {
        use GeneralCategory::*;
        match self {
            Lu => "Lu", Ll => "Ll", Lt => "Lt", Lm => "Lm", Lo => "Lo", Mn => "Mn", Mc => "Mc",
            Me => "Me", Nd => "Nd", Nl => "Nl", No => "No", Pc => "Pc", Pd => "Pd", Ps => "Ps",
            Pe => "Pe", Pi => "Pi", Pf => "Pf", Po => "Po", Sm => "Sm", Sc => "Sc", Sk => "Sk",
            So => "So", Zs => "Zs", Zl => "Zl", Zp => "Zp", Cc => "Cc", Cf => "Cf", Cs => "Cs",
            Co => "Co", Cn => "Cn",
        }
    }
}

/// Default fallback for a code point absent from the class table: `AL`/`Cn`. A non-fatal data
/// error per the taxonomy in the crate's error handling design.
pub const CLASS_DATA_ERROR_FALLBACK: (LineBreakClass, GeneralCategory) =
    (LineBreakClass::AL, GeneralCategory::Cn);

/// A caller-supplied override of the default LB1 class resolution (§4.2 / §4.6).
pub type ClassCriterion = dyn Fn(LineBreakClass, GeneralCategory) -> LineBreakClass + Send + Sync;

/// Applies UAX #14 §6.1 resolution to a raw (class, General_Category) pair, or defers to
/// `criterion` if one was supplied at checker construction.
///
/// - `AI`, `SG`, `XX` resolve to `AL`.
/// - `SA` resolves to `CM` when its General_Category is `Mn` or `Mc`, else to `AL`.
/// - `CJ` resolves to `NS`.
/// - every other class passes through unchanged.
pub fn resolve_class(
    raw: LineBreakClass,
    gc: GeneralCategory,
    criterion: Option<&ClassCriterion>,
) -> LineBreakClass {
    if let Some(f) = criterion {
        return f(raw, gc);
    }
    default_resolve(raw, gc)
}

fn default_resolve(raw: LineBreakClass, gc: GeneralCategory) -> LineBreakClass {
    use GeneralCategory::{Mc, Mn};
    use LineBreakClass::*;
    match raw {
        AI | SG | XX => AL,
        SA => {
            if matches!(gc, Mn | Mc) {
                CM
            } else {
                AL
            }
        }
        CJ => NS,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolution_matches_lb1() {
        assert_eq!(default_resolve(LineBreakClass::AI, GeneralCategory::Lo), LineBreakClass::AL);
        assert_eq!(default_resolve(LineBreakClass::SG, GeneralCategory::Cs), LineBreakClass::AL);
        assert_eq!(default_resolve(LineBreakClass::XX, GeneralCategory::Cn), LineBreakClass::AL);
        assert_eq!(default_resolve(LineBreakClass::CJ, GeneralCategory::Lo), LineBreakClass::NS);
        assert_eq!(default_resolve(LineBreakClass::SA, GeneralCategory::Mn), LineBreakClass::CM);
        assert_eq!(default_resolve(LineBreakClass::SA, GeneralCategory::Mc), LineBreakClass::CM);
        assert_eq!(default_resolve(LineBreakClass::SA, GeneralCategory::Lo), LineBreakClass::AL);
        assert_eq!(default_resolve(LineBreakClass::AL, GeneralCategory::Lu), LineBreakClass::AL);
    }

    #[test]
    fn identity_criterion_matches_manual_substitution() {
        // Property 9: an identity criterion plus manual LB1 substitution at the call site
        // should agree with the default resolver.
        let identity: &ClassCriterion = &|raw, _gc| raw;
        for (raw, gc) in [
            (LineBreakClass::AI, GeneralCategory::Lo),
            (LineBreakClass::SA, GeneralCategory::Mn),
            (LineBreakClass::CJ, GeneralCategory::Lo),
        ] {
            let substituted = match raw {
                LineBreakClass::AI | LineBreakClass::SG | LineBreakClass::XX => LineBreakClass::AL,
                LineBreakClass::SA if matches!(gc, GeneralCategory::Mn | GeneralCategory::Mc) => {
                    LineBreakClass::CM
                }
                LineBreakClass::SA => LineBreakClass::AL,
                LineBreakClass::CJ => LineBreakClass::NS,
                other => other,
            };
            assert_eq!(resolve_class(substituted, gc, Some(identity)), default_resolve(raw, gc));
        }
    }
}
