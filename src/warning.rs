//! Advisory warnings attached to a gene's result: a list of message codes,
//! each optionally tied to the locus that triggered it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: WarningCode,
    pub position: Option<(String, u32)>,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    PositionMissingFromSample,
    AmbiguityCodeExpanded,
    ExcessivePermutations,
    NoStraightMatch,
}

impl Warning {
    pub fn position_missing(chrom: impl Into<String>, position: u32) -> Self {
        Warning {
            code: WarningCode::PositionMissingFromSample,
            position: Some((chrom.into(), position)),
            detail: "position missing from sample".to_string(),
        }
    }

    pub fn ambiguity_expanded(chrom: impl Into<String>, position: u32) -> Self {
        Warning {
            code: WarningCode::AmbiguityCodeExpanded,
            position: Some((chrom.into(), position)),
            detail: "ambiguity code expanded".to_string(),
        }
    }

    pub fn excessive_permutations(found: usize, cap: usize) -> Self {
        Warning {
            code: WarningCode::ExcessivePermutations,
            position: None,
            detail: format!("permutation count {found} exceeded cap {cap}"),
        }
    }

    pub fn no_straight_match() -> Self {
        Warning {
            code: WarningCode::NoStraightMatch,
            position: None,
            detail: "no straight diplotype match; falling back to combinations".to_string(),
        }
    }
}
