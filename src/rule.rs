//! Rule value types: terminals, substitutions, and expectations.

use regex::Regex;

use crate::error::GrammarError;
use crate::external::ExternalId;

#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Polarity {
    Require,
    Forbid,
}

#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Expectation {
    pub polarity: Polarity,
    pub target: ExternalId,
}

impl Expectation {
    pub fn new(polarity: Polarity, target: ExternalId) -> Self {
        Expectation { polarity, target }
    }

    /// Whether `candidate` satisfies this expectation.
    pub fn holds(&self, candidate: ExternalId) -> bool {
        match self.polarity {
            Polarity::Require => candidate == self.target,
            Polarity::Forbid => candidate != self.target,
        }
    }
}

#[derive(Debug)]
pub struct TerminalRule {
    pub id: usize,
    pub ext: ExternalId,
    pub pattern_source: String,
    pub pattern: Regex,
}

impl TerminalRule {
    pub(crate) fn new(id: usize, ext: ExternalId, pattern_source: &str) -> Result<Self, GrammarError> {
        let anchored = format!("^(?:{pattern_source})");
        let pattern = Regex::new(&anchored).map_err(|source| GrammarError::BadPattern {
            external: pattern_source.to_string(),
            source,
        })?;
        Ok(TerminalRule {
            id,
            ext,
            pattern_source: pattern_source.to_string(),
            pattern,
        })
    }
}

#[derive(Debug)]
pub struct SubstitutionRule {
    pub id: usize,
    pub ext: ExternalId,
    pub body: Vec<ExternalId>,
    pub left: Option<Expectation>,
    pub right: Option<Expectation>,
}

/// Either kind of rule, tagged, for code that needs to treat both uniformly
/// (rule-name assignment).
#[derive(Debug)]
pub enum AnyRule<'a> {
    Terminal(&'a TerminalRule),
    Substitution(&'a SubstitutionRule),
}

impl<'a> AnyRule<'a> {
    pub fn id(&self) -> usize {
        match self {
            AnyRule::Terminal(r) => r.id,
            AnyRule::Substitution(r) => r.id,
        }
    }

    pub fn ext(&self) -> ExternalId {
        match self {
            AnyRule::Terminal(r) => r.ext,
            AnyRule::Substitution(r) => r.ext,
        }
    }
}
