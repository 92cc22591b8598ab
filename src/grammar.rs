//! Grammar construction: a fallible builder producing an immutable [`Grammar`].

use std::collections::HashMap;

use crate::bytes::{byte_length, write_be};
use crate::error::GrammarError;
use crate::external::{ExternalId, ExternalTable};
use crate::rule::{AnyRule, Expectation, SubstitutionRule, TerminalRule};

/// Accumulates rules, assigning each a rule-name once the full count is
/// known.
#[derive(Default)]
pub struct GrammarBuilder {
    externals: ExternalTable,
    terminals: Vec<TerminalRule>,
    substitutions: Vec<SubstitutionRule>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> ExternalId {
        self.externals.intern(name)
    }

    pub fn add_terminal(&mut self, ext: &str, pattern: &str) -> Result<ExternalId, GrammarError> {
        let ext_id = self.externals.intern(ext);
        let id = self.terminals.len() + self.substitutions.len();
        let rule = TerminalRule::new(id, ext_id, pattern)?;
        self.terminals.push(rule);
        Ok(ext_id)
    }

    pub fn add_substitution(
        &mut self,
        ext: &str,
        body: &[&str],
        left: Option<(crate::rule::Polarity, &str)>,
        right: Option<(crate::rule::Polarity, &str)>,
    ) -> Result<ExternalId, GrammarError> {
        if body.is_empty() {
            return Err(GrammarError::EmptyBody {
                external: ext.to_string(),
            });
        }
        let ext_id = self.externals.intern(ext);
        let body_ids: Vec<ExternalId> = body.iter().map(|b| self.externals.intern(b)).collect();
        let left = left.map(|(polarity, target)| Expectation::new(polarity, self.externals.intern(target)));
        let right = right.map(|(polarity, target)| Expectation::new(polarity, self.externals.intern(target)));
        let id = self.terminals.len() + self.substitutions.len();
        self.substitutions.push(SubstitutionRule {
            id,
            ext: ext_id,
            body: body_ids,
            left,
            right,
        });
        Ok(ext_id)
    }

    pub fn build(self) -> Grammar {
        let total_rules = self.terminals.len() + self.substitutions.len();
        let name_len = byte_length(total_rules.max(1));
        let mut rule_names = vec![Vec::new(); total_rules];
        for rule in self.terminals.iter() {
            let mut name = Vec::with_capacity(name_len);
            write_be(rule.id, name_len, &mut name);
            rule_names[rule.id] = name;
        }
        for rule in self.substitutions.iter() {
            let mut name = Vec::with_capacity(name_len);
            write_be(rule.id, name_len, &mut name);
            rule_names[rule.id] = name;
        }

        let mut terminals_by_ext: HashMap<Option<ExternalId>, Vec<usize>> = HashMap::new();
        for (i, rule) in self.terminals.iter().enumerate() {
            terminals_by_ext.entry(Some(rule.ext)).or_default().push(i);
            terminals_by_ext.entry(None).or_default().push(i);
        }

        let mut substitutions_by_ext: HashMap<Option<ExternalId>, Vec<usize>> = HashMap::new();
        for (i, rule) in self.substitutions.iter().enumerate() {
            substitutions_by_ext.entry(Some(rule.ext)).or_default().push(i);
            substitutions_by_ext.entry(None).or_default().push(i);
        }

        log::debug!(
            "built grammar: {} terminal rules, {} substitution rules, {} externals",
            self.terminals.len(),
            self.substitutions.len(),
            self.externals.len()
        );

        Grammar {
            externals: self.externals,
            terminals: self.terminals,
            substitutions: self.substitutions,
            rule_names,
            terminals_by_ext,
            substitutions_by_ext,
        }
    }
}

/// An immutable, validated grammar ready to drive a parse.
pub struct Grammar {
    pub(crate) externals: ExternalTable,
    pub(crate) terminals: Vec<TerminalRule>,
    pub(crate) substitutions: Vec<SubstitutionRule>,
    rule_names: Vec<Vec<u8>>,
    terminals_by_ext: HashMap<Option<ExternalId>, Vec<usize>>,
    substitutions_by_ext: HashMap<Option<ExternalId>, Vec<usize>>,
}

impl Grammar {
    pub fn external(&self, name: &str) -> Option<ExternalId> {
        self.externals.lookup(name)
    }

    pub fn external_name(&self, id: ExternalId) -> &str {
        self.externals.name(id)
    }

    pub fn externals(&self) -> impl Iterator<Item = ExternalId> + '_ {
        self.externals.ids()
    }

    pub fn rule_name(&self, rule: AnyRule<'_>) -> &[u8] {
        &self.rule_names[rule.id()]
    }

    pub fn terminals_for(&self, awaited: Option<ExternalId>) -> &[usize] {
        self.terminals_by_ext
            .get(&awaited)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn substitutions_for(&self, awaited: Option<ExternalId>) -> &[usize] {
        self.substitutions_by_ext
            .get(&awaited)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn terminal(&self, index: usize) -> &TerminalRule {
        &self.terminals[index]
    }

    pub fn substitution(&self, index: usize) -> &SubstitutionRule {
        &self.substitutions[index]
    }
}
