//! The chart-parser driver: prediction, scanning, and completion.

use std::rc::Rc;

use crate::bytes::byte_length;
use crate::chart::{CompleteChart, ForwardChart};
use crate::external::ExternalId;
use crate::grammar::Grammar;
use crate::interactions::{advance, history_at_close, Advance, AdvanceError};
use crate::matches::{CompleteMatch, ForwardMatch};
use crate::rule::{AnyRule, Polarity};

pub struct Parser<'g> {
    grammar: &'g Grammar,
    input: &'g str,
    pos_byte_len: usize,
    all_externals: Vec<ExternalId>,
    completes: CompleteChart,
    forwards: ForwardChart,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar, input: &'g str) -> Self {
        Parser {
            grammar,
            input,
            pos_byte_len: byte_length(input.len() + 1),
            all_externals: grammar.externals().collect(),
            completes: CompleteChart::new(),
            forwards: ForwardChart::new(),
        }
    }

    /// Parses the full input, returning every complete match spanning it
    /// whose external matches `expect` (or any external, if `expect` is
    /// `None`). An unknown `expect` simply yields no solutions.
    pub fn parse(&mut self, expect: Option<&str>) -> Vec<Rc<CompleteMatch>> {
        let expect_id = match expect {
            Some(name) => match self.grammar.external(name) {
                Some(id) => Some(id),
                None => {
                    log::debug!("parse requested unknown external `{name}`");
                    return Vec::new();
                }
            },
            None => None,
        };

        let mut forward_queue: Vec<Rc<ForwardMatch>> = Vec::new();
        let mut complete_queue: Vec<Rc<CompleteMatch>> = Vec::new();

        for &idx in self.grammar.substitutions_for(expect_id) {
            let rule = self.grammar.substitution(idx);
            let name = self.grammar.rule_name(AnyRule::Substitution(rule)).to_vec();
            let fm = ForwardMatch::new(rule.id, rule.ext, rule.body.clone(), rule.right, 0, 0, name, vec![], None, None);
            forward_queue.push(fm);
        }

        loop {
            if let Some(fm) = forward_queue.pop() {
                self.predict(fm, &mut forward_queue, &mut complete_queue);
            } else if let Some(cm) = complete_queue.pop() {
                self.complete(cm, &mut forward_queue, &mut complete_queue);
            } else {
                break;
            }
        }

        self.completes
            .select(0, expect_id)
            .iter()
            .filter(|m| m.close == self.input.len())
            .cloned()
            .collect()
    }

    fn predict(
        &mut self,
        fm: Rc<ForwardMatch>,
        forward_queue: &mut Vec<Rc<ForwardMatch>>,
        complete_queue: &mut Vec<Rc<CompleteMatch>>,
    ) {
        if !self.forwards.add(fm.clone(), &self.all_externals) {
            return;
        }

        let awaited: Option<ExternalId> = match fm.awaited().first() {
            Some(&next) => Some(next),
            None => match fm.right {
                Some(exp) if exp.polarity == Polarity::Require => Some(exp.target),
                _ => None,
            },
        };

        let upon: Option<Rc<CompleteMatch>> = if fm.children.is_empty() {
            fm.upon.clone()
        } else {
            fm.last().and_then(|c| c.rbro.clone())
        };

        let left_context: Option<Rc<CompleteMatch>> = if fm.children.is_empty() {
            fm.lbro.clone()
        } else {
            fm.last().cloned()
        };

        log::trace!(
            "predict external={:?} close={} awaited={:?}",
            fm.external,
            fm.close,
            awaited
        );

        let candidates: Vec<Rc<CompleteMatch>> = self.completes.select(fm.close, awaited).to_vec();
        for cm in candidates {
            self.dispatch(&fm, &cm, forward_queue, complete_queue);
        }

        for &idx in self.grammar.terminals_for(awaited) {
            let rule = self.grammar.terminal(idx);
            if let Some(found) = rule.pattern.find(&self.input[fm.close..]) {
                if found.start() == 0 {
                    let close = fm.close + found.end();
                    let mut name = self.grammar.rule_name(AnyRule::Terminal(rule)).to_vec();
                    crate::bytes::write_be(fm.close, self.pos_byte_len, &mut name);
                    crate::bytes::write_be(close, self.pos_byte_len, &mut name);
                    let cm = CompleteMatch::new(rule.id, rule.ext, fm.close, close, name, vec![], None, None);
                    complete_queue.push(cm);
                }
            }
        }

        for &idx in self.grammar.substitutions_for(awaited) {
            let rule = self.grammar.substitution(idx);
            let new_lbro = if let Some(left_exp) = rule.left {
                match &left_context {
                    None => continue,
                    Some(lc) => {
                        if left_exp.holds(lc.external) {
                            Some(lc.clone())
                        } else {
                            match history_at_close(lc).into_iter().find(|m| left_exp.holds(m.external)) {
                                Some(found) => Some(found),
                                None => continue,
                            }
                        }
                    }
                }
            } else {
                left_context.clone()
            };

            let name = self.grammar.rule_name(AnyRule::Substitution(rule)).to_vec();
            let new_fm = ForwardMatch::new(
                rule.id,
                rule.ext,
                rule.body.clone(),
                rule.right,
                fm.close,
                fm.close,
                name,
                vec![],
                new_lbro,
                upon.clone(),
            );
            forward_queue.push(new_fm);
        }
    }

    fn complete(
        &mut self,
        cm: Rc<CompleteMatch>,
        forward_queue: &mut Vec<Rc<ForwardMatch>>,
        complete_queue: &mut Vec<Rc<CompleteMatch>>,
    ) {
        if !self.completes.add(cm.clone()) {
            return;
        }
        log::trace!("complete external={:?} span=[{},{})", cm.external, cm.start, cm.close);

        let waiting: Vec<Rc<ForwardMatch>> = self.forwards.select(cm.start, cm.external).to_vec();
        for fm in waiting {
            self.dispatch(&fm, &cm, forward_queue, complete_queue);
        }
    }

    fn dispatch(
        &self,
        fm: &Rc<ForwardMatch>,
        cm: &Rc<CompleteMatch>,
        forward_queue: &mut Vec<Rc<ForwardMatch>>,
        complete_queue: &mut Vec<Rc<CompleteMatch>>,
    ) {
        match advance(fm, cm) {
            Ok(Advance::Forward(new_fm)) => forward_queue.push(new_fm),
            Ok(Advance::Complete(new_cm)) => complete_queue.push(new_cm),
            Err(AdvanceError::Precondition) => {}
            Err(AdvanceError::Cyclic) => {
                log::debug!(
                    "rejected cyclic renaming external={:?} span=[{},{})",
                    fm.external,
                    fm.start,
                    cm.close
                );
            }
        }
    }
}
