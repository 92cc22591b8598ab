//! Indexed, deduplicating storage for the two match chart phases.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::external::ExternalId;
use crate::matches::{CompleteMatch, ForwardMatch};
use crate::rule::Polarity;

/// Complete matches indexed by start position, with an extra `None`
/// ("any external") bucket at each position.
#[derive(Default)]
pub struct CompleteChart {
    by_position: HashMap<usize, HashMap<Option<ExternalId>, Vec<Rc<CompleteMatch>>>>,
    seen: HashSet<Rc<CompleteMatch>>,
}

impl CompleteChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `m`; returns `true` if it was not already present.
    pub fn add(&mut self, m: Rc<CompleteMatch>) -> bool {
        if !self.seen.insert(m.clone()) {
            return false;
        }
        let bucket = self.by_position.entry(m.start).or_default();
        bucket.entry(Some(m.external)).or_default().push(m.clone());
        bucket.entry(None).or_default().push(m);
        true
    }

    pub fn select(&self, position: usize, external: Option<ExternalId>) -> &[Rc<CompleteMatch>] {
        self.by_position
            .get(&position)
            .and_then(|bucket| bucket.get(&external))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn all(&self) -> impl Iterator<Item = &Rc<CompleteMatch>> {
        self.seen.iter()
    }
}

/// Forward matches indexed by close position and the external they await
/// next. A forward with a `forbid` right-expectation and no awaited
/// children fans out across every known external except the forbidden one,
/// so that `complete` finds it for any concrete completion.
#[derive(Default)]
pub struct ForwardChart {
    by_position: HashMap<usize, HashMap<ExternalId, Vec<Rc<ForwardMatch>>>>,
    any: HashMap<usize, Vec<Rc<ForwardMatch>>>,
    seen: HashSet<Rc<ForwardMatch>>,
}

impl ForwardChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fm: Rc<ForwardMatch>, all_externals: &[ExternalId]) -> bool {
        if !self.seen.insert(fm.clone()) {
            return false;
        }
        let next_awaited = fm.awaited().first().copied();
        if let Some(next) = next_awaited {
            self.by_position
                .entry(fm.close)
                .or_default()
                .entry(next)
                .or_default()
                .push(fm);
            return true;
        }
        match fm.right {
            Some(exp) => match exp.polarity {
                Polarity::Require => {
                    self.by_position
                        .entry(fm.close)
                        .or_default()
                        .entry(exp.target)
                        .or_default()
                        .push(fm);
                }
                Polarity::Forbid => {
                    let bucket = self.by_position.entry(fm.close).or_default();
                    for &candidate in all_externals {
                        if exp.holds(candidate) {
                            bucket.entry(candidate).or_default().push(fm.clone());
                        }
                    }
                }
            },
            None => {
                self.any.entry(fm.close).or_default().push(fm);
            }
        }
        true
    }

    pub fn select(&self, position: usize, external: ExternalId) -> &[Rc<ForwardMatch>] {
        self.by_position
            .get(&position)
            .and_then(|bucket| bucket.get(&external))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
