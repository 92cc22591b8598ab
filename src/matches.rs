//! The match algebra: immutable, canonically-identified parse nodes.
//!
//! Equality and hashing are defined purely on the three derived byte
//! strings (`crepr`, `lrepr`, `rrepr`); every other field is metadata kept
//! for traversal. This mirrors a frozen dataclass whose `__eq__`/`__hash__`
//! only considers a subset of its fields.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::external::ExternalId;
use crate::interactions::{wrapping_span, Side};
use crate::rule::Expectation;

/// A completed derivation: every child of `rule`'s body has been matched.
#[derive(Debug)]
pub struct CompleteMatch {
    pub rule_id: usize,
    pub external: ExternalId,
    pub start: usize,
    pub close: usize,
    pub name: Vec<u8>,
    pub children: Vec<Rc<CompleteMatch>>,
    pub lbro: Option<Rc<CompleteMatch>>,
    pub rbro: Option<Rc<CompleteMatch>>,
    crepr: Vec<u8>,
    lrepr: Vec<u8>,
    rrepr: Vec<u8>,
}

impl CompleteMatch {
    pub fn new(
        rule_id: usize,
        external: ExternalId,
        start: usize,
        close: usize,
        name: Vec<u8>,
        children: Vec<Rc<CompleteMatch>>,
        lbro: Option<Rc<CompleteMatch>>,
        rbro: Option<Rc<CompleteMatch>>,
    ) -> Rc<CompleteMatch> {
        let crepr = central_repr(&name, &children);
        let lrepr = left_repr(&lbro, None);
        let own_rb = rbro.clone().or_else(|| children.last().and_then(|c| c.rbro.clone()));
        let rrepr = right_repr(&own_rb);
        Rc::new(CompleteMatch {
            rule_id,
            external,
            start,
            close,
            name,
            children,
            lbro,
            rbro,
            crepr,
            lrepr,
            rrepr,
        })
    }

    pub fn first(&self) -> Option<&Rc<CompleteMatch>> {
        self.children.first()
    }

    pub fn last(&self) -> Option<&Rc<CompleteMatch>> {
        self.children.last()
    }

    /// Self, then `self.first()`, recursively, while each step has exactly
    /// one child (a pure unit-renaming chain).
    pub fn wrapping_history(self: &Rc<Self>) -> Vec<Rc<CompleteMatch>> {
        let mut out = vec![self.clone()];
        let mut current = self.clone();
        while current.children.len() == 1 {
            let next = current.children[0].clone();
            out.push(next.clone());
            current = next;
        }
        out
    }

    pub fn crepr(&self) -> &[u8] {
        &self.crepr
    }

    /// Length of the unit-renaming chain starting at `self` (1 for a node
    /// that is not itself a wrapper).
    pub fn wrapping_depth(self: &Rc<Self>) -> usize {
        self.wrapping_history().len()
    }

    /// Structured summary of wrapping-history externals along `side` of
    /// `self`, for introspecting cyclic-renaming structure from outside the
    /// crate.
    pub fn wrapping_span(self: &Rc<Self>, side: Side) -> Vec<HashSet<ExternalId>> {
        wrapping_span(self, side)
    }
}

impl PartialEq for CompleteMatch {
    fn eq(&self, other: &Self) -> bool {
        self.crepr == other.crepr && self.lrepr == other.lrepr && self.rrepr == other.rrepr
    }
}
impl Eq for CompleteMatch {}

impl Hash for CompleteMatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.crepr.hash(state);
        self.lrepr.hash(state);
        self.rrepr.hash(state);
    }
}

/// A partial derivation still awaiting children.
#[derive(Debug)]
pub struct ForwardMatch {
    pub rule_id: usize,
    pub external: ExternalId,
    pub body: Vec<ExternalId>,
    pub right: Option<Expectation>,
    pub start: usize,
    pub close: usize,
    pub name: Vec<u8>,
    pub children: Vec<Rc<CompleteMatch>>,
    pub lbro: Option<Rc<CompleteMatch>>,
    pub upon: Option<Rc<CompleteMatch>>,
    crepr: Vec<u8>,
    lrepr: Vec<u8>,
    rrepr: Vec<u8>,
}

impl ForwardMatch {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rule_id: usize,
        external: ExternalId,
        body: Vec<ExternalId>,
        right: Option<Expectation>,
        start: usize,
        close: usize,
        name: Vec<u8>,
        children: Vec<Rc<CompleteMatch>>,
        lbro: Option<Rc<CompleteMatch>>,
        upon: Option<Rc<CompleteMatch>>,
    ) -> Rc<ForwardMatch> {
        let crepr = central_repr(&name, &children);
        let lrepr = left_repr(&lbro, upon.as_ref());
        let own_rb = children.last().and_then(|c| c.rbro.clone());
        let rrepr = right_repr(&own_rb);
        Rc::new(ForwardMatch {
            rule_id,
            external,
            body,
            right,
            start,
            close,
            name,
            children,
            lbro,
            upon,
            crepr,
            lrepr,
            rrepr,
        })
    }

    pub fn awaited(&self) -> &[ExternalId] {
        &self.body[self.children.len()..]
    }

    pub fn last(&self) -> Option<&Rc<CompleteMatch>> {
        self.children.last()
    }
}

impl PartialEq for ForwardMatch {
    fn eq(&self, other: &Self) -> bool {
        self.crepr == other.crepr && self.lrepr == other.lrepr && self.rrepr == other.rrepr
    }
}
impl Eq for ForwardMatch {}

impl Hash for ForwardMatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.crepr.hash(state);
        self.lrepr.hash(state);
        self.rrepr.hash(state);
    }
}

fn central_repr(name: &[u8], children: &[Rc<CompleteMatch>]) -> Vec<u8> {
    let mut out = name.to_vec();
    for child in children {
        out.extend_from_slice(child.crepr());
    }
    out
}

fn left_repr(lbro: &Option<Rc<CompleteMatch>>, upon: Option<&Rc<CompleteMatch>>) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(lb) = lbro {
        out.extend_from_slice(&lb.lrepr);
        out.extend_from_slice(&lb.crepr);
    }
    if let Some(u) = upon {
        out.extend_from_slice(&u.crepr);
    }
    out
}

fn right_repr(rb: &Option<Rc<CompleteMatch>>) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(rb) = rb {
        out.extend_from_slice(&rb.crepr);
        out.extend_from_slice(&rb.rrepr);
    }
    out
}
