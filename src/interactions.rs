//! The pure functions driving match advancement: concatenation
//! compatibility, forward-match feeding/settlement, and cyclic-renaming
//! detection.
//!
//! `feed`'s left-brother inheritance deliberately applies its `upon` check
//! and its `lbro` check independently when the forward match has no
//! children yet — not as an if/else-if chain. Both guards are evaluated
//! and both must pass if applicable.

use std::collections::HashSet;
use std::rc::Rc;

use crate::external::ExternalId;
use crate::matches::{CompleteMatch, ForwardMatch};

#[derive(Debug)]
pub enum AdvanceError {
    /// A required precondition (concatenation compatibility, context
    /// match, unmet expectation) did not hold. Not a hard error: the
    /// driver simply discards the candidate.
    Precondition,
    /// Promotion would produce a pointless cyclic renaming.
    Cyclic,
}

#[derive(Debug)]
pub enum Advance {
    Forward(Rc<ForwardMatch>),
    Complete(Rc<CompleteMatch>),
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
    NoneSide,
    Both,
}

fn history_contains(history: &[Rc<CompleteMatch>], target: &Rc<CompleteMatch>) -> bool {
    history.iter().any(|m| **m == **target)
}

fn history_index(history: &[Rc<CompleteMatch>], target: &Rc<CompleteMatch>) -> Option<usize> {
    history.iter().position(|m| **m == **target)
}

/// `self`, then `self.last()`, recursively, down to the terminal at `close`.
pub fn history_at_close(m: &Rc<CompleteMatch>) -> Vec<Rc<CompleteMatch>> {
    let mut out = vec![m.clone()];
    let mut current = m.clone();
    while let Some(last) = current.last().cloned() {
        out.push(last.clone());
        current = last;
    }
    out
}

/// `self`, then `self.first()`, recursively, down to the terminal at `start`.
pub fn history_at_start(m: &Rc<CompleteMatch>) -> Vec<Rc<CompleteMatch>> {
    let mut out = vec![m.clone()];
    let mut current = m.clone();
    while let Some(first) = current.first().cloned() {
        out.push(first.clone());
        current = first;
    }
    out
}

/// Whether `left` may be immediately followed by `right`, honoring any
/// context requirements either side carries.
pub fn can_concat(left: &Rc<CompleteMatch>, right: &Rc<CompleteMatch>) -> bool {
    let left_req = left.rbro.clone();
    let right_req = right.lbro.clone();
    let left_history = history_at_close(left);
    let right_history = history_at_start(right);

    match (left_req, right_req) {
        (None, None) => true,
        (None, Some(rr)) => history_contains(&left_history, &rr),
        (Some(lr), None) => history_contains(&right_history, &lr),
        (Some(lr), Some(rr)) => {
            if history_contains(&right_history, &lr) && history_contains(&left_history, &rr) {
                let left_oldest = left_history
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.rbro.as_ref().map(|r| **r == *lr).unwrap_or(false))
                    .map(|(i, _)| i)
                    .max();
                let left_needed = history_index(&left_history, &rr);
                let right_oldest = right_history
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.lbro.as_ref().map(|l| **l == *rr).unwrap_or(false))
                    .map(|(i, _)| i)
                    .max();
                let right_needed = history_index(&right_history, &lr);

                match (left_oldest, left_needed, right_oldest, right_needed) {
                    (Some(lo), Some(ln), Some(ro), Some(rn)) => {
                        if lo < ln {
                            rn <= ro
                        } else {
                            ro < rn
                        }
                    }
                    _ => false,
                }
            } else {
                false
            }
        }
    }
}

/// Structured summary of wrapping-history externals along one or both
/// sides of `m`, used only for cyclic-renaming comparisons.
pub fn wrapping_span(m: &Rc<CompleteMatch>, side: Side) -> Vec<HashSet<ExternalId>> {
    let central: HashSet<ExternalId> = m.wrapping_history().iter().map(|w| w.external).collect();

    if side == Side::NoneSide {
        return vec![central];
    }

    let left = if side != Side::Right {
        m.lbro.as_ref().map(|lb| wrapping_span(lb, Side::Left))
    } else {
        None
    };
    let right = if side != Side::Left {
        m.rbro.as_ref().map(|rb| wrapping_span(rb, Side::Right))
    } else {
        None
    };

    let mut out = Vec::new();
    if let Some(l) = left {
        out.extend(l);
    }
    out.push(central);
    if let Some(r) = right {
        out.extend(r);
    }
    out
}

/// Dispatches to [`settle`] or [`feed`] depending on whether `fm` still
/// awaits a child.
pub fn advance(fm: &Rc<ForwardMatch>, cm: &Rc<CompleteMatch>) -> Result<Advance, AdvanceError> {
    if fm.awaited().is_empty() {
        settle(fm, cm).map(Advance::Complete)
    } else {
        feed(fm, cm)
    }
}

/// Complete a forward match by right context alone (no child consumed).
pub fn settle(fm: &Rc<ForwardMatch>, cm: &Rc<CompleteMatch>) -> Result<Rc<CompleteMatch>, AdvanceError> {
    if !fm.awaited().is_empty() {
        return Err(AdvanceError::Precondition);
    }
    let right = fm.right.ok_or(AdvanceError::Precondition)?;
    if !right.holds(cm.external) {
        return Err(AdvanceError::Precondition);
    }
    let last = fm.last().ok_or(AdvanceError::Precondition)?;
    if !can_concat(last, cm) {
        return Err(AdvanceError::Precondition);
    }
    Ok(CompleteMatch::new(
        fm.rule_id,
        fm.external,
        fm.start,
        fm.close,
        fm.name.clone(),
        fm.children.clone(),
        fm.lbro.clone(),
        Some(cm.clone()),
    ))
}

/// Consume `cm` as the next awaited child of `fm`, attempting promotion to
/// a complete match if that empties `awaited`.
pub fn feed(fm: &Rc<ForwardMatch>, cm: &Rc<CompleteMatch>) -> Result<Advance, AdvanceError> {
    let awaited = fm.awaited();
    if awaited.is_empty() || awaited[0] != cm.external || fm.close != cm.start {
        return Err(AdvanceError::Precondition);
    }

    let mut left_brother = fm.lbro.clone();
    if !fm.children.is_empty() {
        let last = fm.last().expect("non-empty children");
        if !can_concat(last, cm) {
            return Err(AdvanceError::Precondition);
        }
    } else {
        if let Some(upon) = &fm.upon {
            if !history_contains(&history_at_start(cm), upon) {
                return Err(AdvanceError::Precondition);
            }
        }
        if let Some(lb) = &fm.lbro {
            if !can_concat(lb, cm) {
                return Err(AdvanceError::Precondition);
            }
            left_brother = Some(lb.clone());
        } else {
            left_brother = cm.lbro.clone();
        }
    }

    let mut children = fm.children.clone();
    children.push(cm.clone());
    let new_fm = ForwardMatch::new(
        fm.rule_id,
        fm.external,
        fm.body.clone(),
        fm.right,
        fm.start,
        cm.close,
        fm.name.clone(),
        children,
        left_brother,
        fm.upon.clone(),
    );

    match try_promote(&new_fm, cm) {
        Some(Err(AdvanceError::Cyclic)) => Err(AdvanceError::Cyclic),
        Some(Ok(newcm)) => Ok(Advance::Complete(newcm)),
        Some(Err(AdvanceError::Precondition)) | None => Ok(Advance::Forward(new_fm)),
    }
}

/// If `fm` has no awaited children left, try to promote it to a complete
/// match, running the cyclic-renaming check against the just-fed child's
/// wrapping history. Returns `None` if promotion does not apply (still
/// awaited, or a right expectation is unmet) — the caller should keep the
/// forward match in that case.
fn try_promote(
    fm: &Rc<ForwardMatch>,
    fed_child: &Rc<CompleteMatch>,
) -> Option<Result<Rc<CompleteMatch>, AdvanceError>> {
    if !fm.awaited().is_empty() {
        return None;
    }
    let last_child = fm.last()?;
    let rb = last_child.rbro.clone();
    if let Some(exp) = fm.right {
        match &rb {
            Some(r) if exp.holds(r.external) => {}
            _ => return None,
        }
    }
    let newcm = CompleteMatch::new(
        fm.rule_id,
        fm.external,
        fm.start,
        fm.close,
        fm.name.clone(),
        fm.children.clone(),
        fm.lbro.clone(),
        rb,
    );
    match check_cycle(&newcm, fed_child) {
        Ok(()) => Some(Ok(newcm)),
        Err(e) => Some(Err(e)),
    }
}

fn check_cycle(newcm: &Rc<CompleteMatch>, fed_child: &Rc<CompleteMatch>) -> Result<(), AdvanceError> {
    let history = fed_child.wrapping_history();
    let prev = match history.iter().find(|m| m.external == newcm.external) {
        Some(p) => p.clone(),
        None => return Ok(()),
    };

    if wrapping_span(newcm, Side::Both) == wrapping_span(&prev, Side::Both) {
        return Err(AdvanceError::Cyclic);
    }

    if wrapping_span(newcm, Side::NoneSide) == wrapping_span(&prev, Side::NoneSide) {
        let new_on_left = match (&prev.lbro, &newcm.lbro) {
            (None, Some(_)) => true,
            (None, None) => false,
            // prev has a left-brother but newcm does not: treat as "not new"
            // rather than calling can_concat with a null operand.
            (Some(_), None) => false,
            (Some(_), Some(nl)) => {
                wrapping_span(&prev, Side::Left) != wrapping_span(newcm, Side::Left) && !can_concat(nl, &prev)
            }
        };
        let new_on_right = match (&prev.rbro, &newcm.rbro) {
            (None, Some(_)) => true,
            (None, None) => false,
            (Some(_), None) => false,
            (Some(_), Some(nr)) => {
                wrapping_span(&prev, Side::Right) != wrapping_span(newcm, Side::Right) && !can_concat(&prev, nr)
            }
        };
        if !new_on_left && !new_on_right {
            return Err(AdvanceError::Cyclic);
        }
    }

    Ok(())
}
