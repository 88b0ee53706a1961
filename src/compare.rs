//! The equality family: strict structural equality, alpha-equivalence,
//! and one-directional subsumption.
//!
//! None of these report constructor clashes as errors; a clash is just an
//! unequal / non-subsuming answer.

use crate::error::UnifyError;
use crate::prune::{full_prune, semi_prune};
use crate::shape::TermShape;
use crate::store::Store;
use crate::term::Term;
use crate::visit::VisitedSet;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

#[cfg(feature = "tracing")]
use crate::trace::{debug_span, trace};

/// Strict structural equality under the current bindings, without the
/// cost of applying them.
///
/// Bindings are looked through on both sides, but an unbound variable is
/// equal only to itself: two distinct unbound variables are never equal,
/// and neither is an unbound variable and a node. The first mismatch
/// short-circuits the whole walk.
pub fn equals<S: TermShape>(left: &Term<S>, right: &Term<S>, store: &mut Store<S>) -> bool {
    let left = semi_prune(left, store);
    let right = semi_prune(right, store);
    match (&left, &right) {
        (Term::Var(vl), Term::Var(vr)) => {
            if vl == vr {
                return true;
            }
            let left_bound = store.lookup_var(*vl).cloned();
            let right_bound = store.lookup_var(*vr).cloned();
            match (left_bound, right_bound) {
                (Some(left_bound), Some(right_bound)) => {
                    equals(&left_bound, &right_bound, store)
                }
                _ => false,
            }
        }
        (Term::Var(vl), Term::Node(_)) => match store.lookup_var(*vl).cloned() {
            Some(left_bound) => equals(&left_bound, &right, store),
            None => false,
        },
        (Term::Node(_), Term::Var(vr)) => match store.lookup_var(*vr).cloned() {
            Some(right_bound) => equals(&left, &right_bound, store),
            None => false,
        },
        (Term::Node(sl), Term::Node(sr)) => match S::zip_match(sl.as_ref(), sr.as_ref()) {
            None => false,
            Some(zipped) => S::visit(&zipped, |(l, r): &(Term<S>, Term<S>)| {
                if equals(l, r, store) {
                    Ok(())
                } else {
                    Err(())
                }
            })
            .is_ok(),
        },
    }
}

/// Alpha-equivalence: are the two terms equal up to a consistent renaming
/// of variables?
///
/// Returns the renaming as a left-id to right-id map, or `None` when no
/// consistent renaming exists. Bindings are looked through on both sides.
pub fn equiv<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    store: &mut Store<S>,
) -> Option<HashMap<u32, u32>> {
    let mut renaming = HashMap::new();
    if align(left, right, store, &mut renaming) {
        Some(renaming)
    } else {
        None
    }
}

fn align<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    store: &mut Store<S>,
    renaming: &mut HashMap<u32, u32>,
) -> bool {
    let left = full_prune(left, store);
    let right = full_prune(right, store);
    match (&left, &right) {
        (Term::Var(vl), Term::Var(vr)) => match renaming.entry(vl.id()) {
            Entry::Occupied(entry) => *entry.get() == vr.id(),
            Entry::Vacant(slot) => {
                slot.insert(vr.id());
                true
            }
        },
        (Term::Node(sl), Term::Node(sr)) => match S::zip_match(sl.as_ref(), sr.as_ref()) {
            None => false,
            Some(zipped) => S::visit(&zipped, |(l, r): &(Term<S>, Term<S>)| {
                if align(l, r, store, renaming) {
                    Ok(())
                } else {
                    Err(())
                }
            })
            .is_ok(),
        },
        _ => false,
    }
}

/// Does `left` subsume `right`: is there a substitution making `left`
/// equal to `right` without refining `right`?
///
/// Binds left-side variables as it goes, exactly like unification; the
/// bindings persist even on a `false` answer, so callers that must not
/// keep them run against a store snapshot. Constructor clashes are
/// `Ok(false)`; only a visited-set cycle surfaces as `Err(OccursIn)`.
pub fn subsumes<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    store: &mut Store<S>,
) -> Result<bool, UnifyError<S>> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("subsumes").entered();

    let mut seen = VisitedSet::new();
    subsumes_step(left, right, &mut seen, store)
}

fn subsumes_step<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    seen: &mut VisitedSet<S>,
    store: &mut Store<S>,
) -> Result<bool, UnifyError<S>> {
    let left = semi_prune(left, store);
    let right = semi_prune(right, store);
    match (&left, &right) {
        (Term::Var(vl), Term::Var(vr)) => {
            if vl == vr {
                return Ok(true);
            }
            let left_bound = store.lookup_var(*vl).cloned();
            let right_bound = store.lookup_var(*vr).cloned();
            match (left_bound, right_bound) {
                (None, _) => {
                    store.bind_var(*vl, right.clone());
                    Ok(true)
                }
                // The right side cannot be refined.
                (Some(_), None) => Ok(false),
                (Some(left_bound), Some(right_bound)) => {
                    seen.seen_as(*vl, left_bound.clone())?;
                    if let Err(err) = seen.seen_as(*vr, right_bound.clone()) {
                        seen.forget(*vl);
                        return Err(err);
                    }
                    let result = subsumes_step(&left_bound, &right_bound, seen, store);
                    seen.forget(*vl);
                    seen.forget(*vr);
                    result
                }
            }
        }
        (Term::Var(vl), Term::Node(_)) => match store.lookup_var(*vl).cloned() {
            None => {
                store.bind_var(*vl, right.clone());
                Ok(true)
            }
            Some(left_bound) => {
                seen.seen_as(*vl, left_bound.clone())?;
                let result = subsumes_step(&left_bound, &right, seen, store);
                seen.forget(*vl);
                result
            }
        },
        // The left side is strictly more defined than the right.
        (Term::Node(_), Term::Var(_)) => Ok(false),
        (Term::Node(sl), Term::Node(sr)) => match S::zip_match(sl.as_ref(), sr.as_ref()) {
            None => {
                #[cfg(feature = "tracing")]
                trace!("subsumes_constructor_clash");
                Ok(false)
            }
            Some(zipped) => {
                let walked =
                    S::visit(&zipped, |(l, r): &(Term<S>, Term<S>)| {
                        match subsumes_step(l, r, seen, store) {
                            Ok(true) => Ok(()),
                            Ok(false) => Err(None),
                            Err(err) => Err(Some(err)),
                        }
                    });
                match walked {
                    Ok(()) => Ok(true),
                    Err(None) => Ok(false),
                    Err(Some(err)) => Err(err),
                }
            }
        },
    }
}

#[cfg(test)]
#[path = "tests/compare.rs"]
mod tests;
