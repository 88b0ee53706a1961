//! Unification of two terms against a shared binding store.
//!
//! [`unify`] is the default variant: cycles that this call would construct
//! are caught by a per-call visited set, and every `(Var, Var)` merge
//! eagerly rebinds both chains onto the computed term so later equality
//! and unification short-circuit after one pruning hop. [`unify_occurs`]
//! trades that for an occurs check on every bind, for callers that need
//! immediate occurs failure (and for differential testing of `unify`).

use crate::error::UnifyError;
use crate::prune::{occurs_in, semi_prune};
use crate::shape::TermShape;
use crate::store::Store;
use crate::term::{Term, Var};
use crate::visit::VisitedSet;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use crate::trace::{debug_span, trace};

/// Unify two terms, returning a term equivalent to both and updating the
/// store so both inputs resolve to it.
///
/// Fails with `Mismatch` on incompatible constructors, or `OccursIn` when
/// the visited set reveals that this call is constructing a cycle. Cycles
/// this variant does not observe are left in the store and surface on the
/// next `apply_bindings`/`freshen`. Bindings committed before a failure
/// are not rolled back; callers needing atomicity snapshot the store.
pub fn unify<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    store: &mut Store<S>,
) -> Result<Term<S>, UnifyError<S>> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("unify").entered();

    let mut seen = VisitedSet::new();
    unify_step(left, right, &mut seen, store)
}

fn unify_step<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    seen: &mut VisitedSet<S>,
    store: &mut Store<S>,
) -> Result<Term<S>, UnifyError<S>> {
    let left = semi_prune(left, store);
    let right = semi_prune(right, store);
    match (&left, &right) {
        (Term::Var(vl), Term::Var(vr)) => {
            if vl == vr {
                return Ok(right.clone());
            }
            let left_bound = store.lookup_var(*vl).cloned();
            let right_bound = store.lookup_var(*vr).cloned();
            match (left_bound, right_bound) {
                (None, _) => {
                    #[cfg(feature = "tracing")]
                    trace!(var = vl.id(), "unify_bind_left");
                    store.bind_var(*vl, right.clone());
                    Ok(right.clone())
                }
                (Some(_), None) => {
                    #[cfg(feature = "tracing")]
                    trace!(var = vr.id(), "unify_bind_right");
                    store.bind_var(*vr, left.clone());
                    Ok(left.clone())
                }
                (Some(left_bound), Some(right_bound)) => {
                    // Both chains end in bound variables: unify the bound
                    // terms under a locally-scoped visited extension, then
                    // collapse both chains onto the result.
                    seen.seen_as(*vl, left_bound.clone())?;
                    if let Err(err) = seen.seen_as(*vr, right_bound.clone()) {
                        seen.forget(*vl);
                        return Err(err);
                    }
                    let result = unify_step(&left_bound, &right_bound, seen, store);
                    seen.forget(*vl);
                    seen.forget(*vr);
                    let merged = result?;
                    store.bind_var(*vr, merged);
                    store.bind_var(*vl, right.clone());
                    Ok(right.clone())
                }
            }
        }
        (Term::Var(vl), Term::Node(_)) => {
            let merged = match store.lookup_var(*vl).cloned() {
                None => right.clone(),
                Some(left_bound) => {
                    seen.seen_as(*vl, left_bound.clone())?;
                    let result = unify_step(&left_bound, &right, seen, store);
                    seen.forget(*vl);
                    result?
                }
            };
            store.bind_var(*vl, merged);
            Ok(left.clone())
        }
        (Term::Node(_), Term::Var(vr)) => {
            let merged = match store.lookup_var(*vr).cloned() {
                None => left.clone(),
                Some(right_bound) => {
                    seen.seen_as(*vr, right_bound.clone())?;
                    let result = unify_step(&left, &right_bound, seen, store);
                    seen.forget(*vr);
                    result?
                }
            };
            store.bind_var(*vr, merged);
            Ok(right.clone())
        }
        (Term::Node(sl), Term::Node(sr)) => {
            let zipped = S::zip_match(sl.as_ref(), sr.as_ref()).ok_or_else(|| {
                #[cfg(feature = "tracing")]
                trace!("unify_constructor_mismatch");
                UnifyError::Mismatch(Arc::clone(sl), Arc::clone(sr))
            })?;
            let merged = S::traverse(&zipped, |(l, r): &(Term<S>, Term<S>)| {
                unify_step(l, r, seen, store)
            })?;
            Ok(Term::node(merged))
        }
    }
}

/// Bind `var` to `term` only after checking that `var` does not occur in
/// it under the current bindings.
fn acyclic_bind_var<S: TermShape>(
    var: Var,
    term: &Term<S>,
    store: &mut Store<S>,
) -> Result<(), UnifyError<S>> {
    if occurs_in(var, term, store) {
        #[cfg(feature = "tracing")]
        trace!(var = var.id(), "occurs_check_failed");
        Err(UnifyError::OccursIn(var, term.clone()))
    } else {
        store.bind_var(var, term.clone());
        Ok(())
    }
}

/// [`unify`] with an eager occurs check on every bind.
///
/// Same control structure and same binding choices as the default
/// variant, but a bind that would construct a cycle fails immediately
/// with `OccursIn` instead of surfacing on a later traversal.
pub fn unify_occurs<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    store: &mut Store<S>,
) -> Result<Term<S>, UnifyError<S>> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("unify_occurs").entered();

    occurs_step(left, right, store)
}

fn occurs_step<S: TermShape>(
    left: &Term<S>,
    right: &Term<S>,
    store: &mut Store<S>,
) -> Result<Term<S>, UnifyError<S>> {
    let left = semi_prune(left, store);
    let right = semi_prune(right, store);
    match (&left, &right) {
        (Term::Var(vl), Term::Var(vr)) => {
            if vl == vr {
                return Ok(right.clone());
            }
            let left_bound = store.lookup_var(*vl).cloned();
            let right_bound = store.lookup_var(*vr).cloned();
            match (left_bound, right_bound) {
                (None, _) => {
                    acyclic_bind_var(*vl, &right, store)?;
                    Ok(right.clone())
                }
                (Some(_), None) => {
                    acyclic_bind_var(*vr, &left, store)?;
                    Ok(left.clone())
                }
                (Some(left_bound), Some(right_bound)) => {
                    let merged = occurs_step(&left_bound, &right_bound, store)?;
                    acyclic_bind_var(*vr, &merged, store)?;
                    acyclic_bind_var(*vl, &right, store)?;
                    Ok(right.clone())
                }
            }
        }
        (Term::Var(vl), Term::Node(_)) => {
            let merged = match store.lookup_var(*vl).cloned() {
                None => right.clone(),
                Some(left_bound) => occurs_step(&left_bound, &right, store)?,
            };
            acyclic_bind_var(*vl, &merged, store)?;
            Ok(left.clone())
        }
        (Term::Node(_), Term::Var(vr)) => {
            let merged = match store.lookup_var(*vr).cloned() {
                None => left.clone(),
                Some(right_bound) => occurs_step(&left, &right_bound, store)?,
            };
            acyclic_bind_var(*vr, &merged, store)?;
            Ok(right.clone())
        }
        (Term::Node(sl), Term::Node(sr)) => {
            let zipped = S::zip_match(sl.as_ref(), sr.as_ref())
                .ok_or_else(|| UnifyError::Mismatch(Arc::clone(sl), Arc::clone(sr)))?;
            let merged = S::traverse(&zipped, |(l, r): &(Term<S>, Term<S>)| {
                occurs_step(l, r, store)
            })?;
            Ok(Term::node(merged))
        }
    }
}

#[cfg(test)]
#[path = "tests/unify.rs"]
mod tests;
