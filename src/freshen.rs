use crate::error::UnifyError;
use crate::prune::semi_prune;
use crate::shape::TermShape;
use crate::store::Store;
use crate::term::Term;
use crate::visit::{Expansion, ExpansionMap};

/// Rebuild `term` with a fresh variable for every variable encountered,
/// free or bound.
///
/// Two occurrences of the same original variable map to the same fresh
/// variable. A bound variable is rebuilt by freshening its binding and
/// allocating a fresh variable bound to the result, so the copy carries
/// its own bindings. A binding cycle fails with `OccursIn`.
pub fn freshen<S: TermShape>(
    term: &Term<S>,
    store: &mut Store<S>,
) -> Result<Term<S>, UnifyError<S>> {
    let mut seen = ExpansionMap::new();
    rebuild(term, store, &mut seen)
}

/// [`freshen`] over a collection, with one visited map threaded through
/// the whole collection: variables shared between input terms stay shared
/// between the copies. Freshening the terms one by one would sever that
/// relationship.
pub fn freshen_all<S: TermShape>(
    terms: &[Term<S>],
    store: &mut Store<S>,
) -> Result<Vec<Term<S>>, UnifyError<S>> {
    let mut seen = ExpansionMap::new();
    terms
        .iter()
        .map(|term| rebuild(term, store, &mut seen))
        .collect()
}

fn rebuild<S: TermShape>(
    term: &Term<S>,
    store: &mut Store<S>,
    seen: &mut ExpansionMap<S>,
) -> Result<Term<S>, UnifyError<S>> {
    let term = semi_prune(term, store);
    match &term {
        Term::Node(layer) => {
            let rebuilt = S::traverse(layer.as_ref(), |child| rebuild(child, store, seen))?;
            Ok(Term::node(rebuilt))
        }
        Term::Var(var) => {
            let var = *var;
            match seen.get(&var.id()) {
                Some(Expansion::Done(fresh)) => return Ok(fresh.clone()),
                Some(Expansion::Pending(witness)) => {
                    return Err(UnifyError::OccursIn(var, witness.clone()))
                }
                None => {}
            }
            match store.lookup_var(var) {
                Some(bound) => {
                    let bound = bound.clone();
                    seen.insert(var.id(), Expansion::Pending(bound.clone()));
                    let rebuilt = rebuild(&bound, store, seen)?;
                    let fresh = Term::var(store.new_var(rebuilt)?);
                    seen.insert(var.id(), Expansion::Done(fresh.clone()));
                    Ok(fresh)
                }
                None => {
                    let fresh = Term::var(store.fresh_var()?);
                    seen.insert(var.id(), Expansion::Done(fresh.clone()));
                    Ok(fresh)
                }
            }
        }
    }
}
