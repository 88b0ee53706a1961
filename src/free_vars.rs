use crate::shape::TermShape;
use crate::store::Store;
use crate::term::{Term, Var};
use hashbrown::HashSet;
use std::collections::BTreeMap;

/// Collect the variables reachable from `term` whose current binding is
/// `None`, following bindings transitively.
///
/// Returns them in ascending id order. Terminates even on cyclic bindings
/// (revisits are suppressed) and never fails.
pub fn get_free_vars<S: TermShape>(term: &Term<S>, store: &Store<S>) -> Vec<Var> {
    get_free_vars_all(std::slice::from_ref(term), store)
}

/// [`get_free_vars`] over a collection, with one visited set threaded
/// through the whole collection so shared variables are reported once.
pub fn get_free_vars_all<S: TermShape>(terms: &[Term<S>], store: &Store<S>) -> Vec<Var> {
    let mut seen = HashSet::new();
    let mut free = BTreeMap::new();
    for term in terms {
        collect(term, store, &mut seen, &mut free);
    }
    free.into_values().collect()
}

fn collect<S: TermShape>(
    term: &Term<S>,
    store: &Store<S>,
    seen: &mut HashSet<u32>,
    free: &mut BTreeMap<u32, Var>,
) {
    match term {
        Term::Node(layer) => {
            let _ = S::visit(layer.as_ref(), |child: &Term<S>| {
                collect(child, store, seen, free);
                Ok::<(), ()>(())
            });
        }
        Term::Var(var) => {
            if !seen.insert(var.id()) {
                return;
            }
            match store.lookup_var(*var) {
                Some(bound) => collect(bound, store, seen, free),
                None => {
                    free.insert(var.id(), *var);
                }
            }
        }
    }
}
