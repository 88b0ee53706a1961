//! Chain-walkers with path compression, plus the one-shot occurs check.
//!
//! Both pruners rewrite bindings but never change what any variable
//! denotes. Neither is safe on a cyclic chain; callers ensure acyclicity
//! at the point of use.

use crate::shape::TermShape;
use crate::store::Store;
use crate::term::{Term, Var};

/// Walk the binding chain of `term` to its end, descending through the
/// final structural node, and rebind every variable on the chain directly
/// to the result.
///
/// A node comes back as-is; an unbound variable comes back as itself.
pub fn full_prune<S: TermShape>(term: &Term<S>, store: &mut Store<S>) -> Term<S> {
    match term {
        Term::Node(_) => term.clone(),
        Term::Var(var) => match store.lookup_var(*var) {
            None => term.clone(),
            Some(bound) => {
                let bound = bound.clone();
                let pruned = full_prune(&bound, store);
                store.bind_var(*var, pruned.clone());
                pruned
            }
        },
    }
}

/// Like [`full_prune`], but stop at the last variable in the chain instead
/// of descending into a structural node.
///
/// If the chain ends in a node, the result is the last variable (still
/// bound to that node) and every intermediate variable is rebound to it.
/// Stopping at the variable preserves enough identity that two aliases of
/// the same structure can be recognized by variable equality, which saves
/// redundant recursion in unification and in the visited-set traversals.
pub fn semi_prune<S: TermShape>(term: &Term<S>, store: &mut Store<S>) -> Term<S> {
    match term {
        Term::Node(_) => term.clone(),
        Term::Var(var) => match store.lookup_var(*var) {
            Some(Term::Var(next)) => {
                let next = *next;
                let pruned = semi_prune(&Term::Var(next), store);
                store.bind_var(*var, pruned.clone());
                pruned
            }
            // Unbound, or already the last variable before a node.
            _ => term.clone(),
        },
    }
}

/// Does `var` occur in `term` under the current bindings?
///
/// Full-prunes as it walks, so the cost is the size of the reached
/// substitution. Used by the eager unification variant.
pub fn occurs_in<S: TermShape>(var: Var, term: &Term<S>, store: &mut Store<S>) -> bool {
    match full_prune(term, store) {
        Term::Var(other) => other == var,
        Term::Node(layer) => S::visit(layer.as_ref(), |child: &Term<S>| {
            if occurs_in(var, child, store) {
                Err(())
            } else {
                Ok(())
            }
        })
        .is_err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{app0, app1, app2, AppTerm};
    use crate::term::Term;
    use crate::test_utils::{fresh_vars, setup};

    #[test]
    fn full_prune_returns_nodes_unchanged() {
        let (symbols, mut store) = setup();
        let term: AppTerm = app0(symbols.intern("A"));
        assert_eq!(full_prune(&term, &mut store), term);
    }

    #[test]
    fn full_prune_leaves_unbound_vars_alone() {
        let (_, mut store) = setup();
        let var = store.fresh_var().unwrap();
        let pruned = full_prune(&Term::var(var), &mut store);
        assert_eq!(pruned.as_var(), Some(var));
        assert!(store.lookup_var(var).is_none());
    }

    #[test]
    fn full_prune_descends_through_final_node() {
        let (symbols, mut store) = setup();
        let a = app0(symbols.intern("A"));
        let vars = fresh_vars(&mut store, 3);
        // $0 -> $1 -> $2 -> A
        store.bind_var(vars[0], Term::var(vars[1]));
        store.bind_var(vars[1], Term::var(vars[2]));
        store.bind_var(vars[2], a.clone());

        let pruned = full_prune(&Term::var(vars[0]), &mut store);
        assert_eq!(pruned, a);
        // Every variable on the chain now points directly at the node.
        for var in vars {
            assert_eq!(store.lookup_var(var), Some(&a));
        }
    }

    #[test]
    fn semi_prune_stops_at_last_var() {
        let (symbols, mut store) = setup();
        let a = app0(symbols.intern("A"));
        let vars = fresh_vars(&mut store, 3);
        store.bind_var(vars[0], Term::var(vars[1]));
        store.bind_var(vars[1], Term::var(vars[2]));
        store.bind_var(vars[2], a.clone());

        let pruned = semi_prune(&Term::var(vars[0]), &mut store);
        assert_eq!(pruned.as_var(), Some(vars[2]), "stops at the chain's last var");
        // Intermediates rebound to the last var; the last var keeps the node.
        assert_eq!(store.lookup_var(vars[0]).unwrap().as_var(), Some(vars[2]));
        assert_eq!(store.lookup_var(vars[1]).unwrap().as_var(), Some(vars[2]));
        assert_eq!(store.lookup_var(vars[2]), Some(&a));
    }

    #[test]
    fn semi_prune_on_unbound_chain_compresses_to_tail() {
        let (_, mut store) = setup();
        let vars = fresh_vars(&mut store, 3);
        store.bind_var(vars[0], Term::var(vars[1]));
        store.bind_var(vars[1], Term::var(vars[2]));

        let pruned = semi_prune(&Term::var(vars[0]), &mut store);
        assert_eq!(pruned.as_var(), Some(vars[2]));
        assert_eq!(store.lookup_var(vars[0]).unwrap().as_var(), Some(vars[2]));
        assert!(store.lookup_var(vars[2]).is_none());
    }

    #[test]
    fn pruning_is_idempotent() {
        let (symbols, mut store) = setup();
        let a = app0(symbols.intern("A"));
        let vars = fresh_vars(&mut store, 3);
        store.bind_var(vars[0], Term::var(vars[1]));
        store.bind_var(vars[1], Term::var(vars[2]));
        store.bind_var(vars[2], a);

        let term = Term::var(vars[0]);
        let once = full_prune(&term, &mut store);
        let twice = full_prune(&once, &mut store);
        assert_eq!(once, twice);

        let once = semi_prune(&term, &mut store);
        let twice = semi_prune(&once, &mut store);
        assert_eq!(once, twice);
    }

    #[test]
    fn occurs_in_direct_hit() {
        let (_, mut store) = setup();
        let var = store.fresh_var().unwrap();
        assert!(occurs_in(var, &Term::var(var), &mut store));
    }

    #[test]
    fn occurs_in_nested_structure() {
        let (symbols, mut store) = setup();
        let f = symbols.intern("F");
        let g = symbols.intern("G");
        let var = store.fresh_var().unwrap();
        let term = app1(g, app1(f, Term::var(var)));
        assert!(occurs_in(var, &term, &mut store));
    }

    #[test]
    fn occurs_in_through_bindings() {
        let (symbols, mut store) = setup();
        let f = symbols.intern("F");
        let vars = fresh_vars(&mut store, 2);
        // $1 -> F($0), so $0 occurs in $1.
        store.bind_var(vars[1], app1(f, Term::var(vars[0])));
        assert!(occurs_in(vars[0], &Term::var(vars[1]), &mut store));
    }

    #[test]
    fn occurs_in_absent_variable() {
        let (symbols, mut store) = setup();
        let pair = symbols.intern("Pair");
        let vars = fresh_vars(&mut store, 2);
        let term = app2(pair, app0(symbols.intern("A")), Term::var(vars[1]));
        assert!(!occurs_in(vars[0], &term, &mut store));
    }
}
