use crate::error::UnifyError;
use crate::prune::semi_prune;
use crate::shape::TermShape;
use crate::store::Store;
use crate::term::Term;
use crate::visit::{Expansion, ExpansionMap};

/// Produce a term in which no variable with a binding remains: every bound
/// variable is replaced by the expansion of its binding.
///
/// Expansions are memoized per variable, so sharing in the input survives
/// in the output. A binding cycle fails with `OccursIn`. This clones term
/// structure and is the expensive way to obtain a pure, externalizable
/// term.
pub fn apply_bindings<S: TermShape>(
    term: &Term<S>,
    store: &mut Store<S>,
) -> Result<Term<S>, UnifyError<S>> {
    let mut seen = ExpansionMap::new();
    expand(term, store, &mut seen)
}

/// [`apply_bindings`] over a collection, with one memo table threaded
/// through the whole collection so sharing across terms survives too.
pub fn apply_bindings_all<S: TermShape>(
    terms: &[Term<S>],
    store: &mut Store<S>,
) -> Result<Vec<Term<S>>, UnifyError<S>> {
    let mut seen = ExpansionMap::new();
    terms
        .iter()
        .map(|term| expand(term, store, &mut seen))
        .collect()
}

fn expand<S: TermShape>(
    term: &Term<S>,
    store: &mut Store<S>,
    seen: &mut ExpansionMap<S>,
) -> Result<Term<S>, UnifyError<S>> {
    let term = semi_prune(term, store);
    match &term {
        Term::Node(layer) => {
            let rebuilt = S::traverse(layer.as_ref(), |child| expand(child, store, seen))?;
            Ok(Term::node(rebuilt))
        }
        Term::Var(var) => {
            let var = *var;
            match seen.get(&var.id()) {
                Some(Expansion::Done(done)) => return Ok(done.clone()),
                Some(Expansion::Pending(witness)) => {
                    return Err(UnifyError::OccursIn(var, witness.clone()))
                }
                None => {}
            }
            match store.lookup_var(var) {
                None => Ok(term.clone()),
                Some(bound) => {
                    let bound = bound.clone();
                    seen.insert(var.id(), Expansion::Pending(bound.clone()));
                    let expanded = expand(&bound, store, seen)?;
                    seen.insert(var.id(), Expansion::Done(expanded.clone()));
                    Ok(expanded)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{app0, app1, app2, AppTerm};
    use crate::error::UnifyError;
    use crate::free_vars::get_free_vars;
    use crate::term::Term;
    use crate::test_utils::{fresh_vars, setup};
    use std::sync::Arc;

    #[test]
    fn ground_terms_come_back_equal() {
        let (symbols, mut store) = setup();
        let term = app1(symbols.intern("Succ"), app0(symbols.intern("Zero")));
        assert_eq!(apply_bindings(&term, &mut store).unwrap(), term);
    }

    #[test]
    fn unbound_vars_survive() {
        let (_, mut store) = setup();
        let var = store.fresh_var().unwrap();
        let applied = apply_bindings(&Term::var(var), &mut store).unwrap();
        assert_eq!(applied.as_var(), Some(var));
    }

    #[test]
    fn bound_vars_are_replaced() {
        let (symbols, mut store) = setup();
        let a = app0(symbols.intern("A"));
        let f = symbols.intern("F");
        let vars = fresh_vars(&mut store, 2);
        store.bind_var(vars[0], a.clone());
        store.bind_var(vars[1], Term::var(vars[0]));

        let term = app2(f, Term::var(vars[0]), Term::var(vars[1]));
        let applied = apply_bindings(&term, &mut store).unwrap();
        assert_eq!(applied, app2(f, a.clone(), a));
    }

    #[test]
    fn expansion_is_shared_in_the_output() {
        let (symbols, mut store) = setup();
        let pair = symbols.intern("Pair");
        let big = app2(
            pair,
            app0(symbols.intern("A")),
            app0(symbols.intern("B")),
        );
        let var = store.new_var(big).unwrap();
        let term = app2(pair, Term::var(var), Term::var(var));

        let applied = apply_bindings(&term, &mut store).unwrap();
        let layer = applied.as_node().unwrap();
        match (&layer.args[0], &layer.args[1]) {
            (Term::Node(left), Term::Node(right)) => {
                assert!(Arc::ptr_eq(left, right), "both occurrences reuse one expansion")
            }
            _ => panic!("expected nodes"),
        }
    }

    #[test]
    fn cyclic_binding_is_an_occurs_failure() {
        let (symbols, mut store) = setup();
        let f = symbols.intern("F");
        let var = store.fresh_var().unwrap();
        store.bind_var(var, app1(f, Term::var(var)));

        let err = apply_bindings(&Term::var(var), &mut store).unwrap_err();
        assert!(matches!(err, UnifyError::OccursIn(v, _) if v == var));
    }

    #[test]
    fn apply_is_idempotent() {
        let (symbols, mut store) = setup();
        let f = symbols.intern("F");
        let vars = fresh_vars(&mut store, 2);
        store.bind_var(vars[0], app1(f, Term::var(vars[1])));

        let term = app1(f, Term::var(vars[0]));
        let once = apply_bindings(&term, &mut store).unwrap();
        let twice = apply_bindings(&once, &mut store).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn applied_term_only_contains_unbound_vars() {
        let (symbols, mut store) = setup();
        let pair = symbols.intern("Pair");
        let vars = fresh_vars(&mut store, 3);
        store.bind_var(vars[0], Term::var(vars[1]));

        let term = app2(pair, Term::var(vars[0]), Term::var(vars[2]));
        let applied = apply_bindings(&term, &mut store).unwrap();
        let free = get_free_vars(&applied, &store);
        assert_eq!(free, vec![vars[1], vars[2]]);
        for var in free {
            assert!(store.lookup_var(var).is_none());
        }
    }

    #[test]
    fn all_preserves_sharing_across_terms() {
        let (symbols, mut store) = setup();
        let a: AppTerm = app0(symbols.intern("A"));
        let var = store.new_var(a.clone()).unwrap();

        let applied =
            apply_bindings_all(&[Term::var(var), Term::var(var)], &mut store).unwrap();
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0], a);
        assert_eq!(applied[1], a);
    }
}
