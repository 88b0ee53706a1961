use crate::shape::TermShape;
use std::fmt;
use std::sync::Arc;

/// A logic variable.
///
/// Variables are opaque identities: equality compares ids, and `id` is a
/// stable injective integer usable as a map key. Variables can only be
/// allocated through a [`Store`](crate::store::Store), which keeps every
/// live id below the store's fresh-id counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Get the stable integer id of this variable.
    pub fn id(self) -> u32 {
        self.0
    }

    pub(crate) fn from_id(id: u32) -> Self {
        Var(id)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// One structural layer of shape `S` whose children are terms.
pub type Layer<S> = <S as TermShape>::Layer<Term<S>>;

/// A term over shape `S`: either one layer of structure whose children are
/// themselves terms, or a variable reference.
///
/// Terms are immutable value trees. Layers sit behind an `Arc`, so cloning
/// a term is cheap and subterm sharing is preserved (and observable), but
/// sharing is never required for correctness. A term never contains a
/// cyclic edge in its own structure; cycles can only arise via bindings.
pub enum Term<S: TermShape> {
    /// A variable reference.
    Var(Var),
    /// A structure node wrapping one layer of the term shape.
    Node(Arc<Layer<S>>),
}

impl<S: TermShape> Term<S> {
    /// Wrap one layer of structure as a term.
    pub fn node(layer: Layer<S>) -> Self {
        Term::Node(Arc::new(layer))
    }

    /// Wrap a variable as a term.
    pub fn var(var: Var) -> Self {
        Term::Var(var)
    }

    /// The variable this term refers to, if it is a variable reference.
    pub fn as_var(&self) -> Option<Var> {
        match self {
            Term::Var(var) => Some(*var),
            Term::Node(_) => None,
        }
    }

    /// The structure layer of this term, if it is a node.
    pub fn as_node(&self) -> Option<&Layer<S>> {
        match self {
            Term::Var(_) => None,
            Term::Node(layer) => Some(layer),
        }
    }
}

impl<S: TermShape> Clone for Term<S> {
    fn clone(&self) -> Self {
        match self {
            Term::Var(var) => Term::Var(*var),
            Term::Node(layer) => Term::Node(Arc::clone(layer)),
        }
    }
}

impl<S: TermShape> fmt::Debug for Term<S>
where
    Layer<S>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(var) => f.debug_tuple("Var").field(&var.id()).finish(),
            Term::Node(layer) => f.debug_tuple("Node").field(layer).finish(),
        }
    }
}

impl<S: TermShape> PartialEq for Term<S>
where
    Layer<S>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Var(left), Term::Var(right)) => left == right,
            (Term::Node(left), Term::Node(right)) => {
                // Shared layers are equal without descending.
                Arc::ptr_eq(left, right) || left == right
            }
            _ => false,
        }
    }
}

impl<S: TermShape> Eq for Term<S> where Layer<S>: Eq {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{app0, app2, AppTerm};
    use crate::test_utils::setup;

    #[test]
    fn var_id_is_stable() {
        let var = Var::from_id(7);
        assert_eq!(var.id(), 7);
        assert_eq!(var, Var::from_id(7));
        assert_ne!(var, Var::from_id(8));
    }

    #[test]
    fn var_displays_with_dollar_prefix() {
        assert_eq!(Var::from_id(3).to_string(), "$3");
    }

    #[test]
    fn clone_shares_layers() {
        let (symbols, _) = setup();
        let pair = symbols.intern("Pair");
        let term = app2(pair, app0(symbols.intern("A")), app0(symbols.intern("B")));
        let copy = term.clone();
        match (&term, &copy) {
            (Term::Node(left), Term::Node(right)) => assert!(Arc::ptr_eq(left, right)),
            _ => panic!("expected nodes"),
        }
    }

    #[test]
    fn structural_equality_ignores_sharing() {
        let (symbols, _) = setup();
        let a = symbols.intern("A");
        let one: AppTerm = app0(a);
        let two: AppTerm = app0(a);
        assert_eq!(one, two, "separately built equal terms compare equal");
    }

    #[test]
    fn var_never_equals_node() {
        let (symbols, mut store) = setup();
        let var = store.fresh_var().unwrap();
        let node: AppTerm = app0(symbols.intern("A"));
        assert_ne!(Term::var(var), node);
    }
}
