use crate::error::UnifyError;
use crate::shape::TermShape;
use crate::term::{Term, Var};
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

/// Per-call visited set for unification and subsumption, keyed by variable
/// id. Entries are scoped to the current spine: callers record a variable
/// before recursing through its binding and forget it afterwards, so
/// sibling branches start from the same set.
pub(crate) struct VisitedSet<S: TermShape> {
    seen: HashMap<u32, Term<S>>,
}

impl<S: TermShape> VisitedSet<S> {
    pub(crate) fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    /// Record that `var` is being expanded to `term` on the current spine.
    /// A second sighting of the same variable means the expansion is
    /// cyclic: fails with `OccursIn` carrying the original witness.
    pub(crate) fn seen_as(&mut self, var: Var, term: Term<S>) -> Result<(), UnifyError<S>> {
        match self.seen.entry(var.id()) {
            Entry::Occupied(prev) => Err(UnifyError::OccursIn(var, prev.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(term);
                Ok(())
            }
        }
    }

    /// Undo a `seen_as` record when leaving its scope.
    pub(crate) fn forget(&mut self, var: Var) {
        self.seen.remove(&var.id());
    }
}

/// Visited-map entry for the rebuilding traversals (apply-bindings,
/// freshen).
pub(crate) enum Expansion<S: TermShape> {
    /// The binding of this variable is being expanded further up the
    /// spine; seeing it again means the substitution is cyclic.
    Pending(Term<S>),
    /// Expansion already computed; reused to preserve sharing in the
    /// output.
    Done(Term<S>),
}

pub(crate) type ExpansionMap<S> = HashMap<u32, Expansion<S>>;
