use crate::error::UnifyError;
use crate::shape::TermShape;
use crate::term::{Layer, Term, Var};
use im::OrdMap;
use std::fmt;

/// The value stored per variable id: a path-compression rank plus an
/// optional binding.
///
/// `bound = None` means the variable exists but has no binding (it was
/// allocated free, or only its rank was bumped). Rank is advisory: nothing
/// in the engine requires union-by-rank for correctness.
pub struct RankedCell<S: TermShape> {
    pub rank: u32,
    pub bound: Option<Term<S>>,
}

impl<S: TermShape> Clone for RankedCell<S> {
    fn clone(&self) -> Self {
        RankedCell {
            rank: self.rank,
            bound: self.bound.clone(),
        }
    }
}

impl<S: TermShape> Default for RankedCell<S> {
    fn default() -> Self {
        RankedCell {
            rank: 0,
            bound: None,
        }
    }
}

impl<S: TermShape> fmt::Debug for RankedCell<S>
where
    Layer<S>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedCell")
            .field("rank", &self.rank)
            .field("bound", &self.bound)
            .finish()
    }
}

/// The binding store: a counter for the next fresh variable id and a
/// persistent map from id to ranked cell.
///
/// Guarantees:
/// - every id with a cell is below `next_id` (variables are only minted
///   here, so callers cannot violate this),
/// - `Clone` is an O(1) snapshot thanks to the persistent map; capture the
///   store before a speculative branch and drop back to the capture on
///   failure. That is the backtracking mechanism,
/// - cell iteration order is ascending by id.
///
/// Stores never shrink; forgetting a variable is out of scope.
pub struct Store<S: TermShape> {
    next_id: u32,
    cells: OrdMap<u32, RankedCell<S>>,
}

impl<S: TermShape> Store<S> {
    /// Create an empty store. Ids start at 0.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            cells: OrdMap::new(),
        }
    }

    /// Number of variables that have a cell (bound or rank-bumped).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no variable has a cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of variable ids allocated so far.
    pub fn num_vars(&self) -> u32 {
        self.next_id
    }

    /// Allocate a new variable without inserting a cell.
    pub fn fresh_var(&mut self) -> Result<Var, UnifyError<S>> {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(UnifyError::ExhaustedVariables)?;
        Ok(Var::from_id(id))
    }

    /// Allocate a new variable already bound to `term`.
    pub fn new_var(&mut self, term: Term<S>) -> Result<Var, UnifyError<S>> {
        let var = self.fresh_var()?;
        self.cells.insert(
            var.id(),
            RankedCell {
                rank: 0,
                bound: Some(term),
            },
        );
        Ok(var)
    }

    /// The binding of `var`, or `None` if absent or unbound.
    pub fn lookup_var(&self, var: Var) -> Option<&Term<S>> {
        self.cells.get(&var.id()).and_then(|cell| cell.bound.as_ref())
    }

    /// The full cell for `var`; `(rank = 0, bound = None)` if absent.
    pub fn lookup_rank_var(&self, var: Var) -> RankedCell<S> {
        self.cells.get(&var.id()).cloned().unwrap_or_default()
    }

    /// Set the binding of `var`, preserving its rank. Creates the cell
    /// with rank 0 if absent.
    pub fn bind_var(&mut self, var: Var, term: Term<S>) {
        match self.cells.get_mut(&var.id()) {
            Some(cell) => cell.bound = Some(term),
            None => {
                self.cells.insert(
                    var.id(),
                    RankedCell {
                        rank: 0,
                        bound: Some(term),
                    },
                );
            }
        }
    }

    /// Bump the rank of `var` by one, leaving the binding unchanged.
    /// Creates the cell with rank 1 and no binding if absent.
    pub fn increment_rank(&mut self, var: Var) {
        match self.cells.get_mut(&var.id()) {
            Some(cell) => cell.rank += 1,
            None => {
                self.cells.insert(
                    var.id(),
                    RankedCell {
                        rank: 1,
                        bound: None,
                    },
                );
            }
        }
    }

    /// Atomically bind `var` to `term` and bump its rank by one.
    pub fn increment_bind_var(&mut self, var: Var, term: Term<S>) {
        match self.cells.get_mut(&var.id()) {
            Some(cell) => {
                cell.rank += 1;
                cell.bound = Some(term);
            }
            None => {
                self.cells.insert(
                    var.id(),
                    RankedCell {
                        rank: 1,
                        bound: Some(term),
                    },
                );
            }
        }
    }

    /// Pin the fresh-id counter, for exhaustion tests.
    #[cfg(test)]
    pub(crate) fn force_next_id(&mut self, next_id: u32) {
        self.next_id = next_id;
    }
}

impl<S: TermShape> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            next_id: self.next_id,
            cells: self.cells.clone(),
        }
    }
}

impl<S: TermShape> Default for Store<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TermShape> fmt::Debug for Store<S>
where
    Layer<S>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("next_id", &self.next_id)
            .field("cells", &self.cells)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
