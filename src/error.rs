use crate::shape::TermShape;
use crate::term::{Layer, Term, Var};
use std::fmt;
use std::sync::Arc;

/// The ways the engine can fail.
///
/// Errors propagate out of the current top-level call without rolling back
/// bindings committed before the failure point; callers that need atomicity
/// snapshot the store (its `Clone` is O(1)) and restore on failure.
pub enum UnifyError<S: TermShape> {
    /// Binding the variable to the term would produce a term containing
    /// itself. Carries the variable and the witness term under which the
    /// cycle was observed.
    OccursIn(Var, Term<S>),
    /// Two layers with incompatible constructors were required to be equal.
    Mismatch(Arc<Layer<S>>, Arc<Layer<S>>),
    /// The store ran out of fresh variable ids.
    ExhaustedVariables,
}

impl<S: TermShape> Clone for UnifyError<S> {
    fn clone(&self) -> Self {
        match self {
            UnifyError::OccursIn(var, term) => UnifyError::OccursIn(*var, term.clone()),
            UnifyError::Mismatch(left, right) => {
                UnifyError::Mismatch(Arc::clone(left), Arc::clone(right))
            }
            UnifyError::ExhaustedVariables => UnifyError::ExhaustedVariables,
        }
    }
}

impl<S: TermShape> fmt::Debug for UnifyError<S>
where
    Layer<S>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::OccursIn(var, term) => {
                f.debug_tuple("OccursIn").field(var).field(term).finish()
            }
            UnifyError::Mismatch(left, right) => {
                f.debug_tuple("Mismatch").field(left).field(right).finish()
            }
            UnifyError::ExhaustedVariables => f.write_str("ExhaustedVariables"),
        }
    }
}

impl<S: TermShape> PartialEq for UnifyError<S>
where
    Layer<S>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UnifyError::OccursIn(v1, t1), UnifyError::OccursIn(v2, t2)) => v1 == v2 && t1 == t2,
            (UnifyError::Mismatch(l1, r1), UnifyError::Mismatch(l2, r2)) => l1 == l2 && r1 == r2,
            (UnifyError::ExhaustedVariables, UnifyError::ExhaustedVariables) => true,
            _ => false,
        }
    }
}

impl<S: TermShape> fmt::Display for UnifyError<S>
where
    Layer<S>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::OccursIn(var, term) => {
                write!(f, "variable {} occurs in {:?}", var, term)
            }
            UnifyError::Mismatch(left, right) => {
                write!(f, "cannot match {:?} against {:?}", left, right)
            }
            UnifyError::ExhaustedVariables => write!(f, "no fresh variable ids left"),
        }
    }
}

impl<S: TermShape> std::error::Error for UnifyError<S> where Layer<S>: fmt::Debug {}
