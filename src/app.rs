//! A ready-made first-order term shape: a functor applied to children.
//!
//! This is the shape used throughout the test suites and benchmarks, and
//! the reference for implementing [`TermShape`] on custom structures.

use crate::shape::TermShape;
use crate::symbol::{FuncId, SymbolStore};
use crate::term::Term;
use smallvec::SmallVec;

/// One applicative layer: an interned functor with child slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppNode<X> {
    pub func: FuncId,
    pub args: SmallVec<[X; 4]>,
}

/// Shape marker for applicative terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct App;

impl TermShape for App {
    type Layer<X> = AppNode<X>;

    fn traverse<X, Y, E, F>(layer: &AppNode<X>, mut f: F) -> Result<AppNode<Y>, E>
    where
        F: FnMut(&X) -> Result<Y, E>,
    {
        let mut args = SmallVec::with_capacity(layer.args.len());
        for arg in &layer.args {
            args.push(f(arg)?);
        }
        Ok(AppNode {
            func: layer.func,
            args,
        })
    }

    fn zip_match<X: Clone>(left: &AppNode<X>, right: &AppNode<X>) -> Option<AppNode<(X, X)>> {
        if left.func != right.func || left.args.len() != right.args.len() {
            return None;
        }
        let args = left
            .args
            .iter()
            .cloned()
            .zip(right.args.iter().cloned())
            .collect();
        Some(AppNode {
            func: left.func,
            args,
        })
    }
}

/// A term over the applicative shape.
pub type AppTerm = Term<App>;

/// Build an application term.
pub fn app(func: FuncId, args: SmallVec<[AppTerm; 4]>) -> AppTerm {
    Term::node(AppNode { func, args })
}

/// Build a nullary (0-arity) application.
pub fn app0(func: FuncId) -> AppTerm {
    app(func, SmallVec::new())
}

/// Build a unary (1-arity) application.
pub fn app1(func: FuncId, child: AppTerm) -> AppTerm {
    app(func, smallvec::smallvec![child])
}

/// Build a binary (2-arity) application.
pub fn app2(func: FuncId, left: AppTerm, right: AppTerm) -> AppTerm {
    app(func, smallvec::smallvec![left, right])
}

/// Render an applicative term for debugging: `$id` for variables,
/// `(Name child ...)` for applications. Bindings are not consulted.
pub fn format_term(term: &AppTerm, symbols: &SymbolStore) -> Result<String, String> {
    fn render(term: &AppTerm, symbols: &SymbolStore, out: &mut String) -> Result<(), String> {
        match term {
            Term::Var(var) => {
                out.push_str(&var.to_string());
                Ok(())
            }
            Term::Node(layer) => {
                let name = symbols
                    .resolve(layer.func)
                    .ok_or_else(|| format!("unknown symbol for func id {:?}", layer.func))?;
                if layer.args.is_empty() {
                    out.push_str(name);
                    Ok(())
                } else {
                    out.push('(');
                    out.push_str(name);
                    for arg in &layer.args {
                        out.push(' ');
                        render(arg, symbols, out)?;
                    }
                    out.push(')');
                    Ok(())
                }
            }
        }
    }

    let mut out = String::new();
    render(term, symbols, &mut out)?;
    Ok(out)
}
