use crate::app::App;
use crate::store::Store;
use crate::symbol::SymbolStore;
use crate::term::Var;

/// Create the standard test stores.
pub(crate) fn setup() -> (SymbolStore, Store<App>) {
    (SymbolStore::new(), Store::new())
}

/// Allocate `n` fresh variables; ids are 0..n on a fresh store.
pub(crate) fn fresh_vars(store: &mut Store<App>, n: usize) -> Vec<Var> {
    (0..n).map(|_| store.fresh_var().unwrap()).collect()
}
