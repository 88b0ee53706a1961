use lasso::{Spur, ThreadedRodeo};

/// An interned constructor/functor name.
pub type FuncId = Spur;

/// Interner for the constructor names of the bundled applicative shape.
///
/// Guarantees:
/// - the same string always produces the same `FuncId`,
/// - different strings always produce different `FuncId`s,
/// - a `FuncId` resolves back to its original string.
pub struct SymbolStore {
    rodeo: ThreadedRodeo,
}

impl SymbolStore {
    /// Create a new empty symbol store.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Intern a name, returning its `FuncId`.
    pub fn intern(&self, name: &str) -> FuncId {
        self.rodeo.get_or_intern(name)
    }

    /// Resolve a `FuncId` back to its name.
    /// Returns `None` for ids not created by this store.
    pub fn resolve(&self, id: FuncId) -> Option<&str> {
        self.rodeo.try_resolve(&id)
    }

    /// Get the `FuncId` for a name if it has been interned, without interning.
    pub fn get(&self, name: &str) -> Option<FuncId> {
        self.rodeo.get(name)
    }

    /// Check whether a name has been interned.
    pub fn contains(&self, name: &str) -> bool {
        self.rodeo.contains(name)
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let store = SymbolStore::new();
        let first = store.intern("Cons");
        let second = store.intern("Cons");
        assert_eq!(first, second, "same name must intern to the same id");
    }

    #[test]
    fn distinct_names_get_distinct_ids() {
        let store = SymbolStore::new();
        assert_ne!(store.intern("Cons"), store.intern("Nil"));
    }

    #[test]
    fn resolve_round_trips() {
        let store = SymbolStore::new();
        let id = store.intern("Succ");
        assert_eq!(store.resolve(id), Some("Succ"));
    }

    #[test]
    fn get_does_not_intern() {
        let store = SymbolStore::new();
        assert_eq!(store.get("Pair"), None);
        let id = store.intern("Pair");
        assert_eq!(store.get("Pair"), Some(id));
    }

    #[test]
    fn contains_tracks_interned_names() {
        let store = SymbolStore::new();
        store.intern("Zero");
        assert!(store.contains("Zero"));
        assert!(!store.contains("One"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let store = SymbolStore::new();
        assert_ne!(store.intern("cons"), store.intern("Cons"));
    }

    #[test]
    fn many_unique_names() {
        let store = SymbolStore::new();
        let ids: Vec<_> = (0..512)
            .map(|i| store.intern(&format!("Ctor{}", i)))
            .collect();
        let unique: std::collections::HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 512);
    }
}
