/// One layer of a user-defined term structure.
///
/// Implementers supply a concrete layer type (a constructor tag plus child
/// slots of type `X`) through the `Layer` associated type. The two required
/// operations fully determine unification behavior:
///
/// - `traverse` visits every child in deterministic left-to-right order and
///   rebuilds the same constructor around the results,
/// - `zip_match` pairs up the children of two same-shaped layers, or reports
///   that the constructors disagree.
pub trait TermShape: Sized {
    /// A single constructor layer with child slots of type `X`.
    type Layer<X>;

    /// Apply `f` to every child in left-to-right order, collecting the
    /// results into the same constructor. Stops at the first `Err`.
    ///
    /// Must preserve the constructor and arity.
    fn traverse<X, Y, E, F>(layer: &Self::Layer<X>, f: F) -> Result<Self::Layer<Y>, E>
    where
        F: FnMut(&X) -> Result<Y, E>;

    /// Pair the children of two layers with the same constructor and arity,
    /// in the same order. Returns `None` when the constructors disagree.
    fn zip_match<X: Clone>(
        left: &Self::Layer<X>,
        right: &Self::Layer<X>,
    ) -> Option<Self::Layer<(X, X)>>;

    /// Visit every child in order without rebuilding anything.
    /// Stops at the first `Err`.
    fn visit<X, E, F>(layer: &Self::Layer<X>, mut f: F) -> Result<(), E>
    where
        F: FnMut(&X) -> Result<(), E>,
    {
        Self::traverse::<X, (), E, _>(layer, |child| f(child)).map(|_| ())
    }
}
