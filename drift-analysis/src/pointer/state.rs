//! Frozen, query-only equivalence-class state produced by `Builder::finish`.

use drift_core::types::FxHashMap;

/// An opaque abstract reference (an alloc, a call result, a closure capture
/// — anything pointer-like) tracked by the pointer analysis. Stable index
/// into the builder's union-find; meaningless outside the `Builder`/`State`
/// pair that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference(pub(crate) u32);

/// Frozen union-find result: every `Reference` resolves to its equivalence
/// class representative. Query-only — to unify more references, build a
/// new `Builder`.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) representative: Vec<u32>,
    pub(crate) field_refs: FxHashMap<(u32, String), Reference>,
}

impl State {
    /// The equivalence class representative for `r`.
    pub fn find(&self, r: Reference) -> Reference {
        Reference(self.representative[r.0 as usize])
    }

    /// Do `a` and `b` point into the same abstract location?
    pub fn same_class(&self, a: Reference, b: Reference) -> bool {
        self.find(a) == self.find(b)
    }

    /// The reference recorded for field `name` off `base`'s equivalence
    /// class, if the builder ever unified one.
    pub fn field(&self, base: Reference, name: &str) -> Option<Reference> {
        self.field_refs.get(&(self.find(base).0, name.to_string())).copied()
    }
}
