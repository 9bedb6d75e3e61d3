//! Mutation phase: allocate references and unify them the way a Steensgaard
//! pass would when processing `Alloc`/`Store`/`FieldAddr` nodes (unwired —
//! no such processing actually runs; see the module doc comment).

use drift_core::types::FxHashMap;
use petgraph::unionfind::UnionFind;

use super::state::{Reference, State};

/// Grows its backing `UnionFind` geometrically as references are
/// allocated — `petgraph::unionfind::UnionFind` is fixed-size at
/// construction, so `fresh` occasionally rebuilds it rather than every
/// analysis needing to pre-count its references up front.
#[derive(Debug)]
pub struct Builder {
    uf: UnionFind<u32>,
    cap: u32,
    len: u32,
    field_refs: FxHashMap<(u32, String), Reference>,
}

impl Builder {
    pub fn new() -> Self {
        let cap = 16;
        Builder {
            uf: UnionFind::new(cap as usize),
            cap,
            len: 0,
            field_refs: FxHashMap::default(),
        }
    }

    fn ensure_capacity(&mut self, needed: u32) {
        if needed <= self.cap {
            return;
        }
        let mut new_cap = self.cap.max(1);
        while new_cap < needed {
            new_cap *= 2;
        }
        let mut grown = UnionFind::new(new_cap as usize);
        for i in 0..self.len {
            let root = self.uf.find_mut(i);
            if root != i {
                grown.union(i, root);
            }
        }
        self.uf = grown;
        self.cap = new_cap;
    }

    /// Allocate a fresh reference, e.g. for an `Alloc`/`MakeChan`/`MakeMap`
    /// node, or a call's return value.
    pub fn fresh(&mut self) -> Reference {
        let id = self.len;
        self.len += 1;
        self.ensure_capacity(self.len);
        Reference(id)
    }

    /// Unify two references into one equivalence class. `UnionFind` already
    /// unions by rank (Steensgaard's "weighted join"); `find_mut` compresses
    /// paths as a side effect of lookup.
    pub fn unify(&mut self, a: Reference, b: Reference) {
        self.uf.union(a.0, b.0);
    }

    /// Record that field `name` off `base`'s class resolves to `target`,
    /// unifying with whatever reference was already recorded for that
    /// (class, field) pair.
    pub fn record_field(&mut self, base: Reference, name: &str, target: Reference) {
        let root = self.uf.find_mut(base.0);
        let key = (root, name.to_string());
        if let Some(&existing) = self.field_refs.get(&key) {
            self.unify(existing, target);
        } else {
            self.field_refs.insert(key, target);
        }
    }

    /// Freeze into a query-only `State`, consuming the builder — no further
    /// unification is possible afterward.
    pub fn finish(mut self) -> State {
        let mut representative = Vec::with_capacity(self.len as usize);
        for i in 0..self.len {
            representative.push(self.uf.find_mut(i));
        }
        let mut field_refs = FxHashMap::default();
        for ((root, name), r) in self.field_refs {
            field_refs.insert((self.uf.find_mut(root), name), Reference(self.uf.find_mut(r.0)));
        }
        State { representative, field_refs }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
