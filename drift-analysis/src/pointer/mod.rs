//! Experimental, unused pointer analysis (spec.md §1, §5; SPEC_FULL §C).
//!
//! A Steensgaard-style union-find over abstract references, with weighted
//! join and path compression supplied by `petgraph::unionfind::UnionFind`,
//! plus field-reference tracking for `base.field` resolution. Present in
//! the source repository as a separate subsystem that is never wired into
//! reporting; mirrored here for the same reason — not called from
//! [`crate::sink::analyze_function`] or [`crate::sink::analyze_package`],
//! and not re-exported from the crate root.
//!
//! Split into a mutating `Builder` and a frozen, query-only `State` per
//! SPEC_FULL §C's design note, replacing the original's single struct that
//! is mutated during construction and declared read-only by convention
//! after a `Finalize` call: two distinct types make the query/build phases
//! explicit rather than guarded by a runtime flag.

pub mod builder;
pub mod state;

pub use builder::Builder;
pub use state::{Reference, State};
