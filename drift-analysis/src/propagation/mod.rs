//! The propagation engine (§4.3) — a constrained depth-first traversal of
//! the SSA def-use graph from one `Seed`, producing the `Propagation`
//! record the sink/report driver consults.

pub mod engine;

pub use engine::{propagate, Propagation, SanitizerRecord};
