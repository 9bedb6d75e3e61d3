//! drift-analysis: the taint-flow analyzer's core (spec.md §1–§9).
//!
//! Five components, leaves first:
//!
//! - [`config`]: the configuration matcher (§4.1) — literal/regex/vacuous
//!   rules over (package, type, field) and (package, receiver, method).
//! - [`source`]: source discovery (§4.2) — enumerates `Seed`s from a
//!   function's parameters, free variables, allocations, and field
//!   addresses.
//! - [`propagation`]: the propagation engine (§4.3) — per-seed depth-first
//!   traversal of the SSA def-use graph under the per-opcode taint policy
//!   and intra-procedural control-flow pruning.
//! - [`sink`]: the sink/report driver (§4.4) — finds sink instructions and
//!   emits a `Diagnostic` per unsanitized, unsuppressed flow.
//! - [`suppression`]: the suppression layer (§4.5) — elides diagnostics at
//!   positions carrying an opt-out comment.
//!
//! [`ssa`] is the external input model (§6): a read-only `Program` arena
//! that some frontend (out of scope) builds once per analysis pass and
//! hands to every function above by shared reference.
//!
//! [`pointer`] is present but unwired — see its module doc comment.

pub mod config;
pub mod pointer;
pub mod propagation;
pub mod sink;
pub mod source;
pub mod ssa;
pub mod suppression;

pub use config::Configuration;
pub use sink::{analyze_function, analyze_package, Diagnostic};
pub use source::{discover_seeds, Seed, SeedKind};
pub use ssa::Program;
pub use suppression::SuppressionMap;
