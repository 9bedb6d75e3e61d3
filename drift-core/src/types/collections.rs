//! Re-exports of performance-oriented collection types used throughout
//! `drift-analysis`: non-cryptographic hashing for the maps that sit on the
//! per-function traversal hot path.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for the operands/uses of a typical SSA instruction.
pub type SmallVec4<T> = SmallVec<[T; 4]>;
