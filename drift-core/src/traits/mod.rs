//! Cross-cutting traits shared by `drift-analysis` and any driver built on it.

pub mod cancellation;

pub use cancellation::{Cancellable, CancellationToken};
