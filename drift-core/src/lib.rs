//! drift-core: ambient types, errors, and traits shared by the Drift taint
//! analysis engine.
//!
//! - `errors`: one `thiserror` enum per subsystem, plus `DriftErrorCode`.
//! - `types`: FxHashMap/FxHashSet/SmallVec re-exports used on hot paths.
//! - `traits`: cross-cutting traits (cancellation) with no subsystem of
//!   their own.

pub mod errors;
pub mod traits;
pub mod types;

pub use errors::{AnalysisError, ConfigError, DriftErrorCode};
pub use traits::{Cancellable, CancellationToken};
pub use types::{FxHashMap, FxHashSet};

/// Install a `tracing-subscriber` reading `RUST_LOG` (or `info` by default).
///
/// This crate never calls it itself — only a binary driver should install a
/// global subscriber. Exposed here purely as a convenience so a driver
/// doesn't need a direct `tracing-subscriber` dependency of its own.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
