//! Stable string codes attached to every error enum, independent of the
//! `Display` message (which may be reworded without breaking callers that
//! match on the code).

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ANALYSIS_ERROR: &str = "ANALYSIS_ERROR";
pub const CANCELLED: &str = "CANCELLED";

/// Implemented by every error enum in `drift-core`/`drift-analysis`.
pub trait DriftErrorCode: std::error::Error {
    fn error_code(&self) -> &'static str;

    /// `"[CODE] message"`, suitable for a driver that wants one string to
    /// hand to a non-Rust caller.
    fn coded_string(&self) -> String {
        format!("[{}] {}", self.error_code(), self)
    }
}
