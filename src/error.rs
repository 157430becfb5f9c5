//! Startup errors
//!
//! Only startup can fail. Per-tick classifier noise is resolved to "no action"
//! and the simulation itself is infallible.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StartupError {
    #[error("failed to load gesture model from {url}: {reason}")]
    ModelLoad { url: String, reason: String },

    #[error("camera unavailable: {0}")]
    Camera(String),

    #[error("classifier reports unknown class {0:?}")]
    UnknownLabel(String),

    #[error("classifier has no class for the {role} gesture ({label:?})")]
    MissingLabel { role: &'static str, label: String },
}
