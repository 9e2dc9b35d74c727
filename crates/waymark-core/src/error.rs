#![forbid(unsafe_code)]

//! Error types.
//!
//! Configuration errors abort a tour before any DOM is created; data errors
//! propagate to the caller as a rejected start. Unresolvable targets are not
//! errors at all; the cursor walks past them.

use thiserror::Error;

/// A configuration option failed validation at tour start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither inline step data nor a data source was provided.
    #[error("one of inline step data or a data source is required")]
    MissingSteps,

    /// No stylesheet source was provided.
    #[error("a style source is required")]
    MissingStyles,

    /// Placement mode outside the enumerated set.
    #[error("invalid placement mode `{0}` (expected `float` or `floor`)")]
    InvalidMode(String),

    /// End-of-tour scroll target outside the enumerated set.
    #[error("invalid end target `{0}` (expected `top` or `origin`)")]
    InvalidEndTarget(String),
}

/// Any failure surfaced by a tour invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    /// Invalid configuration; the tour never starts.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Step data could not be fetched or parsed.
    #[error("step data: {0}")]
    Data(String),

    /// A DOM operation failed in the binding layer.
    #[error("dom: {0}")]
    Dom(String),
}
