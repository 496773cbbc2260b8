// src/error.rs
//! Error types for the bootstrap façade.
//!
//! Every kind here is fatal in intent: this layer exists to bootstrap a test
//! program, and a partial bootstrap leaves nothing worth continuing with.
//! There is no retry policy anywhere. The façade reports the failure and the
//! embedding program decides to terminate.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GlutError>;

/// Unrecoverable bootstrap failures.
#[derive(Debug)]
pub enum GlutError {
    /// Invalid platform string, bad API mask, or a platform this build
    /// cannot support.
    Configuration(String),

    /// The context-creation driver failed to produce a display, config,
    /// context, or window. `detail` carries the driver's own diagnostic.
    ResourceCreation {
        /// Name of the driver call that failed.
        call: &'static str,
        detail: String,
    },

    /// An operation hit the window state machine in the wrong state: a
    /// second window, a mismatched id, or a main loop with nothing to run.
    InvariantViolation(String),
}

impl GlutError {
    /// Wrap a driver failure, keeping the driver's diagnostic chain.
    pub(crate) fn resource(call: &'static str, err: anyhow::Error) -> Self {
        GlutError::ResourceCreation {
            call,
            detail: format!("{err:#}"),
        }
    }

    /// The name of the failing driver call, for [`ResourceCreation`] errors.
    ///
    /// [`ResourceCreation`]: GlutError::ResourceCreation
    pub fn failed_call(&self) -> Option<&'static str> {
        match self {
            GlutError::ResourceCreation { call, .. } => Some(call),
            _ => None,
        }
    }
}

impl fmt::Display for GlutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlutError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            GlutError::ResourceCreation { call, detail } => {
                write!(f, "{call} failed: {detail}")
            }
            GlutError::InvariantViolation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GlutError {}
