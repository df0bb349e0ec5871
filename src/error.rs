//! Top-level error types.
//!
//! [`BundlerError`] is what [`cli::run`](crate::cli::run) propagates. Pipeline
//! failures arrive wrapped in [`BundlerError::Bundler`] so the CLI can print
//! the stage's fixed failure message.

use thiserror::Error;

/// Result type alias for CLI-level operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the build tool
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Fixed status line for the pipeline stage that failed, if any.
    pub fn stage_failure_message(&self) -> Option<&'static str> {
        match self {
            BundlerError::Bundler(e) => e.stage_failure_message(),
            _ => None,
        }
    }
}
