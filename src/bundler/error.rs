//! Error types for pipeline stages.
//!
//! Every stage returns [`Result`]. The two stage failures that end a build
//! (dependency installation and packaging) carry the child's exit code so the
//! reporter can show it next to the fixed failure message.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the bundler.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while running the build pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// `pip install` exited non-zero or could not run.
    #[error("dependency installation failed{}", exit_suffix(*code))]
    DependencyInstall {
        /// Exit code of pip, `None` if killed by a signal or never started.
        code: Option<i32>,
    },

    /// PyInstaller exited non-zero.
    #[error("packaging failed{}", exit_suffix(*code))]
    Packaging {
        /// Exit code of PyInstaller, `None` if killed by a signal.
        code: Option<i32>,
    },

    /// PyInstaller reported success but the executable is not on disk.
    #[error("packaging reported success but {} does not exist", path.display())]
    MissingArtifact {
        /// Expected artifact location.
        path: PathBuf,
    },

    /// A child process could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that failed to spawn.
        command: String,
        /// Underlying spawn error.
        #[source]
        error: std::io::Error,
    },

    /// No usable Python interpreter.
    #[error("python interpreter not found (tried: {})", tried.join(", "))]
    ToolNotFound {
        /// Candidate names searched on PATH.
        tried: Vec<String>,
    },

    /// Filesystem error with the path and operation that caused it.
    #[error("{context} ({}): {error}", path.display())]
    Fs {
        /// What was being done.
        context: String,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: std::io::Error,
    },

    /// Invalid `booth-build.toml`.
    #[error("invalid config {}: {reason}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parse error text.
        reason: String,
    },

    /// Plain IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn exit_suffix(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => String::new(),
    }
}

impl Error {
    /// Fixed user-facing message for the stage this error aborts.
    ///
    /// Spawn and tool errors are raised by the stage that needed the tool, so
    /// the caller decides which stage message they map to.
    pub fn stage_failure_message(&self) -> Option<&'static str> {
        match self {
            Error::DependencyInstall { .. } | Error::ToolNotFound { .. } => {
                Some("의존성 설치 실패!")
            }
            Error::Packaging { .. } => Some("빌드 실패!"),
            Error::MissingArtifact { .. } => Some("빌드 실패! 실행 파일을 찾을 수 없습니다"),
            Error::Fs { .. } => Some("빌드 캐시 삭제 실패!"),
            _ => None,
        }
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation and path it concerned.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            error,
        })
    }
}

/// Attach a message to any displayable error.
pub trait Context<T> {
    /// Convert the failure into [`Error::GenericError`] carrying `msg`.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Return early with an [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
