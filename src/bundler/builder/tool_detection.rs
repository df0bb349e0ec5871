//! External tool detection.
//!
//! Stage 1 and stage 2 both run through the Python interpreter
//! (`python -m pip`, `python -m PyInstaller`), so the interpreter is the only
//! tool that has to be located.

use crate::bundler::{
    Settings,
    error::{Error, Result},
};
use std::path::PathBuf;

/// Names searched on PATH, in order.
pub const PYTHON_CANDIDATES: &[&str] = &["python", "python3", "py"];

/// Locate the Python interpreter for this run.
///
/// An explicitly configured interpreter is used as-is, even if it does not
/// exist; the spawn error then surfaces in stage 1 like any other install
/// failure.
pub fn find_python(settings: &Settings) -> Result<PathBuf> {
    if let Some(explicit) = settings.python() {
        log::debug!("Using configured interpreter: {}", explicit.display());
        return Ok(explicit.to_path_buf());
    }

    for candidate in PYTHON_CANDIDATES {
        match which::which(candidate) {
            Ok(path) => {
                log::debug!("Found {} at: {}", candidate, path.display());
                return Ok(path);
            }
            Err(e) => log::trace!("{} not found in PATH: {}", candidate, e),
        }
    }

    Err(Error::ToolNotFound {
        tried: PYTHON_CANDIDATES.iter().map(|s| s.to_string()).collect(),
    })
}
