//! Build orchestration for the Booth VRChat outfit searcher.
//!
//! This library runs the fail-fast pipeline that turns the Python sources
//! into a standalone executable:
//! - dependency installation (`pip install -r requirements.txt`)
//! - freezing with PyInstaller (`BoothSearcher.spec --noconfirm`)
//! - status reporting and artifact verification
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
