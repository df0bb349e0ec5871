//! Configuration structures for build runs.
//!
//! [`Settings`] is assembled once by the CLI (defaults, then `booth-build.toml`,
//! then command-line flags) and is read-only for the rest of the run.

mod builder;
mod core;
mod freeze;
mod package;
mod target;

pub use builder::{DEFAULT_DESCRIPTOR, DEFAULT_REQUIREMENTS, SettingsBuilder};
pub use core::Settings;
pub use freeze::{BuildMode, DataFile, FreezeSettings};
pub use package::PackageSettings;
pub use target::TargetOs;
