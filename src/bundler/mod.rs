//! Build pipeline for the Booth searcher executable.
//!
//! Strictly sequential: cache cleanup (optional), dependency installation,
//! PyInstaller, artifact verification. Stages share nothing but the
//! filesystem and each child's exit status.

pub mod builder;
pub mod console;
pub mod error;
pub mod process;
pub mod settings;
pub mod stages;
pub mod utils;

pub use builder::{BuildEvent, BuiltArtifact, Bundler, Stage};
pub use error::{Error, Result};
pub use process::{DryRunner, Invocation, ProcessOutcome, ProcessRunner, SystemRunner};
pub use settings::{
    BuildMode, DataFile, FreezeSettings, PackageSettings, Settings, SettingsBuilder, TargetOs,
};
