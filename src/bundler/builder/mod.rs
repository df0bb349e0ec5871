//! Build orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the pipeline
//! stages in order and stops at the first failure.
//!
//! # Overview
//!
//! The bundler:
//! 1. Optionally removes build caches
//! 2. Locates the Python interpreter
//! 3. Installs the dependency manifest
//! 4. Freezes the application with PyInstaller
//! 5. Verifies and hashes the executable
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the executable
//! - [`orchestrator`] - Main [`Bundler`] struct and the stage sequence
//! - [`tool_detection`] - Python interpreter lookup

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{BuildEvent, BuiltArtifact, Bundler, Stage};
pub use tool_detection::{PYTHON_CANDIDATES, find_python};
