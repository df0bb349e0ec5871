//! Pipeline stages.
//!
//! - [`clean`] - optional cache removal before stage 1
//! - [`install`] - stage 1, `pip install -r <manifest>`
//! - [`freeze`] - stage 2, PyInstaller
//!
//! Each stage builds an [`Invocation`](crate::bundler::Invocation) from
//! [`Settings`](crate::bundler::Settings) and maps a non-zero exit to its own
//! error kind. Stages never retry.

pub mod clean;
pub mod freeze;
pub mod install;
