//! Child process invocation.
//!
//! Stages describe what to run as an [`Invocation`] and hand it to a
//! [`ProcessRunner`]. The runner blocks until the child exits; there is no
//! timeout and no retry.

use crate::bundler::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// A command line plus the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: PathBuf,
}

impl Invocation {
    /// Start an invocation of `program` in `cwd`.
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, in order.
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Arguments as lossy strings, for assertions and display.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Whitespace-joined command line for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code; `None` if the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessOutcome {
    /// Outcome with the given exit code.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// True only for exit code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs invocations to completion.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Run `invocation` and wait for it to exit.
    ///
    /// Returns `Err` only if the child could not be started.
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome>;
}

/// Runs invocations as real child processes with inherited stdio, so tool
/// output streams straight to the user's terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome> {
        log::debug!(
            "Running `{}` in {}",
            invocation.display(),
            invocation.cwd().display()
        );

        let status = tokio::process::Command::new(invocation.program())
            .args(invocation.arguments())
            .current_dir(invocation.cwd())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: invocation.display(),
                error,
            })?;

        log::debug!("`{}` exited with {:?}", invocation.display(), status.code());
        Ok(status.into())
    }
}

/// Prints invocations without running them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunner;

impl ProcessRunner for DryRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome> {
        println!("  (dry run) {}", invocation.display());
        Ok(ProcessOutcome::exited(0))
    }
}
