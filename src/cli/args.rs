//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, plus the
//! [`RuntimeConfig`] derived from it.

use clap::Parser;
use std::path::PathBuf;

/// Build the Booth VRChat outfit searcher into a standalone executable
#[derive(Parser, Debug)]
#[command(
    name = "booth_build",
    version,
    about = "Build the Booth VRChat outfit searcher into a standalone executable",
    long_about = "Installs the Python dependency manifest and freezes the application with PyInstaller.

Stages:
  [1/3] python -m pip install -r requirements.txt
  [2/3] python -m PyInstaller BoothSearcher.spec --noconfirm
  [3/3] report the executable location (dist\\BoothSearcher.exe)

Usage:
  booth_build
  booth_build --clean
  booth_build --onefile --console --entry main.py

Exit code 0 = every stage succeeded. Exit code 1 = a stage failed."
)]
pub struct Args {
    /// Project directory containing the manifest and build descriptor
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Python interpreter (default: first of python, python3, py on PATH)
    #[arg(long, env = "BOOTH_BUILD_PYTHON", value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Dependency manifest, relative to the project root
    #[arg(long, value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// PyInstaller build descriptor, relative to the project root
    #[arg(long, value_name = "FILE", conflicts_with_all = ["onefile", "console", "entry"])]
    pub descriptor: Option<PathBuf>,

    /// Build config file (default: booth-build.toml in the project root, if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Remove build/, dist/ and __pycache__ before building
    #[arg(long)]
    pub clean: bool,

    /// Script mode: build a single-file executable
    #[arg(long)]
    pub onefile: bool,

    /// Script mode: keep a console window
    #[arg(long)]
    pub console: bool,

    /// Script mode: entry script (default: main.py)
    #[arg(long, value_name = "SCRIPT")]
    pub entry: Option<PathBuf>,

    /// Trust PyInstaller's exit code without checking the executable exists
    #[arg(long)]
    pub no_verify: bool,

    /// Exit without waiting for Enter
    #[arg(
        long,
        env = "BOOTH_BUILD_NO_PAUSE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_pause: bool,

    /// Write a JSON build report to this path on success
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether stage 2 assembles PyInstaller flags instead of using a descriptor.
    pub fn script_mode(&self) -> bool {
        self.onefile || self.console || self.entry.is_some()
    }

    /// Default log filter for `-v` count.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_root.is_dir() {
            return Err(format!(
                "Project root is not a directory: {}",
                self.project_root.display()
            ));
        }

        if let Some(entry) = &self.entry {
            if entry.as_os_str().is_empty() {
                return Err("Entry script cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,

    /// Wait for Enter before exiting
    pause: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(),
            pause: !args.no_pause,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Block for acknowledgment unless disabled
    pub fn pause(&self) {
        if self.pause {
            crate::bundler::console::pause();
        }
    }
}
