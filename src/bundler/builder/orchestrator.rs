//! Main build orchestration.
//!
//! This module provides the [`Bundler`] that drives the fail-fast pipeline:
//!
//! ```text
//! START → [CLEAN] → INSTALL_DEPS → BUILD_EXE → [VERIFY] → DONE
//!                        │             │           │
//!                        └─────────────┴───────────┴──→ ABORT
//! ```
//!
//! Every step returns a [`Result`]; the first error ends the run and no later
//! step is attempted.

use crate::bundler::{
    Result, Settings,
    error::Error,
    process::{ProcessRunner, SystemRunner},
    stages,
};
use std::path::PathBuf;

use super::{checksum::calculate_sha256, tool_detection::find_python};

/// Numbered pipeline stage, as shown in `[n/3]` progress lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `pip install -r <manifest>`
    InstallDependencies,
    /// PyInstaller
    BuildExecutable,
    /// Everything succeeded.
    Complete,
}

impl Stage {
    /// Total number of numbered stages.
    pub const TOTAL: u8 = 3;

    /// 1-based position.
    pub fn number(self) -> u8 {
        match self {
            Stage::InstallDependencies => 1,
            Stage::BuildExecutable => 2,
            Stage::Complete => 3,
        }
    }
}

/// Progress notifications emitted while the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Cache cleanup is starting.
    Cleaning,
    /// A work/output directory was removed.
    Removed(PathBuf),
    /// Cache cleanup finished.
    Cleaned,
    /// A numbered stage is starting.
    Stage(Stage),
}

/// The executable produced by a successful run.
#[derive(Debug, Clone)]
pub struct BuiltArtifact {
    /// Absolute path.
    pub path: PathBuf,
    /// Relative path as printed in the final status line.
    pub display: String,
    /// Size in bytes, when the artifact was verified.
    pub size: Option<u64>,
    /// SHA-256, when the artifact was verified and readable.
    pub checksum: Option<String>,
}

/// Build pipeline orchestrator.
///
/// # Examples
///
/// ```no_run
/// use booth_searcher_build::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> booth_searcher_build::bundler::Result<()> {
/// let settings = SettingsBuilder::new().project_root(".").build()?;
/// let artifact = Bundler::new(settings)
///     .run(|event| println!("{event:?}"))
///     .await?;
/// println!("{}", artifact.display);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R = SystemRunner> {
    settings: Settings,
    runner: R,
}

impl Bundler<SystemRunner> {
    /// Creates a bundler that runs real child processes.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, SystemRunner)
    }
}

impl<R: ProcessRunner> Bundler<R> {
    /// Creates a bundler with a custom process runner.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole pipeline, reporting progress through `on_event`.
    ///
    /// # Errors
    ///
    /// - [`Error::Fs`] if `--clean` could not remove a directory
    /// - [`Error::ToolNotFound`] / [`Error::DependencyInstall`] from stage 1
    /// - [`Error::Packaging`] from stage 2
    /// - [`Error::MissingArtifact`] if verification is on and PyInstaller
    ///   exited 0 without producing the executable
    pub async fn run<F>(&self, mut on_event: F) -> Result<BuiltArtifact>
    where
        F: FnMut(BuildEvent),
    {
        let settings = &self.settings;

        if settings.clean() {
            on_event(BuildEvent::Cleaning);
            if settings.dry_run() {
                log::info!("Dry run: skipping cache removal");
            } else {
                for path in stages::clean::clean_build(settings).await? {
                    on_event(BuildEvent::Removed(path));
                }
            }
            on_event(BuildEvent::Cleaned);
        }

        on_event(BuildEvent::Stage(Stage::InstallDependencies));
        let python = match find_python(settings) {
            Ok(python) => python,
            Err(e) if settings.dry_run() => {
                log::warn!("{}; dry run continues with `python`", e);
                PathBuf::from("python")
            }
            Err(e) => return Err(e),
        };
        stages::install::install_dependencies(&self.runner, settings, &python).await?;

        on_event(BuildEvent::Stage(Stage::BuildExecutable));
        stages::freeze::freeze(&self.runner, settings, &python).await?;

        let artifact = self.inspect_artifact().await?;

        on_event(BuildEvent::Stage(Stage::Complete));
        Ok(artifact)
    }

    /// Checks the artifact after PyInstaller reported success.
    async fn inspect_artifact(&self) -> Result<BuiltArtifact> {
        let settings = &self.settings;
        let path = settings.artifact_path();
        let mut artifact = BuiltArtifact {
            display: settings.artifact_display(),
            path,
            size: None,
            checksum: None,
        };

        if !settings.verify_output() || settings.dry_run() {
            log::debug!("Artifact verification skipped");
            return Ok(artifact);
        }

        let metadata = match tokio::fs::metadata(&artifact.path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => {
                log::error!("{} is not a file", artifact.path.display());
                return Err(Error::MissingArtifact {
                    path: artifact.path,
                });
            }
            Err(e) => {
                log::error!("Cannot stat {}: {}", artifact.path.display(), e);
                return Err(Error::MissingArtifact {
                    path: artifact.path,
                });
            }
        };

        artifact.size = Some(metadata.len());
        match calculate_sha256(&artifact.path).await {
            Ok(checksum) => artifact.checksum = Some(checksum),
            Err(e) => log::warn!("Could not hash artifact: {}", e),
        }

        log::info!(
            "Artifact verified: {} ({} bytes)",
            artifact.path.display(),
            metadata.len()
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        SettingsBuilder,
        process::{Invocation, ProcessOutcome},
    };
    use std::sync::Mutex;

    /// Records invocations and answers with scripted exit codes.
    struct ScriptedRunner {
        pip_code: i32,
        pyinstaller_code: i32,
        create_artifact: Option<PathBuf>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        fn new(pip_code: i32, pyinstaller_code: i32) -> Self {
            Self {
                pip_code,
                pyinstaller_code,
                create_artifact: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for ScriptedRunner {
        async fn run(&self, invocation: &Invocation) -> Result<ProcessOutcome> {
            let args = invocation.args_lossy();
            self.calls.lock().unwrap().push(args.clone());
            if args[1] == "pip" {
                return Ok(ProcessOutcome::exited(self.pip_code));
            }
            if let Some(path) = &self.create_artifact {
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, b"MZ").unwrap();
            }
            Ok(ProcessOutcome::exited(self.pyinstaller_code))
        }
    }

    fn settings(root: &std::path::Path) -> Settings {
        SettingsBuilder::new()
            .project_root(root)
            .python("python")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn install_failure_never_packages() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new(1, 0);
        let bundler = Bundler::with_runner(settings(dir.path()), runner);

        let mut events = Vec::new();
        let err = bundler.run(|e| events.push(e)).await.unwrap_err();

        assert!(matches!(err, Error::DependencyInstall { code: Some(1) }));
        assert_eq!(bundler.runner.calls().len(), 1);
        assert_eq!(events, vec![BuildEvent::Stage(Stage::InstallDependencies)]);
    }

    #[tokio::test]
    async fn packaging_failure_stops_before_completion() {
        let dir = tempfile::tempdir().unwrap();
        let bundler = Bundler::with_runner(settings(dir.path()), ScriptedRunner::new(0, 2));

        let mut events = Vec::new();
        let err = bundler.run(|e| events.push(e)).await.unwrap_err();

        assert!(matches!(err, Error::Packaging { code: Some(2) }));
        assert_eq!(
            events,
            vec![
                BuildEvent::Stage(Stage::InstallDependencies),
                BuildEvent::Stage(Stage::BuildExecutable),
            ]
        );
    }

    #[tokio::test]
    async fn exit_zero_without_artifact_is_caught() {
        let dir = tempfile::tempdir().unwrap();
        let bundler = Bundler::with_runner(settings(dir.path()), ScriptedRunner::new(0, 0));

        let err = bundler.run(|_| {}).await.unwrap_err();
        assert!(matches!(err, Error::MissingArtifact { .. }));
    }

    #[tokio::test]
    async fn unverified_run_trusts_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new()
            .project_root(dir.path())
            .python("python")
            .skip_verify(true)
            .build()
            .unwrap();
        let bundler = Bundler::with_runner(settings, ScriptedRunner::new(0, 0));

        let artifact = bundler.run(|_| {}).await.unwrap();
        assert!(artifact.size.is_none());
    }

    #[tokio::test]
    async fn success_reports_all_stages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let mut runner = ScriptedRunner::new(0, 0);
        runner.create_artifact = Some(settings.artifact_path());
        let bundler = Bundler::with_runner(settings, runner);

        let mut events = Vec::new();
        let artifact = bundler.run(|e| events.push(e)).await.unwrap();

        assert_eq!(
            events,
            vec![
                BuildEvent::Stage(Stage::InstallDependencies),
                BuildEvent::Stage(Stage::BuildExecutable),
                BuildEvent::Stage(Stage::Complete),
            ]
        );
        assert_eq!(artifact.size, Some(2));
        assert_eq!(artifact.checksum.as_deref().map(str::len), Some(64));

        let calls = bundler.runner.calls();
        assert_eq!(calls[0][1], "pip");
        assert_eq!(calls[1][1], "PyInstaller");
    }

    #[tokio::test]
    async fn second_run_over_existing_dist_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let mut runner = ScriptedRunner::new(0, 0);
        runner.create_artifact = Some(settings.artifact_path());
        let bundler = Bundler::with_runner(settings, runner);

        bundler.run(|_| {}).await.unwrap();
        bundler.run(|_| {}).await.unwrap();
        assert!(
            bundler
                .runner
                .calls()
                .iter()
                .filter(|c| c[1] == "PyInstaller")
                .all(|c| c.contains(&"--noconfirm".to_string()))
        );
    }

    #[tokio::test]
    async fn clean_runs_before_install() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        let settings = SettingsBuilder::new()
            .project_root(dir.path())
            .python("python")
            .clean(true)
            .build()
            .unwrap();
        let bundler = Bundler::with_runner(settings, ScriptedRunner::new(1, 0));

        let mut events = Vec::new();
        let _ = bundler.run(|e| events.push(e)).await;

        assert_eq!(
            events,
            vec![
                BuildEvent::Cleaning,
                BuildEvent::Removed(dir.path().join("dist")),
                BuildEvent::Cleaned,
                BuildEvent::Stage(Stage::InstallDependencies),
            ]
        );
    }
}
