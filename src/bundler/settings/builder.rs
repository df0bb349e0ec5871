//! Builder for constructing Settings.

use super::{BuildMode, FreezeSettings, PackageSettings, Settings, TargetOs};
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every field except the project root has a default matching the Booth
/// searcher layout: `requirements.txt`, `BoothSearcher.spec`, `dist/`,
/// `build/`.
///
/// # Examples
///
/// ```no_run
/// use booth_searcher_build::bundler::SettingsBuilder;
///
/// # fn example() -> booth_searcher_build::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root(".")
///     .clean(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    package: PackageSettings,
    freeze: FreezeSettings,
    mode: Option<BuildMode>,
    python: Option<PathBuf>,
    requirements: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    target: Option<TargetOs>,
    clean: bool,
    skip_verify: bool,
    dry_run: bool,
}

/// Default dependency manifest.
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";
/// Default build descriptor.
pub const DEFAULT_DESCRIPTOR: &str = "BoothSearcher.spec";

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets product metadata.
    pub fn package_settings(mut self, package: PackageSettings) -> Self {
        self.package = package;
        self
    }

    /// Sets script-mode freeze settings.
    pub fn freeze_settings(mut self, freeze: FreezeSettings) -> Self {
        self.freeze = freeze;
        self
    }

    /// Sets the build mode.
    ///
    /// Default: descriptor mode with `BoothSearcher.spec`.
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Uses a specific interpreter instead of searching PATH.
    pub fn python<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.python = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the dependency manifest.
    pub fn requirements<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.requirements = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the PyInstaller output directory.
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the PyInstaller work directory.
    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target OS.
    ///
    /// Default: host OS
    pub fn target(mut self, target: TargetOs) -> Self {
        self.target = Some(target);
        self
    }

    /// Removes `build/`, `dist/` and `__pycache__` before stage 1.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Trusts PyInstaller's exit code without checking the artifact.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Prints invocations instead of running them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the project root is missing, the product name is
    /// empty, or `dist_dir`/`work_dir` do not name a directory strictly below
    /// the project root. `--clean` deletes both recursively.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let project_root = self.project_root.context("project_root is required")?;
        if self.package.product_name.trim().is_empty() {
            crate::bail!("product name cannot be empty");
        }

        let mode = self.mode.unwrap_or_else(|| BuildMode::Descriptor {
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
        });

        let dist_dir = output_dir("dist_dir", self.dist_dir, "dist")?;
        let work_dir = output_dir("work_dir", self.work_dir, "build")?;
        if dist_dir == work_dir {
            crate::bail!("dist_dir and work_dir must differ: {}", dist_dir.display());
        }

        Ok(Settings {
            package: self.package,
            freeze: self.freeze,
            mode,
            project_root,
            python: self.python,
            requirements: self
                .requirements
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REQUIREMENTS)),
            dist_dir,
            work_dir,
            target: self.target.unwrap_or_default(),
            clean: self.clean,
            verify_output: !self.skip_verify,
            dry_run: self.dry_run,
        })
    }
}

/// Normalises an output directory to its plain components, rejecting
/// anything that could resolve to the project root or outside it.
fn output_dir(
    key: &str,
    path: Option<PathBuf>,
    default: &str,
) -> crate::bundler::Result<PathBuf> {
    let Some(path) = path else {
        return Ok(PathBuf::from(default));
    };

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                crate::bail!(
                    "{key} `{}` must be a relative path inside the project root",
                    path.display()
                );
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        crate::bail!(
            "{key} `{}` must name a directory below the project root",
            path.display()
        );
    }
    Ok(normalized)
}
