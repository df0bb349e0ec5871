//! Core Settings struct and implementations.

use super::{BuildMode, FreezeSettings, PackageSettings, TargetOs};
use std::path::{Path, PathBuf};

/// Main settings for a build run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Relative paths
/// (manifest, descriptor, output directories) are resolved against
/// [`Settings::project_root`].
///
/// # Examples
///
/// ```no_run
/// use booth_searcher_build::bundler::{SettingsBuilder, TargetOs};
///
/// # fn example() -> booth_searcher_build::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("C:/src/booth_searcher")
///     .target(TargetOs::Windows)
///     .build()?;
/// assert_eq!(settings.artifact_display(), "dist\\BoothSearcher.exe");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    pub(super) package: PackageSettings,
    pub(super) freeze: FreezeSettings,
    pub(super) mode: BuildMode,

    /// Directory containing the manifest, descriptor and sources.
    pub(super) project_root: PathBuf,

    /// Explicit interpreter. `None` means search PATH.
    pub(super) python: Option<PathBuf>,

    pub(super) requirements: PathBuf,
    pub(super) dist_dir: PathBuf,
    pub(super) work_dir: PathBuf,
    pub(super) target: TargetOs,

    pub(super) clean: bool,
    pub(super) verify_output: bool,
    pub(super) dry_run: bool,
}

impl Settings {
    /// Returns the product metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    /// Returns the executable stem.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the banner name.
    pub fn display_name(&self) -> &str {
        &self.package.display_name
    }

    /// Returns the version string, if known.
    pub fn version(&self) -> Option<&str> {
        self.package.version.as_deref()
    }

    /// Returns the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the explicitly configured interpreter.
    pub fn python(&self) -> Option<&Path> {
        self.python.as_deref()
    }

    /// Returns the dependency manifest, relative to the project root.
    pub fn requirements(&self) -> &Path {
        &self.requirements
    }

    /// Returns the build mode.
    pub fn mode(&self) -> &BuildMode {
        &self.mode
    }

    /// Returns the script-mode freeze settings.
    pub fn freeze(&self) -> &FreezeSettings {
        &self.freeze
    }

    /// PyInstaller output directory, relative to the project root.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// PyInstaller work directory, relative to the project root.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the target operating system.
    pub fn target(&self) -> TargetOs {
        self.target
    }

    /// Whether build caches are removed before installing dependencies.
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// Whether a successful PyInstaller exit must leave the artifact on disk.
    pub fn verify_output(&self) -> bool {
        self.verify_output
    }

    /// Whether invocations are printed instead of run.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Artifact path relative to the project root, as path components.
    ///
    /// One-file builds land at `dist/<exe>`, one-dir builds at
    /// `dist/<name>/<exe>`.
    fn artifact_components(&self) -> Vec<String> {
        let mut parts: Vec<String> = self
            .dist_dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if !self.mode.is_onefile() {
            parts.push(self.package.product_name.clone());
        }
        parts.push(self.target.executable_name(&self.package.product_name));
        parts
    }

    /// Artifact path relative to the project root.
    pub fn artifact_relative_path(&self) -> PathBuf {
        self.artifact_components().iter().collect()
    }

    /// Absolute artifact path.
    pub fn artifact_path(&self) -> PathBuf {
        self.project_root.join(self.artifact_relative_path())
    }

    /// Relative artifact path rendered with the target's separator, as shown
    /// in the final status line.
    pub fn artifact_display(&self) -> String {
        let sep = self.target.path_separator().to_string();
        self.artifact_components().join(&sep)
    }
}
