//! Project metadata discovery.
//!
//! Two optional inputs live in the project root next to the build descriptor:
//!
//! - `__version__.py`, scanned for `__version__` and `__app_name__`
//! - `booth-build.toml`, overriding build defaults

use crate::bundler::DataFile;
use crate::error::{BundlerError, CliError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "booth-build.toml";

/// Version module name.
pub const VERSION_FILE_NAME: &str = "__version__.py";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^__version__\s*=\s*["']([^"']+)["']"#).expect("valid version regex")
});

static APP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^__app_name__\s*=\s*["']([^"']+)["']"#).expect("valid app name regex")
});

/// Fields read from `__version__.py`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// `__version__`
    pub version: Option<String>,
    /// `__app_name__`
    pub app_name: Option<String>,
}

/// Scan `__version__.py` source text.
pub fn parse_version_module(source: &str) -> VersionInfo {
    let capture = |re: &Regex| {
        re.captures(source)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    let info = VersionInfo {
        version: capture(&VERSION_RE),
        app_name: capture(&APP_NAME_RE),
    };

    if let Some(version) = &info.version {
        if let Err(e) = semver::Version::parse(version) {
            log::warn!("__version__ {:?} is not a semantic version: {}", version, e);
        }
    }

    info
}

/// Load `__version__.py` from the project root.
///
/// A missing file yields empty [`VersionInfo`].
pub fn load_version_info(project_root: &Path) -> Result<VersionInfo> {
    let path = project_root.join(VERSION_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(source) => Ok(parse_version_module(&source)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("{} not found, version unknown", path.display());
            Ok(VersionInfo::default())
        }
        Err(e) => Err(BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_version_file".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })),
    }
}

/// Contents of `booth-build.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// `[package]`
    pub package: PackageConfig,
    /// `[build]`
    pub build: BuildSection,
}

/// `[package]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Executable stem.
    pub name: Option<String>,
    /// Banner name.
    pub display_name: Option<String>,
}

/// `[build]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    /// Dependency manifest.
    pub requirements: Option<PathBuf>,
    /// Build descriptor.
    pub descriptor: Option<PathBuf>,
    /// Entry script for script mode.
    pub entry: Option<PathBuf>,
    /// PyInstaller output directory.
    pub dist_dir: Option<PathBuf>,
    /// PyInstaller work directory.
    pub work_dir: Option<PathBuf>,
    /// `--add-data` entries.
    pub data_files: Option<Vec<DataFile>>,
    /// `--hidden-import` modules.
    pub hidden_imports: Option<Vec<String>>,
    /// `--exclude-module` modules.
    pub excludes: Option<Vec<String>>,
    /// Application icon.
    pub icon: Option<PathBuf>,
}

/// Parse `booth-build.toml` text.
pub fn parse_config(text: &str, path: &Path) -> crate::bundler::Result<BuildConfig> {
    toml::from_str(text).map_err(|e| crate::bundler::Error::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load the build config.
///
/// With `explicit` set the file must exist. Otherwise the conventional
/// `booth-build.toml` in the project root is used if present.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<BuildConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = project_root.join(CONFIG_FILE_NAME);
            if !path.exists() {
                log::debug!("No {} in {}", CONFIG_FILE_NAME, project_root.display());
                return Ok(BuildConfig::default());
            }
            path
        }
    };

    let text = std::fs::read_to_string(&path).map_err(|e| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: format!("Failed to read config {}: {}", path.display(), e),
        })
    })?;

    log::info!("Loaded build config from {}", path.display());
    Ok(parse_config(&text, &path)?)
}
