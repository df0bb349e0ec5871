//! PyInstaller invocation settings.

use std::path::PathBuf;

/// How stage 2 tells PyInstaller what to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildMode {
    /// `PyInstaller <descriptor> --noconfirm`. The descriptor decides
    /// everything; the artifact is expected as a single file in `dist/`.
    Descriptor {
        /// Build descriptor, relative to the project root.
        descriptor: PathBuf,
    },

    /// PyInstaller flags assembled from [`FreezeSettings`] plus an entry script.
    Script {
        /// Entry script, relative to the project root.
        entry: PathBuf,
        /// `--onefile` instead of `--onedir`.
        onefile: bool,
        /// `--console` instead of `--windowed`.
        console: bool,
    },
}

impl BuildMode {
    /// Whether the artifact is a single executable directly under `dist/`.
    pub fn is_onefile(&self) -> bool {
        match self {
            BuildMode::Descriptor { .. } => true,
            BuildMode::Script { onefile, .. } => *onefile,
        }
    }

    /// Short name for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            BuildMode::Descriptor { .. } => "descriptor",
            BuildMode::Script { onefile: true, .. } => "onefile",
            BuildMode::Script { onefile: false, .. } => "onedir",
        }
    }
}

/// A file bundled next to the frozen code (`--add-data`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataFile {
    /// Source path, relative to the project root.
    pub source: PathBuf,
    /// Destination directory inside the bundle.
    pub dest: String,
}

/// Extra inputs for script mode.
///
/// Ignored in descriptor mode, where the descriptor carries the same
/// information.
#[derive(Debug, Clone)]
pub struct FreezeSettings {
    /// `--add-data` entries. Missing sources are skipped.
    pub data_files: Vec<DataFile>,
    /// `--hidden-import` modules.
    pub hidden_imports: Vec<String>,
    /// `--exclude-module` modules, dropped to shrink the bundle.
    pub excludes: Vec<String>,
    /// Application icon. Skipped if it does not exist.
    pub icon: Option<PathBuf>,
}

impl Default for FreezeSettings {
    fn default() -> Self {
        Self {
            data_files: vec![DataFile {
                source: PathBuf::from("data/popular_avatars.json"),
                dest: "data".to_string(),
            }],
            hidden_imports: ["PyQt6.QtWidgets", "PyQt6.QtCore", "PyQt6.QtGui", "bs4", "urllib3"]
                .into_iter()
                .map(String::from)
                .collect(),
            excludes: ["tkinter", "unittest", "email", "xml", "pydoc"]
                .into_iter()
                .map(String::from)
                .collect(),
            icon: Some(PathBuf::from("assets").join("icon.ico")),
        }
    }
}
