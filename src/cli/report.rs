//! JSON build report (`--report`).

use crate::bundler::{BuiltArtifact, Settings};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a successful build.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    /// Executable stem.
    pub product: String,
    /// Application version, if known.
    pub version: Option<String>,
    /// `descriptor`, `onefile` or `onedir`.
    pub mode: String,
    /// Absolute executable path.
    pub artifact: PathBuf,
    /// Size in bytes, when verified.
    pub size: Option<u64>,
    /// Hex SHA-256, when verified.
    pub sha256: Option<String>,
    /// Completion time.
    pub built_at: DateTime<Utc>,
}

impl BuildReport {
    /// Assemble a report for `artifact`.
    pub fn new(settings: &Settings, artifact: &BuiltArtifact) -> Self {
        Self {
            product: settings.product_name().to_string(),
            version: settings.version().map(String::from),
            mode: settings.mode().label().to_string(),
            artifact: artifact.path.clone(),
            size: artifact.size,
            sha256: artifact.checksum.clone(),
            built_at: Utc::now(),
        }
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing build report {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    #[test]
    fn report_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsBuilder::new().project_root(dir.path()).build().unwrap();
        let artifact = BuiltArtifact {
            path: settings.artifact_path(),
            display: settings.artifact_display(),
            size: Some(10),
            checksum: Some("ab".into()),
        };

        let path = dir.path().join("out/report.json");
        BuildReport::new(&settings, &artifact).write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["product"], "BoothSearcher");
        assert_eq!(value["mode"], "descriptor");
        assert_eq!(value["size"], 10);
        assert!(value["built_at"].is_string());
    }
}
