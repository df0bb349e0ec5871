//! Build cache removal (`--clean`).

use crate::bundler::{Settings, error::Result, utils::fs};
use std::path::PathBuf;

/// Remove the PyInstaller work and output directories and every
/// `__pycache__` below the project root.
///
/// Returns the work/output directories that actually existed, for the
/// status report. Missing directories are skipped.
pub async fn clean_build(settings: &Settings) -> Result<Vec<PathBuf>> {
    let root = settings.project_root();
    let mut removed = Vec::new();

    for dir in [settings.work_dir(), settings.dist_dir()] {
        let path = root.join(dir);
        if fs::remove_dir_all(&path).await? {
            log::debug!("Removed {}", path.display());
            removed.push(path);
        }
    }

    let caches = fs::find_dirs_named(root, "__pycache__").await?;
    log::debug!("Removing {} __pycache__ directories", caches.len());
    for cache in caches {
        fs::remove_dir_all(&cache).await?;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    #[tokio::test]
    async fn removes_build_outputs_and_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("build/BoothSearcher")).unwrap();
        std::fs::create_dir_all(root.join("core/__pycache__")).unwrap();
        std::fs::write(root.join("core/__pycache__/x.pyc"), b"").unwrap();
        std::fs::write(root.join("main.py"), "print()").unwrap();

        let settings = SettingsBuilder::new().project_root(root).build().unwrap();
        let removed = clean_build(&settings).await.unwrap();

        assert_eq!(removed, vec![root.join("build")]);
        assert!(!root.join("build").exists());
        assert!(!root.join("core/__pycache__").exists());
        assert!(root.join("main.py").exists());
    }
}
