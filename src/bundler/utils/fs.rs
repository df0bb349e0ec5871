//! File system utilities for build cleanup.

use crate::bundler::error::{ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Removes the directory and its contents.
///
/// Returns `false` if it did not exist.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Finds every directory named `name` below `root`.
///
/// Matching directories are not descended into. Unreadable entries are
/// skipped.
pub async fn find_dirs_named(root: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();
    let name = name.to_string();

    tokio::task::spawn_blocking(move || {
        let mut found = Vec::new();
        let mut walker = walkdir::WalkDir::new(&root).follow_links(false).into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_dir() && entry.file_name() == name.as_str() {
                found.push(entry.into_path());
                walker.skip_current_dir();
            }
        }

        found
    })
    .await
    .map_err(|e| {
        crate::bundler::Error::GenericError(format!("Directory scan task panicked: {}", e))
    })
}
