//! Stage 2: freezing the application with PyInstaller.

use crate::bundler::{
    BuildMode, Settings,
    error::{Error, Result},
    process::{Invocation, ProcessRunner},
};
use std::ffi::OsString;
use std::path::Path;

/// Build the PyInstaller command line for the configured mode.
///
/// `--noconfirm` is always passed so an existing `dist/` is replaced without
/// an interactive prompt, which keeps repeated runs non-interactive.
pub fn freeze_invocation(settings: &Settings, python: &Path) -> Invocation {
    let root = settings.project_root();
    let mut invocation = Invocation::new(python, root).args(["-m", "PyInstaller"]);

    match settings.mode() {
        BuildMode::Descriptor { descriptor } => {
            invocation = invocation.arg(descriptor.as_os_str()).arg("--noconfirm");
        }
        BuildMode::Script {
            entry,
            onefile,
            console,
        } => {
            let freeze = settings.freeze();
            invocation = invocation
                .args(["--name", settings.product_name()])
                .arg(if *console { "--console" } else { "--windowed" })
                .arg(if *onefile { "--onefile" } else { "--onedir" });

            for data in &freeze.data_files {
                if root.join(&data.source).exists() {
                    let mut spec = OsString::from(data.source.as_os_str());
                    spec.push(settings.target().data_separator().to_string());
                    spec.push(&data.dest);
                    invocation = invocation.arg("--add-data").arg(spec);
                } else {
                    log::debug!("Skipping missing data file: {}", data.source.display());
                }
            }

            for module in &freeze.hidden_imports {
                invocation = invocation.arg("--hidden-import").arg(module);
            }

            for module in &freeze.excludes {
                invocation = invocation.arg("--exclude-module").arg(module);
            }

            if let Some(icon) = &freeze.icon {
                if root.join(icon).exists() {
                    invocation = invocation.arg("--icon").arg(icon.as_os_str());
                } else {
                    log::debug!("Icon not found, building without: {}", icon.display());
                }
            }

            invocation = invocation.arg("--noconfirm").arg(entry.as_os_str());
        }
    }

    if settings.dist_dir() != Path::new("dist") {
        invocation = invocation.arg("--distpath").arg(settings.dist_dir().as_os_str());
    }
    if settings.work_dir() != Path::new("build") {
        invocation = invocation.arg("--workpath").arg(settings.work_dir().as_os_str());
    }

    invocation
}

/// Run PyInstaller.
pub async fn freeze<R: ProcessRunner>(
    runner: &R,
    settings: &Settings,
    python: &Path,
) -> Result<()> {
    let invocation = freeze_invocation(settings, python);
    log::info!(
        "Freezing {} ({} mode)",
        settings.product_name(),
        settings.mode().label()
    );

    let outcome = match runner.run(&invocation).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("{}", e);
            return Err(Error::Packaging { code: None });
        }
    };

    if !outcome.success() {
        log::error!("PyInstaller exited with {:?}", outcome.code);
        return Err(Error::Packaging { code: outcome.code });
    }

    Ok(())
}
