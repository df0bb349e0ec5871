//! Stage 1: dependency installation.

use crate::bundler::{
    Settings,
    error::{Error, Result},
    process::{Invocation, ProcessRunner},
};
use std::path::Path;

/// `<python> -m pip install -r <manifest>`, run from the project root.
pub fn install_invocation(settings: &Settings, python: &Path) -> Invocation {
    Invocation::new(python, settings.project_root())
        .args(["-m", "pip", "install", "-r"])
        .arg(settings.requirements())
}

/// Install the dependency manifest.
///
/// A missing manifest is not checked here: pip rejects it and the non-zero
/// exit becomes [`Error::DependencyInstall`] like any other pip failure.
pub async fn install_dependencies<R: ProcessRunner>(
    runner: &R,
    settings: &Settings,
    python: &Path,
) -> Result<()> {
    let invocation = install_invocation(settings, python);
    log::info!("Installing dependencies from {}", settings.requirements().display());

    let outcome = match runner.run(&invocation).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("{}", e);
            return Err(Error::DependencyInstall { code: None });
        }
    };

    if !outcome.success() {
        log::error!("pip exited with {:?}", outcome.code);
        return Err(Error::DependencyInstall { code: outcome.code });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    #[test]
    fn installs_from_manifest_in_project_root() {
        let settings = SettingsBuilder::new()
            .project_root("/work/booth")
            .build()
            .unwrap();
        let inv = install_invocation(&settings, Path::new("python"));

        assert_eq!(inv.program(), Path::new("python"));
        assert_eq!(inv.cwd(), Path::new("/work/booth"));
        assert_eq!(
            inv.args_lossy(),
            vec!["-m", "pip", "install", "-r", "requirements.txt"]
        );
    }
}
