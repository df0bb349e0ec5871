//! Command line interface for the build tool.
//!
//! Parses arguments, assembles [`Settings`], runs the [`Bundler`] and turns
//! its events and result into the status report the user sees.

mod args;
mod output;
mod report;

pub use args::{Args, RuntimeConfig};
pub use output::{OutputManager, stage_message};
pub use report::BuildReport;

use crate::bundler::{
    BuildEvent, BuildMode, BuiltArtifact, Bundler, DryRunner, FreezeSettings, PackageSettings,
    Settings, SettingsBuilder, console, settings::DEFAULT_DESCRIPTOR,
};
use crate::error::{BundlerError, CliError, Result};
use crate::metadata;
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Entry script used in script mode when none is configured.
pub const DEFAULT_ENTRY: &str = "main.py";

/// Run the build with parsed arguments and return the process exit code.
///
/// Every terminal state, success or failure, ends with the pause unless
/// `--no-pause` is set.
pub async fn run(args: Args) -> Result<i32> {
    console::enable_utf8_console();
    let config = RuntimeConfig::from(&args);

    let code = match prepare_and_build(&args, &config).await {
        Ok(()) => 0,
        Err(e) => {
            report_failure(&config, &e);
            1
        }
    };

    config.pause();
    Ok(code)
}

async fn prepare_and_build(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let output = config.output();
    let prepared = args
        .validate()
        .map_err(|reason| BundlerError::from(CliError::InvalidArguments { reason }))
        .and_then(|()| build_settings(args));
    let settings = match prepared {
        Ok(settings) => settings,
        Err(e) => {
            output.banner(&PackageSettings::default().display_name, None)?;
            return Err(e);
        }
    };
    output.banner(settings.display_name(), settings.version())?;

    let on_event = |event: BuildEvent| {
        if let Err(e) = report_event(output, &event) {
            log::warn!("Failed to write status line: {}", e);
        }
    };

    let artifact = if settings.dry_run() {
        Bundler::with_runner(settings.clone(), DryRunner)
            .run(on_event)
            .await?
    } else {
        Bundler::new(settings.clone()).run(on_event).await?
    };

    report_success(output, &settings, &artifact, args.report.as_deref())
}

/// Assemble settings: built-in defaults, then `booth-build.toml`, then flags.
pub fn build_settings(args: &Args) -> Result<Settings> {
    let project_root = args.project_root.absolutize()?.into_owned();
    let file_config = metadata::load_config(&project_root, args.config.as_deref())?;
    let version = metadata::load_version_info(&project_root)?;

    let defaults = PackageSettings::default();
    let package = PackageSettings {
        product_name: file_config.package.name.unwrap_or(defaults.product_name),
        display_name: file_config
            .package
            .display_name
            .or(version.app_name)
            .unwrap_or(defaults.display_name),
        version: version.version,
    };

    let build = file_config.build;
    let mut freeze = FreezeSettings::default();
    if let Some(data_files) = build.data_files {
        freeze.data_files = data_files;
    }
    if let Some(hidden_imports) = build.hidden_imports {
        freeze.hidden_imports = hidden_imports;
    }
    if let Some(excludes) = build.excludes {
        freeze.excludes = excludes;
    }
    if build.icon.is_some() {
        freeze.icon = build.icon;
    }

    let mode = if args.script_mode() {
        BuildMode::Script {
            entry: args
                .entry
                .clone()
                .or(build.entry)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY)),
            onefile: args.onefile,
            console: args.console,
        }
    } else {
        BuildMode::Descriptor {
            descriptor: args
                .descriptor
                .clone()
                .or(build.descriptor)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR)),
        }
    };

    let mut builder = SettingsBuilder::new()
        .project_root(&project_root)
        .package_settings(package)
        .freeze_settings(freeze)
        .mode(mode)
        .clean(args.clean)
        .skip_verify(args.no_verify)
        .dry_run(args.dry_run);

    if let Some(python) = &args.python {
        builder = builder.python(python);
    }
    if let Some(requirements) = args.requirements.clone().or(build.requirements) {
        builder = builder.requirements(requirements);
    }
    if let Some(dist_dir) = build.dist_dir {
        builder = builder.dist_dir(dist_dir);
    }
    if let Some(work_dir) = build.work_dir {
        builder = builder.work_dir(work_dir);
    }

    Ok(builder.build()?)
}

fn report_event(output: &OutputManager, event: &BuildEvent) -> std::io::Result<()> {
    match event {
        BuildEvent::Cleaning => output.line("빌드 캐시 삭제 중..."),
        BuildEvent::Removed(path) => output.indent(&format!("삭제: {}", path.display())),
        BuildEvent::Cleaned => {
            output.line("완료")?;
            output.line("")
        }
        BuildEvent::Stage(stage) => output.stage(*stage),
    }
}

fn report_success(
    output: &OutputManager,
    settings: &Settings,
    artifact: &BuiltArtifact,
    report_path: Option<&std::path::Path>,
) -> Result<()> {
    if let Some(size) = artifact.size {
        output.indent(&format!("크기: {size} bytes"))?;
    }
    if let Some(checksum) = &artifact.checksum {
        output.indent(&format!("SHA-256: {checksum}"))?;
    }

    if let Some(path) = report_path {
        match BuildReport::new(settings, artifact).write(path) {
            Ok(()) => output.indent(&format!("빌드 리포트: {}", path.display()))?,
            Err(e) => {
                log::warn!("{}", e);
                output.warn(&format!("  빌드 리포트 저장 실패: {e}"))?;
            }
        }
    }

    output.line("")?;
    output.success(&format!("실행 파일 위치: {}", artifact.display))?;
    Ok(())
}

fn report_failure(config: &RuntimeConfig, error: &BundlerError) {
    log::error!("{}", error);
    let output = config.output();
    let headline = error.stage_failure_message().unwrap_or("빌드를 시작할 수 없습니다!");

    let written = output
        .line("")
        .and_then(|_| output.error(headline))
        .and_then(|_| output.indent(&error.to_string()));
    if let Err(e) = written {
        eprintln!("Error: {}", error);
        log::debug!("Failed to write failure report: {}", e);
    }
}
