//! End-to-end runs of the `booth_build` binary against a fake interpreter.
//!
//! The fake `python` appends its arguments to `calls.log`, fails pip when
//! `requirements.txt` is missing, and writes `dist/BoothSearcher` when asked
//! to run PyInstaller. Exit codes are steered through environment variables.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "$*" >> calls.log
if [ "$2" = "pip" ]; then
  [ -f requirements.txt ] || exit 1
  exit "${FAKE_PIP_EXIT:-0}"
fi
if [ "$2" = "PyInstaller" ]; then
  if [ "${FAKE_SKIP_ARTIFACT:-0}" != "1" ]; then
    mkdir -p dist && printf 'MZ' > dist/BoothSearcher
  fi
  exit "${FAKE_PYI_EXIT:-0}"
fi
exit 3
"#;

struct Project {
    dir: TempDir,
    _bin: TempDir,
    python: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        let python = bin.path().join("python");
        std::fs::write(&python, FAKE_PYTHON).unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        std::fs::write(dir.path().join("requirements.txt"), "PyQt6\n").unwrap();
        std::fs::write(dir.path().join("BoothSearcher.spec"), "# spec\n").unwrap();
        Self {
            dir,
            _bin: bin,
            python,
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("booth_build").unwrap();
        cmd.current_dir(self.root())
            .env("BOOTH_BUILD_PYTHON", &self.python)
            .env_remove("BOOTH_BUILD_NO_PAUSE")
            .env_remove("RUST_LOG")
            .arg("--no-pause");
        cmd
    }

    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.root().join("calls.log"))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn last_line(text: &str) -> &str {
    text.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("")
}

#[test]
fn successful_build_prints_stages_in_order_and_location_last() {
    let project = Project::new();
    let output = project.cmd().assert().success().get_output().clone();
    let stdout = stdout_of(&output);

    let one = stdout.find("[1/3]").unwrap();
    let two = stdout.find("[2/3]").unwrap();
    let three = stdout.find("[3/3]").unwrap();
    assert!(one < two && two < three);
    assert_eq!(last_line(&stdout), "실행 파일 위치: dist/BoothSearcher");

    assert_eq!(
        project.calls(),
        vec![
            "-m pip install -r requirements.txt",
            "-m PyInstaller BoothSearcher.spec --noconfirm",
        ]
    );
}

#[test]
fn missing_manifest_aborts_before_packaging() {
    let project = Project::new();
    std::fs::remove_file(project.root().join("requirements.txt")).unwrap();

    project
        .cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("의존성 설치 실패!"))
        .stdout(predicate::str::contains("[2/3]").not());

    let calls = project.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("pip"));
}

#[test]
fn packaging_failure_exits_one() {
    let project = Project::new();
    project
        .cmd()
        .env("FAKE_PYI_EXIT", "2")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("빌드 실패!"))
        .stdout(predicate::str::contains("[3/3]").not())
        .stdout(predicate::str::contains("실행 파일 위치").not());
}

#[test]
fn exit_zero_without_executable_is_a_failure() {
    let project = Project::new();
    project
        .cmd()
        .env("FAKE_SKIP_ARTIFACT", "1")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("실행 파일을 찾을 수 없습니다"));
}

#[test]
fn no_verify_trusts_exit_code() {
    let project = Project::new();
    project
        .cmd()
        .env("FAKE_SKIP_ARTIFACT", "1")
        .arg("--no-verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("실행 파일 위치: dist/BoothSearcher"));
}

#[test]
fn repeated_builds_both_succeed() {
    let project = Project::new();
    project.cmd().assert().success();
    project.cmd().assert().success();
    assert_eq!(project.calls().len(), 4);
}

#[test]
fn clean_removes_caches_before_installing() {
    let project = Project::new();
    std::fs::create_dir_all(project.root().join("build/BoothSearcher")).unwrap();
    std::fs::create_dir_all(project.root().join("utils/__pycache__")).unwrap();

    project
        .cmd()
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("빌드 캐시 삭제 중..."))
        .stdout(predicate::str::contains("삭제:"));

    assert!(!project.root().join("build").exists());
    assert!(!project.root().join("utils/__pycache__").exists());
}

#[test]
fn script_mode_assembles_pyinstaller_flags() {
    let project = Project::new();
    project
        .cmd()
        .args(["--onefile", "--console", "--entry", "gui.py"])
        .assert()
        .success();

    let calls = project.calls();
    let freeze = &calls[1];
    assert!(freeze.starts_with("-m PyInstaller --name BoothSearcher --console --onefile"));
    assert!(freeze.contains("--hidden-import PyQt6.QtWidgets"));
    assert!(freeze.contains("--exclude-module tkinter"));
    assert!(freeze.ends_with("--noconfirm gui.py"));
}

#[test]
fn pause_waits_for_enter() {
    let project = Project::new();
    let mut cmd = Command::cargo_bin("booth_build").unwrap();
    cmd.current_dir(project.root())
        .env("BOOTH_BUILD_PYTHON", &project.python)
        .env_remove("BOOTH_BUILD_NO_PAUSE")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("계속하려면 Enter 키를 누르십시오..."));
}

#[test]
fn banner_includes_version_from_version_module() {
    let project = Project::new();
    std::fs::write(
        project.root().join("__version__.py"),
        "__version__ = \"2.0.0\"\n__app_name__ = \"Booth VRChat 의상 검색기\"\n",
    )
    .unwrap();

    project
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Booth VRChat 의상 검색기 v2.0.0 빌드"));
}

#[test]
fn report_is_written_on_success() {
    let project = Project::new();
    let report = project.root().join("report.json");

    project
        .cmd()
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(value["product"], "BoothSearcher");
    assert_eq!(value["size"], 2);
}

#[test]
fn dry_run_runs_nothing() {
    let project = Project::new();
    project
        .cmd()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry run)"));

    assert!(project.calls().is_empty());
    assert!(!project.root().join("dist").exists());
}

#[test]
fn config_file_overrides_product_name() {
    let project = Project::new();
    std::fs::write(
        project.root().join("booth-build.toml"),
        "[package]\nname = \"BoothSearcher\"\ndisplay_name = \"Custom Title\"\n",
    )
    .unwrap();

    project
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom Title 빌드"));
}

#[test]
fn invalid_project_root_fails_with_status_one() {
    let project = Project::new();
    project
        .cmd()
        .args(["--project-root", "does-not-exist"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("빌드를 시작할 수 없습니다!"));
    assert!(project.calls().is_empty());
}

fn paused_cmd(project: &Project) -> Command {
    let mut cmd = Command::cargo_bin("booth_build").unwrap();
    cmd.current_dir(project.root())
        .env("BOOTH_BUILD_PYTHON", &project.python)
        .env_remove("BOOTH_BUILD_NO_PAUSE")
        .env_remove("RUST_LOG")
        .write_stdin("\n");
    cmd
}

#[test]
fn pause_follows_install_failure() {
    let project = Project::new();
    std::fs::remove_file(project.root().join("requirements.txt")).unwrap();

    paused_cmd(&project)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("의존성 설치 실패!"))
        .stdout(predicate::str::ends_with("계속하려면 Enter 키를 누르십시오..."));
}

#[test]
fn pause_follows_packaging_failure() {
    let project = Project::new();

    paused_cmd(&project)
        .env("FAKE_PYI_EXIT", "1")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("빌드 실패!"))
        .stdout(predicate::str::ends_with("계속하려면 Enter 키를 누르십시오..."));
}

#[test]
fn banner_prints_before_config_errors() {
    let project = Project::new();
    std::fs::write(project.root().join("booth-build.toml"), "[package]\nbogus = 1\n").unwrap();

    let output = project.cmd().assert().code(1).get_output().clone();
    let stdout = stdout_of(&output);

    let banner = stdout.find("Booth VRChat 의상 검색기 빌드").unwrap();
    let failure = stdout.find("빌드를 시작할 수 없습니다!").unwrap();
    assert!(banner < failure);
    assert!(project.calls().is_empty());
}

#[test]
fn clean_refuses_work_dir_at_project_root() {
    let project = Project::new();
    std::fs::write(project.root().join("main.py"), "print()\n").unwrap();
    std::fs::write(project.root().join("booth-build.toml"), "[build]\nwork_dir = \".\"\n").unwrap();

    project
        .cmd()
        .arg("--clean")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("빌드를 시작할 수 없습니다!"))
        .stdout(predicate::str::contains("삭제:").not());

    assert!(project.root().join("main.py").exists());
    assert!(project.root().join("requirements.txt").exists());
    assert!(project.calls().is_empty());
}
