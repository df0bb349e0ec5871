//! Colored status output.
//!
//! Everything the user is meant to read goes to stdout through
//! [`OutputManager`]; diagnostics go to stderr through `log`. Colors are only
//! emitted when stdout is a terminal.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

use crate::bundler::Stage;

const RULE: &str = "========================================";

/// Korean status line for a numbered stage.
pub fn stage_message(stage: Stage) -> &'static str {
    match stage {
        Stage::InstallDependencies => "의존성 설치 중...",
        Stage::BuildExecutable => "실행 파일 빌드 중...",
        Stage::Complete => "빌드 완료!",
    }
}

/// Writes stage banners and results to stdout.
#[derive(Debug, Clone)]
pub struct OutputManager {
    color: ColorChoice,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputManager {
    /// Create a manager; colors follow whether stdout is a terminal.
    pub fn new() -> Self {
        let color = if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self { color }
    }

    fn stream(&self) -> StandardStream {
        StandardStream::stdout(self.color)
    }

    fn colored(&self, color: Color, bold: bool, line: &str) -> io::Result<()> {
        let mut out = self.stream();
        out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
        writeln!(out, "{line}")?;
        out.reset()?;
        out.flush()
    }

    /// Fixed start banner.
    pub fn banner(&self, display_name: &str, version: Option<&str>) -> io::Result<()> {
        let title = match version {
            Some(version) => format!("  {display_name} v{version} 빌드"),
            None => format!("  {display_name} 빌드"),
        };
        let mut out = self.stream();
        writeln!(out, "{RULE}")?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{title}")?;
        out.reset()?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        out.flush()
    }

    /// `[n/3] message`
    pub fn stage(&self, stage: Stage) -> io::Result<()> {
        let mut out = self.stream();
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "[{}/{}]", stage.number(), Stage::TOTAL)?;
        out.reset()?;
        writeln!(out, " {}", stage_message(stage))?;
        out.flush()
    }

    /// Plain line.
    pub fn line(&self, message: &str) -> io::Result<()> {
        let mut out = self.stream();
        writeln!(out, "{message}")?;
        out.flush()
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.line(&format!("  {message}"))
    }

    /// Success line in green.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.colored(Color::Green, true, message)
    }

    /// Failure line in red.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.colored(Color::Red, true, message)
    }

    /// Warning line in yellow.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.colored(Color::Yellow, false, message)
    }
}
