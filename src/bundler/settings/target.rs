//! Target operating system of the frozen executable.

/// Operating system the executable is produced for.
///
/// PyInstaller cannot cross-freeze, so this is normally the host. It only
/// changes how artifact names and `--add-data` separators are rendered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetOs {
    /// Windows: `.exe` suffix, `\` separators, `;` in `--add-data`.
    Windows,
    /// Linux/macOS: no suffix, `/` separators, `:` in `--add-data`.
    Unix,
}

impl TargetOs {
    /// The OS this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    /// File name of an executable called `stem`.
    pub fn executable_name(self, stem: &str) -> String {
        match self {
            Self::Windows => format!("{stem}.exe"),
            Self::Unix => stem.to_string(),
        }
    }

    /// Separator used when showing relative paths to the user.
    pub fn path_separator(self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Unix => '/',
        }
    }

    /// Separator between source and destination in PyInstaller `--add-data`.
    pub fn data_separator(self) -> char {
        match self {
            Self::Windows => ';',
            Self::Unix => ':',
        }
    }
}

impl Default for TargetOs {
    fn default() -> Self {
        Self::host()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_names_get_exe_suffix() {
        assert_eq!(TargetOs::Windows.executable_name("BoothSearcher"), "BoothSearcher.exe");
        assert_eq!(TargetOs::Unix.executable_name("BoothSearcher"), "BoothSearcher");
    }

    #[test]
    fn separators_match_platform_conventions() {
        assert_eq!(TargetOs::Windows.data_separator(), ';');
        assert_eq!(TargetOs::Unix.data_separator(), ':');
        assert_eq!(TargetOs::Windows.path_separator(), '\\');
    }
}
