//! Product metadata.

/// Product metadata shown in banners and used to name the executable.
///
/// `product_name` doubles as PyInstaller's `--name`, so it must be a valid
/// file stem. `display_name` is only printed.
///
/// # Examples
///
/// ```no_run
/// use booth_searcher_build::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     product_name: "BoothSearcher".into(),
///     display_name: "Booth VRChat 의상 검색기".into(),
///     version: Some("2.0.0".into()),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Executable stem, e.g. `BoothSearcher`.
    pub product_name: String,

    /// Human-readable name for the banner.
    pub display_name: String,

    /// Version from `__version__.py`, if present.
    pub version: Option<String>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: "BoothSearcher".to_string(),
            display_name: "Booth VRChat 의상 검색기".to_string(),
            version: None,
        }
    }
}
