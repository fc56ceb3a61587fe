//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\vietdub\
//!   macOS:   ~/Library/Application Support/vietdub/
//!   Linux:   ~/.config/vietdub/
//!
//! Data dir (working clips):
//!   Windows: %LOCALAPPDATA%\vietdub\
//!   macOS:   ~/Library/Application Support/vietdub/
//!   Linux:   ~/.local/share/vietdub/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Working directory for synthesized and fitted clips.
    pub clips_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "vietdub";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let clips_dir = data_dir.join("clips");

        Self {
            config_dir,
            settings_file,
            clips_dir,
        }
    }

    /// Create the clips working directory if it does not exist yet.
    pub fn ensure_clips_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.clips_dir)
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
