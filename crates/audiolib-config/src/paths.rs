//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/audiolib/`
//! - macOS: `~/Library/Application Support/audiolib/`
//! - Windows: `%APPDATA%\audiolib\`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "audiolib";

/// File name of the persisted analysis settings.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}
