//! Persistent settings for audiolib analysis commands.
//!
//! Settings live in a TOML file under the user config directory and supply
//! defaults for transform lengths, output bit depth, plot scales and the
//! impulse-response window. Command-line flags override them.
//!
//! # Example
//!
//! ```rust,no_run
//! use audiolib_config::{AnalysisSettings, settings_path};
//!
//! let mut settings = AnalysisSettings::load_or_default(None).unwrap();
//! settings.fft_len = Some(16384);
//! settings.save(settings_path()).unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use paths::{SETTINGS_FILE, settings_path, user_config_dir};
pub use settings::AnalysisSettings;
