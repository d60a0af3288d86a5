//! Analysis settings file format and operations.

use audiolib_analysis::{AxisScale, PlotScales};
use audiolib_io::SampleFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths::settings_path;

/// Defaults applied by the analysis commands.
///
/// Every field is optional in the file; missing fields take their default.
///
/// # TOML Format
///
/// ```toml
/// fft_len = 8192
/// block_len = 1024
/// output_bits = 24
/// x_scale = "log"
/// y_scale = "lin"
/// ir_width = 0.05
/// ir_center = 0.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Transform length; `None` uses the signal length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fft_len: Option<usize>,

    /// Welch segment length for coherence.
    pub block_len: usize,

    /// Bit depth for PCM output.
    pub output_bits: u16,

    /// Frequency axis scale, `"lin"` or `"log"`.
    pub x_scale: String,

    /// Value axis scale, `"lin"` or `"log"`.
    pub y_scale: String,

    /// Half width of the impulse-response window in seconds.
    /// `None` shows the whole response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir_width: Option<f64>,

    /// Center of the impulse-response window in seconds.
    pub ir_center: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fft_len: None,
            block_len: 1024,
            output_bits: 16,
            x_scale: AxisScale::Linear.to_string(),
            y_scale: AxisScale::Linear.to_string(),
            ir_width: None,
            ir_center: 0.0,
        }
    }
}

impl AnalysisSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "settings_loaded");
        Ok(settings)
    }

    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; any other failure is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(settings_path, Path::to_path_buf);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save the settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against the range the analysis accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fft_len == Some(0) {
            return Err(ConfigError::invalid("fft_len", "must be at least 1"));
        }
        if self.block_len == 0 {
            return Err(ConfigError::invalid("block_len", "must be at least 1"));
        }
        self.output_format()
            .check_writable()
            .map_err(|e| ConfigError::invalid("output_bits", e.to_string()))?;
        self.scales()?;
        if let Some(width) = self.ir_width
            && !(width.is_finite() && width >= 0.0)
        {
            return Err(ConfigError::invalid(
                "ir_width",
                format!("must be a non-negative number of seconds, got {width}"),
            ));
        }
        if !self.ir_center.is_finite() {
            return Err(ConfigError::invalid("ir_center", "must be finite"));
        }
        Ok(())
    }

    /// Parsed axis scales.
    pub fn scales(&self) -> Result<PlotScales, ConfigError> {
        let parse = |setting: &'static str, value: &str| {
            value
                .parse::<AxisScale>()
                .map_err(|e| ConfigError::invalid(setting, e.to_string()))
        };
        Ok(PlotScales::new(
            parse("x_scale", &self.x_scale)?,
            parse("y_scale", &self.y_scale)?,
        ))
    }

    /// Output format for PCM writes.
    pub fn output_format(&self) -> SampleFormat {
        SampleFormat::Pcm {
            bits: self.output_bits,
        }
    }
}
