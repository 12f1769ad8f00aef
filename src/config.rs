//! Thickening configuration
//!
//! Controls which fill colors mark a path as background and how wide the
//! added stroke is. Can be loaded from a TOML file:
//!
//! ```toml
//! [background]
//! fills = ["#FEFEFE", "#FFFFFF", "#FFF"]
//!
//! [stroke]
//! width = "3"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Fill values treated as background unless configured otherwise
pub const DEFAULT_BACKGROUND_FILLS: &[&str] = &["#FEFEFE", "#FFFFFF", "#FFF"];

/// Stroke width written onto thickened paths unless configured otherwise
pub const DEFAULT_STROKE_WIDTH: &str = "3";

/// Errors that can occur when loading or validating a config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for the background removal and thickening passes
#[derive(Debug, Clone, PartialEq)]
pub struct ThickenConfig {
    /// Fill values that mark a path as background. Compared
    /// case-insensitively as literal strings, not as colors.
    pub background_fills: Vec<String>,
    /// Value written to `stroke-width`
    pub stroke_width: String,
}

/// TOML structure for deserializing configs
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    background: Option<TomlBackground>,
    stroke: Option<TomlStroke>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlBackground {
    fills: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlStroke {
    width: Option<TomlWidth>,
}

/// `width = 3`, `width = 2.5` and `width = "3"` are all accepted
#[derive(Deserialize)]
#[serde(untagged)]
enum TomlWidth {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TomlWidth {
    fn into_string(self) -> String {
        match self {
            TomlWidth::Integer(n) => n.to_string(),
            TomlWidth::Float(f) => f.to_string(),
            TomlWidth::Text(s) => s,
        }
    }
}

impl Default for ThickenConfig {
    fn default() -> Self {
        Self {
            background_fills: DEFAULT_BACKGROUND_FILLS
                .iter()
                .map(|fill| fill.to_string())
                .collect(),
            stroke_width: DEFAULT_STROKE_WIDTH.to_string(),
        }
    }
}

impl ThickenConfig {
    /// Create a config with the default fills and stroke width
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from TOML string. Missing keys keep their defaults.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(fills) = parsed.background.and_then(|b| b.fills) {
            config.background_fills = fills;
        }
        if let Some(width) = parsed.stroke.and_then(|s| s.width) {
            config.stroke_width = width.into_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the background fill list
    pub fn with_background_fills<I, S>(mut self, fills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.background_fills = fills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stroke width
    pub fn with_stroke_width(mut self, width: impl Into<String>) -> Self {
        self.stroke_width = width.into();
        self
    }

    /// Check that fills are non-empty and the stroke width is a
    /// non-negative number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.background_fills.iter().position(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "background fill #{} is empty",
                index + 1
            )));
        }

        match self.stroke_width.trim().parse::<f64>() {
            Ok(width) if width.is_finite() && width >= 0.0 => Ok(()),
            _ => Err(ConfigError::Invalid(format!(
                "stroke width '{}' is not a non-negative number",
                self.stroke_width
            ))),
        }
    }

    /// Whether a fill value marks its path as background
    pub fn is_background_fill(&self, fill: &str) -> bool {
        let fill = fill.to_ascii_uppercase();
        self.background_fills
            .iter()
            .any(|candidate| candidate.to_ascii_uppercase() == fill)
    }
}
