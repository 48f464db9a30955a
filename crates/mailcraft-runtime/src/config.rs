#![forbid(unsafe_code)]

//! Editor configuration as data.
//!
//! [`EditorConfig`] gathers every tunable of the editor core into one value
//! that can be loaded from TOML or JSON. Every field has a default, so a
//! file only needs to name what it overrides.
//!
//! ```toml
//! # mailcraft.toml
//! [history]
//! max_size = 100
//!
//! [drag]
//! strategy = "midpoint"
//!
//! [preview]
//! mobile_px = 375
//! ```
//!
//! ```rust,ignore
//! let config = EditorConfig::from_toml_file("mailcraft.toml")?;
//! let problems = config.validate();
//! ```

use std::fmt;
use std::path::Path;

use mailcraft_core::Breakpoint;
use serde::{Deserialize, Serialize};

use crate::drag::DragConfig;
use crate::stream::StreamConfig;
use crate::undo::HistoryConfig;

// ---------------------------------------------------------------------------
// Top-level EditorConfig
// ---------------------------------------------------------------------------

/// Configuration for an editor session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo/redo depth.
    pub history: HistoryConfig,
    /// Drop index computation.
    pub drag: DragConfig,
    /// Device preview widths.
    pub preview: PreviewConfig,
    /// Pacing of streamed generated text.
    pub stream: StreamConfig,
    /// Log filter and format.
    pub logging: LoggingConfig,
}

impl EditorConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension
    /// (`.json` is JSON, anything else is TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Check parameter ranges. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history.max_size == 0 {
            errors.push("history.max_size must be > 0".into());
        }

        let p = &self.preview;
        if p.desktop_px == 0 || p.tablet_px == 0 || p.mobile_px == 0 {
            errors.push("preview widths must be > 0".into());
        }
        if p.mobile_px > p.tablet_px || p.tablet_px > p.desktop_px {
            errors.push(format!(
                "preview widths must satisfy mobile <= tablet <= desktop, got {} / {} / {}",
                p.mobile_px, p.tablet_px, p.desktop_px
            ));
        }

        if self.stream.chunk_words == 0 {
            errors.push("stream.chunk_words must be > 0".into());
        }

        if self.logging.filter.trim().is_empty() {
            errors.push("logging.filter must not be empty".into());
        }

        errors
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Preview width per breakpoint, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub desktop_px: u32,
    pub tablet_px: u32,
    pub mobile_px: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            desktop_px: Breakpoint::Desktop.default_width_px(),
            tablet_px: Breakpoint::Tablet.default_width_px(),
            mobile_px: Breakpoint::Mobile.default_width_px(),
        }
    }
}

impl PreviewConfig {
    #[must_use]
    pub fn width(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Desktop => self.desktop_px,
            Breakpoint::Tablet => self.tablet_px,
            Breakpoint::Mobile => self.mobile_px,
        }
    }

    /// Narrowest breakpoint whose width still fits `viewport_px`.
    #[must_use]
    pub fn breakpoint_for(&self, viewport_px: u32) -> Breakpoint {
        if viewport_px >= self.desktop_px {
            Breakpoint::Desktop
        } else if viewport_px >= self.tablet_px {
            Breakpoint::Tablet
        } else {
            Breakpoint::Mobile
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info,mailcraft.drag=debug"`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Include the event target in each line.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Toml(e) => write!(f, "config TOML parse error: {e}"),
            Self::TomlSerialize(e) => write!(f, "config TOML write error: {e}"),
            Self::Json(e) => write!(f, "config JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::TomlSerialize(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::IndexStrategy;
    use std::error::Error as _;
    use std::io::Write as _;

    #[test]
    fn default_validates_clean() {
        assert!(EditorConfig::default().validate().is_empty());
    }

    #[test]
    fn defaults_match_components() {
        let config = EditorConfig::default();
        assert_eq!(config.history, HistoryConfig::default());
        assert_eq!(config.drag.strategy, IndexStrategy::Edge);
        assert_eq!(config.preview.width(Breakpoint::Mobile), 320);
        assert_eq!(config.stream, StreamConfig::default());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn partial_toml_override_preserves_defaults() {
        let config = EditorConfig::from_toml_str(
            r#"
            [history]
            max_size = 10

            [drag]
            strategy = "midpoint"
            "#,
        )
        .unwrap();
        assert_eq!(config.history.max_size, 10);
        assert_eq!(config.drag.strategy, IndexStrategy::Midpoint);
        assert_eq!(config.preview, PreviewConfig::default());
    }

    #[test]
    fn json_override() {
        let config =
            EditorConfig::from_json_str(r#"{"preview":{"mobile_px":375},"logging":{"json":true}}"#)
                .unwrap();
        assert_eq!(config.preview.mobile_px, 375);
        assert_eq!(config.preview.tablet_px, 480);
        assert!(config.logging.json);
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = EditorConfig::from_toml_str("[history\nmax_size = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("config TOML parse error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn wrong_type_is_reported() {
        let err = EditorConfig::from_json_str(r#"{"history":{"max_size":"lots"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EditorConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("mailcraft.toml");
        std::fs::write(&toml_path, "[stream]\nchunk_words = 5\n").unwrap();
        assert_eq!(EditorConfig::from_file(&toml_path).unwrap().stream.chunk_words, 5);

        let json_path = dir.path().join("mailcraft.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        file.write_all(br#"{"stream":{"delay_ms":0}}"#).unwrap();
        assert_eq!(EditorConfig::from_file(&json_path).unwrap().stream.delay_ms, 0);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = EditorConfig::default();
        config.history.max_size = 7;
        config.logging.filter = "debug".into();
        let text = config.to_toml_string().unwrap();
        assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut config = EditorConfig::default();
        config.history.max_size = 0;
        config.preview.mobile_px = 900;
        config.stream.chunk_words = 0;
        config.logging.filter = "  ".into();
        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("mobile <= tablet")));
    }

    #[test]
    fn validate_rejects_zero_width() {
        let mut config = EditorConfig::default();
        config.preview.mobile_px = 0;
        assert!(config.validate().iter().any(|e| e.contains("> 0")));
    }

    #[test]
    fn breakpoint_for_viewport() {
        let preview = PreviewConfig::default();
        assert_eq!(preview.breakpoint_for(1024), Breakpoint::Desktop);
        assert_eq!(preview.breakpoint_for(600), Breakpoint::Desktop);
        assert_eq!(preview.breakpoint_for(500), Breakpoint::Tablet);
        assert_eq!(preview.breakpoint_for(100), Breakpoint::Mobile);
    }
}
