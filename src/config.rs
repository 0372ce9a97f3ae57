//! Run configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Every key is
//! optional: stock defaults reproduce the classic card layout, and a user file
//! only overrides what it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! folder_prefix = "cancion"  # Item folders: cancion01, cancion02, ...
//! public_path = "output"     # URL segment between the domain and the list
//!
//! [qr]
//! module_size = 10           # Pixels per QR module
//! border = 2                 # Quiet zone, in modules
//! error_correction = "M"     # L, M, Q or H
//!
//! [info]
//! width = 600
//! height = 400
//! body_size = 28.0           # Title/artist/year lines, in px
//! caption_size = 16.0        # "ID: NN" caption, in px
//! top_offset = 100           # y of the first line
//! line_gap = 20              # Extra space between lines
//! caption_offset = 40        # Caption sits this far above the bottom edge
//! fonts = ["arial.ttf", ...] # TrueType candidates, first loadable wins
//!
//! [pdf]
//! label = "Canción"          # Title: folder prefix replaced by this label
//! title_size = 16.0
//! info = { x = 30.0, y = 25.0, width = 150.0 }
//! qr = { x = 85.0, y = 140.0, width = 40.0 }
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Run configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    /// Folder naming and public URL layout.
    pub output: OutputConfig,
    /// QR symbol rendering.
    pub qr: QrConfig,
    /// Info card canvas, fonts and text placement.
    pub info: InfoConfig,
    /// Printable PDF page layout.
    pub pdf: PdfConfig,
}

impl CardsConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.folder_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "output.folder_prefix must not be empty".into(),
            ));
        }
        if self.output.folder_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "output.folder_prefix must be a plain folder name".into(),
            ));
        }
        if self.qr.module_size == 0 {
            return Err(ConfigError::Validation(
                "qr.module_size must be non-zero".into(),
            ));
        }
        if self.info.width == 0 || self.info.height == 0 {
            return Err(ConfigError::Validation(
                "info.width and info.height must be non-zero".into(),
            ));
        }
        if self.info.body_size <= 0.0 || self.info.caption_size <= 0.0 {
            return Err(ConfigError::Validation(
                "info font sizes must be positive".into(),
            ));
        }
        if self.info.caption_offset > self.info.height {
            return Err(ConfigError::Validation(
                "info.caption_offset must fit inside the canvas".into(),
            ));
        }
        if self.pdf.title_size <= 0.0 {
            return Err(ConfigError::Validation(
                "pdf.title_size must be positive".into(),
            ));
        }
        if self.pdf.info.width <= 0.0 || self.pdf.qr.width <= 0.0 {
            return Err(ConfigError::Validation(
                "pdf image widths must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Folder naming and public URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Prefix of every item folder; the padded identifier follows it.
    pub folder_prefix: String,
    /// Path segment between the domain and the list name in QR URLs.
    pub public_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder_prefix: "cancion".to_string(),
            public_path: "output".to_string(),
        }
    }
}

/// QR error-correction level, as named in the QR standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

/// QR rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrConfig {
    /// Side of one module in pixels.
    pub module_size: u32,
    /// White margin around the symbol, in modules.
    pub border: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            border: 2,
            error_correction: ErrorCorrection::M,
        }
    }
}

/// Info card settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfoConfig {
    pub width: u32,
    pub height: u32,
    /// Pixel size of the title/artist/year lines.
    pub body_size: f32,
    /// Pixel size of the identifier caption.
    pub caption_size: f32,
    /// Vertical position of the first body line.
    pub top_offset: u32,
    /// Space added below each body line before the next one.
    pub line_gap: u32,
    /// Distance from the bottom edge to the caption.
    pub caption_offset: u32,
    /// TrueType font candidates, tried in order.
    pub fonts: Vec<PathBuf>,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            body_size: 28.0,
            caption_size: 16.0,
            top_offset: 100,
            line_gap: 20,
            caption_offset: 40,
            fonts: default_fonts(),
        }
    }
}

fn default_fonts() -> Vec<PathBuf> {
    [
        "arial.ttf",
        "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Absolute placement of an image on the PDF page, in millimetres from the
/// top-left corner. Height follows the image's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// PDF page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfConfig {
    /// Replaces the folder prefix in the page title (`cancion03` → `Canción 03`).
    pub label: String,
    /// Title font size in points.
    pub title_size: f32,
    pub info: Placement,
    pub qr: Placement,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            label: "Canción".to_string(),
            title_size: 16.0,
            info: Placement {
                x: 30.0,
                y: 25.0,
                width: 150.0,
            },
            qr: Placement {
                x: 85.0,
                y: 140.0,
                width: 40.0,
            },
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CardsConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load config from the given file.
///
/// A missing file yields the stock defaults. An existing file is merged on
/// top of the defaults, unknown keys are rejected, and the result validated.
pub fn load_config(path: &Path) -> Result<CardsConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: CardsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Playcards Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Output layout
# ---------------------------------------------------------------------------
[output]
# Item folders are named <prefix><NN>, e.g. cancion03.
folder_prefix = "cancion"

# QR links point at <domain>/<public_path>/<list>/<folder>/
public_path = "output"

# ---------------------------------------------------------------------------
# QR codes
# ---------------------------------------------------------------------------
[qr]
# Pixels per module.
module_size = 10

# White border, in modules.
border = 2

# Error correction level: "L", "M", "Q" or "H".
error_correction = "M"

# ---------------------------------------------------------------------------
# Info card
# ---------------------------------------------------------------------------
[info]
width = 600
height = 400

# Body lines (title, artist, year) and identifier caption, in pixels.
body_size = 28.0
caption_size = 16.0

# First body line starts here; each line adds its height plus line_gap.
top_offset = 100
line_gap = 20

# The caption sits caption_offset pixels above the bottom edge.
caption_offset = 40

# TrueType candidates, first loadable wins. When none loads, a built-in
# bitmap font is used instead.
fonts = [
    "arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
]

# ---------------------------------------------------------------------------
# PDF pages (A4, millimetres from the top-left corner)
# ---------------------------------------------------------------------------
[pdf]
# Page title: the folder prefix is replaced by this label.
label = "Canción"
title_size = 16.0

[pdf.info]
x = 30.0
y = 25.0
width = 150.0

[pdf.qr]
x = 85.0
y = 140.0
width = 40.0
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_card_layout() {
        let config = CardsConfig::default();
        assert_eq!(config.output.folder_prefix, "cancion");
        assert_eq!(config.qr.module_size, 10);
        assert_eq!(config.qr.border, 2);
        assert_eq!(config.qr.error_correction, ErrorCorrection::M);
        assert_eq!((config.info.width, config.info.height), (600, 400));
        assert_eq!(config.info.body_size, 28.0);
        assert_eq!(config.info.caption_size, 16.0);
        assert_eq!(config.pdf.info.width, 150.0);
        assert_eq!(config.pdf.qr.x, 85.0);
    }

    #[test]
    fn default_fonts_prefer_arial() {
        let config = CardsConfig::default();
        assert_eq!(config.info.fonts[0], PathBuf::from("arial.ttf"));
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.output.folder_prefix, "cancion");
        assert_eq!(config.pdf.label, "Canción");
    }

    #[test]
    fn load_config_merges_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[qr]
module_size = 6

[pdf.qr]
x = 10.0
y = 10.0
width = 60.0
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.qr.module_size, 6);
        assert_eq!(config.qr.border, 2);
        assert_eq!(config.pdf.qr.width, 60.0);
        assert_eq!(config.pdf.info.width, 150.0);
    }

    #[test]
    fn error_correction_parses_letters() {
        let config: CardsConfig = toml::from_str("[qr]\nerror_correction = \"H\"\n").unwrap();
        assert_eq!(config.qr.error_correction, ErrorCorrection::H);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[qr\nmodule_size = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[qr]\nmodule = 4\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<CardsConfig, _> = toml::from_str("[video]\nautoplay = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_module_size_zero() {
        let mut config = CardsConfig::default();
        config.qr.module_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("module_size")
        ));
    }

    #[test]
    fn validate_empty_prefix() {
        let mut config = CardsConfig::default();
        config.output.folder_prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_prefix_with_separator() {
        let mut config = CardsConfig::default();
        config.output.folder_prefix = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_caption_outside_canvas() {
        let mut config = CardsConfig::default();
        config.info.caption_offset = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(CardsConfig::default().validate().is_ok());
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: CardsConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = CardsConfig::default();
        assert_eq!(parsed.output.folder_prefix, defaults.output.folder_prefix);
        assert_eq!(parsed.output.public_path, defaults.output.public_path);
        assert_eq!(parsed.qr.module_size, defaults.qr.module_size);
        assert_eq!(parsed.qr.error_correction, defaults.qr.error_correction);
        assert_eq!(parsed.info.fonts, defaults.info.fonts);
        assert_eq!(parsed.info.top_offset, defaults.info.top_offset);
        assert_eq!(parsed.pdf.label, defaults.pdf.label);
        assert_eq!(parsed.pdf.info, defaults.pdf.info);
        assert_eq!(parsed.pdf.qr, defaults.pdf.qr);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        let table = value.as_table().unwrap();
        for section in ["output", "qr", "info", "pdf"] {
            assert!(table.contains_key(section), "missing [{section}]");
        }
    }
}
