//! Parameter types for the raster producers.
//!
//! These structs describe *what* to draw, not *how*. They are the interface
//! between the row driver (which decides which files to create) and the
//! [`backend`](super::backend) (which does the pixel work), so a mock backend
//! can stand in during tests.

use crate::config::{ErrorCorrection, InfoConfig, QrConfig};
use crate::types::Row;
use std::path::PathBuf;

/// Parameters for a QR image.
#[derive(Debug, Clone, PartialEq)]
pub struct QrParams {
    pub output: PathBuf,
    /// Text to encode, normally the item's public URL.
    pub data: String,
    /// Side of one module in pixels.
    pub module_size: u32,
    /// Quiet zone in modules.
    pub border: u32,
    pub error_correction: ErrorCorrection,
}

impl QrParams {
    pub fn new(output: PathBuf, data: String, config: &QrConfig) -> Self {
        Self {
            output,
            data,
            module_size: config.module_size,
            border: config.border,
            error_correction: config.error_correction,
        }
    }
}

/// Canvas geometry and font sizes of an info card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub body_size: f32,
    pub caption_size: f32,
    pub top_offset: u32,
    pub line_gap: u32,
    pub caption_offset: u32,
}

impl From<&InfoConfig> for CardLayout {
    fn from(config: &InfoConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            body_size: config.body_size,
            caption_size: config.caption_size,
            top_offset: config.top_offset,
            line_gap: config.line_gap,
            caption_offset: config.caption_offset,
        }
    }
}

/// Parameters for an info card: centered body lines plus a bottom caption.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoParams {
    pub output: PathBuf,
    pub lines: Vec<String>,
    pub caption: String,
    pub layout: CardLayout,
}

impl InfoParams {
    /// Card text for a row: title, artist and year lines, `ID: NN` caption.
    pub fn for_row(output: PathBuf, row: &Row, layout: CardLayout) -> Self {
        Self {
            output,
            lines: vec![
                format!("Título: {}", row.title),
                format!("Cantante: {}", row.artist),
                format!("Año: {}", row.year),
            ],
            caption: format!("ID: {}", row.identifier()),
            layout,
        }
    }
}
