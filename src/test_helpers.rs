//! Shared test utilities for the playcards test suite.
//!
//! Builders for the values the producers consume (`Row`, in-memory sheet
//! ranges) and small fixture writers for on-disk PNGs.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let rows = vec![row(3, "Canción X", "Artista Y", 1998, "abc123")];
//! let range = sheet_range(&[header()]);
//! ```

use calamine::{Data, Range};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

use crate::sheet::REQUIRED_COLUMNS;
use crate::types::{Row, Year};

// =========================================================================
// Row builders
// =========================================================================

/// A row with a numeric year.
pub fn row(id: u32, title: &str, artist: &str, year: i32, video: &str) -> Row {
    Row {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        year: Year::Numeric(year),
        video: video.to_string(),
    }
}

/// Three rows in deliberately unsorted id order.
pub fn sample_rows() -> Vec<Row> {
    vec![
        row(3, "Canción X", "Artista Y", 1998, "abc123"),
        row(1, "Primera", "Alguien", 1985, "def456"),
        row(12, "Doce", "Otro", 2011, "ghi789"),
    ]
}

// =========================================================================
// Sheet builders
// =========================================================================

/// The five required headers, in the canonical column order.
pub fn header() -> Vec<Data> {
    REQUIRED_COLUMNS
        .iter()
        .map(|name| Data::String(name.to_string()))
        .collect()
}

/// Build a calamine range from literal rows, anchored at `A1`.
///
/// Short rows are padded with `Data::Empty` to the widest row.
pub fn sheet_range(rows: &[Vec<Data>]) -> Range<Data> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if rows.is_empty() || width == 0 {
        return Range::empty();
    }
    let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width as u32 - 1));
    for (r, cells) in rows.iter().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            range.set_value((r as u32, c as u32), cell.clone());
        }
    }
    range
}

// =========================================================================
// File fixtures
// =========================================================================

/// Write a solid grey PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}
