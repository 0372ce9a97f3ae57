//! Two-tier font resolution for the info cards.
//!
//! The first candidate path that reads and parses as a TrueType/OpenType font
//! wins. When none does, cards are drawn with the built-in 8×8 bitmap glyphs
//! from `font8x8`, magnified to roughly the requested size. That fallback has
//! different metrics, so lines stay centered on their own box but the card
//! looks coarser. The fallback is never an error; resolution returns a warning
//! for the caller to report.

use super::calculations::bitmap_scale;
use ab_glyph::{FontVec, PxScale};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};

/// Side of a built-in glyph cell, in unscaled pixels.
const GLYPH_SIDE: u32 = 8;

/// Font used to draw card text.
pub enum CardFont {
    TrueType { font: FontVec, source: PathBuf },
    Builtin,
}

impl std::fmt::Debug for CardFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFont::TrueType { source, .. } => write!(f, "TrueType({})", source.display()),
            CardFont::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Outcome of [`resolve_font`].
#[derive(Debug)]
pub struct FontResolution {
    pub font: CardFont,
    /// Set when the built-in font had to be used.
    pub warning: Option<String>,
}

/// Resolve the card font from an ordered list of candidate paths.
pub fn resolve_font(candidates: &[PathBuf]) -> FontResolution {
    for path in candidates {
        if let Some(font) = load_truetype(path) {
            return FontResolution {
                font: CardFont::TrueType {
                    font,
                    source: path.clone(),
                },
                warning: None,
            };
        }
    }
    let tried = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    FontResolution {
        font: CardFont::Builtin,
        warning: Some(format!(
            "no usable TrueType font (tried: {}); info cards use the built-in bitmap font",
            if tried.is_empty() { "none" } else { tried.as_str() }
        )),
    }
}

fn load_truetype(path: &Path) -> Option<FontVec> {
    let bytes = fs::read(path).ok()?;
    FontVec::try_from_vec(bytes).ok()
}

impl CardFont {
    /// Width and height of the box `text` occupies at `size` pixels.
    pub fn text_size(&self, size: f32, text: &str) -> (u32, u32) {
        match self {
            CardFont::TrueType { font, .. } => text_size(PxScale::from(size), font, text),
            CardFont::Builtin => {
                let cell = GLYPH_SIDE * bitmap_scale(size);
                (text.chars().count() as u32 * cell, cell)
            }
        }
    }

    /// Draw `text` with its box's top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match self {
            CardFont::TrueType { font, .. } => {
                draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text)
            }
            CardFont::Builtin => draw_bitmap_text(canvas, color, x, y, bitmap_scale(size), text),
        }
    }
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let cell = (GLYPH_SIDE * scale) as i32;
    for (i, ch) in text.chars().enumerate() {
        let origin_x = x + i as i32 * cell;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_SIDE {
                // Bit 0 is the leftmost pixel
                if (bits >> col) & 1 == 1 {
                    let px = origin_x + (col * scale) as i32;
                    let py = y + (row as u32 * scale) as i32;
                    draw_filled_rect_mut(canvas, Rect::at(px, py).of_size(scale, scale), color);
                }
            }
        }
    }
}
