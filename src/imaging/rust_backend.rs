//! Pure Rust raster backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | QR symbol encoding | `qrcode::QrCode::with_error_correction_level` |
//! | QR module painting | `image::GrayImage`, one square per dark module |
//! | Card text | `imageproc::drawing::draw_text_mut` (TrueType via `ab_glyph`) |
//! | Fallback text | `font8x8` glyphs painted with `draw_filled_rect_mut` |
//! | PNG encoding | `image` (`png` feature) |

use super::backend::{BackendError, ImageBackend};
use super::calculations::{caption_top, centered_x, line_tops, qr_image_side};
use super::font::{CardFont, resolve_font};
use super::params::{InfoParams, QrParams};
use crate::config::{ErrorCorrection, InfoConfig};
use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const QR_DARK: Luma<u8> = Luma([0]);
const QR_LIGHT: Luma<u8> = Luma([255]);

/// Raster backend built on `qrcode`, `image` and `imageproc`.
///
/// The card font is resolved once at construction and reused for every card.
pub struct RustBackend {
    font: CardFont,
    warnings: Vec<String>,
}

impl RustBackend {
    /// Backend with the font resolved from the configured candidates.
    pub fn new(info: &InfoConfig) -> Self {
        let resolution = resolve_font(&info.fonts);
        Self {
            font: resolution.font,
            warnings: resolution.warning.into_iter().collect(),
        }
    }

    /// Backend with an explicit font (no resolution, no warnings).
    pub fn with_font(font: CardFont) -> Self {
        Self {
            font,
            warnings: Vec::new(),
        }
    }

    pub fn font(&self) -> &CardFont {
        &self.font
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

/// Encode `data` with the smallest symbol version that fits.
pub fn encode_qr(data: &str, level: ErrorCorrection) -> Result<QrCode, BackendError> {
    QrCode::with_error_correction_level(data.as_bytes(), ec_level(level)).map_err(|e| {
        BackendError::QrCapacity {
            len: data.len(),
            reason: e.to_string(),
        }
    })
}

/// Paint a QR symbol: black modules on white, `border` light modules around.
pub fn render_qr(code: &QrCode, module_size: u32, border: u32) -> GrayImage {
    let modules = code.width() as u32;
    let side = qr_image_side(modules, module_size, border);
    let mut img = GrayImage::from_pixel(side, side, QR_LIGHT);

    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let mx = i as u32 % modules + border;
        let my = i as u32 / modules + border;
        for dy in 0..module_size {
            for dx in 0..module_size {
                img.put_pixel(mx * module_size + dx, my * module_size + dy, QR_DARK);
            }
        }
    }
    img
}

/// Draw an info card: body lines centered from the top offset down, caption
/// centered near the bottom edge.
pub fn render_info_card(font: &CardFont, params: &InfoParams) -> RgbImage {
    let layout = &params.layout;
    let mut canvas = RgbImage::from_pixel(layout.width, layout.height, BACKGROUND);

    let sizes: Vec<(u32, u32)> = params
        .lines
        .iter()
        .map(|line| font.text_size(layout.body_size, line))
        .collect();
    let heights: Vec<u32> = sizes.iter().map(|(_, h)| *h).collect();
    let tops = line_tops(layout.top_offset, layout.line_gap, &heights);

    for ((line, (width, _)), y) in params.lines.iter().zip(&sizes).zip(tops) {
        let x = centered_x(layout.width, *width);
        font.draw(&mut canvas, FOREGROUND, x, y, layout.body_size, line);
    }

    let (caption_width, _) = font.text_size(layout.caption_size, &params.caption);
    font.draw(
        &mut canvas,
        FOREGROUND,
        centered_x(layout.width, caption_width),
        caption_top(layout.height, layout.caption_offset),
        layout.caption_size,
        &params.caption,
    );
    canvas
}

impl ImageBackend for RustBackend {
    fn qr(&self, params: &QrParams) -> Result<(), BackendError> {
        let code = encode_qr(&params.data, params.error_correction)?;
        let img = render_qr(&code, params.module_size, params.border);
        img.save_with_format(&params.output, ImageFormat::Png)?;
        Ok(())
    }

    fn info_card(&self, params: &InfoParams) -> Result<(), BackendError> {
        let img = render_info_card(&self.font, params);
        img.save_with_format(&params.output, ImageFormat::Png)?;
        Ok(())
    }

    fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }
}
