//! Raster producers: QR images and info cards, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **QR encode** | `qrcode` (error correction M, smallest fitting version) |
//! | **QR paint** | `image::GrayImage`, 10 px modules, 2-module border |
//! | **Card text** | `imageproc` + `ab_glyph`, `font8x8` fallback |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for layout math (unit testable)
//! - **Parameters**: Data structures describing what to draw
//! - **Font**: Two-tier font resolution
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod font;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use font::{CardFont, FontResolution, resolve_font};
pub use params::{CardLayout, InfoParams, QrParams};
pub use rust_backend::RustBackend;
