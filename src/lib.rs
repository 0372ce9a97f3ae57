//! # Playcards
//!
//! A batch generator for Play & Guess music cards. One spreadsheet row is one
//! song; each song becomes a folder holding a click-to-play player page, a QR
//! code that links to that page once the tree is published, and an info image
//! with the answer. A list index links every card, and an optional second pass
//! lays each card out on a printable A4 PDF.
//!
//! # Architecture: Two Drivers
//!
//! ```text
//! 1. Build   sheet.xlsx  →  output/<list>/cancionNN/{index.html,qr.png,info.png}
//!                           output/<list>/index.html
//! 2. PDFs    output/<list>/cancionNN/  →  output/<list>/pdfs/cancionNN.pdf
//! ```
//!
//! The PDF pass only reads what the build pass left on disk, so it can be
//! rerun on its own (`playcards pdfs`) after the images are touched up.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sheet`] | Reads the first worksheet and parses every row into a typed [`types::Row`] |
//! | [`process`] | Build driver: item folders, producers, list index |
//! | [`html`] | Player page and list index, rendered with Maud |
//! | [`imaging`] | QR and info card rasterization behind the `ImageBackend` trait |
//! | [`pdf`] | PDF composer and batch driver |
//! | [`naming`] | Identifier padding, folder names, public URLs |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation |
//! | [`types`] | `Row` and `Year` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Parse Everything, Then Write
//!
//! The whole sheet is parsed into typed rows before the first folder is
//! created. A bad cell is reported with its sheet row and column, and the
//! output tree is left as it was.
//!
//! ## Fonts Degrade, They Don't Fail
//!
//! Info cards prefer a TrueType font from the configured candidates. When none
//! loads, the built-in `font8x8` glyphs are used and a warning is printed; the
//! run continues.
//!
//! ## Deterministic Output
//!
//! Pages and QR images depend only on the row and the run arguments. Two runs
//! over the same sheet write byte-identical HTML and QR files.

pub mod config;
pub mod html;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pdf;
pub mod process;
pub mod sheet;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
