//! Printable PDF cards.
//!
//! Optional last step. Scans a list root for item folders and composes one A4
//! page per folder from the `info.png` and `qr.png` produced by the row
//! driver.
//!
//! ## Page Layout
//!
//! Coordinates are millimetres from the top-left corner of the page; PDF
//! itself measures from the bottom-left, so every placement is flipped on the
//! way out.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          Canción 03          │  title, centered in the top cell
//! │   ┌──────────────────────┐   │
//! │   │       info.png       │   │  x=30 y=25 width=150
//! │   └──────────────────────┘   │
//! │           ┌──────┐           │
//! │           │qr.png│           │  x=85 y=140 width=40
//! │           └──────┘           │
//! └──────────────────────────────┘
//! ```
//!
//! ## Folder Selection
//!
//! Immediate subdirectories of the list root, sorted by name, whose name
//! starts with the item prefix. A folder missing either image is skipped
//! without error. Selection is by prefix, not by the rows of the last run, so
//! leftover folders from earlier runs of the same list are composed too.

use crate::config::{CardsConfig, Placement};
use crate::naming::{self, INFO_FILE, PDF_DIR, QR_FILE};
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument, PdfLayerReference};
use std::fs::{self, File};
use std::io::BufReader;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot embed {path}: {reason}")]
    Embed { path: PathBuf, reason: String },
    #[error("PDF error: {0}")]
    Render(String),
}

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Left, right and top page margin.
const MARGIN_MM: f32 = 10.0;
/// Height of the title cell at the top margin.
const TITLE_CELL_MM: f32 = 10.0;
const MM_PER_PT: f32 = 25.4 / 72.0;
const MM_PER_INCH: f32 = 25.4;

/// What happened to one item folder.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeOutcome {
    Written(PathBuf),
    /// `info.png` or `qr.png` was missing.
    Skipped,
}

/// Result of a PDF batch over a list root.
#[derive(Debug, Clone)]
pub struct PdfReport {
    pub pdf_dir: PathBuf,
    /// `(folder name, pdf path)` in scan order.
    pub written: Vec<(String, PathBuf)>,
    pub skipped: Vec<String>,
}

/// Helvetica advance widths (1/1000 em) for printable ASCII, from the
/// standard AFM metrics. Index 0 is the space character.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Advance width of one character in Helvetica, 1/1000 em.
fn helvetica_width(ch: char) -> u16 {
    let base = match ch {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'Á' => 'A',
        'É' => 'E',
        'Í' => 'I',
        'Ó' => 'O',
        'Ú' => 'U',
        'Ñ' => 'N',
        other => other,
    };
    match base as u32 {
        code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => 556,
    }
}

/// Width of `text` set in Helvetica at `size_pt`, in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| helvetica_width(c) as u32).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_PT
}

/// Baseline origin (PDF coordinates, mm) of a title centered in the top cell.
pub fn title_origin(text: &str, size_pt: f32) -> (f32, f32) {
    let cell_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let x = MARGIN_MM + (cell_width - text_width_mm(text, size_pt)) / 2.0;
    // Vertically centered: half the cell plus ~0.3 of the font size
    let baseline_from_top = MARGIN_MM + TITLE_CELL_MM / 2.0 + 0.3 * size_pt * MM_PER_PT;
    (x, PAGE_HEIGHT_MM - baseline_from_top)
}

/// Translation (bottom-left, mm) and DPI that place a `px_width`×`px_height`
/// image at `placement` with exactly `placement.width` millimetres of width.
pub fn image_transform(px_width: u32, px_height: u32, placement: Placement) -> ImageTransform {
    let dpi = px_width as f32 * MM_PER_INCH / placement.width;
    let height_mm = placement.width * px_height as f32 / px_width as f32;
    ImageTransform {
        translate_x: Some(Mm(placement.x)),
        translate_y: Some(Mm(PAGE_HEIGHT_MM - placement.y - height_mm)),
        dpi: Some(dpi),
        ..Default::default()
    }
}

fn place_png(layer: &PdfLayerReference, path: &Path, placement: Placement) -> Result<(), PdfError> {
    let embed_error = |reason: String| PdfError::Embed {
        path: path.to_path_buf(),
        reason,
    };
    let (px_width, px_height) =
        image::image_dimensions(path).map_err(|e| embed_error(e.to_string()))?;
    if px_width == 0 || px_height == 0 {
        return Err(embed_error("image has no pixels".to_string()));
    }
    let decoder = PngDecoder::new(BufReader::new(File::open(path)?))
        .map_err(|e| embed_error(e.to_string()))?;
    let image = Image::try_from(decoder).map_err(|e| embed_error(e.to_string()))?;
    image.add_to_layer(layer.clone(), image_transform(px_width, px_height, placement));
    Ok(())
}

/// Compose the PDF for one item folder into `output`.
///
/// Returns [`ComposeOutcome::Skipped`] without touching `output` when either
/// image is missing.
pub fn compose_pdf(
    folder: &Path,
    output: &Path,
    config: &CardsConfig,
) -> Result<ComposeOutcome, PdfError> {
    let info_path = folder.join(INFO_FILE);
    let qr_path = folder.join(QR_FILE);
    if !info_path.is_file() || !qr_path.is_file() {
        return Ok(ComposeOutcome::Skipped);
    }

    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = naming::folder_label(&folder_name, &config.output.folder_prefix, &config.pdf.label);

    let (doc, page, layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Card");
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let (x, y) = title_origin(&title, config.pdf.title_size);
    layer.use_text(title.as_str(), config.pdf.title_size, Mm(x), Mm(y), &font);

    place_png(&layer, &info_path, config.pdf.info)?;
    place_png(&layer, &qr_path, config.pdf.qr)?;

    let mut writer = BufWriter::new(File::create(output)?);
    doc.save(&mut writer)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    Ok(ComposeOutcome::Written(output.to_path_buf()))
}

/// Item folders under `list_root`: immediate subdirectories whose name starts
/// with `prefix`, sorted by name.
pub fn item_folders(list_root: &Path, prefix: &str) -> Result<Vec<PathBuf>, PdfError> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(list_root)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix));
        if matches && path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}

/// Compose a PDF for every item folder of a list into `<list_root>/pdfs/`.
pub fn generate_pdfs(list_root: &Path, config: &CardsConfig) -> Result<PdfReport, PdfError> {
    let pdf_dir = list_root.join(PDF_DIR);
    fs::create_dir_all(&pdf_dir)?;

    let mut written = Vec::new();
    let mut skipped = Vec::new();
    for folder in item_folders(list_root, &config.output.folder_prefix)? {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = pdf_dir.join(format!("{}.pdf", name));
        match compose_pdf(&folder, &output, config)? {
            ComposeOutcome::Written(path) => written.push((name, path)),
            ComposeOutcome::Skipped => skipped.push(name),
        }
    }

    Ok(PdfReport {
        pdf_dir,
        written,
        skipped,
    })
}
