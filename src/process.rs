//! Row-processing driver.
//!
//! Reads the spreadsheet, then materializes one item folder per row and the
//! list index that links them.
//!
//! ## Output Structure
//!
//! ```text
//! output/
//! └── lista1/                    # list root
//!     ├── index.html             # one link per row, sheet order
//!     ├── cancion03/
//!     │   ├── index.html         # click-to-play player
//!     │   ├── qr.png             # → {domain}/output/lista1/cancion03/
//!     │   └── info.png           # title, artist, year, "ID: 03"
//!     └── cancion01/
//!         └── ...
//! ```
//!
//! Every row is parsed before anything is written, so a malformed sheet
//! leaves the output tree untouched. Folders are overwritten on re-run; there
//! is no incremental skip.
//!
//! Rows run sequentially against a single [`ImageBackend`].

use crate::config::CardsConfig;
use crate::html::{self, HtmlError};
use crate::imaging::{BackendError, CardLayout, ImageBackend, InfoParams, QrParams, RustBackend};
use crate::naming::{self, INFO_FILE, PAGE_FILE, QR_FILE};
use crate::sheet::{self, SheetError};
use crate::types::Row;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Spreadsheet error: {0}")]
    Sheet(#[from] SheetError),
    #[error("Page error: {0}")]
    Html(#[from] HtmlError),
    #[error("Image error for {folder}: {source}")]
    Imaging {
        folder: String,
        #[source]
        source: BackendError,
    },
    #[error("Invalid list name '{0}': must be a single non-empty path segment")]
    InvalidListName(String),
}

/// What to build: the three values the operator supplies per run.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub sheet: PathBuf,
    pub list_name: String,
    /// Base URL the output tree is published under, e.g. `https://example.com`.
    pub domain: String,
}

/// One generated item folder.
#[derive(Debug, Clone)]
pub struct BuiltItem {
    pub identifier: String,
    pub title: String,
    pub artist: String,
    pub folder: String,
    /// URL encoded in the QR image.
    pub url: String,
}

/// Result of a list build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub list_name: String,
    pub list_root: PathBuf,
    pub index: PathBuf,
    pub items: Vec<BuiltItem>,
    pub warnings: Vec<String>,
}

/// Build a list from a spreadsheet with the pure-Rust raster backend.
pub fn build(
    request: &BuildRequest,
    output_root: &Path,
    config: &CardsConfig,
) -> Result<BuildReport, ProcessError> {
    let rows = sheet::read_sheet(&request.sheet)?;
    let backend = RustBackend::new(&config.info);
    build_rows_with_backend(
        &backend,
        &rows,
        &request.list_name,
        &request.domain,
        output_root,
        config,
    )
}

/// Build a list from already-parsed rows using a specific backend (allows
/// testing with mock).
pub fn build_rows_with_backend(
    backend: &impl ImageBackend,
    rows: &[Row],
    list_name: &str,
    domain: &str,
    output_root: &Path,
    config: &CardsConfig,
) -> Result<BuildReport, ProcessError> {
    let list_root = list_root(output_root, list_name)?;
    fs::create_dir_all(&list_root)?;

    let mut warnings = backend.warnings();
    warnings.extend(duplicate_warnings(rows));

    let prefix = &config.output.folder_prefix;
    let layout = CardLayout::from(&config.info);
    let mut items = Vec::with_capacity(rows.len());

    for row in rows {
        let folder = naming::folder_name(prefix, row.id);
        let item_dir = list_root.join(&folder);
        fs::create_dir_all(&item_dir)?;

        html::write_player_page(&item_dir.join(PAGE_FILE), &row.video)?;

        let url = naming::item_url(domain, &config.output.public_path, list_name, &folder);
        let imaging_error = |source| ProcessError::Imaging {
            folder: folder.clone(),
            source,
        };
        backend
            .qr(&QrParams::new(item_dir.join(QR_FILE), url.clone(), &config.qr))
            .map_err(imaging_error)?;
        backend
            .info_card(&InfoParams::for_row(item_dir.join(INFO_FILE), row, layout))
            .map_err(imaging_error)?;

        items.push(BuiltItem {
            identifier: row.identifier(),
            title: row.title.clone(),
            artist: row.artist.clone(),
            folder,
            url,
        });
    }

    let index = list_root.join(PAGE_FILE);
    html::write_list_index(&index, list_name, rows, prefix)?;

    Ok(BuildReport {
        list_name: list_name.to_string(),
        list_root,
        index,
        items,
        warnings,
    })
}

/// Directory of a list under the output root. The name must stay inside it.
pub fn list_root(output_root: &Path, list_name: &str) -> Result<PathBuf, ProcessError> {
    validate_list_name(list_name)?;
    Ok(output_root.join(list_name))
}

/// The list name becomes one directory and one URL segment.
fn validate_list_name(name: &str) -> Result<(), ProcessError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
    {
        return Err(ProcessError::InvalidListName(name.to_string()));
    }
    Ok(())
}

/// Rows sharing an ID write to the same folder; the later row wins.
fn duplicate_warnings(rows: &[Row]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut warnings = Vec::new();
    for row in rows {
        if !seen.insert(row.id) && reported.insert(row.id) {
            warnings.push(format!(
                "ID {} appears more than once; its folder holds the last row",
                row.identifier()
            ));
        }
    }
    warnings
}
