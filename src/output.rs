//! CLI output formatting for the build, PDF and check commands.
//!
//! # Item-First Display
//!
//! Every item is shown by its identifier and title first, with the folder it
//! was written to as secondary context after an arrow. Paths are printed
//! relative to the list root so the listing reads as a song inventory.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Lista lista1 → output/lista1
//!     03 Canción X → cancion03/
//!     01 Primera → cancion01/
//! Index → output/lista1/index.html
//!
//! Generated 2 items
//! ```
//!
//! ## PDFs
//!
//! ```text
//! PDFs → output/lista1/pdfs
//!     cancion01 → cancion01.pdf
//!     cancion02 skipped (missing info.png or qr.png)
//!
//! Generated 1 PDF, skipped 1
//! ```
//!
//! ## Check
//!
//! ```text
//! canciones.xlsx (2 rows)
//!     03 Canción X – Artista Y (1998)
//!         Video: abc123
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Warnings go to
//! stderr with a `warning:` prefix.

use crate::pdf::PdfReport;
use crate::process::BuildReport;
use crate::types::Row;
use std::path::Path;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 item`, `2 items`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Lista {} → {}",
        report.list_name,
        report.list_root.display()
    )];
    for item in &report.items {
        lines.push(format!(
            "{}{} {} → {}/",
            indent(1),
            item.identifier,
            item.title,
            item.folder
        ));
    }
    lines.push(format!("Index → {}", report.index.display()));
    lines.push(String::new());
    lines.push(format!(
        "Generated {}",
        plural(report.items.len(), "item", "items")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    print_warnings(&report.warnings);
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// PDFs
// ============================================================================

pub fn format_pdf_output(report: &PdfReport) -> Vec<String> {
    let mut lines = vec![format!("PDFs → {}", report.pdf_dir.display())];

    // Merge written and skipped back into folder order for display
    let mut entries: Vec<(&str, Option<&Path>)> = report
        .written
        .iter()
        .map(|(name, path)| (name.as_str(), Some(path.as_path())))
        .chain(report.skipped.iter().map(|name| (name.as_str(), None)))
        .collect();
    entries.sort_by_key(|(name, _)| *name);

    for (name, path) in entries {
        match path.and_then(|p| p.file_name()) {
            Some(file) => lines.push(format!(
                "{}{} → {}",
                indent(1),
                name,
                file.to_string_lossy()
            )),
            None => lines.push(format!(
                "{}{} skipped (missing info.png or qr.png)",
                indent(1),
                name
            )),
        }
    }

    lines.push(String::new());
    let summary = format!("Generated {}", plural(report.written.len(), "PDF", "PDFs"));
    if report.skipped.is_empty() {
        lines.push(summary);
    } else {
        lines.push(format!("{summary}, skipped {}", report.skipped.len()));
    }
    lines
}

pub fn print_pdf_output(report: &PdfReport) {
    for line in format_pdf_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(rows: &[Row], sheet: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        sheet.display(),
        plural(rows.len(), "row", "rows")
    )];
    for row in rows {
        lines.push(format!(
            "{}{} {} – {} ({})",
            indent(1),
            row.identifier(),
            row.title,
            row.artist,
            row.year
        ));
        lines.push(format!("{}Video: {}", indent(2), row.video));
    }
    lines
}

pub fn print_check_output(rows: &[Row], sheet: &Path) {
    for line in format_check_output(rows, sheet) {
        println!("{}", line);
    }
}

// ============================================================================
// Warnings
// ============================================================================

pub fn format_warnings(warnings: &[String]) -> Vec<String> {
    warnings.iter().map(|w| format!("warning: {w}")).collect()
}

pub fn print_warnings(warnings: &[String]) {
    for line in format_warnings(warnings) {
        eprintln!("{}", line);
    }
}
