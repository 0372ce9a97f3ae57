//! Shared row types produced by the sheet reader and consumed by every
//! producer.

use serde::Serialize;
use std::fmt;

/// One spreadsheet record, parsed into typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Numeric `ID` column. Unique per list.
    pub id: u32,
    /// `Título de la Canción`
    pub title: String,
    /// `Cantante`
    pub artist: String,
    /// `Año`
    pub year: Year,
    /// `Código YouTube`, embedded verbatim in the player page.
    pub video: String,
}

impl Row {
    /// Two-digit zero-padded identifier (`3` → `"03"`).
    pub fn identifier(&self) -> String {
        crate::naming::pad_identifier(self.id)
    }
}

/// Release year as found in the sheet.
///
/// Most sheets hold a number, but free text (`"1990s"`, `"c. 1975"`) is kept
/// as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Year {
    Numeric(i32),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Numeric(year) => write!(f, "{year}"),
            Year::Text(text) => f.write_str(text),
        }
    }
}
