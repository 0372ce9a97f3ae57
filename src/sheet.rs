//! Spreadsheet ingestion.
//!
//! Reads the first worksheet of a workbook (xlsx, xlsm, xls or ods) and turns
//! every data row into a typed [`Row`]. The first row of the sheet is the
//! header; columns are located by name, so their order is free and extra
//! columns are ignored.
//!
//! ## Required Columns
//!
//! | Header | Field | Accepted cells |
//! |---|---|---|
//! | `ID` | [`Row::id`] | whole non-negative number, or text holding one |
//! | `Código YouTube` | [`Row::video`] | any non-empty value, kept verbatim |
//! | `Título de la Canción` | [`Row::title`] | any non-empty value |
//! | `Cantante` | [`Row::artist`] | any non-empty value |
//! | `Año` | [`Row::year`] | whole number, or free text |
//!
//! ## Validation
//!
//! - A missing column is an error before any row is read.
//! - Completely blank rows are skipped.
//! - Any other row that fails to parse aborts the read, naming the sheet row
//!   (1-based, as shown by spreadsheet applications) and the column.

use crate::types::{Row, Year};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COLUMN_ID: &str = "ID";
pub const COLUMN_VIDEO: &str = "Código YouTube";
pub const COLUMN_TITLE: &str = "Título de la Canción";
pub const COLUMN_ARTIST: &str = "Cantante";
pub const COLUMN_YEAR: &str = "Año";

/// Every column a sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COLUMN_ID,
    COLUMN_VIDEO,
    COLUMN_TITLE,
    COLUMN_ARTIST,
    COLUMN_YEAR,
];

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Cannot read spreadsheet {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("Spreadsheet has no worksheets: {0}")]
    NoWorksheet(PathBuf),
    #[error("Spreadsheet has no header row")]
    MissingHeader,
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Row {row}, column '{column}': {reason} (found {value:?})")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Read and parse the first worksheet of the workbook at `path`.
pub fn read_sheet(path: &Path) -> Result<Vec<Row>, SheetError> {
    let open_error = |source| SheetError::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(open_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet(path.to_path_buf()))?
        .map_err(open_error)?;
    parse_rows(&range)
}

/// Parse a worksheet range whose first row is the header.
///
/// Rows are returned in sheet order.
pub fn parse_rows(range: &Range<Data>) -> Result<Vec<Row>, SheetError> {
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();
    let header = rows.next().ok_or(SheetError::MissingHeader)?;
    let columns = Columns::locate(header)?;

    let mut parsed = Vec::new();
    for (offset, cells) in rows.enumerate() {
        if cells.iter().all(is_blank) {
            continue;
        }
        // 1-based, and the header occupies the first row of the range
        let sheet_row = first_row + offset + 2;
        parsed.push(columns.parse_row(cells, sheet_row)?);
    }
    Ok(parsed)
}

/// Column positions of the required headers.
struct Columns {
    id: usize,
    video: usize,
    title: usize,
    artist: usize,
    year: usize,
}

impl Columns {
    fn locate(header: &[Data]) -> Result<Self, SheetError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
                .ok_or(SheetError::MissingColumn(name))
        };
        Ok(Self {
            id: find(COLUMN_ID)?,
            video: find(COLUMN_VIDEO)?,
            title: find(COLUMN_TITLE)?,
            artist: find(COLUMN_ARTIST)?,
            year: find(COLUMN_YEAR)?,
        })
    }

    fn parse_row(&self, cells: &[Data], row: usize) -> Result<Row, SheetError> {
        let cell = |idx: usize| cells.get(idx).unwrap_or(&Data::Empty);
        let invalid = |column: &'static str, data: &Data, reason: &'static str| {
            SheetError::InvalidCell {
                row,
                column,
                value: data.to_string(),
                reason,
            }
        };

        let id_cell = cell(self.id);
        let id = parse_id(id_cell).map_err(|reason| invalid(COLUMN_ID, id_cell, reason))?;

        let video_cell = cell(self.video);
        let video = parse_text(video_cell, false)
            .map_err(|reason| invalid(COLUMN_VIDEO, video_cell, reason))?;

        let title_cell = cell(self.title);
        let title = parse_text(title_cell, true)
            .map_err(|reason| invalid(COLUMN_TITLE, title_cell, reason))?;

        let artist_cell = cell(self.artist);
        let artist = parse_text(artist_cell, true)
            .map_err(|reason| invalid(COLUMN_ARTIST, artist_cell, reason))?;

        let year_cell = cell(self.year);
        let year =
            parse_year(year_cell).map_err(|reason| invalid(COLUMN_YEAR, year_cell, reason))?;

        Ok(Row {
            id,
            title,
            artist,
            year,
            video,
        })
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Whole, finite float as an integer. Spreadsheets store most numbers as
/// floats, so `3.0` is how an `ID` of 3 usually arrives.
fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .then_some(value as i64)
}

fn parse_id(cell: &Data) -> Result<u32, &'static str> {
    const NOT_AN_ID: &str = "identifier must be a whole non-negative number";
    let number = match cell {
        Data::Int(i) => *i,
        Data::Float(f) => whole_number(*f).ok_or(NOT_AN_ID)?,
        Data::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => s
                    .parse::<f64>()
                    .ok()
                    .and_then(whole_number)
                    .ok_or(NOT_AN_ID)?,
            }
        }
        Data::Empty => return Err("value is required"),
        _ => return Err(NOT_AN_ID),
    };
    u32::try_from(number).map_err(|_| NOT_AN_ID)
}

/// Text value of a cell. Numbers are rendered without a trailing `.0`.
fn parse_text(cell: &Data, trim: bool) -> Result<String, &'static str> {
    let text = match cell {
        Data::Empty => return Err("value is required"),
        Data::Error(_) => return Err("cell holds a spreadsheet error"),
        Data::String(s) if trim => s.trim().to_string(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => match whole_number(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        return Err("value is required");
    }
    Ok(text)
}

fn parse_year(cell: &Data) -> Result<Year, &'static str> {
    match cell {
        Data::Int(i) => i32::try_from(*i)
            .map(Year::Numeric)
            .map_err(|_| "year is out of range"),
        Data::Float(f) => whole_number(*f)
            .and_then(|i| i32::try_from(i).ok())
            .map(Year::Numeric)
            .ok_or("year must be a whole number or text"),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err("value is required");
            }
            Ok(s.parse::<i32>()
                .map(Year::Numeric)
                .unwrap_or_else(|_| Year::Text(s.to_string())))
        }
        Data::Empty => Err("value is required"),
        Data::Error(_) => Err("cell holds a spreadsheet error"),
        other => Ok(Year::Text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{header, sheet_range};

    fn data_row(id: Data, video: &str, title: &str, artist: &str, year: Data) -> Vec<Data> {
        vec![
            id,
            Data::String(video.into()),
            Data::String(title.into()),
            Data::String(artist.into()),
            year,
        ]
    }

    #[test]
    fn parses_rows_in_sheet_order() {
        let range = sheet_range(&[
            header(),
            data_row(Data::Float(3.0), "abc123", "Canción X", "Artista Y", Data::Float(1998.0)),
            data_row(Data::Int(1), "zzz", "Otra", "Alguien", Data::Int(2004)),
        ]);
        let rows = parse_rows(&range).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 3);
        assert_eq!(rows[0].title, "Canción X");
        assert_eq!(rows[0].artist, "Artista Y");
        assert_eq!(rows[0].year, Year::Numeric(1998));
        assert_eq!(rows[0].video, "abc123");
        assert_eq!(rows[1].id, 1);
    }

    #[test]
    fn column_order_is_free_and_extras_ignored() {
        let range = sheet_range(&[
            vec![
                Data::String("Notas".into()),
                Data::String(COLUMN_YEAR.into()),
                Data::String(COLUMN_ARTIST.into()),
                Data::String(COLUMN_TITLE.into()),
                Data::String(COLUMN_VIDEO.into()),
                Data::String(COLUMN_ID.into()),
            ],
            vec![
                Data::String("ignore me".into()),
                Data::Int(1987),
                Data::String("Artist".into()),
                Data::String("Title".into()),
                Data::String("vid".into()),
                Data::Int(12),
            ],
        ]);
        let rows = parse_rows(&range).unwrap();
        assert_eq!(rows[0].id, 12);
        assert_eq!(rows[0].video, "vid");
        assert_eq!(rows[0].year, Year::Numeric(1987));
    }

    #[test]
    fn missing_column_is_error() {
        let mut head = header();
        head.pop();
        let range = sheet_range(&[head]);
        assert!(matches!(
            parse_rows(&range),
            Err(SheetError::MissingColumn(COLUMN_YEAR))
        ));
    }

    #[test]
    fn empty_range_has_no_header() {
        let range: Range<Data> = Range::empty();
        assert!(matches!(parse_rows(&range), Err(SheetError::MissingHeader)));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let range = sheet_range(&[
            header(),
            vec![Data::Empty; 5],
            data_row(Data::Int(2), "v", "t", "a", Data::Int(2000)),
        ]);
        let rows = parse_rows(&range).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn fractional_id_names_row_and_column() {
        let range = sheet_range(&[
            header(),
            data_row(Data::Int(1), "v", "t", "a", Data::Int(2000)),
            data_row(Data::Float(2.5), "v", "t", "a", Data::Int(2000)),
        ]);
        match parse_rows(&range) {
            Err(SheetError::InvalidCell { row, column, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(column, COLUMN_ID);
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn negative_id_rejected() {
        assert!(parse_id(&Data::Int(-1)).is_err());
    }

    #[test]
    fn textual_ids_accepted() {
        assert_eq!(parse_id(&Data::String(" 7 ".into())), Ok(7));
        assert_eq!(parse_id(&Data::String("8.0".into())), Ok(8));
        assert!(parse_id(&Data::String("siete".into())).is_err());
    }

    #[test]
    fn missing_title_is_error() {
        let range = sheet_range(&[
            header(),
            data_row(Data::Int(1), "v", "  ", "a", Data::Int(2000)),
        ]);
        assert!(matches!(
            parse_rows(&range),
            Err(SheetError::InvalidCell {
                column: COLUMN_TITLE,
                ..
            })
        ));
    }

    #[test]
    fn numeric_title_rendered_without_decimals() {
        assert_eq!(parse_text(&Data::Float(1999.0), true), Ok("1999".to_string()));
        assert_eq!(parse_text(&Data::Float(2.5), true), Ok("2.5".to_string()));
    }

    #[test]
    fn video_kept_verbatim() {
        assert_eq!(
            parse_text(&Data::String(" dQw4w9WgXcQ".into()), false),
            Ok(" dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn year_variants() {
        assert_eq!(parse_year(&Data::Int(1998)), Ok(Year::Numeric(1998)));
        assert_eq!(parse_year(&Data::Float(1975.0)), Ok(Year::Numeric(1975)));
        assert_eq!(
            parse_year(&Data::String("2001".into())),
            Ok(Year::Numeric(2001))
        );
        assert_eq!(
            parse_year(&Data::String("años 80".into())),
            Ok(Year::Text("años 80".into()))
        );
        assert!(parse_year(&Data::Empty).is_err());
        assert!(parse_year(&Data::Float(1975.5)).is_err());
    }

    #[test]
    fn read_sheet_missing_file_is_open_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = read_sheet(&tmp.path().join("nope.xlsx"));
        assert!(matches!(result, Err(SheetError::Open { .. })));
    }
}
