//! Decodes uploaded statement files (CSV, XLS, XLSX) into rows of
//! header-to-cell mappings, without interpreting what any column means.

use std::io::Cursor;

use calamine::{Data, Reader};
use time::{Date, Duration, macros::date};

use crate::Error;

/// A single cell value decoded from a statement file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Textual cell content. All CSV cells decode as text.
    Text(String),
    /// Numeric content from a typed spreadsheet cell.
    Number(f64),
    /// A date-typed spreadsheet cell, already decoded to a calendar date.
    Date(Date),
}

/// One decoded statement row: the source file's own column headers mapped to
/// cell values, in the source's own column order.
///
/// Headers keep their original casing for display; a lowercased copy is
/// computed once per cell so alias lookups do not re-normalize per field.
/// Cells that are empty in the source are absent from the row, so a missing
/// column and an empty cell look the same to downstream stages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    columns: Vec<RawColumn>,
}

#[derive(Debug, Clone, PartialEq)]
struct RawColumn {
    header: String,
    header_lower: String,
    value: CellValue,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column to the row, preserving insertion order.
    pub fn push(&mut self, header: &str, value: CellValue) {
        self.columns.push(RawColumn {
            header: header.to_owned(),
            header_lower: header.to_lowercase(),
            value,
        });
    }

    /// The value of the first column, in this row's own column order, whose
    /// lowercased header matches any of `aliases`.
    pub fn first_match(&self, aliases: &[&str]) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|column| aliases.contains(&column.header_lower.as_str()))
            .map(|column| &column.value)
    }

    /// Whether the row has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Decode a statement file into its rows.
///
/// The format is chosen from the file extension: `.csv` is read with headers
/// taken from the first record, `.xls`/`.xlsx` are read from the first
/// worksheet only. Cell dates in workbooks decode to native dates; CSV values
/// stay text for the builder to interpret.
///
/// # Errors
/// Returns [Error::UnsupportedFormat] for any other extension, and
/// [Error::InvalidSheet] when the payload cannot be read as the claimed
/// format.
pub fn decode_statement(bytes: &[u8], file_name: &str) -> Result<Vec<RawRow>, Error> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => decode_csv(bytes),
        Some("xls") | Some("xlsx") => decode_workbook(bytes),
        _ => Err(Error::UnsupportedFormat(format!(
            "\"{file_name}\" is not a CSV, XLS, or XLSX file"
        ))),
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<RawRow>, Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidSheet(format!("could not read CSV header row: {error}")))?
        .clone();

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record
            .map_err(|error| Error::InvalidSheet(format!("could not read CSV record: {error}")))?;

        let mut row = RawRow::new();

        for (header, value) in headers.iter().zip(record.iter()) {
            if header.is_empty() || value.trim().is_empty() {
                continue;
            }

            row.push(header, CellValue::Text(value.to_owned()));
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<RawRow>, Error> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|error| Error::InvalidSheet(format!("could not open workbook: {error}")))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| Error::InvalidSheet("workbook contains no sheets".to_owned()))?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|error| Error::InvalidSheet(format!("could not read first sheet: {error}")))?;

    let mut sheet_rows = range.rows();

    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_header).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();

    for sheet_row in sheet_rows {
        let mut row = RawRow::new();

        for (header, cell) in headers.iter().zip(sheet_row.iter()) {
            if header.is_empty() {
                continue;
            }

            if let Some(value) = cell_to_value(cell) {
                row.push(header, value);
            }
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_owned(),
        Data::Float(number) => number.to_string(),
        Data::Int(number) => number.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTimeIso(text) => text.clone(),
        _ => String::new(),
    }
}

fn cell_to_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::String(text) if !text.trim().is_empty() => Some(CellValue::Text(text.clone())),
        Data::Float(number) => Some(CellValue::Number(*number)),
        Data::Int(number) => Some(CellValue::Number(*number as f64)),
        Data::Bool(value) => Some(CellValue::Text(value.to_string())),
        Data::DateTime(datetime) => match excel_serial_to_date(datetime.as_f64()) {
            Some(date) => Some(CellValue::Date(date)),
            None => Some(CellValue::Number(datetime.as_f64())),
        },
        Data::DateTimeIso(text) => Some(CellValue::Text(text.clone())),
        Data::DurationIso(text) => Some(CellValue::Text(text.clone())),
        _ => None,
    }
}

/// Convert an Excel serial day number to a calendar date.
///
/// The epoch is 1899-12-30, which accounts for Excel treating 1900 as a leap
/// year. Serial numbers outside Excel's representable range return `None`.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<Date> {
    const EXCEL_MAX_SERIAL: f64 = 2_958_465.0; // 9999-12-31

    if !(1.0..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }

    date!(1899 - 12 - 30).checked_add(Duration::days(serial.trunc() as i64))
}
