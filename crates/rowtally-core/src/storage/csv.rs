//! CSV import/export functionality

use crate::error::{Result, RowtallyError};
use crate::sheet::Sheet;
use rowtally_engine::engine::{Cell, CellRef, CellValue, format_number};
use std::path::Path;

/// Which text to export for each cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CsvValues {
    /// Stored values, no number formats.
    #[default]
    Raw,
    /// Values as displayed, with number formats applied.
    Display,
}

/// Parse CSV text into cell values, with the first record at row 1.
/// Empty fields are skipped. Quoted fields may span lines.
pub fn parse_csv(content: &str) -> Result<Vec<(CellRef, CellValue)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut cells = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|err| RowtallyError::Parse {
            line: err.position().map_or(row_idx + 1, |p| p.line() as usize),
            message: err.to_string(),
        })?;
        for (col_idx, field) in record.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            cells.push((CellRef::new(row_idx + 1, col_idx + 1), parse_csv_field(field)));
        }
    }

    Ok(cells)
}

/// Load a CSV file into a new sheet named `sheet_name`.
/// The sheet grows past the default size when the data needs it.
pub fn load_csv(path: &Path, sheet_name: &str) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(RowtallyError::EmptyCsv);
    }

    let mut sheet = Sheet::new(sheet_name);
    for (cell_ref, value) in parse_csv(&content)? {
        sheet.ensure_size(cell_ref.row, cell_ref.col);
        sheet.grid.insert(cell_ref, Cell::new(value));
    }
    tracing::debug!(path = %path.display(), cells = sheet.grid.len(), "loaded csv");
    Ok(sheet)
}

/// Parse a CSV field into a cell value
/// - Valid number -> Number (unless it has leading zeros like "007")
/// - TRUE / FALSE -> Bool
/// - Otherwise -> Text, surrounding whitespace kept
fn parse_csv_field(field: &str) -> CellValue {
    let trimmed = field.trim();
    if field != trimmed {
        return CellValue::Text(field.to_string());
    }

    // Keep identifiers such as "007" as text, but not "0" or "0.5".
    if trimmed.starts_with('0')
        && trimmed.len() > 1
        && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    {
        return CellValue::Text(trimmed.to_string());
    }

    CellValue::from_input(trimmed)
}

/// Render a sheet as CSV, from A1 to the bottom-right populated cell.
pub fn csv_string(sheet: &Sheet, values: CsvValues) -> Result<String> {
    let Some(extent) = sheet.data_extent() else {
        return Ok(String::new());
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in 1..=extent.row {
        let fields: Vec<String> = (1..=extent.col)
            .map(|col| {
                let Some(cell) = sheet.grid.get(&CellRef::new(row, col)) else {
                    return String::new();
                };
                match (&cell.value, values) {
                    (CellValue::Number(n), CsvValues::Raw) => format_number(*n),
                    (CellValue::Number(_), CsvValues::Display) => cell.display(),
                    (_, _) => guard_formula(cell.display()),
                }
            })
            .collect();
        writer.write_record(&fields)?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    String::from_utf8(bytes)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
}

/// Write a sheet to a CSV file.
pub fn write_csv(path: &Path, sheet: &Sheet, values: CsvValues) -> Result<()> {
    std::fs::write(path, csv_string(sheet, values)?)?;
    Ok(())
}

/// Guard text against CSV formula injection in spreadsheet apps.
fn guard_formula(field: String) -> String {
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field
    }
}
