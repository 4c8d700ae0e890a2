//! Sheet import and export.

mod csv;

pub use self::csv::{CsvValues, csv_string, load_csv, parse_csv, write_csv};
