//! Command-line parsing.

use crate::error::{CliError, Result};
use chrono::{DateTime, Utc};
use rowtally_engine::engine::{CellRef, ScriptTimeZone};
use std::path::PathBuf;

pub fn print_usage() {
    eprintln!("Usage: rowtally [OPTIONS] <FILE>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <FILE>                    Ledger sheet to load (.csv)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <CELL=VALUE>    Edit a cell and fire the edit trigger (can be repeated)");
    eprintln!("  -o, --output <FILE>       Write the resulting sheet to FILE instead of stdout");
    eprintln!("  --display                 Export displayed values (number formats applied)");
    eprintln!("  --config <FILE>           Load the ledger layout from a TOML file");
    eprintln!("  --time-zone <TZ>          Script time zone: local, UTC, +07:00 or Asia/Jakarta");
    eprintln!("  --now <TIME>              Pin the edit clock to an RFC 3339 instant");
    eprintln!("  -h, --help                Print help");
}

/// One `--set` edit.
#[derive(Clone, Debug, PartialEq)]
pub struct Edit {
    pub cell: CellRef,
    pub input: String,
}

impl Edit {
    fn parse(arg: &str) -> Result<Edit> {
        let invalid = || CliError::InvalidEdit(arg.to_string());
        let (cell, input) = arg.split_once('=').ok_or_else(invalid)?;
        let cell = CellRef::from_str(cell).ok_or_else(invalid)?;
        Ok(Edit {
            cell,
            input: input.to_string(),
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Options {
    pub file: PathBuf,
    pub edits: Vec<Edit>,
    pub output: Option<PathBuf>,
    pub display: bool,
    pub config: Option<PathBuf>,
    pub time_zone: Option<String>,
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    Run(Options),
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();
    let mut file: Option<PathBuf> = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-s" | "--set" => {
                let value = iter.next().ok_or(CliError::MissingValue("--set"))?;
                options.edits.push(Edit::parse(value)?);
            }
            "-o" | "--output" => {
                let value = iter.next().ok_or(CliError::MissingValue("--output"))?;
                options.output = Some(PathBuf::from(value));
            }
            "--display" => options.display = true,
            "--config" => {
                let value = iter.next().ok_or(CliError::MissingValue("--config"))?;
                options.config = Some(PathBuf::from(value));
            }
            "--time-zone" => {
                let value = iter.next().ok_or(CliError::MissingValue("--time-zone"))?;
                options.time_zone = Some(value.clone());
            }
            "--now" => {
                let value = iter.next().ok_or(CliError::MissingValue("--now"))?;
                let at = DateTime::parse_from_rfc3339(value)
                    .map_err(|_| CliError::InvalidInstant(value.clone()))?;
                options.now = Some(at.with_timezone(&Utc));
            }
            other if other.starts_with('-') => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => {
                if file.is_some() {
                    return Err(CliError::UnexpectedArgument(other.to_string()));
                }
                file = Some(PathBuf::from(other));
            }
        }
    }

    options.file = file.ok_or(CliError::MissingFile)?;
    Ok(Command::Run(options))
}

/// Parse the `--time-zone` override, if any.
pub fn time_zone_override(options: &Options) -> rowtally_engine::engine::Result<Option<ScriptTimeZone>> {
    options
        .time_zone
        .as_deref()
        .map(str::parse::<ScriptTimeZone>)
        .transpose()
}
