//! Rowtally - deduction ledger edit trigger for CSV sheets

mod cli;
mod config;
mod error;

use anyhow::{Context, Result};
use cli::{Command, Options};
use rowtally_core::storage::{CsvValues, csv_string, load_csv, write_csv};
use rowtally_core::{Clock, EditHandler, FixedClock, Host, Session, SystemClock, Workbook};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: Options) -> Result<()> {
    let (config, warnings) = config::load_config(options.config.as_deref())?;
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let time_zone = cli::time_zone_override(&options)?.unwrap_or(config.time_zone);
    let clock: Box<dyn Clock> = match options.now {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock),
    };

    let sheet = load_csv(&options.file, &config.sheet_name)
        .with_context(|| format!("Failed to load {}", options.file.display()))?;
    let mut host = Host::new(Workbook::with_sheet(sheet), Session::new(clock, time_zone));
    host.triggers.on_edit("onEdit", EditHandler::new(config.layout));

    for edit in &options.edits {
        let reports = host
            .edit(edit.cell, &edit.input)
            .with_context(|| format!("Failed to edit {}", edit.cell))?;
        for report in reports {
            if let Err(err) = report.result {
                eprintln!(
                    "Warning: trigger '{}' failed for {}: {}",
                    report.trigger, report.range, err
                );
            }
        }
    }

    let values = if options.display {
        CsvValues::Display
    } else {
        CsvValues::Raw
    };
    let sheet = host.workbook.active_sheet()?;
    match &options.output {
        Some(path) => write_csv(path, sheet, values)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", csv_string(sheet, values)?),
    }
    Ok(())
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match cli::parse_args(&args) {
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
