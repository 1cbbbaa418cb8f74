// src/lib.rs

pub mod cli;
pub mod coerce;
pub mod errors;
pub mod logging;
pub mod policy;
pub mod report;
pub mod rules;
pub mod settings;
pub mod types;

use std::io::{self, Write};

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::errors::{BulkcheckError, Result};
use crate::report::ValidationReport;
use crate::settings::SettingsMap;

pub use crate::settings::validate;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - turning CLI tokens into a settings map
/// - the validation pass
/// - printing the report
///
/// Returns the report when the configuration is accepted and
/// [`BulkcheckError::Rejected`] otherwise.
pub fn run(args: &CliArgs) -> Result<ValidationReport> {
    let settings = args.to_settings()?;
    debug!(settings = settings.len(), "resolved settings");

    if args.print_settings {
        print_settings(&settings)?;
    }

    let report = validate(&settings);
    emit_report(&report, args.format)?;

    if report.is_valid() {
        info!("configuration accepted");
        Ok(report)
    } else {
        Err(BulkcheckError::Rejected(report.len()))
    }
}

fn print_settings(settings: &SettingsMap) -> Result<()> {
    let mut out = io::stdout().lock();
    for (key, value) in settings.iter() {
        writeln!(out, "{key} = {value:?}")?;
    }
    Ok(())
}

fn emit_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let mut err = io::stderr().lock();
            for diagnostic in report.iter() {
                writeln!(err, "error: {diagnostic}")?;
            }
        }
        OutputFormat::Json => {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, report).context("writing JSON report")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
