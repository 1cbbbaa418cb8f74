// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::errors::Result;
use crate::settings::catalog::find_connector;
use crate::settings::{SettingsMap, load_from_assignments};

/// Command-line arguments for `bulkcheck`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bulkcheck",
    version,
    about = "Validate bulk loader settings before anything connects or moves data.",
    long_about = None
)]
pub struct CliArgs {
    /// Settings as `key=value` pairs, e.g. `driver.port=9042`.
    ///
    /// Applied over the built-in defaults; later pairs win. A leading `--`
    /// is accepted after a `--` separator.
    #[arg(value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Shortcut for `connector.name`.
    #[arg(short = 'c', long, value_name = "NAME")]
    pub connector: Option<String>,

    /// Shortcut for `schema.keyspace`.
    #[arg(short = 'k', long, value_name = "KEYSPACE")]
    pub keyspace: Option<String>,

    /// Shortcut for `schema.table`.
    #[arg(short = 't', long, value_name = "TABLE")]
    pub table: Option<String>,

    /// Shortcut for `schema.mapping`.
    #[arg(short = 'm', long, value_name = "MAPPING")]
    pub mapping: Option<String>,

    /// Shortcut for `connector.<selected connector>.url`.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Shortcut for `driver.hosts`.
    #[arg(long, value_name = "HOSTS")]
    pub hosts: Option<String>,

    /// How to print the validation report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BULKCHECK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved settings before validating them.
    #[arg(long)]
    pub print_settings: bool,
}

impl CliArgs {
    /// Resolve the settings map: defaults, then `KEY=VALUE` pairs, then shortcuts.
    pub fn to_settings(&self) -> Result<SettingsMap> {
        let mut settings = load_from_assignments(&self.settings)?;

        let shortcuts = [
            ("connector.name", &self.connector),
            ("schema.keyspace", &self.keyspace),
            ("schema.table", &self.table),
            ("schema.mapping", &self.mapping),
            ("driver.hosts", &self.hosts),
        ];
        for (key, value) in shortcuts {
            if let Some(value) = value {
                settings.set(key, value.as_str());
            }
        }

        if let Some(url) = &self.url {
            let url_key = settings
                .get("connector.name")
                .and_then(find_connector)
                .map(|c| c.url_key())
                .unwrap_or_else(|| "connector.csv.url".to_string());
            settings.set(url_key, url.as_str());
        }

        Ok(settings)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per problem on stderr.
    Text,
    /// The full report as JSON on stdout.
    Json,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
