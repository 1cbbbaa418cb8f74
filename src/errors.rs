// src/errors.rs

//! Crate-wide error types.
//!
//! [`SettingsError`] describes one problem with a settings map; every variant
//! becomes a [`Diagnostic`](crate::report::Diagnostic). [`BulkcheckError`]
//! covers the application boundary (CLI tokens, rejected configurations).

use std::fmt;

use thiserror::Error;

/// A value that is not one of the constants of an enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "The enum class {enum_name} has no constant of the name '{value}' (should be one of [{}])",
    .constants.join(", ")
)]
pub struct UnknownConstant {
    pub enum_name: &'static str,
    pub value: String,
    pub constants: &'static [&'static str],
}

/// Why a duration literal could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("No number in duration value '{0}'")]
    NoNumber(String),

    #[error("Could not parse time unit '{unit}' (try ns, us, ms, s, m, h, d)")]
    BadUnit { unit: String },

    #[error("Duration value '{0}' is out of range")]
    OutOfRange(String),
}

/// A `schema.mapping` entry that cannot be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid schema.mapping entry '{entry}': {reason}")]
pub struct MappingError {
    pub entry: String,
    pub reason: &'static str,
}

/// One problem found in a settings map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{key} has type {actual} rather than {expected}")]
    TypeMismatch {
        key: String,
        actual: LiteralType,
        expected: &'static str,
    },

    #[error(
        "{key} has type {actual} rather than {interface}: \
         no implementation named '{value}' (should be one of [{}])",
        .known.join(", ")
    )]
    BadInstance {
        key: String,
        actual: LiteralType,
        value: String,
        interface: &'static str,
        known: &'static [&'static str],
    },

    #[error("{key} must be {bound} (got {value})")]
    OutOfRange {
        key: String,
        value: i64,
        bound: String,
    },

    #[error("Invalid value at '{origin}': {cause}")]
    InvalidEnum {
        key: String,
        origin: String,
        #[source]
        cause: UnknownConstant,
    },

    #[error("Invalid value at '{origin}': {cause}")]
    DurationParse {
        key: String,
        origin: String,
        #[source]
        cause: DurationError,
    },

    #[error("{message}")]
    DependencyViolation { key: String, message: String },

    #[error("Load balancing policy chaining loop detected: {}", .chain.join(","))]
    ChainCycle { key: String, chain: Vec<String> },

    #[error("Cannot find connector '{name}'. Available connectors are: {}", .available.join(", "))]
    UnknownConnector {
        key: String,
        name: String,
        available: Vec<&'static str>,
    },

    #[error("Unknown setting '{key}'. See settings.md or help for the list of valid settings.")]
    UnknownSetting { key: String },
}

impl SettingsError {
    pub fn dependency(key: impl Into<String>, message: impl Into<String>) -> Self {
        SettingsError::DependencyViolation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// The setting key this error is attributed to.
    pub fn key(&self) -> &str {
        match self {
            SettingsError::TypeMismatch { key, .. }
            | SettingsError::BadInstance { key, .. }
            | SettingsError::OutOfRange { key, .. }
            | SettingsError::InvalidEnum { key, .. }
            | SettingsError::DurationParse { key, .. }
            | SettingsError::DependencyViolation { key, .. }
            | SettingsError::ChainCycle { key, .. }
            | SettingsError::UnknownConnector { key, .. }
            | SettingsError::UnknownSetting { key } => key,
        }
    }
}

/// Apparent type of a raw literal, as reported in type-mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Number,
    Boolean,
    String,
}

impl LiteralType {
    pub fn of(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == "true" || trimmed == "false" {
            LiteralType::Boolean
        } else if trimmed.chars().any(|c| c.is_ascii_digit()) && trimmed.parse::<f64>().is_ok() {
            LiteralType::Number
        } else {
            LiteralType::String
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LiteralType::Number => "NUMBER",
            LiteralType::Boolean => "BOOLEAN",
            LiteralType::String => "STRING",
        })
    }
}

/// Errors raised at the application boundary.
#[derive(Error, Debug)]
pub enum BulkcheckError {
    #[error("Malformed setting '{0}': expected <key>=<value>")]
    MalformedSetting(String),

    #[error("Configuration rejected: {0} problem(s) found")]
    Rejected(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BulkcheckError>;
