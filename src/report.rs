// src/report.rs

//! Outcome of a validation pass.

use std::fmt;

use serde::Serialize;

use crate::errors::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    TypeMismatch,
    OutOfRange,
    InvalidEnum,
    DurationParse,
    DependencyViolation,
    ChainCycle,
    UnknownConnector,
    UnknownSetting,
}

/// One reported problem: the offending key and a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub key: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl From<&SettingsError> for Diagnostic {
    fn from(err: &SettingsError) -> Self {
        let kind = match err {
            SettingsError::TypeMismatch { .. } | SettingsError::BadInstance { .. } => {
                DiagnosticKind::TypeMismatch
            }
            SettingsError::OutOfRange { .. } => DiagnosticKind::OutOfRange,
            SettingsError::InvalidEnum { .. } => DiagnosticKind::InvalidEnum,
            SettingsError::DurationParse { .. } => DiagnosticKind::DurationParse,
            SettingsError::DependencyViolation { .. } => DiagnosticKind::DependencyViolation,
            SettingsError::ChainCycle { .. } => DiagnosticKind::ChainCycle,
            SettingsError::UnknownConnector { .. } => DiagnosticKind::UnknownConnector,
            SettingsError::UnknownSetting { .. } => DiagnosticKind::UnknownSetting,
        };
        Self {
            key: err.key().to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.key)
    }
}

/// Ordered diagnostics; empty means the configuration is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: &SettingsError) {
        self.diagnostics.push(Diagnostic::from(err));
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics attributed to `key`.
    pub fn for_key<'r>(&'r self, key: &'r str) -> impl Iterator<Item = &'r Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.key == key)
    }

    /// Whether any message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.diagnostics.iter().any(|d| d.message.contains(needle))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.diagnostics {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}
