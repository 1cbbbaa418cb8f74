// src/settings/validate.rs

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::coerce::coerce;
use crate::errors::SettingsError;
use crate::report::ValidationReport;
use crate::rules::RuleSet;
use crate::settings::catalog::spec_for;
use crate::settings::model::{SettingSpec, SettingsMap};
use crate::types::TypedValue;

/// Validate a fully-resolved settings map against the standard rule set.
///
/// The map is never modified. Calling this twice on the same map yields the
/// same report.
pub fn validate(settings: &SettingsMap) -> ValidationReport {
    let mut report = ValidationReport::new();

    for key in unknown_keys(settings) {
        report.push(&SettingsError::UnknownSetting {
            key: key.to_string(),
        });
    }

    RuleSet::standard().evaluate_into(settings, &mut report);

    debug!(
        settings = settings.len(),
        diagnostics = report.len(),
        "validation finished"
    );
    report
}

/// Keys that no catalog entry declares.
pub fn unknown_keys(settings: &SettingsMap) -> impl Iterator<Item = &str> {
    settings.iter().map(|(k, _)| k).filter(|k| spec_for(k).is_none())
}

/// Read-only typed view over a settings map, filled in by field rules.
#[derive(Debug)]
pub struct TypedSettings<'a> {
    raw: &'a SettingsMap,
    values: BTreeMap<&'static str, TypedValue>,
    failed: BTreeSet<&'static str>,
}

impl<'a> TypedSettings<'a> {
    pub fn new(raw: &'a SettingsMap) -> Self {
        Self {
            raw,
            values: BTreeMap::new(),
            failed: BTreeSet::new(),
        }
    }

    /// Coerce the setting declared by `spec`, if present.
    pub(crate) fn coerce_field(&mut self, spec: &'static SettingSpec) -> Result<(), SettingsError> {
        let Some(raw) = self.raw.get(spec.key) else {
            return Ok(());
        };
        match coerce(spec, raw) {
            Ok(value) => {
                self.values.insert(spec.key, value);
                Ok(())
            }
            Err(err) => {
                self.failed.insert(spec.key);
                Err(err)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.values.get(key)
    }

    /// Whether `key` was present but could not be coerced.
    pub fn has_failed(&self, key: &str) -> bool {
        self.failed.contains(key)
    }

    /// Textual value of `key`, as given.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(TypedValue::as_str)
    }

    /// Trimmed textual value of `key`; blank values count as unset.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.str_value(key).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether `key` holds a usable value. Blank strings are unset.
    pub fn is_set(&self, key: &str) -> bool {
        match self.get(key) {
            Some(TypedValue::Str(s)) => !s.trim().is_empty(),
            Some(_) => true,
            None => false,
        }
    }
}
