// src/settings/model.rs

use std::collections::BTreeMap;

use crate::types::EnumSpec;

/// Declared kind of a setting; drives how its raw value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Signed integer with optional inclusive bounds.
    Integer { min: Option<i64>, max: Option<i64> },
    Boolean,
    Enum(EnumSpec),
    Duration,
    /// Name of an implementation of `interface`, resolved against `known`.
    Instance {
        interface: &'static str,
        known: &'static [&'static str],
    },
    /// Exactly one character.
    Char,
    /// Character set name, matched case-insensitively.
    Charset,
    /// Load balancing policy name; checked by the policy chain rule.
    Policy,
    Str,
}

impl Kind {
    pub const INTEGER: Kind = Kind::Integer {
        min: None,
        max: None,
    };

    pub const fn at_least(min: i64) -> Kind {
        Kind::Integer {
            min: Some(min),
            max: None,
        }
    }

    pub const fn between(min: i64, max: i64) -> Kind {
        Kind::Integer {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Declaration of one known setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    /// Full dotted key, e.g. `driver.socket.readTimeout`.
    pub key: &'static str,
    /// Configuration section the setting is read from, e.g. `driver`.
    pub section: &'static str,
    pub kind: Kind,
    /// Value used when the setting is not given explicitly.
    pub default: Option<&'static str>,
}

impl SettingSpec {
    /// Path of the setting relative to its section (`socket.readTimeout`).
    pub fn origin(&self) -> &'static str {
        origin_of(self.key, self.section)
    }
}

pub(crate) fn origin_of<'k>(key: &'k str, section: &str) -> &'k str {
    key.strip_prefix(section)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(key)
}

/// A fully-resolved, flat settings map (key -> raw string value).
///
/// Ordered by key so that anything derived from it is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMap {
    values: BTreeMap<String, String>,
}

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding the default of every catalog setting that has one.
    pub fn with_defaults() -> Self {
        let values = crate::settings::catalog::CATALOG
            .iter()
            .filter_map(|spec| spec.default.map(|d| (spec.key.to_string(), d.to_string())))
            .collect();
        Self { values }
    }

    /// Insert or replace a value; returns the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for SettingsMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}
