// src/coerce/mod.rs

//! Per-setting coercion of raw strings into [`TypedValue`]s.
//!
//! - [`coerce`] handles every declared [`Kind`].
//! - [`duration`] parses duration literals.

pub mod duration;

pub use duration::parse_duration;

use crate::errors::{LiteralType, SettingsError};
use crate::settings::catalog::CHARSETS;
use crate::settings::model::{Kind, SettingSpec};
use crate::types::TypedValue;

/// Coerce `raw` to the kind declared by `spec`.
///
/// Pure function of its inputs; every malformed value becomes an error,
/// never a panic.
pub fn coerce(spec: &SettingSpec, raw: &str) -> Result<TypedValue, SettingsError> {
    let key = spec.key;
    match spec.kind {
        Kind::Integer { min, max } => {
            let value = coerce_integer(key, raw)?;
            check_bounds(key, value, min, max)?;
            Ok(TypedValue::Integer(value))
        }
        Kind::Boolean => coerce_bool(key, raw).map(TypedValue::Boolean),
        Kind::Enum(enum_spec) => enum_spec
            .resolve(raw)
            .map(|constant| TypedValue::Enum {
                class: enum_spec.name,
                constant,
            })
            .map_err(|cause| SettingsError::InvalidEnum {
                key: key.to_string(),
                origin: spec.origin().to_string(),
                cause,
            }),
        Kind::Duration => parse_duration(raw)
            .map(TypedValue::Duration)
            .map_err(|cause| SettingsError::DurationParse {
                key: key.to_string(),
                origin: spec.origin().to_string(),
                cause,
            }),
        Kind::Instance { interface, known } => known
            .iter()
            .copied()
            .find(|name| *name == raw.trim())
            .map(TypedValue::InstanceRef)
            .ok_or_else(|| SettingsError::BadInstance {
                key: key.to_string(),
                actual: LiteralType::of(raw),
                value: raw.to_string(),
                interface,
                known,
            }),
        Kind::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(TypedValue::Char(c)),
                _ => Err(mismatch(key, raw, "CHARACTER")),
            }
        }
        Kind::Charset => CHARSETS
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(raw.trim()))
            .map(TypedValue::Charset)
            .ok_or_else(|| mismatch(key, raw, "CHARSET")),
        Kind::Policy | Kind::Str => Ok(TypedValue::Str(raw.to_string())),
    }
}

fn coerce_integer(key: &str, raw: &str) -> Result<i64, SettingsError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| mismatch(key, raw, "NUMBER"))
}

/// Only the canonical literals are accepted; `"1"`, `"yes"` or `"tralse"` are not.
fn coerce_bool(key: &str, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(mismatch(key, raw, "BOOLEAN")),
    }
}

fn check_bounds(
    key: &str,
    value: i64,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<(), SettingsError> {
    let bound = match (min, max) {
        (Some(lo), Some(hi)) if value < lo || value > hi => format!("between {lo} and {hi}"),
        (Some(lo), None) if value < lo => format!(">= {lo}"),
        (None, Some(hi)) if value > hi => format!("<= {hi}"),
        _ => return Ok(()),
    };
    Err(SettingsError::OutOfRange {
        key: key.to_string(),
        value,
        bound,
    })
}

fn mismatch(key: &str, raw: &str, expected: &'static str) -> SettingsError {
    SettingsError::TypeMismatch {
        key: key.to_string(),
        actual: LiteralType::of(raw),
        expected,
    }
}
