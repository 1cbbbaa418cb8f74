// src/settings/mapping.rs

//! Parsing of `schema.mapping`.
//!
//! A mapping is a comma-separated list of entries:
//!
//! ```text
//! *=*, f1=c1, c2
//! ```
//!
//! - `field=column` maps a record field to a table column,
//! - a bare `name` maps a field to the column of the same name,
//! - `*=*` asks for the remaining fields to be matched automatically
//!   (inferred mapping).

use crate::errors::MappingError;

/// Synthetic column receiving the write TTL of a row.
pub const TTL_COLUMN: &str = "__ttl";
/// Synthetic column receiving the write timestamp of a row.
pub const TIMESTAMP_COLUMN: &str = "__timestamp";

const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingEntry {
    Inferred,
    Field { field: String, column: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Whether `*=*` appears in the mapping.
    pub fn is_inferred(&self) -> bool {
        self.entries.contains(&MappingEntry::Inferred)
    }

    /// Whether some field is mapped to `column`.
    pub fn targets(&self, column: &str) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, MappingEntry::Field { column: c, .. } if c == column))
    }
}

pub fn parse_mapping(raw: &str) -> Result<Mapping, MappingError> {
    let mut entries = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = |reason| MappingError {
            entry: entry.to_string(),
            reason,
        };

        let parsed = match entry.split_once('=') {
            None if entry == WILDCARD => MappingEntry::Inferred,
            None => MappingEntry::Field {
                field: entry.to_string(),
                column: entry.to_string(),
            },
            Some((field, column)) => {
                let (field, column) = (field.trim(), column.trim());
                if column.contains('=') {
                    return Err(invalid("expected a single '='"));
                }
                if field.is_empty() || column.is_empty() {
                    return Err(invalid("field and column must both be named"));
                }
                match (field == WILDCARD, column == WILDCARD) {
                    (true, true) => MappingEntry::Inferred,
                    (false, false) => MappingEntry::Field {
                        field: field.to_string(),
                        column: column.to_string(),
                    },
                    _ => return Err(invalid("a wildcard can only be mapped to a wildcard")),
                }
            }
        };
        entries.push(parsed);
    }

    Ok(Mapping { entries })
}
