// src/settings/mod.rs

//! Settings for the bulk loader and their validation.
//!
//! Responsibilities:
//! - Declare every known setting and its default (`catalog.rs`).
//! - Hold a flat settings map (`model.rs`).
//! - Build a map from `key=value` tokens (`loader.rs`).
//! - Parse `schema.mapping` (`mapping.rs`).
//! - Run the validation pass (`validate.rs`).

pub mod catalog;
pub mod loader;
pub mod mapping;
pub mod model;
pub mod validate;

pub use loader::{apply_assignments, load_from_assignments, parse_assignment};
pub use mapping::{Mapping, MappingEntry, parse_mapping};
pub use model::{Kind, SettingSpec, SettingsMap};
pub use validate::{TypedSettings, validate};
