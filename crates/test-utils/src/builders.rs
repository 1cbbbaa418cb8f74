#![allow(dead_code)]

use bulkcheck::report::ValidationReport;
use bulkcheck::settings::{SettingsMap, validate};

/// Builder for `SettingsMap` to simplify test setup.
///
/// Starts from the catalog defaults plus a csv URL and a keyspace/table
/// pair, which together form an accepted configuration.
pub struct SettingsBuilder {
    settings: SettingsMap,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::defaults()
            .with("connector.csv.url", "/path/to/my/file")
            .with("schema.keyspace", "ks")
            .with("schema.table", "t1")
    }

    /// Catalog defaults only; not accepted on its own.
    pub fn defaults() -> Self {
        Self {
            settings: SettingsMap::with_defaults(),
        }
    }

    /// No settings at all, not even defaults.
    pub fn empty() -> Self {
        Self {
            settings: SettingsMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.settings.set(key, value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.settings.remove(key);
        self
    }

    /// Replace keyspace/table with an explicit query.
    pub fn with_query(self, query: &str) -> Self {
        self.without("schema.keyspace")
            .without("schema.table")
            .with("schema.query", query)
    }

    /// Set `driver.policy.lbp.name` and the child of each listed policy.
    ///
    /// `lbp_chain(&["dse", "whiteList", "tokenAware"])` makes `dse` the root,
    /// `whiteList` its child and `tokenAware` the child of `whiteList`.
    pub fn lbp_chain(mut self, chain: &[&str]) -> Self {
        if let Some(root) = chain.first() {
            self.settings.set("driver.policy.lbp.name", *root);
        }
        for pair in chain.windows(2) {
            self.settings
                .set(format!("driver.policy.lbp.{}.childPolicy", pair[0]), pair[1]);
        }
        self
    }

    pub fn build(self) -> SettingsMap {
        self.settings
    }

    pub fn validate(self) -> ValidationReport {
        validate(&self.settings)
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
