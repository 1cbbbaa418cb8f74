// src/rules/mod.rs

//! Declarative validation rules.
//!
//! A [`RuleSet`] is an ordered table of [`Rule`]s. Field rules (type, enum,
//! duration) are registered first and populate the typed view; dependency
//! and graph rules then read that view. Diagnostics come out in registration
//! order.

pub mod dependency;

use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::errors::SettingsError;
use crate::policy::PolicyGraph;
use crate::report::ValidationReport;
use crate::settings::catalog::{CATALOG, LBP_NAME};
use crate::settings::model::{Kind, SettingSpec, SettingsMap};
use crate::settings::validate::TypedSettings;

pub use dependency::DependencyRule;

/// Follows a policy chain from `root` and rejects unknown names and loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphRule {
    pub name: &'static str,
    pub root: &'static str,
}

impl GraphRule {
    pub fn check(&self, settings: &TypedSettings<'_>) -> Result<(), SettingsError> {
        PolicyGraph::from_settings(settings, self.root)?.check_acyclic()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Coerce a scalar setting (integer, boolean, character, instance, ...).
    Type(&'static SettingSpec),
    Enum(&'static SettingSpec),
    Duration(&'static SettingSpec),
    Dependency(DependencyRule),
    Graph(GraphRule),
}

impl Rule {
    /// Field rule appropriate for the declared kind of `spec`.
    pub fn for_field(spec: &'static SettingSpec) -> Rule {
        match spec.kind {
            Kind::Enum(_) => Rule::Enum(spec),
            Kind::Duration => Rule::Duration(spec),
            _ => Rule::Type(spec),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Type(spec) | Rule::Enum(spec) | Rule::Duration(spec) => spec.key,
            Rule::Dependency(rule) => rule.name,
            Rule::Graph(rule) => rule.name,
        }
    }
}

static STANDARD: LazyLock<RuleSet> = LazyLock::new(|| {
    let mut rules: Vec<Rule> = CATALOG.iter().map(Rule::for_field).collect();
    rules.extend(dependency::STANDARD_RULES.iter().copied().map(Rule::Dependency));
    rules.push(Rule::Graph(GraphRule {
        name: "lbp-chain",
        root: LBP_NAME,
    }));
    RuleSet::new(rules)
});

/// Ordered, immutable collection of rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The process-wide rule set built from the settings catalog.
    pub fn standard() -> &'static RuleSet {
        &STANDARD
    }

    /// Run every rule against `settings`, appending failures to `report`.
    pub fn evaluate_into(&self, settings: &SettingsMap, report: &mut ValidationReport) {
        let mut typed = TypedSettings::new(settings);

        for rule in &self.rules {
            let outcome = match rule {
                Rule::Type(spec) | Rule::Enum(spec) | Rule::Duration(spec) => {
                    typed.coerce_field(spec)
                }
                Rule::Dependency(dep) => {
                    if let Some(input) = dep.inputs.iter().find(|k| typed.has_failed(k)) {
                        trace!(rule = dep.name, input, "skipped: input did not coerce");
                        continue;
                    }
                    dep.check(&typed)
                }
                Rule::Graph(graph) => graph.check(&typed),
            };

            match outcome {
                Ok(()) => trace!(rule = rule.name(), "satisfied"),
                Err(err) => {
                    debug!(rule = rule.name(), key = err.key(), "violated: {err}");
                    report.push(&err);
                }
            }
        }
    }
}
