// src/policy/graph.rs

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::errors::SettingsError;
use crate::settings::catalog::{LBP_SECTION, child_policy_key, spec_for};
use crate::settings::model::origin_of;
use crate::settings::validate::TypedSettings;
use crate::types::LoadBalancingPolicy;

/// Load balancing policies reachable from a root setting.
///
/// Nodes are distinct policies; an edge `a -> b` means `a` names `b` as its
/// child policy. Construction stops at the first policy seen twice, so the
/// graph is finite no matter how the settings are shaped.
#[derive(Debug, Clone, Default)]
pub struct PolicyGraph {
    graph: DiGraph<LoadBalancingPolicy, ()>,
    index: HashMap<LoadBalancingPolicy, NodeIndex>,
    root: Option<NodeIndex>,
    /// Setting whose value closed a loop, if any.
    loop_key: Option<String>,
}

impl PolicyGraph {
    /// Follow `root_key` and the `childPolicy` settings of wrapping policies.
    ///
    /// An unknown policy name fails immediately with an invalid-enum error
    /// located at the setting that named it. A missing root gives an empty
    /// graph.
    pub fn from_settings(
        settings: &TypedSettings<'_>,
        root_key: &str,
    ) -> Result<Self, SettingsError> {
        let mut graph = Self::default();
        let mut parent: Option<NodeIndex> = None;
        let mut key = root_key.to_string();

        while let Some(name) = settings.str_value(&key) {
            let policy = LoadBalancingPolicy::from_str(name).map_err(|cause| {
                SettingsError::InvalidEnum {
                    origin: origin(&key).to_string(),
                    key: key.clone(),
                    cause,
                }
            })?;

            let seen = graph.index.get(&policy).copied();
            let node = seen.unwrap_or_else(|| graph.add_policy(policy));
            match parent {
                Some(p) => {
                    graph.graph.add_edge(p, node, ());
                }
                None => graph.root = Some(node),
            }

            if seen.is_some() {
                graph.loop_key = Some(key);
                break;
            }
            if !policy.wraps_child() {
                break;
            }
            parent = Some(node);
            key = child_policy_key(policy);
        }

        Ok(graph)
    }

    fn add_policy(&mut self, policy: LoadBalancingPolicy) -> NodeIndex {
        let node = self.graph.add_node(policy);
        self.index.insert(policy, node);
        node
    }

    /// Policies in chain order, starting at the root.
    ///
    /// If the chain loops, the repeated policy appears a second time at the
    /// end.
    pub fn chain(&self) -> Vec<LoadBalancingPolicy> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut chain = Vec::new();
        let mut next = self.root;

        while let Some(node) = next {
            chain.push(self.graph[node]);
            if !visited.insert(node) {
                break;
            }
            next = self.graph.neighbors(node).next();
        }
        chain
    }

    /// Fail with the visited sequence if the chain loops back on itself.
    pub fn check_acyclic(&self) -> Result<(), SettingsError> {
        // A topological sort fails exactly when there is a cycle (self loops included).
        if toposort(&self.graph, None).is_ok() {
            return Ok(());
        }
        Err(SettingsError::ChainCycle {
            key: self.loop_key.clone().unwrap_or_default(),
            chain: self.chain().iter().map(ToString::to_string).collect(),
        })
    }
}

/// `policy.lbp.name` for the root, `<policy>.childPolicy` for children.
fn origin(key: &str) -> &str {
    match spec_for(key) {
        Some(spec) => spec.origin(),
        None => origin_of(key, LBP_SECTION),
    }
}
