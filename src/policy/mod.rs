// src/policy/mod.rs

//! Load balancing policy chains.
//!
//! - [`graph`] builds the chain starting at `driver.policy.lbp.name` as an
//!   explicit graph and detects loops before any policy is instantiated.

pub mod graph;

pub use graph::PolicyGraph;
