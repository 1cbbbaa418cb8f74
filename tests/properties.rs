mod common;
use crate::common::SettingsBuilder;

use proptest::prelude::*;

use bulkcheck::coerce::parse_duration;
use bulkcheck::settings::catalog::CATALOG;
use bulkcheck::settings::validate;

const WRAPPERS: &[&str] = &["dse", "whiteList", "tokenAware"];
const LEAVES: &[&str] = &["roundRobin", "dcAwareRoundRobin"];

fn overrides_strategy() -> impl Strategy<Value = Vec<(&'static str, String)>> {
    let keys: Vec<&'static str> = CATALOG.iter().map(|spec| spec.key).collect();
    proptest::collection::vec((prop::sample::select(keys), "\\PC{0,12}"), 0..6)
}

// Distinct wrapping policies in random order, ending in a leaf.
fn acyclic_chain_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    (
        Just(WRAPPERS.to_vec()).prop_shuffle(),
        0..=WRAPPERS.len(),
        prop::sample::select(LEAVES.to_vec()),
    )
        .prop_map(|(wrappers, len, leaf)| {
            let mut chain: Vec<&str> = wrappers.into_iter().take(len).collect();
            chain.push(leaf);
            chain
        })
}

// Distinct wrapping policies followed by one of them again.
fn cyclic_chain_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    (Just(WRAPPERS.to_vec()).prop_shuffle(), 1..=WRAPPERS.len())
        .prop_flat_map(|(wrappers, len)| (Just(wrappers), Just(len), 0..len))
        .prop_map(|(wrappers, len, repeat)| {
            let mut chain: Vec<&str> = wrappers.into_iter().take(len).collect();
            chain.push(chain[repeat]);
            chain
        })
}

proptest! {
    #[test]
    fn validation_is_deterministic(overrides in overrides_strategy()) {
        let mut builder = SettingsBuilder::new();
        for (key, value) in &overrides {
            builder = builder.with(key, value);
        }
        let settings = builder.build();
        let before = settings.clone();

        let first = validate(&settings);
        let second = validate(&settings);

        prop_assert_eq!(&settings, &before);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn acyclic_chains_are_accepted(chain in acyclic_chain_strategy()) {
        let report = SettingsBuilder::new().lbp_chain(&chain).validate();
        prop_assert!(report.is_valid(), "{:?}: {}", chain, report);
    }

    #[test]
    fn cyclic_chains_report_the_visited_sequence(chain in cyclic_chain_strategy()) {
        let report = SettingsBuilder::new().lbp_chain(&chain).validate();
        prop_assert_eq!(report.len(), 1, "{}", report);

        let diagnostic = &report.diagnostics()[0];
        let closing = chain[chain.len() - 2];
        prop_assert_eq!(
            &diagnostic.key,
            &format!("driver.policy.lbp.{closing}.childPolicy")
        );
        prop_assert_eq!(
            &diagnostic.message,
            &format!("Load balancing policy chaining loop detected: {}", chain.join(","))
        );
    }

    #[test]
    fn duration_parsing_never_panics(input in "\\PC{0,24}") {
        let _ = parse_duration(&input);
    }
}
