mod common;
use crate::common::{SettingsBuilder, init_tracing, single};

use bulkcheck::report::DiagnosticKind;

#[test]
fn default_chain_is_accepted() {
    init_tracing();

    let report = SettingsBuilder::new().validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn self_loop_is_detected() {
    let report = SettingsBuilder::new().lbp_chain(&["dse", "dse"]).validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.kind, DiagnosticKind::ChainCycle);
    assert_eq!(diagnostic.key, "driver.policy.lbp.dse.childPolicy");
    assert_eq!(
        diagnostic.message,
        "Load balancing policy chaining loop detected: dse,dse"
    );
}

#[test]
fn indirect_loop_is_detected() {
    let report = SettingsBuilder::new()
        .lbp_chain(&["dse", "whiteList", "tokenAware", "whiteList"])
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "driver.policy.lbp.tokenAware.childPolicy");
    assert_eq!(
        diagnostic.message,
        "Load balancing policy chaining loop detected: dse,whiteList,tokenAware,whiteList"
    );
}

#[test]
fn acyclic_chains_are_accepted() {
    let chains: &[&[&str]] = &[
        &["roundRobin"],
        &["dcAwareRoundRobin"],
        &["tokenAware", "dcAwareRoundRobin"],
        &["dse", "whiteList", "tokenAware", "roundRobin"],
        &["whiteList", "dse", "tokenAware", "dcAwareRoundRobin"],
    ];
    for chain in chains {
        let report = SettingsBuilder::new().lbp_chain(chain).validate();
        assert!(report.is_valid(), "{chain:?}: {report}");
    }
}

#[test]
fn unknown_root_policy() {
    let report = SettingsBuilder::new()
        .with("driver.policy.lbp.name", "badValue")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.kind, DiagnosticKind::InvalidEnum);
    assert_eq!(diagnostic.key, "driver.policy.lbp.name");
    assert_eq!(
        diagnostic.message,
        "Invalid value at 'policy.lbp.name': The enum class BuiltinLBP has no constant of the \
         name 'badValue' (should be one of \
         [dse, dcAwareRoundRobin, roundRobin, whiteList, tokenAware])"
    );
}

#[test]
fn unknown_child_policy() {
    let report = SettingsBuilder::new()
        .with("driver.policy.lbp.dse.childPolicy", "badValue")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "driver.policy.lbp.dse.childPolicy");
    assert!(
        diagnostic
            .message
            .starts_with("Invalid value at 'dse.childPolicy': The enum class BuiltinLBP"),
        "{}",
        diagnostic.message
    );
}

#[test]
fn unreachable_child_policies_are_not_inspected() {
    let report = SettingsBuilder::new()
        .with("driver.policy.lbp.name", "roundRobin")
        .with("driver.policy.lbp.dse.childPolicy", "dse")
        .with("driver.policy.lbp.whiteList.childPolicy", "badValue")
        .validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn leaf_policies_have_no_child_setting() {
    let report = SettingsBuilder::new()
        .with("driver.policy.lbp.roundRobin.childPolicy", "dse")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownSetting);
    assert_eq!(
        diagnostic.message,
        "Unknown setting 'driver.policy.lbp.roundRobin.childPolicy'. \
         See settings.md or help for the list of valid settings."
    );
}
