#![allow(dead_code)]

pub use bulkcheck_test_utils::builders::SettingsBuilder;
pub use bulkcheck_test_utils::init_tracing;

use bulkcheck::report::{Diagnostic, ValidationReport};

/// Assert the report holds exactly one diagnostic and return it.
pub fn single(report: &ValidationReport) -> &Diagnostic {
    assert_eq!(
        report.len(),
        1,
        "expected exactly one diagnostic, got:\n{report}"
    );
    &report.diagnostics()[0]
}

/// Assert that some diagnostic message contains `needle`.
pub fn assert_mentions(report: &ValidationReport, needle: &str) {
    assert!(
        report.mentions(needle),
        "expected a diagnostic containing {needle:?}, got:\n{report}"
    );
}
