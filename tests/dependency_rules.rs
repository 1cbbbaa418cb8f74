mod common;
use crate::common::{SettingsBuilder, assert_mentions, init_tracing, single};

use bulkcheck::errors::MappingError;
use bulkcheck::report::DiagnosticKind;
use bulkcheck::settings::{MappingEntry, parse_mapping};

const QUERY: &str = "INSERT INTO ks.t1 (c1, c2) VALUES (:c1, :c2)";

#[test]
fn base_configuration_is_accepted() {
    init_tracing();

    let report = SettingsBuilder::new().validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn hosts_are_mandatory() {
    let report = SettingsBuilder::new().with("driver.hosts", "").validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "driver.hosts");
    assert_eq!(diagnostic.kind, DiagnosticKind::DependencyViolation);
    assert_eq!(
        diagnostic.message,
        "driver.hosts is mandatory. Please set driver.hosts and try again. \
         See settings.md or help for more information."
    );
}

#[test]
fn connector_url_is_mandatory() {
    let expected = "url is mandatory when using the csv connector. Please set connector.csv.url \
                    and try again. See settings.md or help for more information.";

    let report = SettingsBuilder::new().with("connector.csv.url", "").validate();
    assert_eq!(single(&report).message, expected);

    let report = SettingsBuilder::new().without("connector.csv.url").validate();
    assert_eq!(single(&report).key, "connector.csv.url");
}

#[test]
fn json_connector_wants_its_own_url() {
    let report = SettingsBuilder::new()
        .with("connector.name", "json")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "connector.json.url");
    assert!(diagnostic.message.starts_with("url is mandatory when using the json connector"));

    let report = SettingsBuilder::new()
        .with("connector.name", "json")
        .with("connector.json.url", "/data/in.json")
        .validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn unknown_connector_lists_available_ones() {
    let report = SettingsBuilder::new()
        .with("connector.name", "BadConnector")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownConnector);
    assert_eq!(
        diagnostic.message,
        "Cannot find connector 'BadConnector'. Available connectors are: csv, json"
    );
}

#[test]
fn connector_name_is_mandatory() {
    for blank in ["", "  "] {
        let report = SettingsBuilder::new()
            .with("connector.name", blank)
            .validate();
        let diagnostic = single(&report);
        assert_eq!(diagnostic.key, "connector.name");
        assert_eq!(diagnostic.kind, DiagnosticKind::DependencyViolation);
        assert_eq!(
            diagnostic.message,
            "connector.name is mandatory. Please set connector.name and try again. \
             See settings.md or help for more information."
        );
    }
}

#[test]
fn unknown_auth_provider() {
    let report = SettingsBuilder::new()
        .with("driver.auth.provider", "InvalidAuthProvider")
        .validate();
    assert_eq!(
        single(&report).message,
        "InvalidAuthProvider is not a valid auth provider. Valid auth providers are \
         PlainTextAuthProvider, DsePlainTextAuthProvider, or DseGSSAPIAuthProvider"
    );
}

#[test]
fn gssapi_requires_a_principal() {
    let report = SettingsBuilder::new()
        .with("driver.auth.provider", "DseGSSAPIAuthProvider")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "driver.auth.principal");
    assert_eq!(
        diagnostic.message,
        "DseGSSAPIAuthProvider must be provided with auth.principal. \
         auth.keyTab and auth.saslProtocol are optional."
    );

    let report = SettingsBuilder::new()
        .with("driver.auth.provider", "DseGSSAPIAuthProvider")
        .with("driver.auth.principal", "alice@DATASTAX.COM")
        .validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn plaintext_providers_require_both_credentials() {
    for provider in ["PlainTextAuthProvider", "DsePlainTextAuthProvider"] {
        let message =
            format!("{provider} must be provided with both auth.username and auth.password");

        let report = SettingsBuilder::new()
            .with("driver.auth.provider", provider)
            .validate();
        let diagnostic = single(&report);
        assert_eq!(diagnostic.key, "driver.auth.username");
        assert_eq!(diagnostic.message, message);

        let report = SettingsBuilder::new()
            .with("driver.auth.provider", provider)
            .with("driver.auth.username", "alice")
            .validate();
        let diagnostic = single(&report);
        assert_eq!(diagnostic.key, "driver.auth.password");
        assert_eq!(diagnostic.message, message);

        let report = SettingsBuilder::new()
            .with("driver.auth.provider", provider)
            .with("driver.auth.username", "alice")
            .with("driver.auth.password", "s3cr3t")
            .validate();
        assert!(report.is_valid(), "{report}");
    }
}

#[test]
fn a_write_target_is_required() {
    let report = SettingsBuilder::defaults()
        .with("connector.csv.url", "/path/to/my/file")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "schema.keyspace");
    assert_eq!(
        diagnostic.message,
        "schema.mapping, or schema.keyspace and schema.table must be defined"
    );

    let report = SettingsBuilder::defaults()
        .with("connector.csv.url", "/path/to/my/file")
        .with("schema.mapping", "c1=c2")
        .validate();
    assert_eq!(
        single(&report).message,
        "schema.query, or schema.keyspace and schema.table must be defined"
    );
}

#[test]
fn query_with_explicit_mapping_is_accepted() {
    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.mapping", "c1=c2")
        .validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn keyspace_and_table_come_in_pairs() {
    let report = SettingsBuilder::new().without("schema.keyspace").validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "schema.keyspace");
    assert_eq!(
        diagnostic.message,
        "schema.keyspace must accompany schema.table in the configuration"
    );

    let report = SettingsBuilder::new().without("schema.table").validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "schema.table");
    assert_eq!(
        diagnostic.message,
        "schema.table must accompany schema.keyspace in the configuration"
    );
}

#[test]
fn query_excludes_ttl_and_timestamp() {
    let expected =
        "schema.query must not be defined if schema.queryTtl or schema.queryTimestamp is defined";

    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.queryTtl", "30")
        .validate();
    assert_eq!(single(&report).message, expected);

    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.queryTimestamp", "9876123")
        .validate();
    assert_eq!(single(&report).message, expected);
}

#[test]
fn query_excludes_mapped_ttl_and_timestamp_columns() {
    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.mapping", "f1=__ttl")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "schema.query");
    assert_eq!(
        diagnostic.message,
        "schema.query must not be defined when mapping a field to query-ttl"
    );

    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.mapping", "f1=c1, f2=__timestamp")
        .validate();
    assert_eq!(
        single(&report).message,
        "schema.query must not be defined when mapping a field to query-timestamp"
    );
}

#[test]
fn query_timestamp_formats() {
    let report = SettingsBuilder::new()
        .with("schema.queryTimestamp", "junk")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "schema.queryTimestamp");
    assert_eq!(
        diagnostic.message,
        "Could not parse schema.queryTimestamp 'junk'; accepted formats are ISO-8601 \
         (e.g. 2017-11-23T14:32:11Z) or microseconds since the epoch"
    );

    let accepted = [
        "2017-11-23T14:32:11Z",
        "2017-11-23T14:32:11.5+02:00",
        "2017-11-23T14:32:11",
        "2017-11-23T14:32:11.250",
        "2017-11-23",
        "1511447531000000",
    ];
    for ok in accepted {
        let report = SettingsBuilder::new()
            .with("schema.queryTimestamp", ok)
            .validate();
        assert!(report.is_valid(), "{ok}: {report}");
    }

    for bad in ["2017-11-23T25:00:00", "23/11/2017", "2017-11-23 14:32"] {
        let report = SettingsBuilder::new()
            .with("schema.queryTimestamp", bad)
            .validate();
        assert_eq!(single(&report).key, "schema.queryTimestamp", "{bad:?}");
    }
}

#[test]
fn inferred_mapping_needs_keyspace_and_table() {
    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.mapping", "*=*, c1=c2")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "schema.mapping");
    assert_eq!(
        diagnostic.message,
        "schema.keyspace and schema.table must be defined when using inferred mapping"
    );

    let report = SettingsBuilder::new()
        .with("schema.mapping", "*=*, c1=c2")
        .validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn malformed_mapping_is_reported() {
    let cases = [
        ("a=b=c", "Invalid schema.mapping entry 'a=b=c': expected a single '='"),
        ("f1=c1, =c2", "Invalid schema.mapping entry '=c2': field and column must both be named"),
        (
            "*=c1",
            "Invalid schema.mapping entry '*=c1': a wildcard can only be mapped to a wildcard",
        ),
    ];
    for (mapping, expected) in cases {
        let report = SettingsBuilder::new()
            .with("schema.mapping", mapping)
            .validate();
        let diagnostic = single(&report);
        assert_eq!(diagnostic.key, "schema.mapping");
        assert_eq!(diagnostic.message, expected);
    }
}

#[test]
fn mapping_entries() {
    let mapping = parse_mapping(" *=*, f1 = c1, c2 ,").unwrap();
    assert!(mapping.is_inferred());
    assert!(mapping.targets("c1"));
    assert!(mapping.targets("c2"));
    assert!(!mapping.targets("f1"));
    assert_eq!(
        mapping.entries()[2],
        MappingEntry::Field {
            field: "c2".to_string(),
            column: "c2".to_string()
        }
    );

    assert_eq!(
        parse_mapping("a=*"),
        Err(MappingError {
            entry: "a=*".to_string(),
            reason: "a wildcard can only be mapped to a wildcard",
        })
    );
}

#[test]
fn ssl_material_comes_in_pairs() {
    let report = SettingsBuilder::new()
        .with("driver.ssl.keystore.path", "/etc/keystore.jks")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.key, "driver.ssl.keystore.password");
    assert_eq!(
        diagnostic.message,
        "driver.ssl.keystore.path and driver.ssl.keystore.password must be provided together"
    );

    let report = SettingsBuilder::new()
        .with("driver.ssl.truststore.password", "changeit")
        .validate();
    assert_eq!(single(&report).key, "driver.ssl.truststore.path");

    let report = SettingsBuilder::new()
        .with("driver.ssl.openssl.privateKey", "/etc/key.pem")
        .validate();
    assert_eq!(single(&report).key, "driver.ssl.openssl.keyCertChain");

    let report = SettingsBuilder::new()
        .with("driver.ssl.provider", "JDK")
        .with("driver.ssl.keystore.path", "/etc/keystore.jks")
        .with("driver.ssl.keystore.password", "changeit")
        .validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn blank_strings_count_as_unset() {
    let report = SettingsBuilder::new().with("schema.query", "   ").validate();
    assert!(report.is_valid(), "{report}");
}

#[test]
fn every_problem_is_reported_in_rule_order() {
    let report = SettingsBuilder::new()
        .with("driver.hosts", "")
        .with("driver.port", "notANumber")
        .with("connector.name", "BadConnector")
        .validate();

    let keys: Vec<&str> = report.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, ["driver.port", "connector.name", "driver.hosts"]);
    assert_mentions(&report, "driver.port has type STRING rather than NUMBER");
    assert_mentions(&report, "Cannot find connector 'BadConnector'");
    assert_mentions(&report, "driver.hosts is mandatory");
}

#[test]
fn rules_reading_a_broken_setting_are_skipped() {
    let report = SettingsBuilder::new()
        .with_query(QUERY)
        .with("schema.queryTtl", "abc")
        .validate();
    let diagnostic = single(&report);
    assert_eq!(diagnostic.kind, DiagnosticKind::TypeMismatch);
    assert_eq!(diagnostic.key, "schema.queryTtl");
}
