// src/rules/dependency.rs

//! Cross-field rules between related settings.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::errors::SettingsError;
use crate::settings::catalog::{AUTH_PROVIDERS, CONNECTORS, find_connector};
use crate::settings::mapping::{Mapping, TIMESTAMP_COLUMN, TTL_COLUMN, parse_mapping};
use crate::settings::validate::TypedSettings;

const CONNECTOR_NAME: &str = "connector.name";
const HOSTS: &str = "driver.hosts";
const AUTH_PROVIDER: &str = "driver.auth.provider";
const AUTH_USERNAME: &str = "driver.auth.username";
const AUTH_PASSWORD: &str = "driver.auth.password";
const AUTH_PRINCIPAL: &str = "driver.auth.principal";
const KEYSPACE: &str = "schema.keyspace";
const TABLE: &str = "schema.table";
const QUERY: &str = "schema.query";
const MAPPING: &str = "schema.mapping";
const QUERY_TTL: &str = "schema.queryTtl";
const QUERY_TIMESTAMP: &str = "schema.queryTimestamp";

const PLAINTEXT_PROVIDERS: &[&str] = &["PlainTextAuthProvider", "DsePlainTextAuthProvider"];
const GSSAPI_PROVIDER: &str = "DseGSSAPIAuthProvider";

const SEE_DOCS: &str = "See settings.md or help for more information.";

type Check = fn(&TypedSettings<'_>) -> Result<(), SettingsError>;

/// A named predicate over the typed settings.
///
/// `inputs` lists the settings the rule reads; the rule is skipped when one
/// of them failed to coerce, since that failure is already reported.
#[derive(Clone, Copy)]
pub struct DependencyRule {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    check: Check,
}

impl DependencyRule {
    pub const fn new(name: &'static str, inputs: &'static [&'static str], check: Check) -> Self {
        Self { name, inputs, check }
    }

    pub fn check(&self, settings: &TypedSettings<'_>) -> Result<(), SettingsError> {
        (self.check)(settings)
    }
}

impl fmt::Debug for DependencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRule")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

/// Registration order is the order diagnostics are reported in.
pub static STANDARD_RULES: &[DependencyRule] = &[
    DependencyRule::new("connector-exists", &[CONNECTOR_NAME], connector_exists),
    DependencyRule::new("hosts-mandatory", &[HOSTS], hosts_mandatory),
    DependencyRule::new(
        "connector-url-mandatory",
        &[CONNECTOR_NAME, "connector.csv.url", "connector.json.url"],
        connector_url_mandatory,
    ),
    DependencyRule::new("auth-provider-known", &[AUTH_PROVIDER], auth_provider_known),
    DependencyRule::new(
        "auth-gssapi-principal",
        &[AUTH_PROVIDER, AUTH_PRINCIPAL],
        gssapi_principal,
    ),
    DependencyRule::new(
        "auth-plaintext-credentials",
        &[AUTH_PROVIDER, AUTH_USERNAME, AUTH_PASSWORD],
        plaintext_credentials,
    ),
    DependencyRule::new("schema-mapping-syntax", &[MAPPING], mapping_syntax),
    DependencyRule::new("schema-target", &[QUERY, KEYSPACE, TABLE, MAPPING], schema_target),
    DependencyRule::new(
        "schema-query-ttl-timestamp",
        &[QUERY, QUERY_TTL, QUERY_TIMESTAMP],
        query_excludes_ttl_and_timestamp,
    ),
    DependencyRule::new("schema-query-mapped-ttl", &[QUERY, MAPPING], query_excludes_mapped_ttl),
    DependencyRule::new(
        "schema-query-mapped-timestamp",
        &[QUERY, MAPPING],
        query_excludes_mapped_timestamp,
    ),
    DependencyRule::new(
        "schema-query-timestamp-format",
        &[QUERY_TIMESTAMP],
        query_timestamp_parses,
    ),
    DependencyRule::new(
        "schema-keyspace-table-pairing",
        &[KEYSPACE, TABLE],
        keyspace_table_pairing,
    ),
    DependencyRule::new(
        "schema-inferred-mapping-target",
        &[KEYSPACE, TABLE, MAPPING],
        inferred_mapping_target,
    ),
    DependencyRule::new(
        "ssl-openssl-key-pair",
        &["driver.ssl.openssl.keyCertChain", "driver.ssl.openssl.privateKey"],
        openssl_key_pair,
    ),
    DependencyRule::new(
        "ssl-keystore-pair",
        &["driver.ssl.keystore.path", "driver.ssl.keystore.password"],
        keystore_pair,
    ),
    DependencyRule::new(
        "ssl-truststore-pair",
        &["driver.ssl.truststore.path", "driver.ssl.truststore.password"],
        truststore_pair,
    ),
];

fn connector_exists(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    let Some(name) = s.text(CONNECTOR_NAME) else {
        return Err(SettingsError::dependency(
            CONNECTOR_NAME,
            format!(
                "{CONNECTOR_NAME} is mandatory. Please set {CONNECTOR_NAME} and try again. \
                 {SEE_DOCS}"
            ),
        ));
    };
    if find_connector(name).is_some() {
        return Ok(());
    }
    Err(SettingsError::UnknownConnector {
        key: CONNECTOR_NAME.to_string(),
        name: name.to_string(),
        available: CONNECTORS.iter().map(|c| c.name).collect(),
    })
}

fn hosts_mandatory(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    if s.text(HOSTS).is_some() {
        return Ok(());
    }
    Err(SettingsError::dependency(
        HOSTS,
        format!("{HOSTS} is mandatory. Please set {HOSTS} and try again. {SEE_DOCS}"),
    ))
}

fn connector_url_mandatory(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    let Some(connector) = s.text(CONNECTOR_NAME).and_then(find_connector) else {
        // unknown connectors are reported by connector-exists
        return Ok(());
    };
    let url_key = connector.url_key();
    if !connector.requires_url || s.text(&url_key).is_some() {
        return Ok(());
    }
    Err(SettingsError::dependency(
        url_key.as_str(),
        format!(
            "url is mandatory when using the {name} connector. \
             Please set {url_key} and try again. {SEE_DOCS}",
            name = connector.name
        ),
    ))
}

fn auth_provider<'s>(s: &'s TypedSettings<'_>) -> &'s str {
    s.text(AUTH_PROVIDER).unwrap_or("None")
}

fn auth_provider_known(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    let provider = auth_provider(s);
    if AUTH_PROVIDERS.contains(&provider) {
        return Ok(());
    }
    Err(SettingsError::dependency(
        AUTH_PROVIDER,
        format!(
            "{provider} is not a valid auth provider. Valid auth providers are \
             PlainTextAuthProvider, DsePlainTextAuthProvider, or DseGSSAPIAuthProvider"
        ),
    ))
}

fn gssapi_principal(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    if auth_provider(s) != GSSAPI_PROVIDER || s.text(AUTH_PRINCIPAL).is_some() {
        return Ok(());
    }
    Err(SettingsError::dependency(
        AUTH_PRINCIPAL,
        format!(
            "{GSSAPI_PROVIDER} must be provided with auth.principal. \
             auth.keyTab and auth.saslProtocol are optional."
        ),
    ))
}

fn plaintext_credentials(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    let provider = auth_provider(s);
    if !PLAINTEXT_PROVIDERS.contains(&provider) {
        return Ok(());
    }
    match [AUTH_USERNAME, AUTH_PASSWORD]
        .into_iter()
        .find(|key| s.text(key).is_none())
    {
        None => Ok(()),
        Some(missing) => Err(SettingsError::dependency(
            missing,
            format!("{provider} must be provided with both auth.username and auth.password"),
        )),
    }
}

/// Parsed `schema.mapping`, if set and well-formed.
///
/// Malformed mappings are reported by [`mapping_syntax`]; rules that look
/// into the mapping treat them as absent.
fn mapping(s: &TypedSettings<'_>) -> Option<Mapping> {
    s.text(MAPPING).and_then(|raw| parse_mapping(raw).ok())
}

fn mapping_syntax(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    match s.text(MAPPING) {
        Some(raw) => parse_mapping(raw)
            .map(|_| ())
            .map_err(|e| SettingsError::dependency(MAPPING, e.to_string())),
        None => Ok(()),
    }
}

fn schema_target(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    // A lone keyspace or table is reported by the pairing rule.
    if s.is_set(QUERY) || s.is_set(KEYSPACE) || s.is_set(TABLE) {
        return Ok(());
    }
    let message = if s.is_set(MAPPING) {
        "schema.query, or schema.keyspace and schema.table must be defined"
    } else {
        "schema.mapping, or schema.keyspace and schema.table must be defined"
    };
    Err(SettingsError::dependency(KEYSPACE, message))
}

fn query_excludes_ttl_and_timestamp(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    if s.is_set(QUERY) && (s.is_set(QUERY_TTL) || s.is_set(QUERY_TIMESTAMP)) {
        return Err(SettingsError::dependency(
            QUERY,
            "schema.query must not be defined if schema.queryTtl \
             or schema.queryTimestamp is defined",
        ));
    }
    Ok(())
}

fn query_excludes_mapped_ttl(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    query_excludes_mapped_column(s, TTL_COLUMN, "query-ttl")
}

fn query_excludes_mapped_timestamp(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    query_excludes_mapped_column(s, TIMESTAMP_COLUMN, "query-timestamp")
}

fn query_excludes_mapped_column(
    s: &TypedSettings<'_>,
    column: &str,
    label: &str,
) -> Result<(), SettingsError> {
    if !s.is_set(QUERY) || !mapping(s).is_some_and(|m| m.targets(column)) {
        return Ok(());
    }
    Err(SettingsError::dependency(
        QUERY,
        format!("schema.query must not be defined when mapping a field to {label}"),
    ))
}

/// Accepts ISO-8601 timestamps or an integer count of microseconds since the epoch.
fn query_timestamp_parses(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    let Some(value) = s.text(QUERY_TIMESTAMP) else {
        return Ok(());
    };
    if is_iso_timestamp(value) || value.parse::<i64>().is_ok() {
        return Ok(());
    }
    Err(SettingsError::dependency(
        QUERY_TIMESTAMP,
        format!(
            "Could not parse {QUERY_TIMESTAMP} '{value}'; accepted formats are ISO-8601 \
             (e.g. 2017-11-23T14:32:11Z) or microseconds since the epoch"
        ),
    ))
}

/// RFC 3339, or a local date-time or plain date read as UTC.
fn is_iso_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn keyspace_table_pairing(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    match (s.is_set(KEYSPACE), s.is_set(TABLE)) {
        (false, true) => Err(SettingsError::dependency(
            KEYSPACE,
            "schema.keyspace must accompany schema.table in the configuration",
        )),
        (true, false) => Err(SettingsError::dependency(
            TABLE,
            "schema.table must accompany schema.keyspace in the configuration",
        )),
        _ => Ok(()),
    }
}

fn inferred_mapping_target(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    let inferred = mapping(s).is_some_and(|m| m.is_inferred());
    if !inferred || (s.is_set(KEYSPACE) && s.is_set(TABLE)) {
        return Ok(());
    }
    Err(SettingsError::dependency(
        MAPPING,
        "schema.keyspace and schema.table must be defined when using inferred mapping",
    ))
}

fn openssl_key_pair(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    provided_together(s, "driver.ssl.openssl.keyCertChain", "driver.ssl.openssl.privateKey")
}

fn keystore_pair(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    provided_together(s, "driver.ssl.keystore.path", "driver.ssl.keystore.password")
}

fn truststore_pair(s: &TypedSettings<'_>) -> Result<(), SettingsError> {
    provided_together(s, "driver.ssl.truststore.path", "driver.ssl.truststore.password")
}

/// Both or neither of `a` and `b` must be set; the missing one is blamed.
fn provided_together(s: &TypedSettings<'_>, a: &str, b: &str) -> Result<(), SettingsError> {
    let missing = match (s.is_set(a), s.is_set(b)) {
        (true, false) => b,
        (false, true) => a,
        _ => return Ok(()),
    };
    Err(SettingsError::dependency(
        missing,
        format!("{a} and {b} must be provided together"),
    ))
}
