// src/settings/catalog.rs

//! Every setting the loader understands, with its kind and default, plus the
//! registries of names that settings may refer to.

use crate::settings::model::{Kind, SettingSpec};
use crate::types::{
    BATCH_MODE, CONSISTENCY_LEVEL, Compression, LoadBalancingPolicy, SSL_PROVIDER,
    STATEMENT_FORMAT_VERBOSITY, SettingEnum, TIME_UNIT,
};

/// A connector that can be selected with `connector.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorDescriptor {
    pub name: &'static str,
    /// Whether `connector.<name>.url` must be set.
    pub requires_url: bool,
}

impl ConnectorDescriptor {
    pub fn url_key(&self) -> String {
        format!("connector.{}.url", self.name)
    }
}

pub const CONNECTORS: &[ConnectorDescriptor] = &[
    ConnectorDescriptor {
        name: "csv",
        requires_url: true,
    },
    ConnectorDescriptor {
        name: "json",
        requires_url: true,
    },
];

pub fn find_connector(name: &str) -> Option<&'static ConnectorDescriptor> {
    CONNECTORS.iter().find(|c| c.name == name)
}

pub const AUTH_PROVIDERS: &[&str] = &[
    "None",
    "PlainTextAuthProvider",
    "DsePlainTextAuthProvider",
    "DseGSSAPIAuthProvider",
];

pub const TIMESTAMP_GENERATORS: &[&str] = &[
    "AtomicMonotonicTimestampGenerator",
    "ThreadLocalMonotonicTimestampGenerator",
    "ServerSideTimestampGenerator",
];

pub const ADDRESS_TRANSLATORS: &[&str] = &["IdentityTranslator", "EC2MultiRegionAddressTranslator"];

pub const CHARSETS: &[&str] = &[
    "UTF-8",
    "US-ASCII",
    "ISO-8859-1",
    "UTF-16",
    "UTF-16BE",
    "UTF-16LE",
];

/// Root of the load balancing policy chain.
pub const LBP_NAME: &str = "driver.policy.lbp.name";
/// Section that per-policy settings (`<policy>.childPolicy`, ...) live in.
pub const LBP_SECTION: &str = "driver.policy.lbp";

/// Key naming the child of a wrapping policy.
pub fn child_policy_key(policy: LoadBalancingPolicy) -> String {
    format!("{LBP_SECTION}.{}.childPolicy", policy.constant())
}

const fn setting(
    key: &'static str,
    section: &'static str,
    kind: Kind,
    default: Option<&'static str>,
) -> SettingSpec {
    SettingSpec {
        key,
        section,
        kind,
        default,
    }
}

pub static CATALOG: &[SettingSpec] = &[
    // log
    setting("log.directory", "log", Kind::Str, Some("./logs")),
    setting("log.maxErrors", "log", Kind::at_least(0), Some("100")),
    setting("log.stmt.level", "log", Kind::Enum(STATEMENT_FORMAT_VERBOSITY), Some("EXTENDED")),
    setting("log.stmt.maxQueryStringLength", "log", Kind::at_least(-1), Some("500")),
    setting("log.stmt.maxBoundValueLength", "log", Kind::at_least(-1), Some("50")),
    setting("log.stmt.maxBoundValues", "log", Kind::at_least(-1), Some("50")),
    setting("log.stmt.maxInnerStatements", "log", Kind::at_least(-1), Some("10")),
    // driver
    setting("driver.hosts", "driver", Kind::Str, Some("127.0.0.1")),
    setting("driver.port", "driver", Kind::between(1, 65535), Some("9042")),
    setting("driver.protocol.compression", "driver", Kind::Enum(Compression::SPEC), Some("NONE")),
    setting("driver.pooling.local.connections", "driver", Kind::at_least(1), Some("4")),
    setting("driver.pooling.remote.connections", "driver", Kind::at_least(1), Some("1")),
    setting("driver.pooling.local.requests", "driver", Kind::at_least(1), Some("32768")),
    setting("driver.pooling.remote.requests", "driver", Kind::at_least(1), Some("1024")),
    setting("driver.pooling.heartbeat", "driver", Kind::Duration, Some("30 seconds")),
    setting("driver.query.consistency", "driver", Kind::Enum(CONSISTENCY_LEVEL), Some("LOCAL_ONE")),
    setting(
        "driver.query.serialConsistency",
        "driver",
        Kind::Enum(CONSISTENCY_LEVEL),
        Some("LOCAL_SERIAL"),
    ),
    setting("driver.query.fetchSize", "driver", Kind::at_least(1), Some("5000")),
    setting("driver.query.idempotence", "driver", Kind::Boolean, Some("true")),
    setting("driver.socket.readTimeout", "driver", Kind::Duration, Some("12 seconds")),
    setting(
        "driver.timestampGenerator",
        "driver",
        Kind::Instance {
            interface: "TimestampGenerator",
            known: TIMESTAMP_GENERATORS,
        },
        Some("AtomicMonotonicTimestampGenerator"),
    ),
    setting(
        "driver.addressTranslator",
        "driver",
        Kind::Instance {
            interface: "AddressTranslator",
            known: ADDRESS_TRANSLATORS,
        },
        Some("IdentityTranslator"),
    ),
    setting("driver.policy.maxRetries", "driver", Kind::at_least(0), Some("10")),
    setting(LBP_NAME, "driver", Kind::Policy, Some("dse")),
    setting("driver.policy.lbp.dse.childPolicy", LBP_SECTION, Kind::Policy, Some("roundRobin")),
    setting(
        "driver.policy.lbp.tokenAware.childPolicy",
        LBP_SECTION,
        Kind::Policy,
        Some("roundRobin"),
    ),
    setting(
        "driver.policy.lbp.tokenAware.shuffleReplicas",
        LBP_SECTION,
        Kind::Boolean,
        Some("true"),
    ),
    setting(
        "driver.policy.lbp.whiteList.childPolicy",
        LBP_SECTION,
        Kind::Policy,
        Some("roundRobin"),
    ),
    setting("driver.policy.lbp.whiteList.hosts", LBP_SECTION, Kind::Str, None),
    setting("driver.policy.lbp.dcAwareRoundRobin.localDc", LBP_SECTION, Kind::Str, None),
    setting(
        "driver.policy.lbp.dcAwareRoundRobin.usedHostsPerRemoteDc",
        LBP_SECTION,
        Kind::at_least(0),
        Some("0"),
    ),
    setting(
        "driver.policy.lbp.dcAwareRoundRobin.allowRemoteDCsForLocalConsistencyLevel",
        LBP_SECTION,
        Kind::Boolean,
        Some("false"),
    ),
    setting("driver.auth.provider", "driver", Kind::Str, Some("None")),
    setting("driver.auth.username", "driver", Kind::Str, None),
    setting("driver.auth.password", "driver", Kind::Str, None),
    setting("driver.auth.principal", "driver", Kind::Str, None),
    setting("driver.auth.authorizationId", "driver", Kind::Str, None),
    setting("driver.auth.keyTab", "driver", Kind::Str, None),
    setting("driver.auth.saslProtocol", "driver", Kind::Str, Some("dse")),
    setting("driver.ssl.provider", "driver", Kind::Enum(SSL_PROVIDER), Some("None")),
    setting("driver.ssl.cipherSuites", "driver", Kind::Str, None),
    setting("driver.ssl.keystore.path", "driver", Kind::Str, None),
    setting("driver.ssl.keystore.password", "driver", Kind::Str, None),
    setting("driver.ssl.truststore.path", "driver", Kind::Str, None),
    setting("driver.ssl.truststore.password", "driver", Kind::Str, None),
    setting("driver.ssl.openssl.keyCertChain", "driver", Kind::Str, None),
    setting("driver.ssl.openssl.privateKey", "driver", Kind::Str, None),
    // connectors
    setting("connector.name", "connector", Kind::Str, Some("csv")),
    setting("connector.csv.url", "connector.csv", Kind::Str, None),
    setting("connector.csv.fileNamePattern", "connector.csv", Kind::Str, Some("**/*.csv")),
    setting("connector.csv.skipLines", "connector.csv", Kind::at_least(0), Some("0")),
    setting("connector.csv.maxLines", "connector.csv", Kind::at_least(-1), Some("-1")),
    setting("connector.csv.recursive", "connector.csv", Kind::Boolean, Some("false")),
    setting("connector.csv.header", "connector.csv", Kind::Boolean, Some("true")),
    setting("connector.csv.encoding", "connector.csv", Kind::Charset, Some("UTF-8")),
    setting("connector.csv.delimiter", "connector.csv", Kind::Char, Some(",")),
    setting("connector.csv.quote", "connector.csv", Kind::Char, Some("\"")),
    setting("connector.csv.escape", "connector.csv", Kind::Char, Some("\\")),
    setting("connector.csv.comment", "connector.csv", Kind::Char, Some("\0")),
    setting("connector.csv.maxConcurrentFiles", "connector.csv", Kind::at_least(1), Some("4")),
    setting("connector.json.url", "connector.json", Kind::Str, None),
    setting("connector.json.fileNamePattern", "connector.json", Kind::Str, Some("**/*.json")),
    setting("connector.json.skipRecords", "connector.json", Kind::at_least(0), Some("0")),
    setting("connector.json.maxRecords", "connector.json", Kind::at_least(-1), Some("-1")),
    setting("connector.json.recursive", "connector.json", Kind::Boolean, Some("false")),
    setting("connector.json.encoding", "connector.json", Kind::Charset, Some("UTF-8")),
    setting("connector.json.maxConcurrentFiles", "connector.json", Kind::at_least(1), Some("4")),
    // schema
    setting("schema.keyspace", "schema", Kind::Str, None),
    setting("schema.table", "schema", Kind::Str, None),
    setting("schema.query", "schema", Kind::Str, None),
    setting("schema.mapping", "schema", Kind::Str, None),
    setting("schema.queryTtl", "schema", Kind::at_least(0), None),
    setting("schema.queryTimestamp", "schema", Kind::Str, None),
    setting("schema.nullToUnset", "schema", Kind::Boolean, Some("true")),
    // batch
    setting("batch.mode", "batch", Kind::Enum(BATCH_MODE), Some("PARTITION_KEY")),
    setting("batch.maxBatchSize", "batch", Kind::at_least(1), Some("32")),
    setting("batch.bufferSize", "batch", Kind::at_least(1), Some("128")),
    // executor
    setting("executor.maxPerSecond", "executor", Kind::INTEGER, Some("-1")),
    setting("executor.maxInFlight", "executor", Kind::at_least(1), Some("1024")),
    // monitoring
    setting("monitoring.reportRate", "monitoring", Kind::Duration, Some("5 seconds")),
    setting("monitoring.rateUnit", "monitoring", Kind::Enum(TIME_UNIT), Some("SECONDS")),
    setting("monitoring.durationUnit", "monitoring", Kind::Enum(TIME_UNIT), Some("MILLISECONDS")),
    setting("monitoring.expectedWrites", "monitoring", Kind::INTEGER, Some("-1")),
    setting("monitoring.expectedReads", "monitoring", Kind::INTEGER, Some("-1")),
    setting("monitoring.jmx", "monitoring", Kind::Boolean, Some("true")),
];

/// Look up the declaration of `key`.
pub fn spec_for(key: &str) -> Option<&'static SettingSpec> {
    CATALOG.iter().find(|spec| spec.key == key)
}

/// Catalog keys whose declared kind matches `pred`.
pub fn keys_where(pred: impl Fn(&Kind) -> bool) -> impl Iterator<Item = &'static str> {
    CATALOG.iter().filter(move |s| pred(&s.kind)).map(|s| s.key)
}
