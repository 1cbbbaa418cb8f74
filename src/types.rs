// src/types.rs

//! Typed setting values and the closed enumerations settings can take.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::errors::UnknownConstant;

/// A named, closed set of legal tokens.
///
/// Matching is exact and case-sensitive so that diagnostics stay predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSpec {
    pub name: &'static str,
    pub constants: &'static [&'static str],
}

impl EnumSpec {
    /// Resolve `value` to the matching constant.
    pub fn resolve(&self, value: &str) -> Result<&'static str, UnknownConstant> {
        self.constants
            .iter()
            .copied()
            .find(|c| *c == value)
            .ok_or_else(|| UnknownConstant {
                enum_name: self.name,
                value: value.to_string(),
                constants: self.constants,
            })
    }
}

/// Implemented by every enumeration declared with [`setting_enum!`].
pub trait SettingEnum: Sized + Copy + 'static {
    const SPEC: EnumSpec;

    fn from_constant(constant: &str) -> Option<Self>;

    fn constant(&self) -> &'static str;
}

/// Declare a Rust enum backed by a fixed list of setting tokens.
macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $class:literal {
            $($variant:ident => $constant:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl SettingEnum for $name {
            const SPEC: EnumSpec = EnumSpec {
                name: $class,
                constants: &[$($constant),+],
            };

            fn from_constant(constant: &str) -> Option<Self> {
                match constant {
                    $($constant => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn constant(&self) -> &'static str {
                match self {
                    $(Self::$variant => $constant),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownConstant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let constant = <$name as SettingEnum>::SPEC.resolve(s)?;
                // resolve() only returns listed constants
                Self::from_constant(constant).ok_or_else(|| UnknownConstant {
                    enum_name: $class,
                    value: s.to_string(),
                    constants: <$name as SettingEnum>::SPEC.constants,
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.constant())
            }
        }
    };
}

/// Verbosity of statement logging (`log.stmt.level`).
pub const STATEMENT_FORMAT_VERBOSITY: EnumSpec = EnumSpec {
    name: "StatementFormatVerbosity",
    constants: &["ABRIDGED", "NORMAL", "EXTENDED"],
};

pub const CONSISTENCY_LEVEL: EnumSpec = EnumSpec {
    name: "ConsistencyLevel",
    constants: &[
        "ANY",
        "ONE",
        "TWO",
        "THREE",
        "QUORUM",
        "ALL",
        "LOCAL_QUORUM",
        "EACH_QUORUM",
        "SERIAL",
        "LOCAL_SERIAL",
        "LOCAL_ONE",
    ],
};

/// How records are grouped into batches (`batch.mode`).
pub const BATCH_MODE: EnumSpec = EnumSpec {
    name: "BatchMode",
    constants: &["PARTITION_KEY", "REPLICA_SET"],
};

/// Units for monitoring rates and durations.
pub const TIME_UNIT: EnumSpec = EnumSpec {
    name: "TimeUnit",
    constants: &[
        "NANOSECONDS",
        "MICROSECONDS",
        "MILLISECONDS",
        "SECONDS",
        "MINUTES",
        "HOURS",
        "DAYS",
    ],
};

pub const SSL_PROVIDER: EnumSpec = EnumSpec {
    name: "SslProvider",
    constants: &["None", "JDK", "OpenSSL"],
};

setting_enum! {
    /// Transport compression (`driver.protocol.compression`).
    Compression as "Compression" {
        None => "NONE",
        Snappy => "SNAPPY",
        Lz4 => "LZ4",
    }
}

setting_enum! {
    /// Built-in load balancing policies that may appear in a policy chain.
    LoadBalancingPolicy as "BuiltinLBP" {
        Dse => "dse",
        DcAwareRoundRobin => "dcAwareRoundRobin",
        RoundRobin => "roundRobin",
        WhiteList => "whiteList",
        TokenAware => "tokenAware",
    }
}

impl LoadBalancingPolicy {
    /// Wrapping policies delegate to a child policy; the others end a chain.
    pub fn wraps_child(&self) -> bool {
        matches!(
            self,
            LoadBalancingPolicy::Dse
                | LoadBalancingPolicy::WhiteList
                | LoadBalancingPolicy::TokenAware
        )
    }
}

/// The coerced form of a setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Integer(i64),
    Boolean(bool),
    Enum {
        class: &'static str,
        constant: &'static str,
    },
    Duration(Duration),
    InstanceRef(&'static str),
    Char(char),
    Charset(&'static str),
    Str(String),
}

impl TypedValue {
    /// String view of textual values (strings, enum constants, instance names).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Str(s) => Some(s),
            TypedValue::Enum { constant, .. } => Some(constant),
            TypedValue::InstanceRef(name) | TypedValue::Charset(name) => Some(name),
            _ => None,
        }
    }
}
