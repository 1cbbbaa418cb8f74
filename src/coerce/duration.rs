// src/coerce/duration.rs

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::errors::DurationError;

/// One `<number><unit>` term; whitespace is allowed between the two.
static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*([A-Za-z]*)\s*").expect("duration term regex is valid")
});

/// Parse a human-readable duration such as `"12 seconds"`, `"250ms"` or a
/// composite like `"1m30s"`.
///
/// A number without a unit is read as milliseconds. Decimal quantities are
/// accepted (`"1.5h"`).
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(DurationError::NoNumber(input.to_string()));
    }

    let mut total_nanos = 0f64;
    while !rest.is_empty() {
        let caps = TERM
            .captures(rest)
            .ok_or_else(|| DurationError::NoNumber(input.to_string()))?;

        let quantity: f64 = caps[1]
            .parse()
            .map_err(|_| DurationError::NoNumber(input.to_string()))?;
        let unit = &caps[2];
        let per_unit = nanos_per_unit(unit).ok_or_else(|| DurationError::BadUnit {
            unit: unit.to_string(),
        })?;

        total_nanos += quantity * per_unit;
        let consumed = caps.get(0).map_or(rest.len(), |m| m.end());
        rest = &rest[consumed..];
    }

    Duration::try_from_secs_f64(total_nanos / 1e9)
        .map_err(|_| DurationError::OutOfRange(input.to_string()))
}

fn nanos_per_unit(unit: &str) -> Option<f64> {
    let nanos = match unit {
        "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => 1.0,
        "us" | "micro" | "micros" | "microsecond" | "microseconds" => 1e3,
        "" | "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => 1e6,
        "s" | "second" | "seconds" => 1e9,
        "m" | "minute" | "minutes" => 60.0 * 1e9,
        "h" | "hour" | "hours" => 3600.0 * 1e9,
        "d" | "day" | "days" => 86_400.0 * 1e9,
        _ => return None,
    };
    Some(nanos)
}
