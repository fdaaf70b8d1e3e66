//! Serde helper for human-readable durations: "500ms", "10s", "2h", "1h30m".

use serde::{self, Deserialize, Deserializer};
use std::time::Duration;

/// Deserializes a duration string. A missing or null value is zero.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) => parse_duration(&s).map_err(serde::de::Error::custom),
        None => Ok(Duration::ZERO),
    }
}

/// Parses a sequence of `<number><unit>` segments and sums them.
/// A bare number is read as seconds.
pub(crate) fn parse_duration(s: &str) -> Result<Duration, String> {
    let mut rest = s.trim();
    if rest.is_empty() {
        return Ok(Duration::ZERO);
    }

    let mut total = 0.0_f64;

    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (num_str, tail) = rest.split_at(num_end);
        let num: f64 = num_str
            .parse()
            .map_err(|_| format!("invalid duration number: {:?} in {:?}", num_str, s))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);

        let multiplier = match unit.trim() {
            "ms" => 1e-3,
            "s" | "" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            "d" => 86_400.0,
            other => return Err(format!("unknown duration unit: {:?} in {:?}", other, s)),
        };

        total += num * multiplier;
        rest = next;
    }

    Duration::try_from_secs_f64(total).map_err(|e| format!("duration {:?} out of range: {}", s, e))
}
