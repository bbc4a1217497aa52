use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated `<number><unit>` terms, e.g.
/// `"1m 30s"` or `"500ms"`. Units: `ms`, `s`, `m`, `h`, `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Duration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, term| {
                let split = term
                    .find(|c: char| !c.is_ascii_digit())
                    .ok_or_else(|| format!("missing unit in {term:?}"))?;
                let (value, unit) = term.split_at(split);
                let value = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid number in {term:?}"))?;
                let millis = match unit {
                    "ms" => 1,
                    "s" => 1000,
                    "m" => 60 * 1000,
                    "h" => 60 * 60 * 1000,
                    "d" => 24 * 60 * 60 * 1000,
                    _ => return Err(format!("unknown unit {unit:?}")),
                };
                value
                    .checked_mul(millis)
                    .map(|ms| total + std::time::Duration::from_millis(ms))
                    .ok_or_else(|| format!("{term:?} is too large"))
            })
            .map(Self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
