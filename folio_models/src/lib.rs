use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod auth;
pub mod contact;
pub mod inbox;
mod macros;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expected 64 hexadecimal digits.")]
pub struct InvalidSha256HashError;

impl FromStr for Sha256Hash {
    type Err = InvalidSha256HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.trim())
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .map(Self)
            .ok_or(InvalidSha256HashError)
    }
}

impl<'de> Deserialize<'de> for Sha256Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256hash_from_str() {
        let hex = "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

        let hash = hex.parse::<Sha256Hash>().unwrap();

        assert_eq!(hash.to_string(), hex);
        assert_eq!("abc".parse::<Sha256Hash>(), Err(InvalidSha256HashError));
        assert_eq!("zz".repeat(32).parse::<Sha256Hash>(), Err(InvalidSha256HashError));
        assert_eq!(
            serde_json::from_value::<Sha256Hash>(serde_json::json!(hex)).unwrap(),
            hash
        );
    }
}
