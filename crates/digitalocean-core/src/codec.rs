//! JSON body codecs and the API's fixed timestamp format.
//!
//! Request bodies and response payloads are JSON; every date the API speaks
//! uses one exact pattern, `YYYY-MM-DDTHH:MM:SSZ` — UTC, one-second
//! granularity, no fractional seconds, no offset other than the literal `Z`.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::type_name;

/// Encode a request body as JSON.
///
/// Output is pretty-printed; that is cosmetic and carries no semantics.
///
/// # Errors
///
/// Returns [`Error::Encode`] with the body's type name when serialization
/// fails.
pub fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(body).map_err(|source| Error::Encode {
        target: type_name::<T>(),
        source,
    })
}

/// Decode a response payload into the expected shape.
///
/// # Errors
///
/// Returns [`Error::Decode`] with the target type name and the underlying
/// parse failure when the bytes do not match.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| Error::Decode {
        target: type_name::<T>(),
        source,
    })
}

/// Serde `with`-module for the API's date representation.
///
/// A value encoded and decoded through this module reproduces an equal
/// instant at one-second granularity. Non-conforming strings — fractional
/// seconds, numeric offsets — are rejected at decode time rather than
/// silently truncated.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Wire pattern for every date field in the API.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    /// Render a date in the fixed wire format.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures only; formatting itself cannot fail.
    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    /// Parse a date in the fixed wire format.
    ///
    /// # Errors
    ///
    /// Fails on any string that does not match the pattern exactly.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn timestamp_round_trips_at_second_granularity() {
        let value = Stamped {
            at: Utc.with_ymd_and_hms(2018, 7, 27, 10, 15, 30).unwrap(),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"at":"2018-07-27T10:15:30Z"}"#);
        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn timestamp_rejects_fractional_seconds() {
        let err = serde_json::from_str::<Stamped>(r#"{"at":"2018-07-27T10:15:30.5Z"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn timestamp_rejects_numeric_offsets() {
        let err = serde_json::from_str::<Stamped>(r#"{"at":"2018-07-27T10:15:30+00:00"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn encode_failure_carries_the_type_name() {
        // A map with non-string keys cannot be represented as JSON.
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1u8], "x");
        let err = encode(&bad).unwrap_err();
        match err {
            Error::Encode { target, .. } => assert!(target.contains("HashMap")),
            other => panic!("expected Encode, got {other:?}"),
        }
    }

    #[test]
    fn decode_failure_carries_the_type_name() {
        let err = decode::<Stamped>(b"{\"at\":42}").unwrap_err();
        match err {
            Error::Decode { target, .. } => assert!(target.ends_with("Stamped")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }
}
