//! Version-tagged envelope for every persisted record.
//!
//! Records are written as `{"version": 1, "data": ...}`. Two older shapes are
//! still read: the browser-era persistence envelope `{"state": ..., "version": 0}`
//! and bare payloads with no envelope at all.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;
use tracing::warn;

use crate::{Result, StorefrontError};

pub const CURRENT_VERSION: u32 = 1;
const LEGACY_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Versioned<T> {
    pub version: u32,
    pub data: T,
}

pub fn encode<T: Serialize>(data: &T) -> Result<String> {
    let record = Versioned {
        version: CURRENT_VERSION,
        data,
    };
    Ok(serde_json::to_string(&record)?)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let value: Value = serde_json::from_str(raw)?;

    let payload = match value {
        Value::Object(mut object) if object.contains_key("version") => {
            let raw_version = object
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(StorefrontError::MalformedData)?;
            let version = u32::try_from(raw_version).map_err(|_| {
                warn!(version = raw_version, "record version out of range");
                StorefrontError::MalformedData
            })?;
            match (version, object.remove("data"), object.remove("state")) {
                (CURRENT_VERSION, Some(data), _) => data,
                (LEGACY_VERSION, _, Some(state)) => {
                    warn!("reading legacy version 0 record");
                    state
                }
                (CURRENT_VERSION, None, _) | (LEGACY_VERSION, _, None) => {
                    return Err(StorefrontError::MalformedData)
                }
                (other, _, _) => return Err(StorefrontError::UnsupportedVersion(other)),
            }
        }
        bare => bare,
    };

    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_wraps_in_current_version() {
        let raw = encode(&vec!["1", "2"]).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({"version": 1, "data": ["1", "2"]}));
    }

    #[test]
    fn decode_reads_current_legacy_and_bare_records() {
        let current: Vec<String> = decode(r#"{"version":1,"data":["3"]}"#).unwrap();
        assert_eq!(current, vec!["3"]);

        let legacy: Vec<String> = decode(r#"{"state":["4"],"version":0}"#).unwrap();
        assert_eq!(legacy, vec!["4"]);

        let bare: Vec<String> = decode(r#"["5"]"#).unwrap();
        assert_eq!(bare, vec!["5"]);
    }

    #[test]
    fn decode_rejects_future_versions() {
        let err = decode::<Vec<String>>(r#"{"version":7,"data":[]}"#).unwrap_err();
        assert_eq!(err, StorefrontError::UnsupportedVersion(7));
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let err = decode::<Vec<String>>(r#"{"version":1}"#).unwrap_err();
        assert_eq!(err, StorefrontError::MalformedData);

        let err = decode::<Vec<String>>(r#"{"cart":[]}"#).unwrap_err();
        assert_eq!(err, StorefrontError::MalformedData);
    }

    #[test]
    fn decode_rejects_versions_wider_than_u32() {
        // 2^32 + 1 would wrap to the current version if truncated
        let err = decode::<Vec<String>>(r#"{"version":4294967297,"data":["x"]}"#).unwrap_err();
        assert_eq!(err, StorefrontError::MalformedData);
    }
}
