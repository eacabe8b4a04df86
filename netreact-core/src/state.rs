//! Persisted application state
//!
//! The host cache survives process restarts through a small JSON
//! file: `{"items":[{ip, mac, firstTs, lastTs, count}, ...]}`. The
//! file is read back with strict validation before any of it reaches
//! the cache; a state file that fails validation is a startup error.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::types::MacAddr;
use crate::{Error, Result};

/// One persisted host record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateItem {
    pub ip: String,
    pub mac: String,
    #[serde(rename = "firstTs")]
    pub first_ts: i64,
    #[serde(rename = "lastTs")]
    pub last_ts: i64,
    pub count: u64,
}

/// The full persisted state. An empty state serializes to
/// `{"items":[]}`, never to a null list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppState {
    pub items: Vec<StateItem>,
}

impl AppState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse state from JSON bytes. Shape errors (missing or unknown
    /// fields, wrong types) surface here; semantic checks live in
    /// [`AppState::validate`].
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| Error::state(e.to_string()))
    }

    /// Serialize state to JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::state(e.to_string()))
    }

    /// Validate every record: addresses must parse, counts must be
    /// positive, timestamps must be ordered. Returns the first
    /// offending record's problem.
    pub fn validate(&self) -> Result<()> {
        for (i, item) in self.items.iter().enumerate() {
            if item.ip.parse::<Ipv4Addr>().is_err() {
                return Err(Error::state(format!(
                    "item {i}: invalid IP address: {}",
                    item.ip
                )));
            }
            if item.mac.parse::<MacAddr>().is_err() {
                return Err(Error::state(format!(
                    "item {i}: invalid MAC address: {}",
                    item.mac
                )));
            }
            if item.count == 0 {
                return Err(Error::state(format!("item {i}: count must be positive")));
            }
            if item.first_ts < 0 || item.last_ts < 0 {
                return Err(Error::state(format!(
                    "item {i}: timestamps must not be negative"
                )));
            }
            if item.first_ts > item.last_ts {
                return Err(Error::state(format!(
                    "item {i}: firstTs {} is after lastTs {}",
                    item.first_ts, item.last_ts
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> StateItem {
        StateItem {
            ip: "192.168.1.100".to_string(),
            mac: "2c:cf:67:0c:6c:a4".to_string(),
            first_ts: 1700000000000,
            last_ts: 1700000001000,
            count: 3,
        }
    }

    #[test]
    fn test_empty_state_serializes_to_empty_items() {
        let state = AppState::new();
        let json = state.to_json().unwrap();
        assert_eq!(json, br#"{"items":[]}"#);
    }

    #[test]
    fn test_json_round_trip() {
        let state = AppState { items: vec![item()] };
        let json = state.to_json().unwrap();
        let parsed = AppState::from_json(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let state = AppState { items: vec![item()] };
        let json = String::from_utf8(state.to_json().unwrap()).unwrap();
        assert!(json.contains(r#""firstTs":1700000000000"#));
        assert!(json.contains(r#""lastTs":1700000001000"#));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let data = br#"{"items":[],"extra":1}"#;
        assert!(AppState::from_json(data).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let data = br#"{"items":[{"ip":"10.0.0.1","mac":"2c:cf:67:0c:6c:a4","firstTs":1,"lastTs":2}]}"#;
        assert!(AppState::from_json(data).is_err());
    }

    #[test]
    fn test_validate_accepts_good_state() {
        let state = AppState { items: vec![item()] };
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ip() {
        let mut bad = item();
        bad.ip = "999.1.1.1".to_string();
        let state = AppState { items: vec![bad] };
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_mac() {
        let mut bad = item();
        bad.mac = "not-a-mac".to_string();
        let state = AppState { items: vec![bad] };
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let mut bad = item();
        bad.count = 0;
        let state = AppState { items: vec![bad] };
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_timestamps() {
        let mut bad = item();
        bad.first_ts = bad.last_ts + 1;
        let state = AppState { items: vec![bad] };
        assert!(state.validate().is_err());
    }
}
