//! Notification shape
//!
//! The externally visible alert record, one JSON object per file.
//! Packet-level notifications carry `firstTs` and `count`;
//! host-level ones omit them by construction (on a first sighting
//! `firstTs` would equal `ts` anyway). Empty `otherIps`/`otherMacs`
//! lists are omitted rather than serialized as `[]`.

use serde::{Deserialize, Serialize};

use netreact_core::ExtendedArpEvent;

use crate::event_type::EventType;

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

/// Alert record serialized into a notification file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "eventType")]
    pub event_type: String,
    pub ip: String,
    pub mac: String,
    #[serde(rename = "firstTs", default, skip_serializing_if = "is_zero_i64")]
    pub first_ts: i64,
    pub ts: i64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub count: u64,
    #[serde(rename = "macVendor")]
    pub mac_vendor: String,
    #[serde(rename = "expectedCidrRange")]
    pub expected_cidr_range: String,
    #[serde(rename = "otherIps", default, skip_serializing_if = "Vec::is_empty")]
    pub other_ips: Vec<String>,
    #[serde(rename = "otherMacs", default, skip_serializing_if = "Vec::is_empty")]
    pub other_macs: Vec<String>,
}

impl Notification {
    /// Packet-level notification: includes first-seen timestamp and
    /// observation count.
    pub fn packet(
        ext: &ExtendedArpEvent,
        event_type: EventType,
        expected_cidr_range: String,
        other_ips: Vec<String>,
        other_macs: Vec<String>,
    ) -> Self {
        Notification {
            event_type: event_type.label().to_string(),
            ip: ext.ip().to_string(),
            mac: ext.mac().to_string(),
            first_ts: ext.first_ts,
            ts: ext.ts(),
            count: ext.count,
            mac_vendor: ext.mac_vendor.clone(),
            expected_cidr_range,
            other_ips,
            other_macs,
        }
    }

    /// Host-level notification: no first-seen timestamp, no count
    pub fn host(
        ext: &ExtendedArpEvent,
        event_type: EventType,
        expected_cidr_range: String,
        other_ips: Vec<String>,
        other_macs: Vec<String>,
    ) -> Self {
        Notification {
            event_type: event_type.label().to_string(),
            ip: ext.ip().to_string(),
            mac: ext.mac().to_string(),
            first_ts: 0,
            ts: ext.ts(),
            count: 0,
            mac_vendor: ext.mac_vendor.clone(),
            expected_cidr_range,
            other_ips,
            other_macs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netreact_core::{ArpEvent, MacAddr};
    use std::net::Ipv4Addr;

    fn ext_event() -> ExtendedArpEvent {
        ExtendedArpEvent {
            event: ArpEvent {
                ip: Ipv4Addr::new(192, 168, 1, 100),
                mac: MacAddr::new([0x2c, 0xcf, 0x67, 0x0c, 0x6c, 0xa4]),
                ts: 1700000002000,
            },
            first_ts: 1700000000000,
            count: 3,
            mac_vendor: "Raspberry Pi (Trading) Ltd".to_string(),
        }
    }

    #[test]
    fn test_packet_notification_shape() {
        let n = Notification::packet(
            &ext_event(),
            EventType::NewPacket,
            "192.168.1.0/24".to_string(),
            vec![],
            vec![],
        );
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains(r#""eventType":"NEW_PACKET""#));
        assert!(json.contains(r#""ip":"192.168.1.100""#));
        assert!(json.contains(r#""mac":"2c:cf:67:0c:6c:a4""#));
        assert!(json.contains(r#""firstTs":1700000000000"#));
        assert!(json.contains(r#""ts":1700000002000"#));
        assert!(json.contains(r#""count":3"#));
        assert!(json.contains(r#""macVendor":"Raspberry Pi (Trading) Ltd""#));
        assert!(json.contains(r#""expectedCidrRange":"192.168.1.0/24""#));
        assert!(!json.contains("otherIps"));
        assert!(!json.contains("otherMacs"));
    }

    #[test]
    fn test_host_notification_omits_first_ts_and_count() {
        let n = Notification::host(
            &ext_event(),
            EventType::NewHost,
            "192.168.1.0/24".to_string(),
            vec![],
            vec![],
        );
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains(r#""eventType":"NEW_HOST""#));
        assert!(json.contains(r#""ts":1700000002000"#));
        assert!(!json.contains("firstTs"));
        assert!(!json.contains("count"));
    }

    #[test]
    fn test_other_lists_serialized_when_non_empty() {
        let n = Notification::packet(
            &ext_event(),
            EventType::NewIpForMacPacket,
            "0.0.0.0/0".to_string(),
            vec!["10.0.0.7".to_string()],
            vec!["aa:bb:cc:dd:ee:ff".to_string()],
        );
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains(r#""otherIps":["10.0.0.7"]"#));
        assert!(json.contains(r#""otherMacs":["aa:bb:cc:dd:ee:ff"]"#));
    }
}
