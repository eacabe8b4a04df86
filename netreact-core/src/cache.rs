//! Host cache: the durable memory of which (IP, MAC) pairs have been
//! seen on the wire.
//!
//! The cache is only ever touched from the packet processing path,
//! which is strictly single-threaded; that scheduling invariant is
//! what makes the plain `HashMap` safe here. Do not share it across
//! threads without taking a snapshot first.

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

use crate::state::{AppState, StateItem};
use crate::types::{ArpEvent, ExtendedArpEvent, MacAddr};

/// Composite host identity: 4 bytes of IPv4 followed by 6 bytes of
/// MAC. Two observations belong to the same host iff both match.
/// IPv4 only, by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostKey(pub [u8; 10]);

impl HostKey {
    /// Build a key from an IP and MAC pair
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        let mut key = [0u8; 10];
        key[..4].copy_from_slice(&ip.octets());
        key[4..].copy_from_slice(mac.as_bytes());
        HostKey(key)
    }

    /// Build a key from an ARP event
    pub fn from_event(event: &ArpEvent) -> Self {
        Self::new(event.ip, event.mac)
    }

    /// The IP half of the key
    pub fn ip(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.0[0], self.0[1], self.0[2], self.0[3])
    }

    /// The MAC half of the key
    pub fn mac(&self) -> MacAddr {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&self.0[4..]);
        MacAddr(bytes)
    }
}

/// Per-host bookkeeping: when it was first and last seen, and how
/// many non-excluded observations it produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostDetails {
    pub first_ts: i64,
    pub last_ts: i64,
    pub count: u64,
}

/// Keyed map of every observed (IP, MAC) pairing. Records are never
/// removed while the process runs.
#[derive(Debug, Default)]
pub struct HostCache {
    items: HashMap<HostKey, HostDetails>,
    // insertion order, used to break first_ts ties on export
    order: Vec<HostKey>,
}

impl HostCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cache from restored application state. Insertion
    /// order follows the order of the state items.
    pub fn from_app_state(app_state: &AppState) -> crate::Result<Self> {
        let mut cache = HostCache::new();
        for item in &app_state.items {
            let ip: Ipv4Addr = item
                .ip
                .parse()
                .map_err(|_| crate::Error::state(format!("invalid IP address: {}", item.ip)))?;
            let mac: MacAddr = item.mac.parse()?;
            let key = HostKey::new(ip, mac);
            cache.items.insert(
                key,
                HostDetails {
                    first_ts: item.first_ts,
                    last_ts: item.last_ts,
                    count: item.count,
                },
            );
            cache.order.push(key);
        }
        Ok(cache)
    }

    /// Export the cache as application state, sorted ascending by
    /// first-seen timestamp. Ties keep insertion order. An empty
    /// cache exports an empty item list, never a missing one.
    pub fn to_app_state(&self) -> AppState {
        let mut items: Vec<StateItem> = self
            .order
            .iter()
            .map(|key| {
                let details = self.items[key];
                StateItem {
                    ip: key.ip().to_string(),
                    mac: key.mac().to_string(),
                    first_ts: details.first_ts,
                    last_ts: details.last_ts,
                    count: details.count,
                }
            })
            .collect();
        items.sort_by_key(|item| item.first_ts);
        AppState { items }
    }

    /// Record one observation. Creates the record on first sight
    /// (`first_ts = last_ts = ts`, count 1), otherwise bumps
    /// `last_ts` and the count. Returns the event enriched with the
    /// updated record; the vendor name is left for the caller to
    /// resolve.
    pub fn update(&mut self, event: ArpEvent) -> ExtendedArpEvent {
        let key = HostKey::from_event(&event);

        let details = self.items.entry(key).or_insert_with(|| {
            self.order.push(key);
            HostDetails {
                first_ts: event.ts,
                ..HostDetails::default()
            }
        });
        details.last_ts = event.ts;
        details.count += 1;

        ExtendedArpEvent {
            event,
            first_ts: details.first_ts,
            count: details.count,
            mac_vendor: String::new(),
        }
    }

    /// Look up a host record. Absent keys yield the zero record.
    pub fn host(&self, key: HostKey) -> HostDetails {
        self.items.get(&key).copied().unwrap_or_default()
    }

    /// Number of distinct (IP, MAC) pairs seen
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cache has seen nothing yet
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (HostKey, HostDetails)> + '_ {
        self.order.iter().map(|key| (*key, self.items[key]))
    }

    /// Build the two reverse indexes used for multi-association
    /// detection: ip -> set of MACs and mac -> set of IPs.
    #[allow(clippy::type_complexity)]
    pub fn ip_and_mac_maps(
        &self,
    ) -> (
        HashMap<String, HashSet<String>>,
        HashMap<String, HashSet<String>>,
    ) {
        let mut ip_to_mac: HashMap<String, HashSet<String>> = HashMap::new();
        let mut mac_to_ip: HashMap<String, HashSet<String>> = HashMap::new();

        for key in self.items.keys() {
            let ip = key.ip().to_string();
            let mac = key.mac().to_string();
            ip_to_mac.entry(ip.clone()).or_default().insert(mac.clone());
            mac_to_ip.entry(mac).or_default().insert(ip);
        }

        (ip_to_mac, mac_to_ip)
    }
}
