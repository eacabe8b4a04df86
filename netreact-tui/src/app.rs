//! Shared host table state
//!
//! The host cache itself is owned by the single-threaded processing
//! path and never shared. What the UI renders is this separate
//! snapshot: a row per host behind an `RwLock`, written by the
//! processing path after each event and read by the render loop.

use std::sync::Arc;

use parking_lot::RwLock;

use netreact_core::{ExtendedArpEvent, HostCache, MacAddr};

/// One row of the host table
#[derive(Debug, Clone)]
pub struct HostRow {
    pub ip: String,
    pub mac: String,
    pub mac_vendor: String,
    pub first_ts: i64,
    pub last_ts: i64,
    pub count: u64,
}

/// Cloneable handle to the shared table of observed hosts
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    rows: Arc<RwLock<Vec<HostRow>>>,
}

impl HostTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table from a restored host cache, ordered by first
    /// seen. The vendor lookup is injected so this crate stays free
    /// of the OUI registry.
    pub fn from_cache<F>(cache: &HostCache, vendor_for: F) -> Self
    where
        F: Fn(MacAddr) -> String,
    {
        let mut rows: Vec<HostRow> = cache
            .iter()
            .map(|(key, details)| HostRow {
                ip: key.ip().to_string(),
                mac: key.mac().to_string(),
                mac_vendor: vendor_for(key.mac()),
                first_ts: details.first_ts,
                last_ts: details.last_ts,
                count: details.count,
            })
            .collect();
        rows.sort_by_key(|row| row.first_ts);

        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Fold one processed event into the table: update the matching
    /// row or append a new one.
    pub fn upsert(&self, ext: &ExtendedArpEvent) {
        let ip = ext.ip().to_string();
        let mac = ext.mac().to_string();

        let mut rows = self.rows.write();
        if let Some(row) = rows.iter_mut().find(|row| row.ip == ip && row.mac == mac) {
            row.last_ts = ext.ts();
            row.count = ext.count;
            return;
        }
        rows.push(HostRow {
            ip,
            mac,
            mac_vendor: ext.mac_vendor.clone(),
            first_ts: ext.first_ts,
            last_ts: ext.ts(),
            count: ext.count,
        });
    }

    /// Copy of the current rows for rendering
    pub fn snapshot(&self) -> Vec<HostRow> {
        self.rows.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netreact_core::ArpEvent;
    use std::net::Ipv4Addr;

    fn ext(ip: [u8; 4], ts: i64, first_ts: i64, count: u64) -> ExtendedArpEvent {
        ExtendedArpEvent {
            event: ArpEvent {
                ip: Ipv4Addr::from(ip),
                mac: MacAddr::new([0x2c, 0xcf, 0x67, 0x0c, 0x6c, 0xa4]),
                ts,
            },
            first_ts,
            count,
            mac_vendor: "Raspberry Pi (Trading) Ltd".to_string(),
        }
    }

    #[test]
    fn test_upsert_inserts_then_updates() {
        let table = HostTable::new();
        table.upsert(&ext([10, 0, 0, 1], 1000, 1000, 1));

        let rows = table.snapshot();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ip, "10.0.0.1");
        assert_eq!(rows[0].count, 1);

        table.upsert(&ext([10, 0, 0, 1], 5000, 1000, 2));
        let rows = table.snapshot();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_ts, 5000);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn test_from_cache_sorted_by_first_seen() {
        let mut cache = HostCache::new();
        cache.update(ArpEvent {
            ip: Ipv4Addr::new(10, 0, 0, 2),
            mac: MacAddr::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]),
            ts: 5000,
        });
        cache.update(ArpEvent {
            ip: Ipv4Addr::new(10, 0, 0, 1),
            mac: MacAddr::new([0x2c, 0xcf, 0x67, 0x0c, 0x6c, 0xa4]),
            ts: 1000,
        });

        let table = HostTable::from_cache(&cache, |_| "Unknown".to_string());
        let rows = table.snapshot();
        assert_eq!(rows[0].ip, "10.0.0.1");
        assert_eq!(rows[1].ip, "10.0.0.2");
    }
}
