//! Event classification
//!
//! For every enriched observation the handler updates the two
//! reverse indexes (ip -> MACs, mac -> IPs), then evaluates the
//! seven predicate categories against both masks. Packet-level
//! alerts fire on every matching observation; host-level alerts only
//! on the first sighting of the (IP, MAC) pair, with one deliberate
//! exception: the multi-association categories re-fire on every
//! conflicting observation, first sighting or not.
//!
//! The handler is only ever driven from the single-threaded packet
//! processing path; the indexes carry no locks for that reason.

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

use tracing::info;

use netreact_core::ExtendedArpEvent;

use crate::cidr::ExpectedCidr;
use crate::emitter::NotificationStore;
use crate::event_type::EventType;
use crate::mask::EventMask;
use crate::notification::Notification;

/// Classifies enriched ARP events and emits notifications
#[derive(Debug)]
pub struct ArpEventHandler {
    store: NotificationStore,
    packet_mask: EventMask,
    host_mask: EventMask,
    expected_cidr: ExpectedCidr,
    ip_to_mac: HashMap<String, HashSet<String>>,
    mac_to_ip: HashMap<String, HashSet<String>>,
}

impl ArpEventHandler {
    /// Create a handler. The reverse indexes are usually seeded from
    /// the restored host cache so multi-association detection spans
    /// process restarts.
    pub fn new(
        store: NotificationStore,
        packet_mask: EventMask,
        host_mask: EventMask,
        expected_cidr: ExpectedCidr,
        ip_to_mac: HashMap<String, HashSet<String>>,
        mac_to_ip: HashMap<String, HashSet<String>>,
    ) -> Self {
        Self {
            store,
            packet_mask,
            host_mask,
            expected_cidr,
            ip_to_mac,
            mac_to_ip,
        }
    }

    /// Process one enriched event: log it, fold it into the reverse
    /// indexes, then emit every enabled matching notification.
    pub fn handle(&mut self, ext: &ExtendedArpEvent) {
        info!(ip = %ext.ip(), mac = %ext.mac(), "ARP packet received");
        self.update_maps(ext);
        self.emit_notifications(ext);
    }

    // indexes must reflect the current observation before the
    // multi-association predicates run
    fn update_maps(&mut self, ext: &ExtendedArpEvent) {
        let ip = ext.ip().to_string();
        let mac = ext.mac().to_string();
        self.ip_to_mac.entry(ip.clone()).or_default().insert(mac.clone());
        self.mac_to_ip.entry(mac).or_default().insert(ip);
    }

    fn emit_notifications(&self, ext: &ExtendedArpEvent) {
        let first_sighting = ext.count == 1;
        let ip = ext.ip();

        if self.packet_mask.any() {
            self.emit_packet(ext, EventType::NewPacket);
        }
        if self.host_mask.any() && first_sighting {
            self.emit_host(ext, EventType::NewHost);
        }

        let link_local = ip.is_link_local();
        let unspecified = ip.is_unspecified();
        let broadcast = ip == Ipv4Addr::BROADCAST;

        if link_local {
            if self.packet_mask.new_link_local_unicast() {
                self.emit_packet(ext, EventType::NewLinkLocalUnicastPacket);
            }
            if self.host_mask.new_link_local_unicast() && first_sighting {
                self.emit_host(ext, EventType::NewLinkLocalUnicastHost);
            }
        }

        if unspecified {
            if self.packet_mask.new_unspecified() {
                self.emit_packet(ext, EventType::NewUnspecifiedPacket);
            }
            if self.host_mask.new_unspecified() && first_sighting {
                self.emit_host(ext, EventType::NewUnspecifiedHost);
            }
        }

        if broadcast {
            if self.packet_mask.new_broadcast() {
                self.emit_packet(ext, EventType::NewBroadcastPacket);
            }
            if self.host_mask.new_broadcast() && first_sighting {
                self.emit_host(ext, EventType::NewBroadcastHost);
            }
        }

        // outside the expected range, but not one of the special
        // addresses already classified above
        if !self.expected_cidr.contains(ip) && !link_local && !unspecified && !broadcast {
            if self.packet_mask.new_unexpected() {
                self.emit_packet(ext, EventType::NewUnexpectedIpPacket);
            }
            if self.host_mask.new_unexpected() && first_sighting {
                self.emit_host(ext, EventType::NewUnexpectedIpHost);
            }
        }

        // no first-sighting gate on the two multi-association host
        // categories: repeated spoofing keeps alarming
        if self.associated_ips(ext) > 1 {
            if self.packet_mask.new_ip_for_mac() {
                self.emit_packet(ext, EventType::NewIpForMacPacket);
            }
            if self.host_mask.new_ip_for_mac() {
                self.emit_host(ext, EventType::NewIpForMacHost);
            }
        }

        if self.associated_macs(ext) > 1 {
            if self.packet_mask.new_mac_for_ip() {
                self.emit_packet(ext, EventType::NewMacForIpPacket);
            }
            if self.host_mask.new_mac_for_ip() {
                self.emit_host(ext, EventType::NewMacForIpHost);
            }
        }
    }

    fn associated_ips(&self, ext: &ExtendedArpEvent) -> usize {
        self.mac_to_ip
            .get(&ext.mac().to_string())
            .map_or(0, HashSet::len)
    }

    fn associated_macs(&self, ext: &ExtendedArpEvent) -> usize {
        self.ip_to_mac
            .get(&ext.ip().to_string())
            .map_or(0, HashSet::len)
    }

    fn emit_packet(&self, ext: &ExtendedArpEvent, event_type: EventType) {
        let notification = Notification::packet(
            ext,
            event_type,
            self.expected_cidr.to_string(),
            self.other_ips(ext),
            self.other_macs(ext),
        );
        self.store.store(&notification, event_type);
    }

    fn emit_host(&self, ext: &ExtendedArpEvent, event_type: EventType) {
        let notification = Notification::host(
            ext,
            event_type,
            self.expected_cidr.to_string(),
            self.other_ips(ext),
            self.other_macs(ext),
        );
        self.store.store(&notification, event_type);
    }

    /// Other IPs this MAC is associated with, excluding the current
    fn other_ips(&self, ext: &ExtendedArpEvent) -> Vec<String> {
        let current = ext.ip().to_string();
        self.mac_to_ip
            .get(&ext.mac().to_string())
            .map(|all| all.iter().filter(|ip| **ip != current).cloned().collect())
            .unwrap_or_default()
    }

    /// Other MACs this IP is associated with, excluding the current
    fn other_macs(&self, ext: &ExtendedArpEvent) -> Vec<String> {
        let current = ext.mac().to_string();
        self.ip_to_mac
            .get(&ext.ip().to_string())
            .map(|all| all.iter().filter(|mac| **mac != current).cloned().collect())
            .unwrap_or_default()
    }
}
