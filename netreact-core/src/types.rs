//! Common types used throughout Netreact-RS

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const fn broadcast() -> Self {
        Self([0xff, 0xff, 0xff, 0xff, 0xff, 0xff])
    }

    /// Zero MAC address (00:00:00:00:00:00)
    pub const fn zero() -> Self {
        Self([0x00, 0x00, 0x00, 0x00, 0x00, 0x00])
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// First three bytes, the vendor (OUI) part
    pub fn oui(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(crate::Error::config(format!(
                "invalid MAC address format: {s}"
            )));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                return Err(crate::Error::config(format!(
                    "invalid MAC address format: {s}"
                )));
            }
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| crate::Error::config(format!("invalid MAC address hex: {s}")))?;
        }

        Ok(MacAddr(bytes))
    }
}

/// Current wall clock as unix milliseconds. Timestamps are taken
/// from the wall clock and are not assumed strictly increasing
/// anywhere downstream.
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// A single address-resolution observation: the sender IP and MAC of
/// one captured ARP packet, stamped with the wall clock in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpEvent {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    /// Unix timestamp in milliseconds
    pub ts: i64,
}

/// An [`ArpEvent`] enriched with the host cache record it produced
/// and the resolved MAC vendor name. This is the unit handed to the
/// event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedArpEvent {
    pub event: ArpEvent,
    /// Timestamp of the first observation of this (IP, MAC) pair
    pub first_ts: i64,
    /// Number of observations of this pair so far
    pub count: u64,
    /// Vendor name resolved from the MAC OUI, "Unknown" if unlisted
    pub mac_vendor: String,
}

impl ExtendedArpEvent {
    /// Shorthand for the underlying event's IP
    pub fn ip(&self) -> Ipv4Addr {
        self.event.ip
    }

    /// Shorthand for the underlying event's MAC
    pub fn mac(&self) -> MacAddr {
        self.event.mac
    }

    /// Shorthand for the underlying event's timestamp
    pub fn ts(&self) -> i64 {
        self.event.ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_display() {
        let mac = MacAddr::new([0x2c, 0xcf, 0x67, 0x0c, 0x6c, 0xa4]);
        assert_eq!(mac.to_string(), "2c:cf:67:0c:6c:a4");
    }

    #[test]
    fn test_mac_from_str() {
        let mac: MacAddr = "2c:cf:67:0c:6c:a4".parse().unwrap();
        assert_eq!(mac.octets(), [0x2c, 0xcf, 0x67, 0x0c, 0x6c, 0xa4]);
    }

    #[test]
    fn test_mac_from_str_rejects_garbage() {
        assert!("2c:cf:67:0c:6c".parse::<MacAddr>().is_err());
        assert!("2c:cf:67:0c:6c:zz".parse::<MacAddr>().is_err());
        assert!("2ccf670c6ca4".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_mac_oui() {
        let mac = MacAddr::new([0x2c, 0xcf, 0x67, 0x0c, 0x6c, 0xa4]);
        assert_eq!(mac.oui(), [0x2c, 0xcf, 0x67]);
    }

    #[test]
    fn test_broadcast_and_zero() {
        assert_eq!(MacAddr::broadcast().to_string(), "ff:ff:ff:ff:ff:ff");
        assert_eq!(MacAddr::zero().to_string(), "00:00:00:00:00:00");
    }
}
