//! Exclusion filter
//!
//! Observations matching any of three configured sets (IPs, MACs,
//! exact IP-MAC pairs) are dropped before they reach the host cache
//! or classifier: no counting, no index updates, no notifications.
//! Membership is exact string equality, no CIDR-style matching.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use netreact_core::{Error, MacAddr, Result};

/// Filter over the three exclusion sets
#[derive(Debug, Default)]
pub struct ArpEventFilter {
    excluded_ips: HashSet<String>,
    excluded_macs: HashSet<String>,
    excluded_pairs: HashSet<String>,
}

impl ArpEventFilter {
    /// Create a filter from pre-parsed exclusion sets
    pub fn new(
        excluded_ips: HashSet<String>,
        excluded_macs: HashSet<String>,
        excluded_pairs: HashSet<String>,
    ) -> Self {
        Self {
            excluded_ips,
            excluded_macs,
            excluded_pairs,
        }
    }

    /// Whether an observation with this IP and MAC should be dropped
    pub fn is_excluded(&self, ip: &str, mac: &str) -> bool {
        self.excluded_ips.contains(ip)
            || self.excluded_macs.contains(mac)
            || self.excluded_pairs.contains(&format!("{ip},{mac}"))
    }
}

// a blank line trims to "" and fails address parsing like any other
// malformed line; only the final trailing newline is tolerated,
// which `str::lines` never yields as a line
fn trimmed_lines(data: &str) -> impl Iterator<Item = &str> {
    data.lines()
        .map(|line| line.trim_matches(&[' ', '\r', '\n'][..]))
}

/// Parse a file of excluded IP addresses, one per line. Any
/// malformed line, including a blank one, is a hard error.
pub fn read_ips(data: &str) -> Result<HashSet<String>> {
    let mut ips = HashSet::new();
    for line in trimmed_lines(data) {
        if line.parse::<Ipv4Addr>().is_err() {
            return Err(Error::ExclusionList(format!("invalid IP address: {line}")));
        }
        ips.insert(line.to_string());
    }
    Ok(ips)
}

/// Parse a file of excluded MAC addresses, one per line
pub fn read_macs(data: &str) -> Result<HashSet<String>> {
    let mut macs = HashSet::new();
    for line in trimmed_lines(data) {
        if line.parse::<MacAddr>().is_err() {
            return Err(Error::ExclusionList(format!("invalid MAC address: {line}")));
        }
        macs.insert(line.to_string());
    }
    Ok(macs)
}

/// Parse a file of excluded `ip,mac` pairs, one per line
pub fn read_pairs(data: &str) -> Result<HashSet<String>> {
    let mut pairs = HashSet::new();
    for line in trimmed_lines(data) {
        let (ip, mac) = line
            .split_once(',')
            .ok_or_else(|| Error::ExclusionList(format!("invalid line: {line}")))?;
        if ip.parse::<Ipv4Addr>().is_err() {
            return Err(Error::ExclusionList(format!("invalid IP address: {line}")));
        }
        if mac.parse::<MacAddr>().is_err() {
            return Err(Error::ExclusionList(format!("invalid MAC address: {line}")));
        }
        pairs.insert(format!("{ip},{mac}"));
    }
    Ok(pairs)
}
