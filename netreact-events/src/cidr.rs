//! Expected CIDR range
//!
//! Small IPv4 network value type used to flag addresses that should
//! not appear on the monitored segment. The network address is
//! normalized on parse, so `192.168.1.77/24` displays as
//! `192.168.1.0/24`.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use netreact_core::Error;

/// IPv4 network prefix: network address plus prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedCidr {
    network: Ipv4Addr,
    prefix_len: u8,
}

impl ExpectedCidr {
    /// Build a range, normalizing the host bits away
    pub fn new(addr: Ipv4Addr, prefix_len: u8) -> Result<Self, Error> {
        if prefix_len > 32 {
            return Err(Error::config(format!(
                "invalid CIDR prefix length: {prefix_len}"
            )));
        }
        let mask = Self::mask(prefix_len);
        Ok(Self {
            network: Ipv4Addr::from(u32::from(addr) & mask),
            prefix_len,
        })
    }

    /// Whether the range contains the given address
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & Self::mask(self.prefix_len) == u32::from(self.network)
    }

    /// The normalized network address
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// The prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn mask(prefix_len: u8) -> u32 {
        if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix_len))
        }
    }
}

impl fmt::Display for ExpectedCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

impl FromStr for ExpectedCidr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_part, prefix_part) = s
            .split_once('/')
            .ok_or_else(|| Error::config(format!("invalid CIDR range: {s}")))?;

        let addr: Ipv4Addr = addr_part
            .parse()
            .map_err(|_| Error::config(format!("invalid CIDR range {s}: bad address")))?;
        let prefix_len: u8 = prefix_part
            .parse()
            .map_err(|_| Error::config(format!("invalid CIDR range {s}: bad prefix length")))?;

        Self::new(addr, prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let cidr: ExpectedCidr = "192.168.1.0/24".parse().unwrap();
        assert!(cidr.contains(Ipv4Addr::new(192, 168, 1, 1)));
        assert!(cidr.contains(Ipv4Addr::new(192, 168, 1, 255)));
        assert!(!cidr.contains(Ipv4Addr::new(192, 168, 2, 1)));
        assert!(!cidr.contains(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_zero_prefix_contains_everything() {
        let cidr: ExpectedCidr = "0.0.0.0/0".parse().unwrap();
        assert!(cidr.contains(Ipv4Addr::new(0, 0, 0, 0)));
        assert!(cidr.contains(Ipv4Addr::new(255, 255, 255, 255)));
        assert!(cidr.contains(Ipv4Addr::new(172, 16, 33, 7)));
    }

    #[test]
    fn test_host_bits_normalized() {
        let cidr: ExpectedCidr = "192.168.1.77/24".parse().unwrap();
        assert_eq!(cidr.to_string(), "192.168.1.0/24");
        assert_eq!(cidr.network(), Ipv4Addr::new(192, 168, 1, 0));
    }

    #[test]
    fn test_full_prefix_is_single_host() {
        let cidr: ExpectedCidr = "10.1.2.3/32".parse().unwrap();
        assert!(cidr.contains(Ipv4Addr::new(10, 1, 2, 3)));
        assert!(!cidr.contains(Ipv4Addr::new(10, 1, 2, 4)));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!("192.168.1.0".parse::<ExpectedCidr>().is_err());
        assert!("192.168.1.0/33".parse::<ExpectedCidr>().is_err());
        assert!("192.168.1/24".parse::<ExpectedCidr>().is_err());
        assert!("foo/24".parse::<ExpectedCidr>().is_err());
        assert!("192.168.1.0/bar".parse::<ExpectedCidr>().is_err());
    }
}
