//! Event mask configuration
//!
//! Which of the seven alert categories are enabled is configured as
//! a 7-character `0`/`1` string, e.g. `1111100`. The string is
//! validated and parsed into named flags once at load time; nothing
//! downstream looks at characters again.

use std::str::FromStr;

use netreact_core::Error;

/// Number of alert categories per level
pub const MASK_LEN: usize = 7;

/// Seven named on/off flags, one per alert category, in the fixed
/// order: any, link-local unicast, unspecified, broadcast,
/// unexpected range, new IP for MAC, new MAC for IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMask {
    flags: [bool; MASK_LEN],
}

impl EventMask {
    /// Mask with every category enabled
    pub const fn all() -> Self {
        Self {
            flags: [true; MASK_LEN],
        }
    }

    /// Mask with every category disabled
    pub const fn none() -> Self {
        Self {
            flags: [false; MASK_LEN],
        }
    }

    /// Category 0: every observation
    pub fn any(&self) -> bool {
        self.flags[0]
    }

    /// Category 1: link-local unicast address (169.254.0.0/16)
    pub fn new_link_local_unicast(&self) -> bool {
        self.flags[1]
    }

    /// Category 2: unspecified address (0.0.0.0)
    pub fn new_unspecified(&self) -> bool {
        self.flags[2]
    }

    /// Category 3: broadcast address (255.255.255.255)
    pub fn new_broadcast(&self) -> bool {
        self.flags[3]
    }

    /// Category 4: address outside the expected CIDR range
    pub fn new_unexpected(&self) -> bool {
        self.flags[4]
    }

    /// Category 5: MAC now claims more than one IP
    pub fn new_ip_for_mac(&self) -> bool {
        self.flags[5]
    }

    /// Category 6: IP now claimed by more than one MAC
    pub fn new_mac_for_ip(&self) -> bool {
        self.flags[6]
    }
}

impl FromStr for EventMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != MASK_LEN {
            return Err(Error::config(format!(
                "incorrect event mask length: {}, expected: {MASK_LEN}",
                s.len()
            )));
        }

        let mut flags = [false; MASK_LEN];
        for (i, ch) in s.chars().enumerate() {
            flags[i] = match ch {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(Error::config(format!(
                        "invalid event mask flag '{ch}' at position {i}"
                    )))
                }
            };
        }
        Ok(EventMask { flags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones() {
        let mask: EventMask = "1111111".parse().unwrap();
        assert_eq!(mask, EventMask::all());
        assert!(mask.any());
        assert!(mask.new_mac_for_ip());
    }

    #[test]
    fn test_all_zeros() {
        let mask: EventMask = "0000000".parse().unwrap();
        assert_eq!(mask, EventMask::none());
        assert!(!mask.any());
        assert!(!mask.new_unexpected());
    }

    #[test]
    fn test_mixed_flags_map_to_positions() {
        let mask: EventMask = "1010010".parse().unwrap();
        assert!(mask.any());
        assert!(!mask.new_link_local_unicast());
        assert!(mask.new_unspecified());
        assert!(!mask.new_broadcast());
        assert!(!mask.new_unexpected());
        assert!(mask.new_ip_for_mac());
        assert!(!mask.new_mac_for_ip());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!("111111".parse::<EventMask>().is_err());
        assert!("11111111".parse::<EventMask>().is_err());
        assert!("".parse::<EventMask>().is_err());
    }

    #[test]
    fn test_bad_alphabet_rejected() {
        assert!("111x111".parse::<EventMask>().is_err());
        assert!("1111112".parse::<EventMask>().is_err());
    }
}
