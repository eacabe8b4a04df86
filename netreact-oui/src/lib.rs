//! MAC vendor (OUI) lookup
//!
//! The vendor registry is embedded in the binary as a sorted text
//! file of `aabbcc Vendor Name` lines and searched by binary search
//! on the hex-encoded first three bytes of the MAC. Embedding keeps
//! the tool a single self-contained binary and avoids any network
//! egress, at the cost of carrying the table in memory.

use once_cell::sync::Lazy;

use netreact_core::MacAddr;

static OUI_RAW: &str = include_str!("../data/oui.txt");

/// Returned when the OUI is not in the registry
pub const UNKNOWN_VENDOR: &str = "Unknown";

static OUI_LIST: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    let mut list: Vec<(&str, &str)> = OUI_RAW
        .lines()
        .filter_map(|line| line.split_once(' '))
        .filter(|(prefix, _)| prefix.len() == 6)
        .collect();
    // the data file is kept sorted, but the search depends on it
    list.sort_unstable_by_key(|(prefix, _)| *prefix);
    list
});

/// Resolve the vendor name for a MAC address, `"Unknown"` when the
/// OUI is not listed.
pub fn vendor_for(mac: MacAddr) -> String {
    let oui = mac.oui();
    let prefix = format!("{:02x}{:02x}{:02x}", oui[0], oui[1], oui[2]);

    match OUI_LIST.binary_search_by(|(entry, _)| (*entry).cmp(prefix.as_str())) {
        Ok(i) => OUI_LIST[i].1.trim().to_string(),
        Err(_) => UNKNOWN_VENDOR.to_string(),
    }
}
