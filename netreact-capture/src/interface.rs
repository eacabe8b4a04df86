//! Network interface lookup

use pnet_datalink::NetworkInterface;

use netreact_core::{Error, MacAddr, Result};

/// What the sensor needs to know about an interface
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "wlan0")
    pub name: String,
    /// MAC address, absent on some virtual interfaces
    pub mac: Option<MacAddr>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        InterfaceInfo {
            name: iface.name.clone(),
            mac: iface.mac.map(|mac| MacAddr::new(mac.octets())),
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

/// List all available network interfaces
pub fn list_interfaces() -> Result<Vec<InterfaceInfo>> {
    let interfaces = pnet_datalink::interfaces();
    if interfaces.is_empty() {
        return Err(Error::capture(
            "No network interfaces found. Are you running with sufficient privileges?",
        ));
    }
    Ok(interfaces.iter().map(InterfaceInfo::from).collect())
}

/// Get information about a specific interface by name
pub fn get_interface(name: &str) -> Result<InterfaceInfo> {
    let interfaces = pnet_datalink::interfaces();
    interfaces
        .iter()
        .find(|iface| iface.name == name)
        .map(InterfaceInfo::from)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_interfaces() {
        // should at least have loopback
        let interfaces = list_interfaces().unwrap();
        assert!(!interfaces.is_empty());
    }

    #[test]
    fn test_get_nonexistent_interface() {
        let result = get_interface("nonexistent_interface_xyz");
        match result {
            Err(Error::InterfaceNotFound(name)) => assert_eq!(name, "nonexistent_interface_xyz"),
            other => panic!("expected InterfaceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_loopback_flagged() {
        let interfaces = list_interfaces().unwrap();
        assert!(interfaces.iter().any(|iface| iface.is_loopback));
    }
}
