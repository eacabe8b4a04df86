//! Packet capture wrapper around pcap
//!
//! Unlike a general-purpose capture this never spawns a thread: the
//! observation processing path is single-threaded by contract, so
//! [`ArpCapture::run`] blocks the calling thread and drives the
//! callback one packet at a time, in delivery order.

use std::sync::atomic::{AtomicBool, Ordering};

use pcap::{Active, Capture, Device};
use tracing::{debug, info, warn};

use netreact_core::{now_millis, ArpEvent, Error, MacAddr, Result};

use crate::arp::ArpFrame;
use crate::interface::get_interface;

/// ARP headers are small; no need to snarf whole frames
const DEFAULT_SNAPLEN: i32 = 64;

/// Read timeout so the loop can notice pcap errors (milliseconds)
const DEFAULT_TIMEOUT_MS: i32 = 1000;

/// Configuration for ARP capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Maximum bytes to capture per packet
    pub snaplen: i32,
    /// Read timeout in milliseconds
    pub timeout_ms: i32,
    /// Enable promiscuous mode
    pub promiscuous: bool,
    /// BPF filter applied to the handle
    pub bpf_filter: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            promiscuous: false,
            bpf_filter: "arp".to_string(),
        }
    }
}

/// Blocking source of ARP observations on one interface
pub struct ArpCapture {
    interface: String,
    local_mac: Option<MacAddr>,
    handle: Capture<Active>,
}

impl ArpCapture {
    /// Open a live capture on the given interface and apply the
    /// configured BPF filter. Fails if the interface does not exist,
    /// is not up, or the filter does not compile.
    pub fn open(interface: &str, config: &CaptureConfig) -> Result<Self> {
        let info = get_interface(interface)?;
        if !info.is_up {
            return Err(Error::capture(format!("Interface '{interface}' is not up")));
        }
        if info.mac.is_none() {
            warn!(interface, "interface has no MAC address, own-frame suppression disabled");
        }

        let device = Device::from(interface);
        let mut handle = Capture::from_device(device)
            .map_err(|e| Error::capture(format!("Failed to create capture: {e}")))?
            .promisc(config.promiscuous)
            .snaplen(config.snaplen)
            .timeout(config.timeout_ms)
            .immediate_mode(true)
            .open()
            .map_err(|e| Error::capture(format!("Failed to open capture: {e}")))?;

        handle
            .filter(&config.bpf_filter, true)
            .map_err(|e| Error::capture(format!("Invalid BPF filter: {e}")))?;

        info!(interface, filter = %config.bpf_filter, promiscuous = config.promiscuous,
            "capture opened");

        Ok(Self {
            interface: interface.to_string(),
            local_mac: info.mac,
            handle,
        })
    }

    /// The interface this capture is bound to
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The local interface MAC, used to ignore our own frames
    pub fn local_mac(&self) -> Option<MacAddr> {
        self.local_mac
    }

    /// Consume packets until the stop flag is raised, invoking the
    /// callback once per ARP observation, in delivery order. The
    /// callback runs to completion before the next packet is read;
    /// the stop flag is only checked between packets. Returns early
    /// on a capture error.
    pub fn run<F>(&mut self, stop: &AtomicBool, mut callback: F) -> Result<()>
    where
        F: FnMut(ArpEvent),
    {
        loop {
            if stop.load(Ordering::Relaxed) {
                info!(interface = %self.interface, "capture stopped");
                return Ok(());
            }

            let data = match self.handle.next_packet() {
                Ok(packet) => packet.data.to_vec(),
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(e) => {
                    return Err(Error::capture(format!("Packet capture error: {e}")));
                }
            };

            match ArpFrame::from_ethernet(&data) {
                Ok(Some(frame)) => {
                    // our own requests are looped back to us
                    if Some(frame.sender_mac) == self.local_mac {
                        continue;
                    }
                    callback(ArpEvent {
                        ip: frame.sender_ip,
                        mac: frame.sender_mac,
                        ts: now_millis(),
                    });
                }
                // a custom BPF filter can let non-ARP frames through
                Ok(None) => continue,
                Err(e) => {
                    debug!(error = %e, "ignoring unparseable frame");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_config_default() {
        let config = CaptureConfig::default();
        assert_eq!(config.snaplen, DEFAULT_SNAPLEN);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!config.promiscuous);
        assert_eq!(config.bpf_filter, "arp");
    }

    #[test]
    fn test_open_unknown_interface_fails() {
        let result = ArpCapture::open("nonexistent_interface_xyz", &CaptureConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_loopback_best_effort() {
        // opening a real handle needs privileges; tolerate failure
        let result = ArpCapture::open("lo", &CaptureConfig::default())
            .or_else(|_| ArpCapture::open("lo0", &CaptureConfig::default()));
        match result {
            Ok(capture) => assert!(!capture.interface().is_empty()),
            Err(e) => println!("could not open capture (may need privileges): {e}"),
        }
    }
}
