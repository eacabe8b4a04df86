//! Passive ARP capture for Netreact-RS
//!
//! Wraps pcap into a blocking stream of [`netreact_core::ArpEvent`]s:
//! interface lookup, BPF filtering, Ethernet/ARP sender extraction
//! and suppression of the local interface's own frames. Capture is
//! 100% passive; nothing is ever transmitted.

pub mod arp;
pub mod capture;
pub mod interface;

pub use arp::ArpFrame;
pub use capture::{ArpCapture, CaptureConfig};
pub use interface::{get_interface, list_interfaces, InterfaceInfo};
