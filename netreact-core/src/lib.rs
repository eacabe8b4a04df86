//! Core types for Netreact-RS
//!
//! Shared building blocks used by every other crate: the ARP event
//! types, the host cache keyed by (IP, MAC), the persisted state
//! model and the common error type.

pub mod cache;
pub mod error;
pub mod state;
pub mod types;

pub use cache::{HostCache, HostDetails, HostKey};
pub use error::{Error, Result};
pub use state::{AppState, StateItem};
pub use types::{now_millis, ArpEvent, ExtendedArpEvent, MacAddr};
