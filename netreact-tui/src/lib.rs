//! Terminal UI for Netreact-RS
//!
//! A live table of every observed host: IP, MAC, vendor, first and
//! last seen, packet count. The processing path pushes updates into
//! a shared snapshot; the UI thread only ever reads it.

pub mod app;
pub mod runner;

pub use app::{HostRow, HostTable};
pub use runner::run_tui;
