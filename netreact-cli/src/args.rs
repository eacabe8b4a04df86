//! CLI argument parsing

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "netreact")]
#[command(version, about = "Passive ARP network monitoring tool", long_about = None)]
pub struct Cli {
    /// Interface name, e.g. eth0
    #[arg(short = 'i', long)]
    pub interface: String,

    /// BPF filter, e.g. "arp and src host not 0.0.0.0"
    #[arg(short = 'f', long, default_value = "arp")]
    pub filter: String,

    /// Packet event mask, one 0/1 flag per alert category
    #[arg(long = "packet-events", value_name = "MASK", default_value = "1111111")]
    pub packet_events: String,

    /// Host event mask, one 0/1 flag per alert category
    #[arg(long = "host-events", value_name = "MASK", default_value = "1111111")]
    pub host_events: String,

    /// Expected CIDR range; addresses outside it raise alerts
    #[arg(short = 'c', long, value_name = "CIDR", default_value = "0.0.0.0/0")]
    pub expected_cidr: String,

    /// Directory where to store the event files, relative to the
    /// working directory (default: working directory)
    #[arg(short = 'd', long, value_name = "DIR", default_value = "")]
    pub event_dir: String,

    /// Execution log file
    #[arg(short = 'l', long, value_name = "FILE", default_value = "netreact.log")]
    pub log_file: String,

    /// State file for persisting the host cache across runs
    #[arg(short = 's', long, value_name = "FILE")]
    pub state_file: Option<String>,

    /// Put the interface in promiscuous mode
    #[arg(short = 'p', long)]
    pub promiscuous: bool,

    /// Disable the textual user interface
    #[arg(long = "no-ui")]
    pub no_ui: bool,

    /// Auto cleanup generated event files after n seconds (0 disables)
    #[arg(short = 'a', long = "auto-cleanup", value_name = "SECONDS", default_value_t = 0)]
    pub auto_cleanup_delay: u64,

    /// File with excluded IP addresses, one per line
    #[arg(long = "exclude-ips", value_name = "FILE")]
    pub exclude_ips: Option<String>,

    /// File with excluded MAC addresses, one per line
    #[arg(long = "exclude-macs", value_name = "FILE")]
    pub exclude_macs: Option<String>,

    /// File with excluded IP-MAC address pairs, one "ip,mac" per line
    #[arg(long = "exclude-pairs", value_name = "FILE")]
    pub exclude_pairs: Option<String>,
}
