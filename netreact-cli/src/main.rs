//! netreact: passive ARP network monitoring tool
//!
//! Wires the pieces together: capture on one interface, exclusion
//! filtering, the host cache, event classification with durable
//! notification files, optional state persistence, the retention
//! janitor and the live host table UI. Observation processing is
//! strictly single-threaded; only the UI and the janitor run on
//! their own threads.

mod args;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};

use netreact_capture::{ArpCapture, CaptureConfig};
use netreact_core::{AppState, ArpEvent, HostCache};
use netreact_events::filter::{read_ips, read_macs, read_pairs};
use netreact_events::{
    ArpEventFilter, ArpEventHandler, EventJanitor, EventMask, ExpectedCidr, NotificationStore,
};
use netreact_tui::{run_tui, HostTable};

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let packet_mask: EventMask = cli
        .packet_events
        .parse()
        .context("invalid --packet-events mask")?;
    let host_mask: EventMask = cli
        .host_events
        .parse()
        .context("invalid --host-events mask")?;
    let expected_cidr: ExpectedCidr = cli
        .expected_cidr
        .parse()
        .context("invalid --expected-cidr range")?;

    let event_dir = resolve_event_dir(&cli.event_dir)?;
    let filter = load_filter(&cli)?;
    let cache = load_cache(cli.state_file.as_deref())?;

    if cli.auto_cleanup_delay > 0 {
        EventJanitor::new(&event_dir, cli.auto_cleanup_delay)?.start();
        info!(delay_secs = cli.auto_cleanup_delay, "event file auto cleanup enabled");
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
        })
        .context("failed to install signal handler")?;
    }

    let (ip_to_mac, mac_to_ip) = cache.ip_and_mac_maps();
    let mut handler = ArpEventHandler::new(
        NotificationStore::new(&event_dir),
        packet_mask,
        host_mask,
        expected_cidr,
        ip_to_mac,
        mac_to_ip,
    );

    let config = CaptureConfig {
        promiscuous: cli.promiscuous,
        bpf_filter: cli.filter.clone(),
        ..CaptureConfig::default()
    };
    let mut capture = ArpCapture::open(&cli.interface, &config)?;

    let (table, ui_thread) = if cli.no_ui {
        (None, None)
    } else {
        let table = HostTable::from_cache(&cache, netreact_oui::vendor_for);
        let ui_table = table.clone();
        let interface = cli.interface.clone();
        let ui_shutdown = Arc::clone(&shutdown);
        let handle = std::thread::spawn(move || {
            if let Err(e) = run_tui(ui_table, &interface, ui_shutdown) {
                error!(error = %e, "UI failed");
            }
        });
        (Some(table), Some(handle))
    };

    info!(interface = %cli.interface, event_dir = %event_dir.display(), "netreact started");

    let mut cache = cache;
    let run_result = capture.run(&shutdown, |event| {
        process_event(event, &filter, &mut cache, &mut handler, table.as_ref());
    });

    // the capture loop is the only writer; once it has returned the
    // cache is stable and safe to flush
    shutdown.store(true, Ordering::Relaxed);
    if let Some(handle) = ui_thread {
        let _ = handle.join();
    }

    if let Some(state_file) = cli.state_file.as_deref() {
        save_cache(&cache, state_file)?;
    }

    run_result?;
    info!("netreact stopped");
    Ok(())
}

/// Fold one captured observation into the pipeline. Excluded
/// observations are dropped before they can touch the cache, the
/// reverse indexes or the event directory.
fn process_event(
    event: ArpEvent,
    filter: &ArpEventFilter,
    cache: &mut HostCache,
    handler: &mut ArpEventHandler,
    table: Option<&HostTable>,
) {
    if filter.is_excluded(&event.ip.to_string(), &event.mac.to_string()) {
        return;
    }

    let mut ext = cache.update(event);
    ext.mac_vendor = netreact_oui::vendor_for(ext.mac());
    handler.handle(&ext);

    if let Some(table) = table {
        table.upsert(&ext);
    }
}

// log to a file in JSON, one record per line; stdout belongs to the UI
fn init_logging(log_file: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file '{log_file}'"))?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

/// Resolve the event directory relative to the working directory and
/// verify it is actually writable before capture starts.
fn resolve_event_dir(event_dir: &str) -> Result<PathBuf> {
    let dir = std::env::current_dir()
        .context("failed to determine working directory")?
        .join(event_dir);

    let metadata = std::fs::metadata(&dir)
        .with_context(|| format!("event directory '{}' does not exist", dir.display()))?;
    if !metadata.is_dir() {
        bail!("event directory '{}' is not a directory", dir.display());
    }

    let probe = dir.join(".netreact-probe");
    std::fs::write(&probe, b"")
        .with_context(|| format!("event directory '{}' is not writable", dir.display()))?;
    std::fs::remove_file(&probe).ok();

    Ok(dir)
}

fn load_filter(cli: &Cli) -> Result<ArpEventFilter> {
    let ips = match cli.exclude_ips.as_deref() {
        Some(path) => read_ips(&read_list_file(path)?)?,
        None => Default::default(),
    };
    let macs = match cli.exclude_macs.as_deref() {
        Some(path) => read_macs(&read_list_file(path)?)?,
        None => Default::default(),
    };
    let pairs = match cli.exclude_pairs.as_deref() {
        Some(path) => read_pairs(&read_list_file(path)?)?,
        None => Default::default(),
    };
    Ok(ArpEventFilter::new(ips, macs, pairs))
}

fn read_list_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read exclusion file '{path}'"))
}

/// Restore the host cache from the state file, or start empty when
/// no file is configured or it does not exist yet. A state file that
/// exists but fails validation is a startup error, not a warning.
fn load_cache(state_file: Option<&str>) -> Result<HostCache> {
    let Some(path) = state_file else {
        return Ok(HostCache::new());
    };
    if !Path::new(path).exists() {
        return Ok(HostCache::new());
    }

    let data = std::fs::read(path).with_context(|| format!("failed to read state file '{path}'"))?;
    let state = AppState::from_json(&data)?;
    state.validate()?;
    let cache = HostCache::from_app_state(&state)?;
    info!(hosts = cache.len(), state_file = path, "host cache restored");
    Ok(cache)
}

fn save_cache(cache: &HostCache, state_file: &str) -> Result<()> {
    let data = cache.to_app_state().to_json()?;
    std::fs::write(state_file, data)
        .with_context(|| format!("failed to write state file '{state_file}'"))?;
    info!(hosts = cache.len(), state_file, "host cache saved");
    Ok(())
}
