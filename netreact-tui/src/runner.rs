//! TUI event loop: terminal setup/teardown and table rendering

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Terminal,
};

use crate::app::{HostRow, HostTable};

const TICK: Duration = Duration::from_millis(250);

/// Run the host table UI until the user quits or the shutdown flag
/// is raised elsewhere. Quitting from the UI raises the flag so the
/// rest of the process winds down too.
pub fn run_tui(table: HostTable, interface: &str, shutdown: Arc<AtomicBool>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &table, interface, &shutdown);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    table: &HostTable,
    interface: &str,
    shutdown: &AtomicBool,
) -> io::Result<()> {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return Ok(());
        }

        let rows = table.snapshot();
        terminal.draw(|f| render(f, &rows, interface))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c =
                    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Char('q') || ctrl_c {
                    shutdown.store(true, Ordering::Relaxed);
                    return Ok(());
                }
            }
        }
    }
}

fn render(f: &mut ratatui::Frame, rows: &[HostRow], interface: &str) {
    let header = Row::new(vec![
        Cell::from("IP Address"),
        Cell::from("MAC Address"),
        Cell::from("MAC Vendor"),
        Cell::from("First seen"),
        Cell::from("Last seen"),
        Cell::from("Packet count"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.ip.clone()),
            Cell::from(row.mac.clone()),
            Cell::from(row.mac_vendor.clone()),
            Cell::from(format_ts(row.first_ts)),
            Cell::from(format_ts(row.last_ts)),
            Cell::from(row.count.to_string()),
        ])
    });

    let widths = [
        Constraint::Length(18),
        Constraint::Length(20),
        Constraint::Length(30),
        Constraint::Length(22),
        Constraint::Length(22),
        Constraint::Length(14),
    ];

    let widget = Table::new(body, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" netreact - {interface} (q to quit) "))
            .style(Style::default().fg(Color::White)),
    );

    f.render_widget(widget, f.size());
}

fn format_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ts)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ts() {
        // fixed instant, rendered in UTC to keep the test stable
        let formatted = chrono::DateTime::from_timestamp_millis(1700000000000)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(formatted, "2023-11-14 22:13:20");
        assert_eq!(format_ts(1700000000000).len(), 19);
    }
}
