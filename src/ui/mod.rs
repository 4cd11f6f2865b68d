// src/ui/mod.rs
//! Terminal front end.
//!
//! Keys:
//! - Up/Down (j/k): move selection, or scroll an open preview
//! - Enter or double-click: open folder / play video / view document
//! - Backspace or b: back (closes an open preview)
//! - Home or h: home
//! - u: parent folder
//! - r: reconnect (or refresh)
//! - .: toggle hidden entries
//! - q/Esc: quit (closes an open preview)

pub mod app;
pub mod render;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::{App, Reconnect};

use crate::player::Launcher;

/// Runs `restore` when dropped, including while unwinding from a panic.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        RestoreGuard { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

pub fn run_tui<L: Launcher>(mut app: App<L>) -> Result<()> {
    let _guard = RestoreGuard::new(restore_terminal);
    let mut term = init_terminal()?;
    ui_loop(&mut term, &mut app)
}

fn ui_loop<L: Launcher>(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App<L>) -> Result<()> {
    let tick = Duration::from_millis(100);

    loop {
        terminal.draw(|f| render::draw(f, app))?;

        if !event::poll(tick).context("poll terminal events")? {
            continue;
        }

        let event = event::read().context("read terminal event")?;
        if app.preview.is_some() {
            handle_preview_event(app, event);
            continue;
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Enter => app.activate_selected(),
                KeyCode::Backspace | KeyCode::Char('b') => app.back(),
                KeyCode::Home | KeyCode::Char('h') => app.home(),
                KeyCode::Char('u') => app.up(),
                KeyCode::Char('.') => app.toggle_hidden(),
                KeyCode::Char('r') => {
                    if app.is_share_known() {
                        app.status = "Connecting...".into();
                        terminal.draw(|f| render::draw(f, app))?;
                    }
                    app.reconnect();
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => app.click(mouse.row, Instant::now()),
                MouseEventKind::ScrollDown => app.select_next(),
                MouseEventKind::ScrollUp => app.select_prev(),
                _ => {}
            },
            _ => {}
        }
    }
}

fn handle_preview_event<L: Launcher>(app: &mut App<L>, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.close_preview(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_preview_up(),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_preview_down(),
            _ => {}
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => app.scroll_preview_down(),
            MouseEventKind::ScrollUp => app.scroll_preview_up(),
            _ => {}
        },
        _ => {}
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("create terminal")?;
    Ok(terminal)
}

fn restore_terminal() {
    disable_raw_mode().ok();
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, cursor::Show).ok();
}
