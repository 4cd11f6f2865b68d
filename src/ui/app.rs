// src/ui/app.rs
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::filesystem::{DirectoryEntry, EntryKind, NavigatorSession};
use crate::mount::{self, ShareLocator};
use crate::player::{Launcher, PlaybackDispatcher, SystemLauncher};
use crate::preview::{Preview, PreviewManager};
use crate::utils::formatter;

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// What `r` does when the share is known by server and name.
#[derive(Debug, Clone)]
pub struct Reconnect {
    pub tool: String,
    pub locator: ShareLocator,
    pub timeout: Duration,
}

/// UI state. Owns the navigator session and the dispatcher.
pub struct App<L = SystemLauncher> {
    pub nav: NavigatorSession,
    pub dispatcher: PlaybackDispatcher<L>,
    pub entries: Vec<DirectoryEntry>,
    pub list_state: ListState,
    pub status: String,
    pub summary: String,
    /// Set by the renderer so mouse rows can be mapped back to entries.
    pub list_area: Rect,
    /// Open document pane; replaces the listing while set.
    pub preview: Option<Preview>,
    pub previews: PreviewManager,
    reconnect: Option<Reconnect>,
    last_click: Option<(usize, Instant)>,
}

impl<L: Launcher> App<L> {
    pub fn new(nav: NavigatorSession, dispatcher: PlaybackDispatcher<L>, reconnect: Option<Reconnect>) -> Self {
        let mut app = App {
            nav,
            dispatcher,
            entries: Vec::new(),
            list_state: ListState::default(),
            status: "Ready".into(),
            summary: String::new(),
            list_area: Rect::default(),
            preview: None,
            previews: PreviewManager::new(),
            reconnect,
            last_click: None,
        };
        app.refresh();
        app
    }

    pub fn display_path(&self) -> String {
        formatter::display_path(self.nav.root(), self.nav.current_path())
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    /// Re-lists the current directory. On failure the list is emptied and the error shown.
    pub fn refresh(&mut self) -> bool {
        match self.nav.list_current_directory() {
            Ok(entries) => {
                self.summary = formatter::summary(&entries);
                self.entries = entries;
                self.list_state.select(if self.entries.is_empty() { None } else { Some(0) });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing failed");
                self.entries.clear();
                self.list_state.select(None);
                self.summary.clear();
                self.status = format!("Error: {e}");
                false
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((i + 1).min(self.entries.len() - 1)));
    }

    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    pub fn activate_selected(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.activate(i);
        }
    }

    /// Folder: go in. Video: hand it to a player. Document: preview or open it. Anything else: say so.
    pub fn activate(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index).cloned() else { return };

        match entry.kind {
            EntryKind::Folder => {
                if let Err(e) = self.nav.enter(&entry) {
                    self.status = format!("Error: {e}");
                    return;
                }
                if self.refresh() {
                    self.status = format!("Opened {}", entry.name);
                }
            }
            EntryKind::Video => match self.dispatcher.play(&entry) {
                Ok(launched) => self.status = format!("Playing: {} ({})", entry.name, launched.player),
                Err(e) => {
                    tracing::warn!(error = %e, "playback failed");
                    self.status = format!("Error: {e}");
                }
            },
            EntryKind::Other if entry.is_document() => self.open_document(&entry),
            EntryKind::Other => self.status = format!("{} is not a video", entry.name),
        }
    }

    fn open_document(&mut self, entry: &DirectoryEntry) {
        match self.previews.get_preview(&entry.path) {
            Ok(preview) => {
                self.preview = Some(preview);
                self.status = format!("Viewing {}", entry.name);
                return;
            }
            Err(e) => tracing::debug!(error = %e, document = %entry.path.display(), "no terminal preview"),
        }

        match self.dispatcher.open_document(entry) {
            Ok(launched) => self.status = format!("Opened {} ({})", entry.name, launched.player),
            Err(e) => {
                tracing::warn!(error = %e, "opening document failed");
                self.status = format!("Error: {e}");
            }
        }
    }

    pub fn close_preview(&mut self) {
        if self.preview.take().is_some() {
            self.status = "Ready".into();
        }
    }

    pub fn scroll_preview_down(&mut self) {
        if let Some(preview) = self.preview.as_mut() {
            preview.scroll_down();
        }
    }

    pub fn scroll_preview_up(&mut self) {
        if let Some(preview) = self.preview.as_mut() {
            preview.scroll_up();
        }
    }

    pub fn back(&mut self) {
        if !self.nav.can_go_back() {
            self.status = "Already at the first folder".into();
            return;
        }
        self.nav.go_back();
        if self.refresh() {
            self.status = "Back".into();
        }
    }

    pub fn home(&mut self) {
        self.nav.go_home();
        if self.refresh() {
            self.status = "Home".into();
        }
    }

    pub fn up(&mut self) {
        if self.nav.go_up().is_none() {
            self.status = "Already at the share root".into();
            return;
        }
        if self.refresh() {
            self.status = "Up".into();
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.nav.show_hidden = !self.nav.show_hidden;
        if self.refresh() {
            self.status = if self.nav.show_hidden { "Showing hidden entries" } else { "Hiding hidden entries" }.into();
        }
    }

    /// Remounts the share when it is known, otherwise just lists again.
    pub fn reconnect(&mut self) {
        let Some(spec) = self.reconnect.clone() else {
            if self.refresh() {
                self.status = "Refreshed".into();
            }
            return;
        };

        match mount::connect(&spec.tool, &spec.locator, spec.timeout) {
            Ok(root) => {
                self.nav.set_root(root);
                if self.refresh() {
                    self.status = format!("Connected to {}", spec.locator.uri());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "reconnect failed");
                self.status = format!("Error: {e}");
            }
        }
    }

    pub fn is_share_known(&self) -> bool {
        self.reconnect.is_some()
    }

    /// Maps a terminal row inside the list to an entry index.
    pub fn row_to_index(&self, row: u16) -> Option<usize> {
        let area = self.list_area;
        // first and last rows are the border
        if row <= area.y || row >= area.bottom().saturating_sub(1) {
            return None;
        }
        let index = self.list_state.offset() + usize::from(row - area.y - 1);
        (index < self.entries.len()).then_some(index)
    }

    /// Selects the clicked row; a second click on the same row within 400ms activates it.
    pub fn click(&mut self, row: u16, now: Instant) {
        let Some(index) = self.row_to_index(row) else { return };
        self.list_state.select(Some(index));

        match self.last_click.take() {
            Some((prev, at)) if prev == index && now.duration_since(at) <= DOUBLE_CLICK => self.activate(index),
            _ => self.last_click = Some((index, now)),
        }
    }

    pub fn current_path(&self) -> PathBuf {
        self.nav.current_path().to_path_buf()
    }
}
