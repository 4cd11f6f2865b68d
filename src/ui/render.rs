// src/ui/render.rs
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::App;
use crate::filesystem::{DirectoryEntry, EntryKind};
use crate::player::Launcher;
use crate::utils::formatter;

const NAME_WIDTH: usize = 48;

pub fn draw<L: Launcher>(f: &mut Frame, app: &mut App<L>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(5)])
        .split(f.size());

    let back_hint = if app.nav.can_go_back() { "  [b] back" } else { "" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(app.display_path(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(back_hint, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Current path"));
    f.render_widget(header, chunks[0]);

    app.list_area = chunks[1];
    if let Some(preview) = &app.preview {
        let body = Paragraph::new(preview.lines.iter().map(|l| Line::from(l.as_str())).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL).title(format!("Preview: {}", preview.title)))
            .scroll((preview.scroll, 0));
        f.render_widget(body, chunks[1]);
    } else {
        let items: Vec<ListItem> = app.entries.iter().map(entry_item).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Share"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, chunks[1], &mut app.list_state);
    }

    let keys = if app.preview.is_some() {
        "keys: ↑/↓ scroll | q/Esc/b close preview".to_string()
    } else {
        let reconnect_hint = if app.is_share_known() { "r reconnect" } else { "r refresh" };
        format!(
            "keys: ↑/↓ select | Enter/double-click open | b back | h home | u up | {} | . hidden | q quit",
            reconnect_hint
        )
    };
    let footer = Paragraph::new(vec![
        Line::from(format!("status: {}", app.status)),
        Line::from(app.summary.clone()),
        Line::from(keys),
    ])
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(footer, chunks[2]);
}

fn entry_item(entry: &DirectoryEntry) -> ListItem<'static> {
    let (marker, color) = match entry.kind {
        EntryKind::Folder => ("[D]", Color::Blue),
        EntryKind::Video => ("[V]", Color::Green),
        EntryKind::Other if entry.is_document() => ("[T]", Color::Yellow),
        EntryKind::Other => ("[ ]", Color::Gray),
    };
    let mut name = entry.name.clone();
    if name.chars().count() > NAME_WIDTH {
        name = name.chars().take(NAME_WIDTH - 1).collect::<String>() + "…";
    }
    let size = if entry.is_folder() { String::new() } else { formatter::format_size(entry.size) };

    let mut style = Style::default().fg(color);
    if entry.is_hidden {
        style = style.add_modifier(Modifier::DIM);
    }

    ListItem::new(Line::from(vec![
        Span::styled(format!("{} {:<width$}", marker, name, width = NAME_WIDTH), style),
        Span::raw(format!(" {:<10} {:>10}  {}", formatter::kind_label(entry), size, formatter::format_modified(entry.modified))),
    ]))
}
