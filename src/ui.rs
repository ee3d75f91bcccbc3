//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::config::UiSettings;
use crate::player::{PlaybackState, Player};
use crate::track::Track;

/// Snapshot of the filter input owned by the event loop.
pub struct FilterView<'a> {
    pub active: bool,
    pub query: &'a str,
}

const FOOTER_TEXT: &str =
    "[←/→] prev/next song | [space] play/pause | [/] filter | [esc] clear filter | [q] quit";

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Queue positions whose track matches the filter query, title or artist.
pub fn filtered_indices(queue: &[Track], query: &str, separator: &str) -> Vec<usize> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return (0..queue.len()).collect();
    }

    queue
        .iter()
        .enumerate()
        .filter(|(_, t)| t.display_line(separator).to_lowercase().contains(&q))
        .map(|(i, _)| i)
        .collect()
}

fn neighbour_line(label: &str, track: Option<&Track>, separator: &str) -> String {
    match track {
        Some(t) => format!("{label}: {}", t.display_line(separator)),
        None => format!("{label}: -"),
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    player: &Player,
    elapsed: Duration,
    filter: &FilterView,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" segue ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Session box: now playing plus the two neighbour cells.
    let state = player.state();
    let sep = ui_settings.artist_separator.as_str();
    let status = {
        let mut lines: Vec<String> = Vec::new();

        match state.current() {
            Some(track) => {
                let mode = match player.playback() {
                    PlaybackState::Playing => "Playing",
                    PlaybackState::Paused => "Paused",
                    PlaybackState::Stopped => "Stopped",
                };
                lines.push(format!(
                    "Song: {} [{} {}]",
                    track.display_line(sep),
                    mode,
                    format_mmss(elapsed)
                ));
            }
            None => lines.push("Song: - (press space to start the queue)".to_string()),
        }

        lines.push(neighbour_line("Next", state.next(), sep));
        lines.push(neighbour_line("Prev", state.prev(), sep));

        if filter.active || !filter.query.trim().is_empty() {
            lines.push(format!("Filter: {}", filter.query));
        }

        lines.join("\n")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" session "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Queue list, kept centred on the current track.
    {
        let queue = state.queue();
        let visible_positions = filtered_indices(queue, filter.query, sep);

        let current_pos = state
            .current()
            .and_then(|c| visible_positions.iter().position(|&i| queue[i].id == c.id));

        let total = visible_positions.len();
        let list_height = chunks[2].height as usize;
        let sel_pos = current_pos.unwrap_or(0);
        let (start, end, selected_in_window) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let items: Vec<ListItem> = visible_positions[start..end]
            .iter()
            .map(|&i| ListItem::new(queue[i].display_line(sep)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" queue "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        if current_pos.is_some() {
            list_state.select(Some(selected_in_window));
        }
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }

    // Footer
    let footer = Paragraph::new(FOOTER_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
