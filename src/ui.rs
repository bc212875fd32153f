//! Terminal rendering with `ratatui`.
//!
//! The screen is a single player widget: header, now-playing status (icons,
//! track info, time), the track list and a controls footer.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::player::{AudioOutput, Clock, PlaybackController, TrackInfoHandle};
use crate::toggle::ToggleHandle;

/// Collaborator handles shared with the controller.
pub struct Widgets {
    pub track_info: TrackInfoHandle,
    pub play_pause: ToggleHandle,
    pub shuffle: ToggleHandle,
}

const CONTROLS: [(&str, &str); 5] = [
    ("space/p", "play/pause"),
    ("h/←", "previous"),
    ("l/→", "next"),
    ("s", "shuffle"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total / -remaining`, or just `elapsed` when the length is unknown.
fn time_text(elapsed: Duration, total: Option<Duration>) -> String {
    match total {
        Some(t) => format!(
            "{} / {} / -{}",
            format_mmss(elapsed),
            format_mmss(t),
            format_mmss(t.saturating_sub(elapsed))
        ),
        None => format_mmss(elapsed),
    }
}

/// Slice of a `total`-long list to show in `height` rows keeping `selected`
/// centred when possible. Returns `(start, end, selected_in_window)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let start = selected.saturating_sub(half).min(total - height);
    (start, start + height, selected - start)
}

fn visible_icon(handle: &ToggleHandle) -> String {
    handle
        .lock()
        .map(|b| b.visible().to_string())
        .unwrap_or_default()
}

pub fn draw<O: AudioOutput, C: Clock>(
    frame: &mut Frame,
    player: &PlaybackController<O, C>,
    widgets: &Widgets,
    ui_settings: &UiSettings,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let now_playing = {
        let info = widgets
            .track_info
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        let mut line = format!(
            "{}  {}  ",
            visible_icon(&widgets.play_pause),
            visible_icon(&widgets.shuffle)
        );
        match player.current_track() {
            Some(track) if !info.is_empty() => {
                line.push_str(&format!(
                    "{info} [{}]",
                    time_text(player.elapsed(), track.duration)
                ));
            }
            Some(track) => line.push_str(&format!("{} (stopped)", track.name)),
            None => line.push_str("Stopped"),
        }
        if let Some(msg) = status {
            line.push_str(&format!("\n! {msg}"));
        }
        line
    };
    let status_par = Paragraph::new(now_playing)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    {
        let tracks = player.tracks();
        let current = player.state().current_index.unwrap_or(0);
        // Only build ListItems for the visible rows.
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let (start, end, selected) = visible_window(tracks.len(), list_height, current);

        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(i, t)| ListItem::new(format!("{:>3}. {}", start + i, t.name)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if player.state().current_index.is_some() && !tracks.is_empty() {
            state.select(Some(selected));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(Block::default().borders(Borders::ALL).title(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
