//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, NoticeLevel};
use crate::config::{ControlsSettings, LyricsSettings, UiSettings};

/// Render the controls help text, incorporating the configured steps.
fn controls_text(scrub_seconds: u64, offset_step_ms: i64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[h/l] prev/next song".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[enter] play selected song".to_string(),
        "[space/p] play/pause".to_string(),
        "[s] stop".to_string(),
        "[y] lyric language".to_string(),
        format!("[-/+] lyric timing -/+{offset_step_ms}ms"),
        "[e] embed .lrc".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    if app.follow_playback {
        parts.push(" CURSOR: Follow".to_string());
    } else {
        parts.push(" CURSOR: Free-roam".to_string());
    }

    match app.playback_snapshot() {
        Some((Some(idx), elapsed, playing)) if idx < app.tracks.len() => {
            let track = &app.tracks[idx];
            let time = match track.duration {
                Some(total) => format!("{}/{}", format_mmss(elapsed), format_mmss(total)),
                None => format_mmss(elapsed),
            };
            parts.push(format!("Song: {} [{}]", track.display, time));
            parts.push(if playing { "Playing" } else { "Paused" }.to_string());

            parts.push(format!(
                "Lyric: {}",
                app.lyrics.active_language().unwrap_or("none")
            ));
        }
        _ => parts.push("Stopped".to_string()),
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Visible slice of the list keeping `selected` centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    lyrics_settings: &LyricsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cantabile ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Lyric line
    let elapsed = app
        .playback_snapshot()
        .map_or(Duration::ZERO, |(_, elapsed, _)| elapsed);
    let caption = app.current_caption(elapsed);
    let lyric_par = Paragraph::new(caption)
        .bold()
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" lyrics "));
    frame.render_widget(lyric_par, chunks[2]);

    // Main list
    {
        let total = app.tracks.len();
        let (start, end) = visible_window(total, chunks[3].height as usize, app.selected);

        let visible_items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .map(|t| ListItem::new(t.display.as_str()))
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Notice popup over the list
    if let Some(notice) = &app.notice {
        let width = (notice.text.chars().count() as u16).saturating_add(4);
        let popup_area = centered_rect_sized(width, 3, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        let popup = Paragraph::new(notice.text.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }

    let footer_text = controls_text(
        controls_settings.scrub_seconds,
        lyrics_settings.offset_step_ms,
    );
    let footer = Paragraph::new(footer_text)
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

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_millis(187_900)), "03:07");
    }

    #[test]
    fn controls_text_uses_configured_steps() {
        let text = controls_text(10, 250);
        assert!(text.contains("scrub -/+10s"));
        assert!(text.contains("lyric timing -/+250ms"));
    }

    #[test]
    fn visible_window_centers_selection() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(100, 10, 50), (45, 55));
        assert_eq!(visible_window(100, 10, 98), (90, 100));
        assert_eq!(visible_window(100, 10, 2), (0, 10));
    }
}
