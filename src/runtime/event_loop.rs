use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, NoticeLevel, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::lyrics::LyricWorker;
use crate::ui;

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and the lyric worker. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    worker: &LyricWorker,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply finished lyric work; stale generations are dropped by the session.
        while let Some(event) = worker.try_recv() {
            if let Some(report) = app.lyrics.apply(event) {
                app.report(report);
            }
        }

        // Sync playback state from audio thread; optionally follow now-playing.
        if let Some((index, _, playing)) = app.playback_snapshot() {
            if let Some(idx) = index {
                if app.follow_playback && app.selected != idx {
                    app.set_selected(idx);
                }
            }
            app.playback = match (index, playing) {
                (None, _) => PlaybackState::Stopped,
                (Some(_), true) => PlaybackState::Playing,
                (Some(_), false) => PlaybackState::Paused,
            };
            if let Some(job) = app.sync_song(index) {
                worker.submit(job);
            }
        }

        app.expire_notice(Instant::now());

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls, &settings.lyrics))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, worker)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    worker: &LyricWorker,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('j') => {
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Char('k') => {
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                let playing_selected = app.playback == PlaybackState::Playing
                    && app
                        .playback_snapshot()
                        .and_then(|(index, _, _)| index)
                        .is_some_and(|idx| idx == app.selected);
                if !playing_selected {
                    app.follow_playback_on();
                    let _ = audio_player.send(AudioCmd::Play(app.selected));
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.follow_playback_on();
            match app.playback {
                PlaybackState::Stopped => {
                    if app.has_tracks() {
                        let _ = audio_player.send(AudioCmd::Play(app.selected));
                    }
                }
                PlaybackState::Playing | PlaybackState::Paused => {
                    let _ = audio_player.send(AudioCmd::TogglePause);
                }
            }
        }
        KeyCode::Char('s') => {
            let _ = audio_player.send(AudioCmd::Stop);
        }
        KeyCode::Char('l') => {
            if app.has_tracks() {
                app.follow_playback_on();
                let _ = audio_player.send(AudioCmd::Next);
            }
        }
        KeyCode::Char('h') => {
            if app.has_tracks() {
                app.follow_playback_on();
                let _ = audio_player.send(AudioCmd::Prev);
            }
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i32;
            let _ = audio_player.send(AudioCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i32;
            let _ = audio_player.send(AudioCmd::SeekBy(-secs));
        }
        KeyCode::Char('y') => match app.lyrics.switch_job() {
            Some(job) => worker.submit(job),
            None => app.notify("No song is playing", NoticeLevel::Warning),
        },
        KeyCode::Char('+') | KeyCode::Char('=') => {
            shift_lyrics(app, worker, settings.lyrics.offset_step_ms);
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            shift_lyrics(app, worker, settings.lyrics.offset_step_ms.saturating_neg());
        }
        KeyCode::Char('e') => match app.lyrics.embed_job() {
            Some(job) => worker.submit(job),
            None => app.notify("No song is playing", NoticeLevel::Warning),
        },
        _ => {}
    }

    Ok(false)
}

fn shift_lyrics(app: &mut App, worker: &LyricWorker, delta_ms: i64) {
    match app.lyrics.adjust_job(delta_ms) {
        Some(job) => {
            debug!(delta_ms, "shifting lyric timing");
            worker.submit(job);
        }
        None => app.notify("No lyric to adjust", NoticeLevel::Warning),
    }
}
