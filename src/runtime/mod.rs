use std::env;
use std::path::Path;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::library::scan;
use crate::logging;
use crate::lyrics::{Id3TagStore, LyricSession, LyricWorker, SyncEngine};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    if let Some(path) = logging::init(&settings.log) {
        info!(log = %path.display(), "cantabile starting");
    }
    if let Some(msg) = fallback {
        warn!("{msg}");
    }

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let tracks = scan(Path::new(&dir), &settings.library);
    let audio_player = AudioPlayer::new(tracks.clone())?;
    let worker = LyricWorker::spawn(Box::new(Id3TagStore::new()))?;

    let session = LyricSession::new(
        &settings.lyrics.preferred_language,
        SyncEngine::new(settings.lyrics.lead_ms),
    );
    let mut app = App::new(tracks, session);
    app.set_current_dir(dir);
    app.set_playback_handle(audio_player.playback_handle());
    app.set_notice_ttl(Duration::from_secs(settings.ui.notice_seconds));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &audio_player, &worker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        warn!(error = %e, "event loop ended with an error");
    }
    info!("cantabile exiting");
    run_result
}
