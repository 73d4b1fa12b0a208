use super::*;
use crate::audio::PlaybackInfo;
use crate::library::Track;
use crate::lyrics::worker::LyricJob;
use crate::lyrics::{LyricSession, Report, SyncEngine};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn t(title: &str) -> Track {
    Track::new(
        PathBuf::from(format!("/music/{title}.mp3")),
        title.into(),
        None,
        Some(Duration::from_secs(200)),
    )
}

fn app(titles: &[&str]) -> App {
    App::new(
        titles.iter().map(|s| t(s)).collect(),
        LyricSession::new("en", SyncEngine::default()),
    )
}

#[test]
fn next_prev_wrap_around() {
    let mut app = app(&["Alpha", "Beta", "Gamma"]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected, 1);
}

#[test]
fn next_prev_on_empty_library_are_noops() {
    let mut app = app(&[]);
    app.next();
    app.prev();
    assert_eq!(app.selected, 0);
    assert!(!app.has_tracks());
}

#[test]
fn set_selected_ignores_out_of_range() {
    let mut app = app(&["Alpha"]);
    app.set_selected(5);
    assert_eq!(app.selected, 0);
}

#[test]
fn sync_song_starts_a_new_generation_per_song() {
    let mut app = app(&["Alpha", "Beta"]);

    let job = app.sync_song(Some(0)).expect("load job");
    let first = job.generation();
    assert!(matches!(job, LyricJob::Load { ref path, .. } if path.ends_with("Alpha.mp3")));

    // Same song on the next tick: nothing to do.
    assert!(app.sync_song(Some(0)).is_none());
    assert_eq!(app.lyrics.generation(), first);

    let job = app.sync_song(Some(1)).expect("load job");
    assert!(job.generation() > first);
}

#[test]
fn sync_song_ends_the_session_when_playback_stops() {
    let mut app = app(&["Alpha"]);
    app.sync_song(Some(0));
    let generation = app.lyrics.generation();

    assert!(app.sync_song(None).is_none());
    assert!(app.lyrics.song().is_none());
    assert!(!app.lyrics.is_current(generation));
}

#[test]
fn now_playing_reads_the_shared_handle() {
    let mut app = app(&["Alpha", "Beta"]);
    assert!(app.now_playing().is_none());

    let handle = Arc::new(Mutex::new(PlaybackInfo {
        index: Some(1),
        elapsed: Duration::from_secs(12),
        playing: true,
    }));
    app.set_playback_handle(handle);

    assert_eq!(app.now_playing().map(|t| t.title.as_str()), Some("Beta"));
    let (_, elapsed, playing) = app.playback_snapshot().expect("snapshot");
    assert_eq!(elapsed, Duration::from_secs(12));
    assert!(playing);
}

#[test]
fn current_caption_is_empty_without_lyrics() {
    let mut app = app(&["Alpha"]);
    app.sync_song(Some(0));
    assert_eq!(app.current_caption(Duration::from_secs(5)), "");
}

#[test]
fn notices_expire_after_their_ttl() {
    let mut app = app(&["Alpha"]);
    app.set_notice_ttl(Duration::from_secs(3));
    app.report(Report::Warning("en lyric is the only lyric available".into()));

    let notice = app.notice.clone().expect("notice");
    assert_eq!(notice.level, NoticeLevel::Warning);

    app.expire_notice(notice.expires_at - Duration::from_millis(1));
    assert!(app.notice.is_some());

    app.expire_notice(notice.expires_at);
    assert!(app.notice.is_none());
}

#[test]
fn notice_from_report_keeps_text_and_level() {
    let now = Instant::now();
    let n = Notice::from_report(Report::Error("boom".into()), now, Duration::from_secs(1));
    assert_eq!(n.text, "boom");
    assert_eq!(n.level, NoticeLevel::Error);
    assert!(!n.is_expired(now));
}
