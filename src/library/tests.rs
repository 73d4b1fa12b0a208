use super::Track;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn display_joins_artist_and_title() {
    let t = Track::new(
        PathBuf::from("/tmp/Song.mp3"),
        "Song".into(),
        Some("  Artist  ".into()),
        None,
    );
    assert_eq!(t.display, "Artist - Song");

    let t = Track::new(PathBuf::from("/tmp/Song.mp3"), "Song".into(), None, None);
    assert_eq!(t.display, "Song");

    let t = Track::new(
        PathBuf::from("/tmp/Song.mp3"),
        "Song".into(),
        Some("   ".into()),
        None,
    );
    assert_eq!(t.display, "Song");
}

#[test]
fn duration_secs_truncates_and_defaults_to_zero() {
    let t = Track::new(
        PathBuf::from("/tmp/a.mp3"),
        "a".into(),
        None,
        Some(Duration::from_millis(187_900)),
    );
    assert_eq!(t.duration_secs(), 187);

    let t = Track::new(PathBuf::from("/tmp/a.mp3"), "a".into(), None, None);
    assert_eq!(t.duration_secs(), 0);
}
