use std::time::{Duration, Instant};

use super::clock::{Clock, next_index, prev_index, seek_target};

#[test]
fn next_and_prev_wrap_around() {
    assert_eq!(next_index(Some(2), 3), Some(0));
    assert_eq!(next_index(Some(0), 3), Some(1));
    assert_eq!(next_index(None, 3), Some(0));
    assert_eq!(prev_index(Some(0), 3), Some(2));
    assert_eq!(prev_index(Some(2), 3), Some(1));
    assert_eq!(prev_index(None, 3), Some(2));
}

#[test]
fn empty_library_has_no_next_or_prev() {
    assert_eq!(next_index(Some(0), 0), None);
    assert_eq!(prev_index(None, 0), None);
}

#[test]
fn seek_target_clamps_at_zero() {
    assert_eq!(seek_target(Duration::from_secs(3), -5), Duration::ZERO);
    assert_eq!(
        seek_target(Duration::from_millis(10_700), 5),
        Duration::from_secs(15)
    );
}

#[test]
fn clock_stops_counting_while_paused() {
    let t0 = Instant::now();
    let mut clock = Clock::default();
    clock.reset(Duration::ZERO, true, t0);

    let t1 = t0 + Duration::from_secs(4);
    clock.pause(t1);
    assert_eq!(clock.elapsed(t1 + Duration::from_secs(10)), Duration::from_secs(4));

    let t2 = t1 + Duration::from_secs(10);
    clock.resume(t2);
    assert_eq!(clock.elapsed(t2 + Duration::from_secs(2)), Duration::from_secs(6));
}

#[test]
fn clock_reset_starts_from_seek_position() {
    let t0 = Instant::now();
    let mut clock = Clock::default();
    clock.reset(Duration::from_secs(30), false, t0);
    assert_eq!(clock.elapsed(t0 + Duration::from_secs(5)), Duration::from_secs(30));
}
