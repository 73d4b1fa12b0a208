//! Elapsed-time bookkeeping for the current track.

use std::time::{Duration, Instant};

/// Wall-clock based position: time accumulated before the last resume plus
/// the time since then.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct Clock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Clock {
    /// Restart at `position`, running or not.
    pub(super) fn reset(&mut self, position: Duration, running: bool, now: Instant) {
        self.accumulated = position;
        self.started_at = running.then_some(now);
    }

    pub(super) fn pause(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    pub(super) fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(super) fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }
}

/// Index after `current` in a list of `len`, wrapping.
pub(super) fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % len))
}

/// Index before `current` in a list of `len`, wrapping.
pub(super) fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    })
}

/// `elapsed` moved by `secs`, clamped at zero.
pub(super) fn seek_target(elapsed: Duration, secs: i32) -> Duration {
    let cur = elapsed.as_secs() as i64;
    Duration::from_secs((cur + i64::from(secs)).max(0) as u64)
}
