//! Transient messages shown on top of the track list.

use std::time::{Duration, Instant};

use crate::lyrics::Report;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>, level: NoticeLevel, now: Instant, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            level,
            expires_at: now + ttl,
        }
    }

    pub fn from_report(report: Report, now: Instant, ttl: Duration) -> Self {
        let (text, level) = match report {
            Report::Info(t) => (t, NoticeLevel::Info),
            Report::Warning(t) => (t, NoticeLevel::Warning),
            Report::Error(t) => (t, NoticeLevel::Error),
        };
        Self::new(text, level, now, ttl)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
