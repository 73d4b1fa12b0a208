//! Background thread running blocking tag I/O for the lyric session.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::cycle::{Switched, switch_track};
use super::embed::embed_sidecar;
use super::extract::extract;
use super::model::LyricCollection;
use super::offset::{Committed, adjust};
use super::tag::TagStore;
use crate::error::Result;

#[derive(Debug)]
pub enum LyricJob {
    /// Extract lyrics of a freshly started song.
    Load { generation: u64, path: PathBuf },
    /// Reload and move to the next language after `current`.
    Switch {
        generation: u64,
        path: PathBuf,
        current: Option<String>,
    },
    /// Shift the `language_tag` track of the file by `delta_ms` and reload.
    Adjust {
        generation: u64,
        path: PathBuf,
        language_tag: String,
        delta_ms: i64,
        preferred: String,
    },
    /// Embed the sidecar `.lrc` as `language_tag` and reload.
    Embed {
        generation: u64,
        path: PathBuf,
        language_tag: String,
    },
}

impl LyricJob {
    pub fn generation(&self) -> u64 {
        match self {
            LyricJob::Load { generation, .. }
            | LyricJob::Switch { generation, .. }
            | LyricJob::Adjust { generation, .. }
            | LyricJob::Embed { generation, .. } => *generation,
        }
    }
}

#[derive(Debug)]
pub struct LyricEvent {
    pub generation: u64,
    pub kind: LyricEventKind,
}

#[derive(Debug)]
pub enum LyricEventKind {
    Loaded(Result<LyricCollection>),
    Switched(Result<Switched>),
    Adjusted {
        delta_ms: i64,
        result: Result<Committed>,
    },
    Embedded {
        language_tag: String,
        result: Result<LyricCollection>,
    },
}

/// Execute one job synchronously.
pub fn run_job(store: &dyn TagStore, job: LyricJob) -> LyricEvent {
    let generation = job.generation();
    let kind = match job {
        LyricJob::Load { path, .. } => LyricEventKind::Loaded(extract(store, &path)),
        LyricJob::Switch { path, current, .. } => {
            LyricEventKind::Switched(switch_track(store, &path, current.as_deref()))
        }
        LyricJob::Adjust {
            path,
            language_tag,
            delta_ms,
            preferred,
            ..
        } => LyricEventKind::Adjusted {
            delta_ms,
            result: adjust(store, &path, &language_tag, delta_ms, &preferred),
        },
        LyricJob::Embed {
            path, language_tag, ..
        } => {
            let result = embed_sidecar(store, &path, &language_tag);
            LyricEventKind::Embedded {
                language_tag,
                result,
            }
        }
    };
    LyricEvent { generation, kind }
}

/// Handle to the lyric worker thread. Dropping it stops the thread.
pub struct LyricWorker {
    tx: Option<Sender<LyricJob>>,
    rx: Receiver<LyricEvent>,
    join: Option<JoinHandle<()>>,
}

impl LyricWorker {
    pub fn spawn(store: Box<dyn TagStore>) -> io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<LyricJob>();
        let (event_tx, event_rx) = mpsc::channel::<LyricEvent>();

        let join = thread::Builder::new()
            .name("lyrics".to_string())
            .spawn(move || {
                for job in job_rx {
                    debug!(?job, "lyric job");
                    if event_tx.send(run_job(store.as_ref(), job)).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            tx: Some(job_tx),
            rx: event_rx,
            join: Some(join),
        })
    }

    pub fn submit(&self, job: LyricJob) {
        let sent = self.tx.as_ref().map(|tx| tx.send(job));
        if !matches!(sent, Some(Ok(()))) {
            warn!("lyric worker is gone, job dropped");
        }
    }

    pub fn try_recv(&self) -> Option<LyricEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for LyricWorker {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
