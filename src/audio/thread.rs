use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{error, info, warn};

use crate::library::Track;

use super::clock::{Clock, next_index, prev_index, seek_target};
use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle};

/// How often the thread wakes up to publish elapsed time and detect track end.
const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("audio".to_string())
        .spawn(move || {
            let mut stream = match OutputStreamBuilder::open_default_stream() {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, "no audio output device, playback disabled");
                    // Keep draining so senders never block and Quit still works.
                    for cmd in rx {
                        if matches!(cmd, AudioCmd::Quit { .. }) {
                            break;
                        }
                    }
                    return;
                }
            };
            // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
            stream.log_on_drop(false);

            let mut playback = Playback {
                stream,
                tracks,
                info: playback_info,
                sink: None,
                index: None,
                paused: true,
                clock: Clock::default(),
            };

            loop {
                match rx.recv_timeout(TICK) {
                    Ok(AudioCmd::Quit { fade_out_ms }) => {
                        playback.quit(fade_out_ms);
                        break;
                    }
                    Ok(cmd) => playback.handle(cmd),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
                playback.tick();
            }
        })
}

struct Playback {
    stream: OutputStream,
    tracks: Vec<Track>,
    info: PlaybackHandle,
    sink: Option<Sink>,
    index: Option<usize>,
    paused: bool,
    clock: Clock,
}

impl Playback {
    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Play(i) => self.play(i),
            AudioCmd::Stop => self.stop(),
            AudioCmd::TogglePause => self.toggle_pause(),
            AudioCmd::Next => {
                if let Some(i) = next_index(self.index, self.tracks.len()) {
                    self.play(i);
                }
            }
            AudioCmd::Prev => {
                if let Some(i) = prev_index(self.index, self.tracks.len()) {
                    self.play(i);
                }
            }
            AudioCmd::SeekBy(secs) => self.seek_by(secs),
            AudioCmd::Quit { fade_out_ms } => self.quit(fade_out_ms),
        }
    }

    fn play(&mut self, i: usize) {
        let Some(track) = self.tracks.get(i) else {
            warn!(index = i, "play request for unknown track");
            return;
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match create_sink_at(&self.stream, track, Duration::ZERO) {
            Ok(sink) => {
                sink.play();
                info!(path = %track.path.display(), "playing");
                self.sink = Some(sink);
                self.index = Some(i);
                self.paused = false;
                self.clock.reset(Duration::ZERO, true, Instant::now());
            }
            Err(e) => {
                error!(error = %e, "cannot start track");
                self.index = None;
                self.paused = true;
                self.clock = Clock::default();
            }
        }
        self.publish();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.index = None;
        self.paused = true;
        self.clock = Clock::default();
        self.publish();
    }

    fn toggle_pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let now = Instant::now();
        if self.paused {
            sink.play();
            self.clock.resume(now);
        } else {
            sink.pause();
            self.clock.pause(now);
        }
        self.paused = !self.paused;
        self.publish();
    }

    /// Rebuild the sink and skip into the file; rodio has no cheap seek for all formats.
    fn seek_by(&mut self, secs: i32) {
        let (Some(i), Some(old)) = (self.index, self.sink.take()) else {
            return;
        };
        old.stop();

        let now = Instant::now();
        let target = seek_target(self.clock.elapsed(now), secs);
        match create_sink_at(&self.stream, &self.tracks[i], target) {
            Ok(sink) => {
                if !self.paused {
                    sink.play();
                }
                self.sink = Some(sink);
                self.clock.reset(target, !self.paused, now);
                self.publish();
            }
            Err(e) => {
                error!(error = %e, "seek failed");
                self.stop();
            }
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(sink) = self.sink.as_ref() {
            if !self.paused {
                fade_out(sink, fade_out_ms);
            }
        }
        self.stop();
    }

    /// Publish elapsed time and auto-advance when the current track ran out.
    fn tick(&mut self) {
        let finished = !self.paused && self.sink.as_ref().is_some_and(Sink::empty);
        if finished {
            if let Some(i) = next_index(self.index, self.tracks.len()) {
                self.play(i);
                return;
            }
        }
        self.publish();
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.index = self.index;
            info.elapsed = self.clock.elapsed(Instant::now());
            info.playing = self.index.is_some() && !self.paused;
        }
    }
}

fn fade_out(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
