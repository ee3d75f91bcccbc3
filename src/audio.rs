//! Audio output thread.
//!
//! Playback ordering lives in the queue navigator; this thread only decodes
//! and plays whatever file it is handed, and reports elapsed time and
//! end-of-track through a shared handle.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

#[derive(Debug)]
pub enum AudioCmd {
    /// Decode the file at the given path and play it from the start.
    Load(PathBuf),
    /// Toggle pause/resume.
    TogglePause,
    /// Stop playback and drop the current sink.
    Stop,
    /// Quit the audio thread.
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("could not open file: {0}")]
    Open(#[from] std::io::Error),
    #[error("could not decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Runtime playback information shared with the UI and the event loop.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Elapsed playback time for the loaded track.
    pub elapsed: Duration,
    /// Whether audio is currently audible.
    pub playing: bool,
    /// Set once when a loaded track plays to completion.
    pub finished: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            playing: false,
            finished: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Consume the end-of-track flag, if set.
pub fn take_finished(handle: &PlaybackHandle) -> bool {
    match handle.lock() {
        Ok(mut info) => {
            let finished = info.finished;
            info.finished = false;
            finished
        }
        Err(_) => false,
    }
}

pub struct AudioOutput {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioOutput {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_output_thread(rx, playback.clone());

        Self {
            tx,
            playback,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn sender(&self) -> Sender<AudioCmd> {
        self.tx.clone()
    }

    pub fn quit(&self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

fn spawn_output_thread(rx: Receiver<AudioCmd>, playback: PlaybackHandle) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("segue: no audio output device: {e}");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(AudioCmd::Load(path)) => match open_sink(&stream, &path) {
                    Ok(new_sink) => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        new_sink.play();
                        sink = Some(new_sink);
                        if let Ok(mut info) = playback.lock() {
                            info.elapsed = Duration::ZERO;
                            info.playing = true;
                            info.finished = false;
                        }
                    }
                    Err(e) => {
                        eprintln!("segue: cannot play {}: {e}", path.display());
                    }
                },
                Ok(AudioCmd::TogglePause) => {
                    if let Some(s) = sink.as_ref() {
                        if s.is_paused() {
                            s.play();
                        } else {
                            s.pause();
                        }
                        if let Ok(mut info) = playback.lock() {
                            info.playing = !s.is_paused();
                        }
                    }
                }
                Ok(AudioCmd::Stop) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    if let Ok(mut info) = playback.lock() {
                        info.playing = false;
                        info.elapsed = Duration::ZERO;
                    }
                }
                Ok(AudioCmd::Quit) => break,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // Tick: publish position, detect end of track.
            if let Some(s) = sink.as_ref() {
                if s.empty() {
                    sink = None;
                    if let Ok(mut info) = playback.lock() {
                        info.playing = false;
                        info.finished = true;
                    }
                } else if let Ok(mut info) = playback.lock() {
                    info.elapsed = s.get_pos();
                }
            }
        }
    })
}

fn open_sink(stream: &OutputStream, path: &Path) -> Result<Sink, AudioError> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
