//! Playback facade.
//!
//! `Player` ties the session state and the audio output together: a skip
//! clones the corresponding neighbour cell, makes it current (which resyncs
//! the cells and notifies subscribers) and hands its file to the audio
//! thread.

use std::sync::mpsc::Sender;

use crate::audio::AudioCmd;
use crate::state::SessionState;
use crate::track::Track;

/// Command currency shared by the keyboard dispatcher, the MPRIS service
/// and the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

pub struct Player {
    state: SessionState,
    audio_tx: Sender<AudioCmd>,
    playback: PlaybackState,
}

impl Player {
    pub fn new(state: SessionState, audio_tx: Sender<AudioCmd>) -> Self {
        Self {
            state,
            audio_tx,
            playback: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Make `track` current and start playing it.
    ///
    /// A track without a local file still becomes current (sessions can be
    /// written on another machine); audio just stops.
    pub fn play_track(&mut self, track: Track) {
        match track.location.clone() {
            Some(path) => {
                let _ = self.audio_tx.send(AudioCmd::Load(path));
                self.playback = PlaybackState::Playing;
            }
            None => {
                let _ = self.audio_tx.send(AudioCmd::Stop);
                self.playback = PlaybackState::Stopped;
                eprintln!("segue: no local file for {}", track.title);
            }
        }

        if let Err(e) = self.state.set_current(track) {
            eprintln!("segue: {e}");
        }
    }

    /// Skip forward to the circular next track. No-op when nothing is
    /// queued.
    pub fn play_next(&mut self) {
        if let Some(next) = self.state.next().cloned() {
            self.play_track(next);
        }
    }

    /// Skip backward to the circular previous track.
    pub fn play_prev(&mut self) {
        if let Some(prev) = self.state.prev().cloned() {
            self.play_track(prev);
        }
    }

    /// Toggle pause. When stopped, start the current track, falling back to
    /// the head of the queue.
    pub fn play_pause(&mut self) {
        match self.playback {
            PlaybackState::Playing => {
                let _ = self.audio_tx.send(AudioCmd::TogglePause);
                self.playback = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                let _ = self.audio_tx.send(AudioCmd::TogglePause);
                self.playback = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {
                let start = self
                    .state
                    .current()
                    .or_else(|| self.state.queue().first())
                    .cloned();
                if let Some(track) = start {
                    self.play_track(track);
                }
            }
        }
    }

    pub fn play(&mut self) {
        match self.playback {
            PlaybackState::Playing => {}
            PlaybackState::Paused | PlaybackState::Stopped => self.play_pause(),
        }
    }

    pub fn pause(&mut self) {
        if self.playback == PlaybackState::Playing {
            let _ = self.audio_tx.send(AudioCmd::TogglePause);
            self.playback = PlaybackState::Paused;
        }
    }

    pub fn stop(&mut self) {
        let _ = self.audio_tx.send(AudioCmd::Stop);
        self.playback = PlaybackState::Stopped;
    }

    /// Apply a command from any source. Returns true when the application
    /// should shut down.
    pub fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return true,
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::PlayPause => self.play_pause(),
            Command::Stop => self.stop(),
            Command::Next => self.play_next(),
            Command::Prev => self.play_prev(),
        }
        false
    }

    /// The loaded track played to completion: advance.
    pub fn on_track_finished(&mut self) {
        self.playback = PlaybackState::Stopped;
        self.play_next();
    }
}

#[cfg(test)]
mod tests;
