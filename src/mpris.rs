//! MPRIS `org.mpris.MediaPlayer2` service.
//!
//! Two jobs: export the current track as desktop-visible metadata (the
//! media notification refreshed on every track change), and accept playback
//! commands from outside, forwarded into the event loop over a channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::player::{Command, PlaybackState};
use crate::track::Track;

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    artists: Vec<String>,
    track_id: Option<ObjectPath<'static>>,
}

#[derive(Clone)]
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Refresh the exported metadata. Fire-and-forget: desktop shells pick
    /// the change up from the property, nothing is awaited here.
    pub fn set_track_metadata(&self, track: Option<&Track>) {
        if let Ok(mut s) = self.state.lock() {
            match track {
                Some(t) => {
                    s.title = Some(t.title.clone());
                    s.artists = t.artists.clone();
                    s.track_id = track_object_path(t);
                }
                None => {
                    s.title = None;
                    s.artists.clear();
                    s.track_id = None;
                }
            }
        }
    }
}

/// Build a D-Bus object path for a track id. Ids are opaque strings, so
/// anything outside the object-path alphabet is mapped to `_`.
fn track_object_path(track: &Track) -> Option<ObjectPath<'static>> {
    let mut sanitized: String = track
        .id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        sanitized.push('0');
    }

    ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{sanitized}")).ok()
}

struct RootIface {
    tx: Sender<Command>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for a TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(Command::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "segue"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<Command>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(Command::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(Command::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(Command::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(Command::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(Command::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(Command::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = s.track_id.as_ref() {
            if let Ok(v) = OwnedValue::try_from(Value::from(id.clone())) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }

        // Always export a title so `playerctl metadata` shows something.
        let title = s.title.clone().unwrap_or_default();
        if let Ok(v) = OwnedValue::try_from(Value::from(title)) {
            map.insert("xesam:title".to_string(), v);
        }

        if !s.artists.is_empty() {
            if let Ok(v) = OwnedValue::try_from(Value::from(s.artists.clone())) {
                map.insert("xesam:artist".to_string(), v);
            }
        }

        map
    }
}

pub fn spawn_mpris(tx: Sender<Command>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name("org.mpris.MediaPlayer2.segue").await {
                eprintln!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                eprintln!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                eprintln!("MPRIS: failed to register player iface: {e}");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
