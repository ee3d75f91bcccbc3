use super::*;
use std::sync::mpsc;

use crate::track::{Track, TrackId};

fn make_track() -> Track {
    Track {
        id: TrackId::new("65a1f00c-22"),
        title: "Test Title".to_string(),
        artists: vec!["First Artist".to_string(), "Second Artist".to_string()],
        location: None,
    }
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let track = make_track();
    handle.set_track_metadata(Some(&track));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(
            s.artists,
            vec!["First Artist".to_string(), "Second Artist".to_string()]
        );
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/65a1f00c_22")
        );
    }

    handle.set_track_metadata(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artists.is_empty());
        assert!(s.track_id.is_none());
    }
}

#[test]
fn track_object_path_survives_hostile_ids() {
    let mut track = make_track();
    track.id = TrackId::new("a/b.c d");
    let path = track_object_path(&track).unwrap();
    assert_eq!(path.as_str(), "/org/mpris/MediaPlayer2/track/a_b_c_d");

    track.id = TrackId::new("");
    let path = track_object_path(&track).unwrap();
    assert_eq!(path.as_str(), "/org/mpris/MediaPlayer2/track/0");
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<Command>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Stopped;
    }
    assert_eq!(iface.playback_status(), "Stopped");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Playing;
    }
    assert_eq!(iface.playback_status(), "Playing");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Paused;
    }
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<Command>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Title".to_string());
        s.artists = vec!["Artist".to_string()];
        s.track_id = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/1").ok();
    }

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "xesam:artist"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn control_methods_forward_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<Command>();
    let iface = PlayerIface { tx, state };

    iface.next();
    iface.previous();
    iface.play_pause();

    assert_eq!(rx.try_recv(), Ok(Command::Next));
    assert_eq!(rx.try_recv(), Ok(Command::Prev));
    assert_eq!(rx.try_recv(), Ok(Command::PlayPause));
}
