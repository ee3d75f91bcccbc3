use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use super::*;
use crate::audio::AudioCmd;
use crate::state::SessionState;
use crate::track::{Track, TrackId};

fn t(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: id.to_uppercase(),
        artists: vec![],
        location: Some(PathBuf::from(format!("/music/{id}.mp3"))),
    }
}

fn player_with(ids: &[&str], current: Option<&str>) -> (Player, Receiver<AudioCmd>) {
    let (tx, rx) = mpsc::channel::<AudioCmd>();
    let mut state = SessionState::new();
    state.set_queue(ids.iter().map(|id| t(id)).collect()).unwrap();
    if let Some(id) = current {
        state.set_current(t(id)).unwrap();
    }
    (Player::new(state, tx), rx)
}

fn loaded_path(rx: &Receiver<AudioCmd>) -> Option<PathBuf> {
    let mut last = None;
    while let Ok(cmd) = rx.try_recv() {
        if let AudioCmd::Load(path) = cmd {
            last = Some(path);
        }
    }
    last
}

#[test]
fn play_next_advances_current_and_loads_the_file() {
    let (mut player, rx) = player_with(&["a", "b", "c"], Some("a"));

    player.play_next();

    assert_eq!(player.state().current().unwrap().id, TrackId::new("b"));
    assert_eq!(player.state().next().unwrap().id, TrackId::new("c"));
    assert_eq!(player.state().prev().unwrap().id, TrackId::new("a"));
    assert_eq!(player.playback(), PlaybackState::Playing);
    assert_eq!(loaded_path(&rx), Some(PathBuf::from("/music/b.mp3")));
}

#[test]
fn play_prev_moves_backward() {
    let (mut player, rx) = player_with(&["a", "b", "c"], Some("b"));

    player.play_prev();

    assert_eq!(player.state().current().unwrap().id, TrackId::new("a"));
    assert_eq!(loaded_path(&rx), Some(PathBuf::from("/music/a.mp3")));
}

#[test]
fn skipping_past_the_tail_wraps_to_the_head() {
    let (mut player, _rx) = player_with(&["a", "b", "c"], Some("c"));

    player.play_next();

    assert_eq!(player.state().current().unwrap().id, TrackId::new("a"));
    assert_eq!(player.state().prev().unwrap().id, TrackId::new("c"));
}

#[test]
fn skips_are_no_ops_without_a_current_track() {
    let (mut player, rx) = player_with(&["a", "b"], None);

    player.play_next();
    player.play_prev();

    assert!(player.state().current().is_none());
    assert!(loaded_path(&rx).is_none());
}

#[test]
fn play_pause_toggles_between_playing_and_paused() {
    let (mut player, rx) = player_with(&["a"], Some("a"));
    player.play_pause();
    assert_eq!(player.playback(), PlaybackState::Playing);

    // Drain the Load from starting playback, then toggle twice.
    let _ = loaded_path(&rx);

    player.play_pause();
    assert_eq!(player.playback(), PlaybackState::Paused);
    assert!(matches!(rx.try_recv(), Ok(AudioCmd::TogglePause)));

    player.play_pause();
    assert_eq!(player.playback(), PlaybackState::Playing);
}

#[test]
fn play_pause_while_stopped_starts_the_current_track() {
    let (mut player, rx) = player_with(&["a", "b"], Some("b"));

    player.play_pause();

    assert_eq!(player.playback(), PlaybackState::Playing);
    assert_eq!(loaded_path(&rx), Some(PathBuf::from("/music/b.mp3")));
}

#[test]
fn play_pause_without_a_current_track_starts_the_queue_head() {
    let (mut player, rx) = player_with(&["a", "b"], None);

    player.play_pause();

    assert_eq!(player.state().current().unwrap().id, TrackId::new("a"));
    assert_eq!(loaded_path(&rx), Some(PathBuf::from("/music/a.mp3")));
}

#[test]
fn a_track_without_a_file_becomes_current_but_stops_audio() {
    let (tx, rx) = mpsc::channel::<AudioCmd>();
    let mut state = SessionState::new();
    let mut far = t("far");
    far.location = None;
    state.set_queue(vec![t("a"), far.clone()]).unwrap();
    state.set_current(t("a")).unwrap();

    let mut player = Player::new(state, tx);
    player.play_next();

    assert_eq!(player.state().current().unwrap().id, TrackId::new("far"));
    assert_eq!(player.playback(), PlaybackState::Stopped);
    assert!(matches!(rx.try_recv(), Ok(AudioCmd::Stop)));
}

#[test]
fn pause_only_acts_while_playing() {
    let (mut player, rx) = player_with(&["a"], Some("a"));

    player.pause();
    assert_eq!(player.playback(), PlaybackState::Stopped);
    assert!(rx.try_recv().is_err());
}

#[test]
fn finished_track_auto_advances() {
    let (mut player, rx) = player_with(&["a", "b"], Some("a"));

    player.on_track_finished();

    assert_eq!(player.state().current().unwrap().id, TrackId::new("b"));
    assert_eq!(loaded_path(&rx), Some(PathBuf::from("/music/b.mp3")));
}

#[test]
fn apply_routes_commands_and_signals_quit() {
    let (mut player, _rx) = player_with(&["a", "b"], Some("a"));

    assert!(!player.apply(Command::Next));
    assert_eq!(player.state().current().unwrap().id, TrackId::new("b"));

    assert!(!player.apply(Command::Stop));
    assert_eq!(player.playback(), PlaybackState::Stopped);

    assert!(player.apply(Command::Quit));
}
