use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::queue::QueueError;
use crate::track::{Track, TrackId};

fn t(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: id.to_uppercase(),
        artists: vec![],
        location: None,
    }
}

fn q(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| t(id)).collect()
}

#[test]
fn setting_queue_and_current_resyncs_neighbours() {
    let mut state = SessionState::new();
    state.set_queue(q(&["a", "b", "c"])).unwrap();
    state.set_current(t("b")).unwrap();

    assert_eq!(state.current().unwrap().id, TrackId::new("b"));
    assert_eq!(state.next().unwrap().id, TrackId::new("c"));
    assert_eq!(state.prev().unwrap().id, TrackId::new("a"));
}

#[test]
fn current_at_the_tail_wraps_forward() {
    let mut state = SessionState::new();
    state.set_queue(q(&["a", "b", "c"])).unwrap();
    state.set_current(t("c")).unwrap();

    assert_eq!(state.next().unwrap().id, TrackId::new("a"));
    assert_eq!(state.prev().unwrap().id, TrackId::new("b"));
}

#[test]
fn current_at_the_head_wraps_backward() {
    let mut state = SessionState::new();
    state.set_queue(q(&["a", "b", "c"])).unwrap();
    state.set_current(t("a")).unwrap();

    assert_eq!(state.next().unwrap().id, TrackId::new("b"));
    assert_eq!(state.prev().unwrap().id, TrackId::new("c"));
}

#[test]
fn unknown_current_clears_neighbours_and_reports() {
    let mut state = SessionState::new();
    state.set_queue(q(&["a", "b"])).unwrap();

    let err = state.set_current(t("ghost")).unwrap_err();
    assert_eq!(err, QueueError::TrackNotFound(TrackId::new("ghost")));

    // The current cell still updates; the derived cells do not guess.
    assert_eq!(state.current().unwrap().id, TrackId::new("ghost"));
    assert!(state.next().is_none());
    assert!(state.prev().is_none());
}

#[test]
fn current_before_any_queue_reports_empty() {
    let mut state = SessionState::new();
    let err = state.set_current(t("a")).unwrap_err();
    assert_eq!(err, QueueError::EmptyQueue);
    assert!(state.next().is_none());
}

#[test]
fn replacing_the_queue_resyncs_against_existing_current() {
    let mut state = SessionState::new();
    state.set_queue(q(&["a", "b"])).unwrap();
    state.set_current(t("a")).unwrap();

    state.set_queue(q(&["x", "a", "y"])).unwrap();
    assert_eq!(state.next().unwrap().id, TrackId::new("y"));
    assert_eq!(state.prev().unwrap().id, TrackId::new("x"));
}

#[test]
fn subscribers_observe_changes_after_cells_are_consistent() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_in_listener = seen.clone();

    let mut state = SessionState::new();
    state.subscribe(move |event| {
        let label = match event {
            StateEvent::CurrentChanged { track } => format!("current:{}", track.id),
            StateEvent::QueueReplaced { len } => format!("queue:{len}"),
        };
        seen_in_listener.borrow_mut().push(label);
    });

    state.set_queue(q(&["a", "b"])).unwrap();
    state.set_current(t("a")).unwrap();

    assert_eq!(
        seen.borrow().as_slice(),
        ["queue:2".to_string(), "current:a".to_string()]
    );
}

#[test]
fn listeners_registered_during_notification_survive() {
    let count: Rc<RefCell<u32>> = Rc::new(RefCell::new(0));

    let mut state = SessionState::new();
    state.subscribe(|_| {});
    state.set_queue(q(&["a"])).unwrap();

    let count_in_listener = count.clone();
    state.subscribe(move |_| {
        *count_in_listener.borrow_mut() += 1;
    });

    state.set_current(t("a")).unwrap();
    assert_eq!(*count.borrow(), 1);
}
