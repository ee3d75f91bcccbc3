use crate::queue::{self, QueueError};
use crate::track::Track;

/// Change notification emitted to subscribers.
#[derive(Debug, Clone)]
pub enum StateEvent {
    /// The current track changed. Neighbour cells are already resynced
    /// when this fires.
    CurrentChanged { track: Track },
    /// The queue was replaced wholesale.
    QueueReplaced { len: usize },
}

type Listener = Box<dyn FnMut(&StateEvent)>;

/// Holder for the queue and the derived navigation cells.
pub struct SessionState {
    queue: Vec<Track>,
    current: Option<Track>,
    next: Option<Track>,
    prev: Option<Track>,
    listeners: Vec<Listener>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            next: None,
            prev: None,
            listeners: Vec::new(),
        }
    }

    /// Register a change subscriber. Subscribers run on the mutating
    /// thread, after the cells are consistent.
    pub fn subscribe(&mut self, listener: impl FnMut(&StateEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Track> {
        self.next.as_ref()
    }

    pub fn prev(&self) -> Option<&Track> {
        self.prev.as_ref()
    }

    pub fn has_tracks(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Make `track` current, resync the neighbour cells and notify
    /// subscribers. The current cell is updated even when the track is not
    /// in the queue; the error reports the failed neighbour lookup.
    pub fn set_current(&mut self, track: Track) -> Result<(), QueueError> {
        self.current = Some(track.clone());
        let resync = self.resync_neighbours();
        self.emit(StateEvent::CurrentChanged { track });
        resync
    }

    /// Replace the queue and resync neighbours against the existing
    /// current track.
    pub fn set_queue(&mut self, tracks: Vec<Track>) -> Result<(), QueueError> {
        self.queue = tracks;
        let resync = self.resync_neighbours();
        self.emit(StateEvent::QueueReplaced {
            len: self.queue.len(),
        });
        resync
    }

    /// Recompute `next`/`prev` from the queue and the current track.
    ///
    /// A failed lookup clears both cells instead of guessing.
    fn resync_neighbours(&mut self) -> Result<(), QueueError> {
        let Some(id) = self.current.as_ref().map(|t| t.id.clone()) else {
            self.next = None;
            self.prev = None;
            return Ok(());
        };

        match queue::next_of(&self.queue, &id) {
            Ok(hop) => {
                let wrapped_prev = hop.wrapped_prev.cloned();
                self.next = Some(hop.next.clone());
                if let Some(prev) = wrapped_prev {
                    self.prev = Some(prev);
                }
            }
            Err(e) => {
                self.next = None;
                self.prev = None;
                return Err(e);
            }
        }

        // Cannot fail here: the forward lookup already found the id.
        if let Ok(prev) = queue::prev_of(&self.queue, &id) {
            self.prev = Some(prev.clone());
        }

        Ok(())
    }

    fn emit(&mut self, event: StateEvent) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(&event);
        }
        // Keep subscribers registered from inside a notification.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
