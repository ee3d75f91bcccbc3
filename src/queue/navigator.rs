use crate::track::{Track, TrackId};

/// Failure modes for adjacency lookups.
///
/// An absent id refuses loudly instead of falling through to index
/// arithmetic and quietly handing back the wrong track.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("the queue is empty")]
    EmptyQueue,
    #[error("track {0} is not in the queue")]
    TrackNotFound(TrackId),
}

/// Result of a forward hop.
///
/// Hopping forward off the tail wraps to the head, and that wrap also pulls
/// the backward neighbour along (the second-to-last track). Next and prev
/// are coupled on this one path, so the hop carries both.
#[derive(Debug, Clone, PartialEq)]
pub struct NextHop<'a> {
    pub next: &'a Track,
    /// Set only when the hop wrapped.
    pub wrapped_prev: Option<&'a Track>,
}

/// Position of the track matching `id`, first match wins.
///
/// Ids are assumed unique in the queue; duplicates are not rejected.
pub fn position(queue: &[Track], id: &TrackId) -> Option<usize> {
    queue.iter().position(|t| &t.id == id)
}

/// The track after `current`, wrapping from the tail to the head.
pub fn next_of<'a>(queue: &'a [Track], current: &TrackId) -> Result<NextHop<'a>, QueueError> {
    if queue.is_empty() {
        return Err(QueueError::EmptyQueue);
    }

    let index = position(queue, current).ok_or_else(|| QueueError::TrackNotFound(current.clone()))?;
    let last = queue.len() - 1;

    if index == last {
        // Wrap. A single-element queue wraps onto itself on both sides.
        let prev_index = last.saturating_sub(1);
        Ok(NextHop {
            next: &queue[0],
            wrapped_prev: Some(&queue[prev_index]),
        })
    } else {
        Ok(NextHop {
            next: &queue[index + 1],
            wrapped_prev: None,
        })
    }
}

/// The track before `current`, wrapping from the head to the tail.
pub fn prev_of<'a>(queue: &'a [Track], current: &TrackId) -> Result<&'a Track, QueueError> {
    if queue.is_empty() {
        return Err(QueueError::EmptyQueue);
    }

    let index = position(queue, current).ok_or_else(|| QueueError::TrackNotFound(current.clone()))?;

    if index == 0 {
        Ok(&queue[queue.len() - 1])
    } else {
        Ok(&queue[index - 1])
    }
}
