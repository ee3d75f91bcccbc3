use crate::state::SessionState;

use super::store::{SessionError, SessionStore};

/// Load the persisted session into `state`.
///
/// The current track is applied first, then the queue; replacing the queue
/// resyncs the neighbour cells against the restored current track. Missing
/// blobs are skipped silently. Unreadable or corrupt blobs abort the
/// restore and surface to the caller.
pub fn restore_session(store: &SessionStore, state: &mut SessionState) -> Result<(), SessionError> {
    if let Some(current) = store.load_current()? {
        // The queue is not in place yet, so this resync cannot find a
        // neighbour; it settles when the queue lands below.
        let _ = state.set_current(current);
    }

    if let Some(queue) = store.load_queue()? {
        // A current track missing from the restored queue leaves the
        // neighbour cells empty; the caller decides whether to report it.
        let _ = state.set_queue(queue);
    }

    Ok(())
}
