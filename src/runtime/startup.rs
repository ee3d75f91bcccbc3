use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::library;
use crate::session::{self, SessionStore};
use crate::state::SessionState;

/// Pick the session directory: config wins, then `SEGUE_SESSION_DIR`, then
/// the XDG default. `None` only when no home directory can be resolved;
/// persistence is skipped in that case.
pub fn session_store(settings: &Settings) -> Option<SessionStore> {
    settings
        .session
        .dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(session::resolve_session_dir)
        .map(SessionStore::new)
}

/// Fill `state` from the persisted session, falling back to a library scan
/// of `dir` when no queue was restored. Returns true when the queue came
/// from the scanner, so the caller can persist it as the new session.
pub fn restore_or_seed(
    store: Option<&SessionStore>,
    state: &mut SessionState,
    dir: &Path,
    settings: &Settings,
) -> bool {
    if let Some(store) = store {
        if let Err(e) = session::restore_session(store, state) {
            eprintln!("segue: could not restore the previous session: {e}");
        }
    }

    if state.has_tracks() {
        if state.current().is_some() && state.next().is_none() {
            eprintln!("segue: restored current track is not in the queue");
        }
        return false;
    }

    let scanned = library::scan(dir, &settings.library);
    if scanned.is_empty() {
        return false;
    }

    let _ = state.set_queue(scanned);
    true
}
