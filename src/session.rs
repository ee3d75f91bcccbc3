//! Persisted session: the queue and the last current track.
//!
//! Two string keys, `"queue"` and `"current"`, each stored as a JSON blob
//! under the session directory. A missing blob means "no prior session";
//! a blob that exists but does not decode is an error the caller sees.

mod paths;
mod restore;
mod store;

pub use paths::*;
pub use restore::*;
pub use store::*;
