//! Circular adjacency over the playback queue.
//!
//! The queue is a flat ordered list of tracks; "next" and "previous" are
//! derived from the position of the current track's id. These helpers are
//! pure so the adjacency rules can be tested without any player state.

mod navigator;

pub use navigator::*;
