//! Building a queue from local audio files.
//!
//! Used when no persisted session exists: the scanner walks a directory
//! and turns every audio file into a queue entry.

mod scan;

pub use scan::*;
