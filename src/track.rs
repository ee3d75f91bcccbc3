//! Track model shared across the player.
//!
//! Tracks are identified by an opaque string id. The persisted JSON keeps
//! the legacy `_id.$oid` wrapper from an old document-database export, so
//! the id type carries that shape through serde while the rest of the code
//! treats it as a plain string.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque track identifier.
///
/// Serializes as `{"$oid": "<raw>"}` so session blobs written by earlier
/// versions of the player stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId {
    #[serde(rename = "$oid")]
    raw: String,
}

impl TrackId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A single queue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "_id")]
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    /// Where the audio lives on disk. Absent for tracks restored from a
    /// session written elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

impl Track {
    /// Join the artist list for display.
    pub fn artist_line(&self, separator: &str) -> String {
        self.artists.join(separator)
    }

    /// One-line rendition used by the queue list and the status box.
    pub fn display_line(&self, separator: &str) -> String {
        if self.artists.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artist_line(separator), self.title)
        }
    }
}

#[cfg(test)]
mod tests;
