use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::track::Track;

/// Storage key for the serialized queue.
pub const QUEUE_KEY: &str = "queue";
/// Storage key for the serialized current track.
pub const CURRENT_KEY: &str = "current";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not read session key {key:?}: {source}")]
    Read {
        key: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("could not write session key {key:?}: {source}")]
    Write {
        key: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("corrupt session data under key {key:?}: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed JSON persistence rooted at one directory.
///
/// Key `k` maps to `<dir>/<k>.json`.
#[derive(Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load_queue(&self) -> Result<Option<Vec<Track>>, SessionError> {
        self.read_key(QUEUE_KEY)
    }

    pub fn save_queue(&self, queue: &[Track]) -> Result<(), SessionError> {
        self.write_key(QUEUE_KEY, &queue)
    }

    pub fn load_current(&self) -> Result<Option<Track>, SessionError> {
        self.read_key(CURRENT_KEY)
    }

    pub fn save_current(&self, track: &Track) -> Result<(), SessionError> {
        self.write_key(CURRENT_KEY, track)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// A missing blob reads as `None`: there was no prior session.
    fn read_key<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, SessionError> {
        let path = self.key_path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Read { key, source: e }),
        };

        let value =
            serde_json::from_str(&contents).map_err(|e| SessionError::Corrupt { key, source: e })?;
        Ok(Some(value))
    }

    // Write atomically: temp file, then rename over the key.
    fn write_key<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir).map_err(|e| SessionError::Write { key, source: e })?;

        let contents =
            serde_json::to_string(value).map_err(|e| SessionError::Corrupt { key, source: e })?;

        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| SessionError::Write { key, source: e })?;
        fs::rename(&tmp, &path).map_err(|e| SessionError::Write { key, source: e })?;
        Ok(())
    }
}
