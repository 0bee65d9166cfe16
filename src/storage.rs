use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the best score lives between sessions.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

#[derive(Serialize, Deserialize, Default)]
#[serde(transparent)]
struct Entries(BTreeMap<String, String>);

/// Text key/value pairs kept in a JSON file, one file per game install.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.0.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.0.insert(key.to_owned(), value.to_owned());
        let text = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn read_entries(&self) -> Result<Entries, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Entries::default()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

/// High score kept under [`HIGH_SCORE_KEY`] as decimal text.
///
/// Storage trouble never ends a session: a failed load reads as 0 and a
/// failed save is only logged.
pub struct LocalHighScore {
    store: KeyValueStore,
}

impl LocalHighScore {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }
}

impl HighScoreStore for LocalHighScore {
    fn load(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(text)) => text.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %text, "stored high score is not a number, using 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!("high score unavailable, using 0: {}", err);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        match self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => tracing::debug!(score, path = %self.store.path().display(), "high score saved"),
            Err(err) => tracing::warn!("could not save high score: {}", err),
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::HighScoreStore;

    /// In-memory store for controller tests.
    #[derive(Debug, Default)]
    pub struct MemoryHighScore {
        pub value: u32,
        pub saves: Vec<u32>,
    }

    impl HighScoreStore for MemoryHighScore {
        fn load(&self) -> u32 {
            self.value
        }

        fn save(&mut self, score: u32) {
            self.value = score;
            self.saves.push(score);
        }
    }
}
