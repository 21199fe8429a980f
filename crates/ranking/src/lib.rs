//! Ranking persistence.
//!
//! The best finished games are kept in a small list sorted by move count and
//! written through a [`RankingStore`] under a single key. Reading never fails:
//! a missing or malformed value is treated as an empty ranking, and write
//! failures are logged and absorbed so a finished game is never interrupted.

pub mod store;

pub use puzzle15_types as types;
pub use store::{JsonFileStore, MemoryStore, RankingStore, StoreError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{RANKING_KEY, RANKING_LIMIT};

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Elapsed time as `mm:ss`
    pub time: String,
    pub moves: u32,
}

impl RankingEntry {
    pub fn new(time: impl Into<String>, moves: u32) -> Self {
        Self {
            time: time.into(),
            moves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingConfig {
    /// When set, `record` does not persist anything.
    pub disabled: bool,
    pub key: String,
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            key: RANKING_KEY.to_string(),
            limit: RANKING_LIMIT,
        }
    }
}

impl RankingConfig {
    pub fn from_env() -> Self {
        use std::env;

        let disabled = env::var("PUZZLE15_RANKING_DISABLED")
            .ok()
            .map(|s| s.trim().to_ascii_lowercase())
            .map(|s| matches!(s.as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            disabled,
            ..Self::default()
        }
    }
}

pub struct Ranking<S> {
    store: S,
    config: RankingConfig,
}

impl<S: RankingStore> Ranking<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, RankingConfig::default())
    }

    pub fn with_config(store: S, config: RankingConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current entries, best first. Empty if nothing valid is stored.
    ///
    /// Stored order is not trusted: entries are stable-sorted by moves.
    pub fn load(&self) -> Vec<RankingEntry> {
        let Some(raw) = self.store.get_raw(&self.config.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<RankingEntry>>(&raw) {
            Ok(mut entries) => {
                entries.sort_by_key(|e| e.moves);
                entries
            }
            Err(e) => {
                warn!(key = %self.config.key, error = %e, "malformed ranking, starting empty");
                Vec::new()
            }
        }
    }

    /// Insert a finished game and keep only the best `limit` entries.
    ///
    /// Entries with equal move counts keep their insertion order. Returns the
    /// resulting ranking, whether or not it could be stored.
    pub fn record(&mut self, time: &str, moves: u32) -> Vec<RankingEntry> {
        let mut entries = self.load();
        entries.push(RankingEntry::new(time, moves));
        entries.sort_by_key(|e| e.moves);
        entries.truncate(self.config.limit);

        if self.config.disabled {
            debug!("ranking disabled, not persisting");
            return entries;
        }

        if let Err(e) = self.persist(&entries) {
            warn!(key = %self.config.key, error = %e, "failed to store ranking");
        }
        entries
    }

    /// Up to `n` best entries.
    pub fn top(&self, n: usize) -> Vec<RankingEntry> {
        let mut entries = self.load();
        entries.truncate(n);
        entries
    }

    fn persist(&mut self, entries: &[RankingEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.store.set_raw(&self.config.key, &json)
    }
}
