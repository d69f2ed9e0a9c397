//! High score leaderboard
//!
//! A persistent name -> best-score mapping, independent of any running
//! session. Loaded once at startup and written through on every accepted
//! update; the write happens only at session end, never per tick.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use crate::persistence;

/// Entries shown on menu and game-over screens.
pub const TOP_SCORES_SHOWN: usize = 5;

/// Name -> best score. A stored score only ever increases, via an accepted
/// [`record_attempt`](Leaderboard::record_attempt).
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    /// BTreeMap keeps tie ordering stable across runs.
    scores: BTreeMap<String, u32>,
    /// Backing file; `None` keeps the board memory-only.
    path: Option<PathBuf>,
}

impl Leaderboard {
    /// Empty, memory-only board (tests, ephemeral sessions).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the board from `path`. A missing file or a document that does
    /// not parse becomes an empty board; the caller never sees an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores: BTreeMap<String, u32> = persistence::load_json_or_default(&path);
        log::info!(
            "loaded {} leaderboard entries from {}",
            scores.len(),
            path.display()
        );
        Self {
            scores,
            path: Some(path),
        }
    }

    /// Conventional platform location for the score file.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flappy-penguin")
            .join("highscores.json")
    }

    /// Record a finished attempt. Stores and persists only a first score
    /// for the name or a strict improvement; returns whether it took.
    ///
    /// A failed write is logged and the in-memory score kept, so the next
    /// improvement retries the persist.
    pub fn record_attempt(&mut self, name: &str, score: u32) -> bool {
        let improved = match self.scores.get(name) {
            Some(&best) => score > best,
            None => true,
        };

        if improved {
            self.scores.insert(name.to_string(), score);
            if let Err(err) = self.save() {
                log::warn!("failed to persist leaderboard: {err}");
            }
        }
        improved
    }

    /// The `n` best entries, highest score first. Ties keep the map's
    /// stable name order.
    pub fn top_n(&self, n: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .scores
            .iter()
            .map(|(name, score)| (name.clone(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }

    pub fn best_for(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Write the current mapping through to the backing file, if any.
    pub fn save(&self) -> io::Result<()> {
        match &self.path {
            Some(path) => persistence::save_json(path, &self.scores),
            None => Ok(()),
        }
    }
}
