//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::treap::Treap;

fn default_max_insert_batch() -> usize {
    32
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables shared by the piece table and the editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the treap's priority generator. Unset means the fixed default,
    /// so two runs over the same edits build the same tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// How many typed bytes the session coalesces before committing them
    #[serde(default = "default_max_insert_batch")]
    pub max_insert_batch: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_insert_batch: default_max_insert_batch(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(Treap::DEFAULT_SEED)
    }

    /// Batch cap, never below one byte
    pub fn insert_batch_cap(&self) -> usize {
        self.max_insert_batch.max(1)
    }
}
