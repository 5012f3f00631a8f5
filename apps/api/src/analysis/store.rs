//! Single-slot holder for the current analysis result.
//!
//! At most one result exists at a time: `set` replaces the slot
//! unconditionally and persists, `clear` empties it and removes the durable
//! record so the key is absent, not empty. Last write wins, always — there
//! is no history and no merge.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::analysis::AnalysisResult;
use crate::store::{KvStore, ANALYSIS_KEY};

pub struct ResultStore {
    slot: RwLock<Option<AnalysisResult>>,
    kv: Arc<dyn KvStore>,
}

impl ResultStore {
    /// Hydrates the slot from the persistence port. A corrupt record is
    /// discarded with a warning; the store starts empty rather than failing
    /// startup.
    pub async fn load(kv: Arc<dyn KvStore>) -> Result<Self> {
        let slot = match kv.get(ANALYSIS_KEY).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Discarding unreadable persisted analysis: {e}");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            slot: RwLock::new(slot),
            kv,
        })
    }

    /// Returns the current result, if any. Never touches storage.
    pub async fn get(&self) -> Option<AnalysisResult> {
        self.slot.read().await.clone()
    }

    /// Replaces the slot unconditionally and persists the snapshot.
    pub async fn set(&self, result: AnalysisResult) -> Result<()> {
        let raw = serde_json::to_string(&result).context("failed to serialize analysis result")?;
        self.kv.put(ANALYSIS_KEY, &raw).await?;
        *self.slot.write().await = Some(result);
        Ok(())
    }

    /// Empties the slot and removes the durable record.
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(ANALYSIS_KEY).await?;
        *self.slot.write().await = None;
        Ok(())
    }
}
