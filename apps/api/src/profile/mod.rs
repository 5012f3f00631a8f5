//! Profile and session state. Both are single-record stores persisted
//! through the key-value port; the session is a simulated sign-in that
//! never verifies credentials.

pub mod handlers;
pub mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::profile::UserProfile;
use crate::store::{KvStore, PROFILE_KEY};

/// Holder of the single current profile. Mutable at any time; every write
/// is persisted immediately.
pub struct ProfileStore {
    current: RwLock<UserProfile>,
    kv: Arc<dyn KvStore>,
}

impl ProfileStore {
    pub async fn load(kv: Arc<dyn KvStore>) -> Result<Self> {
        let current = match kv.get(PROFILE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable persisted profile: {e}");
                UserProfile::default()
            }),
            None => UserProfile::default(),
        };
        Ok(Self {
            current: RwLock::new(current),
            kv,
        })
    }

    pub async fn get(&self) -> UserProfile {
        self.current.read().await.clone()
    }

    pub async fn set(&self, profile: UserProfile) -> Result<()> {
        let raw = serde_json::to_string(&profile).context("failed to serialize profile")?;
        self.kv.put(PROFILE_KEY, &raw).await?;
        *self.current.write().await = profile;
        Ok(())
    }

    /// Applies an edit to the current profile and persists the result.
    pub async fn update(&self, edit: impl FnOnce(&mut UserProfile)) -> Result<UserProfile> {
        let mut guard = self.current.write().await;
        let mut next = guard.clone();
        edit(&mut next);
        let raw = serde_json::to_string(&next).context("failed to serialize profile")?;
        self.kv.put(PROFILE_KEY, &raw).await?;
        *guard = next.clone();
        Ok(next)
    }
}
