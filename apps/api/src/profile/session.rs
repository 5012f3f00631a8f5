//! Simulated sign-in session, persisted under the auth-state key.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::models::profile::{AuthState, Role, User};
use crate::store::{KvStore, AUTH_KEY};

pub struct SessionStore {
    state: RwLock<AuthState>,
    kv: Arc<dyn KvStore>,
}

impl SessionStore {
    pub async fn load(kv: Arc<dyn KvStore>) -> Result<Self> {
        let state = match kv.get(AUTH_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable persisted session: {e}");
                AuthState::default()
            }),
            None => AuthState::default(),
        };
        Ok(Self {
            state: RwLock::new(state),
            kv,
        })
    }

    pub async fn current(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Signs the user in. No credential check — the session is a local
    /// simulation, not an authority.
    pub async fn login(&self, name: String, email: String, role: Role) -> Result<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            avatar: Some(format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={email}"
            )),
            email,
            name,
            role,
        };
        let next = AuthState {
            user: Some(user.clone()),
            is_authenticated: true,
        };
        self.persist(&next).await?;
        *self.state.write().await = next;
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        let next = AuthState::default();
        self.persist(&next).await?;
        *self.state.write().await = next;
        Ok(())
    }

    async fn persist(&self, state: &AuthState) -> Result<()> {
        let raw = serde_json::to_string(state).context("failed to serialize session")?;
        self.kv.put(AUTH_KEY, &raw).await
    }
}
