use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::analysis::store::ResultStore;
use crate::catalog::CatalogStore;
use crate::llm_client::GeminiClient;
use crate::profile::session::SessionStore;
use crate::profile::ProfileStore;
use crate::store::KvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    pub results: Arc<ResultStore>,
    pub profile: Arc<ProfileStore>,
    pub session: Arc<SessionStore>,
    pub catalog: Arc<CatalogStore>,
    /// Non-blocking gate enforcing one in-flight analysis at a time.
    pub analysis_gate: Arc<Mutex<()>>,
}

impl AppState {
    /// Hydrates every store from the persistence port.
    pub async fn new(llm: GeminiClient, kv: Arc<dyn KvStore>) -> Result<Self> {
        Ok(Self {
            llm,
            results: Arc::new(ResultStore::load(kv.clone()).await?),
            profile: Arc::new(ProfileStore::load(kv.clone()).await?),
            session: Arc::new(SessionStore::load(kv.clone()).await?),
            catalog: Arc::new(CatalogStore::load(kv).await?),
            analysis_gate: Arc::new(Mutex::new(())),
        })
    }
}
