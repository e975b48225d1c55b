use std::sync::Arc;
use tracing::info;

use crate::api::dispatcher::{Dispatcher, MockApi};
use crate::config::AppConfig;
use crate::error::Result;
use crate::observability::DispatchMetrics;
use crate::services::auth::AuthService;
use crate::services::client::ApiClient;
use crate::services::course::CourseService;
use crate::services::session::SessionManager;
use crate::services::user::UserService;
use crate::storage::{KeyValueStore, MemoryKeyValueStore, ResourceStore, create_key_value_store};

/// Application state wiring the store, dispatcher and client-side services
#[derive(Clone)]
pub struct AppState {
    /// Read-only resource store
    pub store: Arc<ResourceStore>,
    /// Dispatcher over the store
    pub api: Arc<dyn Dispatcher>,
    /// Current session and its persisted snapshot
    pub sessions: Arc<SessionManager>,
    /// Token-attaching client
    pub client: ApiClient,
    /// Login/register flow
    pub auth: Arc<AuthService>,
    pub courses: CourseService,
    pub users: UserService,
    /// Dispatch counters
    pub metrics: Arc<DispatchMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &"Arc<ResourceStore>")
            .field("api", &"Arc<dyn Dispatcher>")
            .field("sessions", &self.sessions.status())
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}

impl AppState {
    /// Build state from configuration
    pub fn build(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(ResourceStore::from_config(&config.store)?);
        let storage = create_key_value_store(&config.session)?;
        info!("Resource store ready, session storage: {:?}", config.session.storage_path);
        Ok(Self::assemble(store, storage, config))
    }

    /// Seeded store, in-memory session storage, no latency
    pub fn testing() -> Result<Self> {
        let config = AppConfig::testing();
        let store = Arc::new(ResourceStore::seeded()?);
        Ok(Self::assemble(
            store,
            Arc::new(MemoryKeyValueStore::new()),
            &config,
        ))
    }

    fn assemble(
        store: Arc<ResourceStore>,
        storage: Arc<dyn KeyValueStore>,
        config: &AppConfig,
    ) -> Self {
        let metrics = Arc::new(DispatchMetrics::new());
        let api: Arc<dyn Dispatcher> =
            Arc::new(MockApi::new(store.clone(), &config.api).with_metrics(metrics.clone()));
        let sessions = Arc::new(SessionManager::new(storage, &config.session));
        let client = ApiClient::new(api.clone(), sessions.clone());

        Self {
            store,
            auth: Arc::new(AuthService::new(api.clone(), sessions.clone())),
            courses: CourseService::new(client.clone()),
            users: UserService::new(client.clone()),
            api,
            sessions,
            client,
            metrics,
        }
    }
}
