use std::sync::Arc;

use crate::config::ServerConfig;
use crate::drafts::DraftStore;
use crate::forms::FormRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Open form sessions.
    pub forms: Arc<FormRegistry>,
    /// Unsaved-draft snapshots.
    pub drafts: Arc<DraftStore>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let forms = Arc::new(FormRegistry::new(config.max_form_sessions));
        Self {
            config: Arc::new(config),
            forms,
            drafts: Arc::new(DraftStore::new()),
        }
    }
}
