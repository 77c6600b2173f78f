use std::collections::HashMap;

use stoneyard_core::draft::{DraftKey, DraftSnapshot};
use tokio::sync::RwLock;

/// In-memory draft snapshots keyed by `(scope, key)`.
///
/// A save always overwrites; there is no history.
pub struct DraftStore {
    drafts: RwLock<HashMap<(String, DraftKey), DraftSnapshot>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
        }
    }

    /// Store a snapshot, returning the one it replaced.
    pub async fn save(&self, scope: &str, snapshot: DraftSnapshot) -> Option<DraftSnapshot> {
        self.drafts
            .write()
            .await
            .insert((scope.to_string(), snapshot.key), snapshot)
    }

    pub async fn load(&self, scope: &str, key: DraftKey) -> Option<DraftSnapshot> {
        self.drafts
            .read()
            .await
            .get(&(scope.to_string(), key))
            .cloned()
    }

    pub async fn clear(&self, scope: &str, key: DraftKey) -> Option<DraftSnapshot> {
        self.drafts.write().await.remove(&(scope.to_string(), key))
    }

    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
