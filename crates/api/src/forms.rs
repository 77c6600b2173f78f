use std::collections::HashMap;

use serde::Serialize;
use stoneyard_core::dimensions::DimensionRecord;
use stoneyard_core::error::CoreError;
use stoneyard_core::metrics::{self, RowMetrics, RowTotals, Trim};
use stoneyard_core::resize::{DimensionForm, ResizeState};
use stoneyard_core::submission::{self, BackendRequest, FormKind, SubmissionTarget};
use stoneyard_core::types::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One open form: its row list state container and slab trim.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub kind: FormKind,
    pub form: DimensionForm,
    pub trim: Trim,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FormSession {
    pub fn new(kind: FormKind, form: DimensionForm, trim: Trim) -> Self {
        let now = chrono::Utc::now();
        Self {
            kind,
            form,
            trim,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    pub fn view(&self, id: Uuid) -> FormView {
        FormView {
            id,
            kind: self.kind,
            rows: self.form.rows().rows().to_vec(),
            displayed_count: self.form.displayed_count(),
            resize: self.form.resize_state().clone(),
            trim: self.trim,
            totals: metrics::totals(self.form.rows().rows(), &self.trim).rounded(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn metrics(&self) -> FormMetrics {
        let rows = self.form.rows().rows();
        FormMetrics {
            rows: metrics::row_metrics(rows, &self.trim)
                .into_iter()
                .map(|m| RowMetrics {
                    index: m.index,
                    block: m.block.rounded(),
                    slab: m.slab.rounded(),
                })
                .collect(),
            totals: metrics::totals(rows, &self.trim).rounded(),
        }
    }
}

/// Serialized state of a form as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub id: Uuid,
    pub kind: FormKind,
    pub rows: Vec<DimensionRecord>,
    pub displayed_count: usize,
    pub resize: ResizeState,
    pub trim: Trim,
    pub totals: RowTotals,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormMetrics {
    pub rows: Vec<RowMetrics>,
    pub totals: RowTotals,
}

/// Holds every open form session.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Each mutation holds the write lock for
/// its whole read-modify-write, so one form sees one request at a time.
pub struct FormRegistry {
    sessions: RwLock<HashMap<Uuid, FormSession>>,
    max_sessions: usize,
}

impl FormRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Register a new session and return its id.
    pub async fn open(&self, session: FormSession) -> Result<(Uuid, FormView), CoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(CoreError::Conflict(format!(
                "Too many open forms (limit {})",
                self.max_sessions
            )));
        }
        let id = Uuid::new_v4();
        let view = session.view(id);
        sessions.insert(id, session);
        Ok((id, view))
    }

    pub async fn view(&self, id: Uuid) -> Result<FormView, CoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.view(id))
            .ok_or_else(|| not_found(id))
    }

    /// The kind a session was opened with; it never changes afterwards.
    pub async fn kind(&self, id: Uuid) -> Result<FormKind, CoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.kind)
            .ok_or_else(|| not_found(id))
    }

    pub async fn metrics(&self, id: Uuid) -> Result<FormMetrics, CoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(FormSession::metrics)
            .ok_or_else(|| not_found(id))
    }

    /// Run `f` against a session. The session's `updated_at` is bumped only
    /// when `f` succeeds.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut FormSession) -> Result<T, CoreError>,
    ) -> Result<(T, FormView), CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        let out = f(session)?;
        session.touch();
        Ok((out, session.view(id)))
    }

    /// Build the backend request for a session and close it.
    ///
    /// The session survives any failure so the user can fix and resubmit.
    pub async fn submit(
        &self,
        id: Uuid,
        target: &SubmissionTarget,
    ) -> Result<BackendRequest, CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        if !session.kind.accepts(target) {
            return Err(CoreError::Validation(format!(
                "A {} form cannot be submitted to this target",
                session.kind.as_str()
            )));
        }
        if session.form.resize_state().is_pending() {
            return Err(CoreError::Conflict(
                "Confirm or cancel the pending resize before submitting".to_string(),
            ));
        }
        let request = submission::build_request(target, session.form.rows().rows(), &session.trim)?;
        sessions.remove(&id);
        Ok(request)
    }

    pub async fn close(&self, id: Uuid) -> Result<(), CoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    /// Return the current number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound {
        entity: "Form",
        id: id.to_string(),
    }
}
