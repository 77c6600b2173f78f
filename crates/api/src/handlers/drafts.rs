//! Handlers for unsaved-draft snapshots.
//!
//! Drafts are addressed by `(scope, key)`: the scope names whoever owns the
//! draft (a browser or user id), the key names which form it belongs to.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stoneyard_core::draft::{self, DraftKey, DraftSnapshot};
use stoneyard_core::error::CoreError;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

fn parse_path(scope: &str, key: &str) -> Result<DraftKey, CoreError> {
    draft::validate_scope(scope)?;
    DraftKey::parse(key)
}

/// PUT /drafts/{scope}/{key}
///
/// Overwrites any previous snapshot for the same scope and key.
pub async fn save_draft(
    State(state): State<AppState>,
    Path((scope, key)): Path<(String, String)>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let key = parse_path(&scope, &key)?;
    let snapshot = DraftSnapshot::new(key, payload)?;
    let replaced = state.drafts.save(&scope, snapshot.clone()).await;

    tracing::debug!(scope = %scope, key = key.as_str(), replaced = replaced.is_some(), "Draft saved");

    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /drafts/{scope}/{key}
pub async fn get_draft(
    State(state): State<AppState>,
    Path((scope, key)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let key = parse_path(&scope, &key)?;
    let snapshot = state
        .drafts
        .load(&scope, key)
        .await
        .ok_or_else(|| draft_not_found(&scope, key))?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// DELETE /drafts/{scope}/{key}
///
/// Clearing a draft that does not exist is not an error.
pub async fn clear_draft(
    State(state): State<AppState>,
    Path((scope, key)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let key = parse_path(&scope, &key)?;
    if state.drafts.clear(&scope, key).await.is_some() {
        tracing::debug!(scope = %scope, key = key.as_str(), "Draft cleared");
    }
    Ok(StatusCode::NO_CONTENT)
}

fn draft_not_found(scope: &str, key: DraftKey) -> CoreError {
    CoreError::NotFound {
        entity: "Draft",
        id: format!("{scope}/{}", key.as_str()),
    }
}
