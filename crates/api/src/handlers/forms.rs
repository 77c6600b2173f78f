//! Handlers for form sessions: row edits, resize flow, metrics and submit.
//!
//! Every mutation goes through the session's [`DimensionForm`], so the row
//! list and its resize state are never out of step.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use stoneyard_core::dimensions::{DimensionField, DimensionRecord};
use stoneyard_core::error::CoreError;
use stoneyard_core::metrics::Trim;
use stoneyard_core::resize::{DimensionForm, ResizeOutcome};
use stoneyard_core::rows::{RowAction, RowList};
use stoneyard_core::submission::{BackendRequest, FormKind, SubmissionTarget};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::forms::{FormSession, FormView};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFormBody {
    pub kind: FormKind,
    /// Seed rows, e.g. an existing lot's blocks. Mutually exclusive with
    /// `row_count`.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub rows: Vec<DimensionRecord>,
    /// Number of blank rows when no seed rows are given.
    #[validate(range(max = 500))]
    pub row_count: Option<usize>,
    #[serde(default)]
    #[validate(nested)]
    pub trim: Option<TrimBody>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TrimBody {
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Trim length must be non-negative"))]
    pub length: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Trim height must be non-negative"))]
    pub height: f64,
}

impl From<&TrimBody> for Trim {
    fn from(body: &TrimBody) -> Self {
        Trim::new(body.length, body.height)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppendRowBody {
    #[serde(default)]
    pub record: DimensionRecord,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetFieldBody {
    pub field: DimensionField,
    #[validate(range(min = 0.0))]
    pub value: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResizeBody {
    #[validate(range(max = 500))]
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ResizeResponse {
    pub outcome: ResizeOutcome,
    pub form: FormView,
}

// ---------------------------------------------------------------------------
// POST /forms
// ---------------------------------------------------------------------------

/// Open a form session, seeded with rows or with `row_count` blank rows.
pub async fn create_form(
    State(state): State<AppState>,
    Json(body): Json<CreateFormBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    if !body.rows.is_empty() && body.row_count.is_some() {
        return Err(AppError::BadRequest(
            "Send either rows or row_count, not both".to_string(),
        ));
    }

    let rows = if body.rows.is_empty() {
        RowList::with_default_rows(body.row_count.unwrap_or(0))?
    } else {
        RowList::from_records(body.rows)?
    };

    let trim = match &body.trim {
        Some(t) if !body.kind.uses_trim() && (t.length != 0.0 || t.height != 0.0) => {
            return Err(trim_not_supported());
        }
        Some(t) => Trim::from(t),
        None => Trim::default(),
    };

    let row_total = rows.len();
    let session = FormSession::new(body.kind, DimensionForm::new(rows), trim);
    let (form_id, view) = state.forms.open(session).await?;

    tracing::info!(%form_id, kind = body.kind.as_str(), rows = row_total, "Form opened");

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

// ---------------------------------------------------------------------------
// GET / DELETE /forms/{id}
// ---------------------------------------------------------------------------

pub async fn get_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let view = state.forms.view(form_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// Discard a form without submitting it.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.forms.close(form_id).await?;
    tracing::info!(%form_id, "Form discarded");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Row edits
// ---------------------------------------------------------------------------

async fn dispatch(state: &AppState, form_id: Uuid, action: RowAction) -> AppResult<FormView> {
    let (_, view) = state
        .forms
        .update(form_id, |session| session.form.dispatch(action))
        .await?;
    Ok(view)
}

/// POST /forms/{id}/rows
pub async fn append_row(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    body: Option<Json<AppendRowBody>>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.unwrap_or_default();
    let view = dispatch(&state, form_id, RowAction::Append { record: body.record }).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// PUT /forms/{id}/rows/{index}
pub async fn replace_row(
    State(state): State<AppState>,
    Path((form_id, index)): Path<(Uuid, usize)>,
    Json(record): Json<DimensionRecord>,
) -> AppResult<impl IntoResponse> {
    let view = dispatch(&state, form_id, RowAction::Replace { index, record }).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PATCH /forms/{id}/rows/{index}
pub async fn set_field(
    State(state): State<AppState>,
    Path((form_id, index)): Path<(Uuid, usize)>,
    Json(body): Json<SetFieldBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    let action = RowAction::SetField {
        index,
        field: body.field,
        value: body.value,
    };
    let view = dispatch(&state, form_id, action).await?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /forms/{id}/rows/{index}
pub async fn delete_row(
    State(state): State<AppState>,
    Path((form_id, index)): Path<(Uuid, usize)>,
) -> AppResult<impl IntoResponse> {
    let view = dispatch(&state, form_id, RowAction::Delete { index }).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /forms/{id}/apply-all
pub async fn apply_all(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(body): Json<SetFieldBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    let action = RowAction::ApplyToAll {
        field: body.field,
        value: body.value,
    };
    let view = dispatch(&state, form_id, action).await?;
    tracing::debug!(%form_id, field = body.field.name(), value = body.value, "Applied value to all rows");
    Ok(Json(DataResponse { data: view }))
}

/// PUT /forms/{id}/trim
pub async fn set_trim(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(body): Json<TrimBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    if !state.forms.kind(form_id).await?.uses_trim() {
        return Err(trim_not_supported());
    }
    let trim = Trim::from(&body);
    let (_, view) = state
        .forms
        .update(form_id, |session| {
            if session.form.resize_state().is_pending() {
                return Err(CoreError::Conflict(
                    "Confirm or cancel the pending resize before changing trim".to_string(),
                ));
            }
            session.trim = trim;
            Ok(())
        })
        .await?;
    Ok(Json(DataResponse { data: view }))
}

fn trim_not_supported() -> AppError {
    AppError::BadRequest(format!(
        "Trim only applies to {} forms",
        FormKind::BlockSlabs.as_str()
    ))
}

// ---------------------------------------------------------------------------
// Resize flow
// ---------------------------------------------------------------------------

/// POST /forms/{id}/resize
///
/// Growing applies immediately. Shrinking over filled rows returns
/// `needs_confirmation` and leaves the rows untouched.
pub async fn resize(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(body): Json<ResizeBody>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    let (outcome, view) = state
        .forms
        .update(form_id, |session| session.form.request_resize(body.count))
        .await?;

    if let ResizeOutcome::NeedsConfirmation { affected } = &outcome {
        tracing::info!(%form_id, requested = body.count, affected = affected.len(), "Resize awaiting confirmation");
    }

    Ok(Json(DataResponse {
        data: ResizeResponse {
            outcome,
            form: view,
        },
    }))
}

/// POST /forms/{id}/resize/confirm
pub async fn confirm_resize(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (len, view) = state
        .forms
        .update(form_id, |session| session.form.confirm_resize())
        .await?;
    tracing::info!(%form_id, rows = len, "Resize confirmed");
    Ok(Json(DataResponse { data: view }))
}

/// POST /forms/{id}/resize/cancel
pub async fn cancel_resize(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (restored, view) = state
        .forms
        .update(form_id, |session| session.form.cancel_resize())
        .await?;
    tracing::debug!(%form_id, rows = restored, "Resize cancelled");
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// Metrics and submission
// ---------------------------------------------------------------------------

/// GET /forms/{id}/metrics
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let data = state.forms.metrics(form_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /forms/{id}/submit
///
/// Returns the backend request for the form and closes the session.
pub async fn submit(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(target): Json<SubmissionTarget>,
) -> AppResult<Json<DataResponse<BackendRequest>>> {
    let request = state.forms.submit(form_id, &target).await?;
    tracing::info!(%form_id, path = %request.path, "Form submitted");
    Ok(Json(DataResponse { data: request }))
}

#[cfg(test)]
mod tests {
    use stoneyard_core::rows::MAX_ROW_COUNT;

    use super::*;

    #[test]
    fn create_body_rejects_too_many_blank_rows() {
        let body = CreateFormBody {
            kind: FormKind::LotBlocks,
            rows: Vec::new(),
            row_count: Some(MAX_ROW_COUNT + 1),
            trim: None,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn negative_trim_is_rejected() {
        let body = TrimBody {
            length: -1.0,
            height: 0.0,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn resize_body_bounds() {
        assert!(ResizeBody { count: 0 }.validate().is_ok());
        assert!(ResizeBody { count: MAX_ROW_COUNT }.validate().is_ok());
        assert!(ResizeBody { count: MAX_ROW_COUNT + 1 }.validate().is_err());
    }
}
