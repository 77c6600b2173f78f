//! Unsaved-draft snapshots of in-progress forms.
//!
//! A snapshot is overwritten on every save and only ever read back when the
//! same form is opened again. It is a convenience, never a source of truth.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Upper bound on a serialized draft payload.
pub const MAX_DRAFT_BYTES: usize = 256 * 1024;

/// Longest allowed draft scope (the browser/user the draft belongs to).
pub const MAX_SCOPE_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftKey {
    #[serde(rename = "shipmentFormData")]
    ShipmentFormData,
    #[serde(rename = "slabsFormData")]
    SlabsFormData,
}

impl DraftKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShipmentFormData => "shipmentFormData",
            Self::SlabsFormData => "slabsFormData",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "shipmentFormData" => Ok(Self::ShipmentFormData),
            "slabsFormData" => Ok(Self::SlabsFormData),
            _ => Err(CoreError::Validation(format!(
                "Unknown draft key '{s}'. Expected 'shipmentFormData' or 'slabsFormData'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftSnapshot {
    pub key: DraftKey,
    pub payload: serde_json::Value,
    pub saved_at: Timestamp,
}

impl DraftSnapshot {
    pub fn new(key: DraftKey, payload: serde_json::Value) -> Result<Self, CoreError> {
        validate_payload(&payload)?;
        Ok(Self {
            key,
            payload,
            saved_at: chrono::Utc::now(),
        })
    }
}

pub fn validate_scope(scope: &str) -> Result<(), CoreError> {
    if scope.trim().is_empty() || scope.len() > MAX_SCOPE_LEN {
        return Err(CoreError::Validation(format!(
            "Draft scope must be 1 to {MAX_SCOPE_LEN} characters"
        )));
    }
    Ok(())
}

/// Drafts must be JSON objects no larger than [`MAX_DRAFT_BYTES`].
pub fn validate_payload(payload: &serde_json::Value) -> Result<(), CoreError> {
    if !payload.is_object() {
        return Err(CoreError::Validation(
            "Draft payload must be a JSON object".to_string(),
        ));
    }
    let size = payload.to_string().len();
    if size > MAX_DRAFT_BYTES {
        return Err(CoreError::Validation(format!(
            "Draft payload is {size} bytes, limit is {MAX_DRAFT_BYTES}"
        )));
    }
    Ok(())
}
