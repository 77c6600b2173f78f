//! Backend request construction for finished lot, slab and split forms.
//!
//! The inventory backend is an opaque collaborator: this module only
//! decides which endpoint a form maps to and what body it carries. Rows are
//! validated against the dimension minimum and submitted positionally.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dimensions::{validate_rows_for_submission, DimensionRecord};
use crate::error::CoreError;
use crate::metrics::{block_metrics, round2, slab_metrics, Trim};
use crate::rows::MAX_ROW_COUNT;
use crate::threshold_validation::validate_count_range;
use crate::types::RemoteId;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Create a lot together with its blocks.
pub const RAW_ADD_PATH: &str = "/factory-management/inventory/raw/add";
/// Append blocks to an existing lot (`/{lot_id}`).
pub const LOT_ADD_BLOCKS_PATH: &str = "/factory-management/inventory/updatelotaddblocks";
/// Record slab cuts for a block (`/{block_id}`).
pub const BLOCK_ADD_SLAB_PATH: &str = "/factory-management/inventory/updateblockaddslab";
/// Record sub-block split results (`/{block_id}`).
pub const MARK_SPLIT_PATH: &str = "/factory-management/inventory/raw/marksplit";

// ---------------------------------------------------------------------------
// Block status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    InStock,
    Cut,
    Split,
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// Header fields of a new lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewLotDetails {
    #[validate(length(min = 1, max = 200, message = "Lot name is required"))]
    pub lot_name: String,
    #[validate(length(min = 1, message = "Factory id is required"))]
    pub factory_id: RemoteId,
    #[validate(length(min = 1, message = "Organization id is required"))]
    pub organization_id: RemoteId,
    #[serde(default)]
    pub material_type: Option<String>,
}

/// Where a finished form is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum SubmissionTarget {
    NewLot(NewLotDetails),
    AppendToLot { lot_id: RemoteId },
    BlockSlabs { block_id: RemoteId },
    BlockSplit { block_id: RemoteId },
}

/// The kind of form a row list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Blocks of a new or existing lot.
    LotBlocks,
    /// Slabs cut from one block.
    BlockSlabs,
    /// Sub-blocks produced by splitting one block.
    BlockSplit,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LotBlocks => "lot_blocks",
            Self::BlockSlabs => "block_slabs",
            Self::BlockSplit => "block_split",
        }
    }

    /// Whether a form of this kind may be submitted to `target`.
    pub fn accepts(self, target: &SubmissionTarget) -> bool {
        matches!(
            (self, target),
            (Self::LotBlocks, SubmissionTarget::NewLot(_))
                | (Self::LotBlocks, SubmissionTarget::AppendToLot { .. })
                | (Self::BlockSlabs, SubmissionTarget::BlockSlabs { .. })
                | (Self::BlockSplit, SubmissionTarget::BlockSplit { .. })
        )
    }

    pub fn uses_trim(self) -> bool {
        self == Self::BlockSlabs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Put,
}

/// A request ready to hand to the backend client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockEntry {
    dimensions: DimensionRecord,
    volume_m3: f64,
    weight_tons: f64,
    status: BlockStatus,
}

impl BlockEntry {
    fn from_record(record: &DimensionRecord) -> Self {
        let metrics = block_metrics(record).rounded();
        Self {
            dimensions: *record,
            volume_m3: metrics.volume_m3,
            weight_tons: metrics.weight_tons,
            status: BlockStatus::InStock,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewLotBody<'a> {
    lot_name: &'a str,
    factory_id: &'a str,
    organization_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    material_type: Option<&'a str>,
    no_of_blocks: usize,
    blocks: Vec<BlockEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LotBlocksBody {
    no_of_blocks: usize,
    blocks: Vec<BlockEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlabEntry {
    slab_number: usize,
    dimensions: DimensionRecord,
    square_feet: f64,
    amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockSlabsBody {
    number_of_slabs: usize,
    trim: Trim,
    slabs: Vec<SlabEntry>,
    total_square_feet: f64,
    status: BlockStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SplitBody {
    number_of_sub_blocks: usize,
    sub_blocks: Vec<BlockEntry>,
    status: BlockStatus,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the backend request for a finished form.
///
/// Fails when the row list is empty or too long, when any row holds a
/// value below the dimension minimum, or when target fields are invalid.
pub fn build_request(
    target: &SubmissionTarget,
    rows: &[DimensionRecord],
    trim: &Trim,
) -> Result<BackendRequest, CoreError> {
    validate_count_range(rows.len(), MAX_ROW_COUNT, "Row")?;
    validate_rows_for_submission(rows)?;

    let blocks = || rows.iter().map(BlockEntry::from_record).collect::<Vec<_>>();

    match target {
        SubmissionTarget::NewLot(details) => {
            details.validate()?;
            if details.lot_name.trim().is_empty() {
                return Err(CoreError::Validation("Lot name is required".to_string()));
            }
            let body = NewLotBody {
                lot_name: details.lot_name.trim(),
                factory_id: &details.factory_id,
                organization_id: &details.organization_id,
                material_type: details.material_type.as_deref(),
                no_of_blocks: rows.len(),
                blocks: blocks(),
            };
            Ok(BackendRequest {
                method: HttpMethod::Post,
                path: RAW_ADD_PATH.to_string(),
                body: to_body(&body)?,
            })
        }
        SubmissionTarget::AppendToLot { lot_id } => {
            let body = LotBlocksBody {
                no_of_blocks: rows.len(),
                blocks: blocks(),
            };
            Ok(BackendRequest {
                method: HttpMethod::Put,
                path: id_path(LOT_ADD_BLOCKS_PATH, lot_id, "lot_id")?,
                body: to_body(&body)?,
            })
        }
        SubmissionTarget::BlockSlabs { block_id } => {
            validate_slab_area(rows, trim)?;
            let slabs: Vec<SlabEntry> = rows
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let metrics = slab_metrics(record, trim);
                    SlabEntry {
                        slab_number: i + 1,
                        dimensions: *record,
                        square_feet: round2(metrics.square_feet),
                        amount: round2(metrics.amount),
                    }
                })
                .collect();
            let total_square_feet = round2(
                rows.iter()
                    .map(|r| slab_metrics(r, trim).square_feet)
                    .sum(),
            );
            let body = BlockSlabsBody {
                number_of_slabs: slabs.len(),
                trim: *trim,
                slabs,
                total_square_feet,
                status: BlockStatus::Cut,
            };
            Ok(BackendRequest {
                method: HttpMethod::Put,
                path: id_path(BLOCK_ADD_SLAB_PATH, block_id, "block_id")?,
                body: to_body(&body)?,
            })
        }
        SubmissionTarget::BlockSplit { block_id } => {
            let body = SplitBody {
                number_of_sub_blocks: rows.len(),
                sub_blocks: blocks(),
                status: BlockStatus::Split,
            };
            Ok(BackendRequest {
                method: HttpMethod::Put,
                path: id_path(MARK_SPLIT_PATH, block_id, "block_id")?,
                body: to_body(&body)?,
            })
        }
    }
}

/// Every slab must keep a positive area once trim and allowances apply.
fn validate_slab_area(rows: &[DimensionRecord], trim: &Trim) -> Result<(), CoreError> {
    for (index, record) in rows.iter().enumerate() {
        let m = slab_metrics(record, trim);
        if m.adjusted_length <= 0.0 || m.adjusted_height <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Row {index}: trim leaves no slab area ({:.2} x {:.2} in)",
                m.adjusted_length, m.adjusted_height
            )));
        }
    }
    Ok(())
}

/// Append an id as the last path segment. Ids must be non-empty and may
/// not contain path or query delimiters.
fn id_path(base: &str, id: &str, name: &str) -> Result<String, CoreError> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-empty path segment, got '{id}'"
        )));
    }
    Ok(format!("{base}/{id}"))
}

fn to_body<T: Serialize>(body: &T) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(body).map_err(|e| CoreError::Internal(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
