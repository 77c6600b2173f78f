//! Stateless calculators for unit conversion and block/slab metrics.
//!
//! Missing numeric inputs are treated as 0, matching how the forms compute
//! live previews before every field is filled.

use axum::Json;
use serde::{Deserialize, Serialize};
use stoneyard_core::dimensions::DimensionRecord;
use stoneyard_core::metrics::{self, BlockMetrics, SlabMetrics, Trim};
use stoneyard_core::units::{self, or_zero, LengthUnit, Measure, Unit};

use crate::error::AppResult;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// POST /calc/convert
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ConvertBody {
    pub value: Option<f64>,
    pub from: Unit,
    pub to: Unit,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub value: f64,
    pub units: Unit,
}

pub async fn convert(Json(body): Json<ConvertBody>) -> AppResult<Json<DataResponse<ConvertResponse>>> {
    let value = units::convert(or_zero(body.value), body.from, body.to)?;
    Ok(Json(DataResponse {
        data: ConvertResponse {
            value,
            units: body.to,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /calc/slab
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SlabCalcBody {
    pub length: Option<f64>,
    pub height: Option<f64>,
    #[serde(default)]
    pub units: LengthUnit,
    #[serde(default)]
    pub trim: Trim,
}

pub async fn slab(Json(body): Json<SlabCalcBody>) -> Json<DataResponse<SlabMetrics>> {
    let record = DimensionRecord::slab(
        Measure::new(or_zero(body.length), body.units),
        Measure::new(or_zero(body.height), body.units),
    );
    let data = metrics::slab_metrics(&record, &body.trim).rounded();
    Json(DataResponse { data })
}

// ---------------------------------------------------------------------------
// POST /calc/block
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct BlockCalcBody {
    pub length: Option<f64>,
    pub breadth: Option<f64>,
    pub height: Option<f64>,
    #[serde(default = "default_block_units")]
    pub units: LengthUnit,
}

fn default_block_units() -> LengthUnit {
    LengthUnit::Cm
}

pub async fn block(Json(body): Json<BlockCalcBody>) -> Json<DataResponse<BlockMetrics>> {
    let record = DimensionRecord::block(
        Measure::new(or_zero(body.length), body.units),
        Measure::new(or_zero(body.breadth), body.units),
        Measure::new(or_zero(body.height), body.units),
    );
    let data = metrics::block_metrics(&record).rounded();
    Json(DataResponse { data })
}
