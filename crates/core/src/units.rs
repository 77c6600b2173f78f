//! Unit conversion for block and slab measurements.
//!
//! All factors are fixed and linear. A missing input is treated as 0 rather
//! than as an error; the only failure is asking for an incompatible pair.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Cubic centimetres per cubic metre.
pub const CM3_PER_M3: f64 = 1_000_000.0;

/// Fixed density used to derive block mass from volume.
pub const STONE_DENSITY_TONS_PER_M3: f64 = 3.5;

// ---------------------------------------------------------------------------
// Unit enums
// ---------------------------------------------------------------------------

/// Unit of a linear dimension (length, breadth, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Inch,
    Cm,
}

impl LengthUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Inch => "inch",
            Self::Cm => "cm",
        }
    }
}

/// Unit of a recorded weight. Blocks are only ever weighed in tons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Tons,
}

// ---------------------------------------------------------------------------
// Measure
// ---------------------------------------------------------------------------

/// A numeric value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measure<U> {
    pub value: f64,
    pub units: U,
}

impl<U> Measure<U> {
    pub fn new(value: f64, units: U) -> Self {
        Self { value, units }
    }
}

impl Measure<LengthUnit> {
    pub fn inches(value: f64) -> Self {
        Self::new(value, LengthUnit::Inch)
    }

    pub fn cm(value: f64) -> Self {
        Self::new(value, LengthUnit::Cm)
    }

    /// The value expressed in centimetres.
    pub fn to_cm(&self) -> f64 {
        convert_length(self.value, self.units, LengthUnit::Cm)
    }

    /// The value expressed in inches.
    pub fn to_inches(&self) -> f64 {
        convert_length(self.value, self.units, LengthUnit::Inch)
    }
}

impl Measure<WeightUnit> {
    pub fn tons(value: f64) -> Self {
        Self::new(value, WeightUnit::Tons)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

pub fn cm3_to_m3(cm3: f64) -> f64 {
    cm3 / CM3_PER_M3
}

pub fn m3_to_cm3(m3: f64) -> f64 {
    m3 * CM3_PER_M3
}

/// Mass of a stone volume at the fixed density.
pub fn tons_from_m3(m3: f64) -> f64 {
    m3 * STONE_DENSITY_TONS_PER_M3
}

/// Convert a linear value between units. Identity when `from == to`.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    match (from, to) {
        (LengthUnit::Inch, LengthUnit::Cm) => inches_to_cm(value),
        (LengthUnit::Cm, LengthUnit::Inch) => cm_to_inches(value),
        _ => value,
    }
}

/// Any unit accepted by the conversion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Inch,
    Cm,
    Cm3,
    M3,
    Tons,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Inch => "inch",
            Self::Cm => "cm",
            Self::Cm3 => "cm3",
            Self::M3 => "m3",
            Self::Tons => "tons",
        }
    }
}

/// Convert between any two compatible units.
///
/// Length converts to length, volume to volume, and volume to tons through
/// the stone density. Every other pair is a validation error.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, CoreError> {
    use Unit::*;
    match (from, to) {
        _ if from == to => Ok(value),
        (Inch, Cm) => Ok(inches_to_cm(value)),
        (Cm, Inch) => Ok(cm_to_inches(value)),
        (Cm3, M3) => Ok(cm3_to_m3(value)),
        (M3, Cm3) => Ok(m3_to_cm3(value)),
        (M3, Tons) => Ok(tons_from_m3(value)),
        (Cm3, Tons) => Ok(tons_from_m3(cm3_to_m3(value))),
        _ => Err(CoreError::Validation(format!(
            "Cannot convert {} to {}",
            from.label(),
            to.label()
        ))),
    }
}

/// Missing inputs count as zero.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
