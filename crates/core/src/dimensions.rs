//! Block and slab dimension records.
//!
//! A record keeps each field in the unit it was entered in. Conversion
//! happens only when metrics are computed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::{validate_min_value, validate_non_negative};
use crate::units::{LengthUnit, Measure, WeightUnit};

/// Smallest value a dimension may carry when submitted.
pub const MIN_DIMENSION_VALUE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Field selector
// ---------------------------------------------------------------------------

/// Addresses one field of a [`DimensionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionField {
    Length,
    Breadth,
    Height,
    Weight,
}

impl DimensionField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Breadth => "breadth",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Physical dimensions of one block or slab.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub length: Measure<LengthUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadth: Option<Measure<LengthUnit>>,
    pub height: Measure<LengthUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Measure<WeightUnit>>,
}

impl DimensionRecord {
    /// A slab record: length and height only.
    pub fn slab(length: Measure<LengthUnit>, height: Measure<LengthUnit>) -> Self {
        Self {
            length,
            breadth: None,
            height,
            weight: None,
        }
    }

    /// A block record with all three linear dimensions.
    pub fn block(
        length: Measure<LengthUnit>,
        breadth: Measure<LengthUnit>,
        height: Measure<LengthUnit>,
    ) -> Self {
        Self {
            length,
            breadth: Some(breadth),
            height,
            weight: None,
        }
    }

    pub fn with_weight(mut self, tons: f64) -> Self {
        self.weight = Some(Measure::tons(tons));
        self
    }

    /// A row is "unfilled" when every present value is zero.
    ///
    /// Units are ignored: switching a blank row from inch to cm does not
    /// count as user-entered data.
    pub fn is_default(&self) -> bool {
        self.length.value == 0.0
            && self.height.value == 0.0
            && self.breadth.map_or(true, |b| b.value == 0.0)
            && self.weight.map_or(true, |w| w.value == 0.0)
    }

    /// Read one field's numeric value. Absent optional fields read as `None`.
    pub fn get(&self, field: DimensionField) -> Option<f64> {
        match field {
            DimensionField::Length => Some(self.length.value),
            DimensionField::Breadth => self.breadth.map(|m| m.value),
            DimensionField::Height => Some(self.height.value),
            DimensionField::Weight => self.weight.map(|m| m.value),
        }
    }

    /// Overwrite one field's value, keeping the field's units.
    ///
    /// Absent breadth takes the record's length units; absent weight is
    /// created in tons.
    pub fn set(&mut self, field: DimensionField, value: f64) {
        match field {
            DimensionField::Length => self.length.value = value,
            DimensionField::Height => self.height.value = value,
            DimensionField::Breadth => {
                let units = self.breadth.map_or(self.length.units, |b| b.units);
                self.breadth = Some(Measure::new(value, units));
            }
            DimensionField::Weight => self.weight = Some(Measure::tons(value)),
        }
    }

    /// Check every present value against [`MIN_DIMENSION_VALUE`].
    pub fn validate_for_submission(&self) -> Result<(), CoreError> {
        self.present_values()
            .try_for_each(|(field, value)| validate_min_value(value, MIN_DIMENSION_VALUE, field.name()))
    }

    /// Reject negative or non-finite values. Applied to every edit.
    pub fn validate_non_negative(&self) -> Result<(), CoreError> {
        self.present_values()
            .try_for_each(|(field, value)| validate_non_negative(value, field.name()))
    }

    fn present_values(&self) -> impl Iterator<Item = (DimensionField, f64)> + '_ {
        [
            DimensionField::Length,
            DimensionField::Breadth,
            DimensionField::Height,
            DimensionField::Weight,
        ]
        .into_iter()
        .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}

/// Validate every row, naming the first offending row on failure.
pub fn validate_rows_for_submission(rows: &[DimensionRecord]) -> Result<(), CoreError> {
    validate_each_row(rows, DimensionRecord::validate_for_submission)
}

/// Reject any row holding a negative or non-finite value.
pub fn validate_rows_non_negative(rows: &[DimensionRecord]) -> Result<(), CoreError> {
    validate_each_row(rows, DimensionRecord::validate_non_negative)
}

fn validate_each_row(
    rows: &[DimensionRecord],
    check: impl Fn(&DimensionRecord) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    for (index, record) in rows.iter().enumerate() {
        check(record).map_err(|e| match e {
            CoreError::Validation(msg) => CoreError::Validation(format!("Row {index}: {msg}")),
            other => other,
        })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
