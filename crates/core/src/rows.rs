//! Ordered row list of dimension records with immutable-update actions.
//!
//! A form holds exactly one [`RowList`]; every change goes through
//! [`RowList::apply`], which returns the next list and leaves the current
//! one untouched.

use serde::{Deserialize, Serialize};

use crate::dimensions::{validate_rows_non_negative, DimensionField, DimensionRecord};
use crate::error::CoreError;
use crate::threshold_validation::validate_non_negative;

/// Maximum number of rows a single form may hold.
pub const MAX_ROW_COUNT: usize = 500;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A single edit to a row list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RowAction {
    /// Replace the whole list, e.g. with an existing lot's blocks.
    Seed { records: Vec<DimensionRecord> },
    Append { record: DimensionRecord },
    Replace { index: usize, record: DimensionRecord },
    SetField { index: usize, field: DimensionField, value: f64 },
    Delete { index: usize },
    ApplyToAll { field: DimensionField, value: f64 },
}

// ---------------------------------------------------------------------------
// Row list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowList {
    rows: Vec<DimensionRecord>,
}

impl RowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from existing records, enforcing [`MAX_ROW_COUNT`] and
    /// rejecting negative values.
    pub fn from_records(records: Vec<DimensionRecord>) -> Result<Self, CoreError> {
        validate_row_count(records.len())?;
        validate_rows_non_negative(&records)?;
        Ok(Self { rows: records })
    }

    /// A list of `count` default rows.
    pub fn with_default_rows(count: usize) -> Result<Self, CoreError> {
        Self::from_records(vec![DimensionRecord::default(); count])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DimensionRecord] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&DimensionRecord> {
        self.rows.get(index)
    }

    pub fn into_records(self) -> Vec<DimensionRecord> {
        self.rows
    }

    /// Indices in `from..` holding user-entered data.
    pub fn filled_indices_from(&self, from: usize) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .skip(from)
            .filter(|(_, r)| !r.is_default())
            .map(|(i, _)| i)
            .collect()
    }

    /// Grow to `count` rows by appending default records.
    pub fn grown_to(&self, count: usize) -> Result<Self, CoreError> {
        validate_row_count(count)?;
        let mut rows = self.rows.clone();
        if count > rows.len() {
            rows.resize(count, DimensionRecord::default());
        }
        Ok(Self { rows })
    }

    /// Keep only the first `count` rows.
    pub fn truncated_to(&self, count: usize) -> Self {
        Self {
            rows: self.rows.iter().take(count).copied().collect(),
        }
    }

    /// Produce the list that results from applying `action`.
    pub fn apply(&self, action: RowAction) -> Result<Self, CoreError> {
        match action {
            RowAction::Seed { records } => Self::from_records(records),
            RowAction::Append { record } => {
                validate_row_count(self.rows.len() + 1)?;
                record.validate_non_negative()?;
                let mut rows = self.rows.clone();
                rows.push(record);
                Ok(Self { rows })
            }
            RowAction::Replace { index, record } => {
                self.check_index(index)?;
                record.validate_non_negative()?;
                let mut rows = self.rows.clone();
                rows[index] = record;
                Ok(Self { rows })
            }
            RowAction::SetField { index, field, value } => {
                self.check_index(index)?;
                validate_non_negative(value, field.name())?;
                let mut rows = self.rows.clone();
                rows[index].set(field, value);
                Ok(Self { rows })
            }
            RowAction::Delete { index } => {
                self.check_index(index)?;
                let mut rows = self.rows.clone();
                rows.remove(index);
                Ok(Self { rows })
            }
            RowAction::ApplyToAll { field, value } => {
                validate_non_negative(value, field.name())?;
                Ok(Self {
                    rows: apply_to_all(&self.rows, field, value),
                })
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index >= self.rows.len() {
            return Err(CoreError::Validation(format!(
                "Row index {index} is out of range ({} rows)",
                self.rows.len()
            )));
        }
        Ok(())
    }
}

/// Overwrite `field` with `value` on every row, keeping each row's units.
pub fn apply_to_all(
    rows: &[DimensionRecord],
    field: DimensionField,
    value: f64,
) -> Vec<DimensionRecord> {
    rows.iter()
        .map(|record| {
            let mut next = *record;
            next.set(field, value);
            next
        })
        .collect()
}

/// Row counts may be zero (an empty form) up to [`MAX_ROW_COUNT`].
pub fn validate_row_count(count: usize) -> Result<(), CoreError> {
    if count > MAX_ROW_COUNT {
        return Err(CoreError::Validation(format!(
            "Row count must be at most {MAX_ROW_COUNT}, got {count}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
