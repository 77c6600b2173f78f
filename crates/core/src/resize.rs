//! Row-count resizing with confirmation before data loss.
//!
//! ```text
//! Idle --grow / shrink over blank rows--> Idle (resized)
//! Idle --shrink over filled rows--------> PendingConfirmation
//! PendingConfirmation --confirm---------> Idle (truncated)
//! PendingConfirmation --cancel----------> Idle (count reverted)
//! ```
//!
//! [`DimensionForm`] pairs the row list with this state so a form has a
//! single source of truth.

use serde::Serialize;

use crate::error::CoreError;
use crate::rows::{validate_row_count, RowAction, RowList};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResizeState {
    #[default]
    Idle,
    PendingConfirmation {
        requested: usize,
        prior_len: usize,
        /// Rows in `requested..prior_len` that hold user-entered data.
        affected: Vec<usize>,
    },
}

impl ResizeState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingConfirmation { .. })
    }
}

/// What a resize request did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResizeOutcome {
    /// The list now has `len` rows.
    Resized { len: usize },
    /// Nothing changed yet; the listed rows would be discarded.
    NeedsConfirmation { affected: Vec<usize> },
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Row list plus resize state for one open form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DimensionForm {
    rows: RowList,
    resize: ResizeState,
}

impl DimensionForm {
    pub fn new(rows: RowList) -> Self {
        Self {
            rows,
            resize: ResizeState::Idle,
        }
    }

    pub fn rows(&self) -> &RowList {
        &self.rows
    }

    pub fn resize_state(&self) -> &ResizeState {
        &self.resize
    }

    /// Count shown in the row-count input: the requested count while a
    /// truncation awaits confirmation, otherwise the actual length.
    pub fn displayed_count(&self) -> usize {
        match &self.resize {
            ResizeState::PendingConfirmation { requested, .. } => *requested,
            ResizeState::Idle => self.rows.len(),
        }
    }

    /// Apply a row edit. Rejected while a truncation is pending.
    pub fn dispatch(&mut self, action: RowAction) -> Result<(), CoreError> {
        self.ensure_idle()?;
        self.rows = self.rows.apply(action)?;
        Ok(())
    }

    /// Ask for `target` rows.
    pub fn request_resize(&mut self, target: usize) -> Result<ResizeOutcome, CoreError> {
        self.ensure_idle()?;
        validate_row_count(target)?;

        let len = self.rows.len();
        if target >= len {
            self.rows = self.rows.grown_to(target)?;
            return Ok(ResizeOutcome::Resized { len: target });
        }

        let affected = self.rows.filled_indices_from(target);
        if affected.is_empty() {
            self.rows = self.rows.truncated_to(target);
            return Ok(ResizeOutcome::Resized { len: target });
        }

        self.resize = ResizeState::PendingConfirmation {
            requested: target,
            prior_len: len,
            affected: affected.clone(),
        };
        Ok(ResizeOutcome::NeedsConfirmation { affected })
    }

    /// Accept the pending truncation.
    pub fn confirm_resize(&mut self) -> Result<usize, CoreError> {
        match std::mem::take(&mut self.resize) {
            ResizeState::PendingConfirmation { requested, .. } => {
                self.rows = self.rows.truncated_to(requested);
                Ok(requested)
            }
            ResizeState::Idle => Err(no_pending_resize()),
        }
    }

    /// Drop the pending truncation; returns the restored count.
    pub fn cancel_resize(&mut self) -> Result<usize, CoreError> {
        match std::mem::take(&mut self.resize) {
            ResizeState::PendingConfirmation { prior_len, .. } => Ok(prior_len),
            ResizeState::Idle => Err(no_pending_resize()),
        }
    }

    fn ensure_idle(&self) -> Result<(), CoreError> {
        if let ResizeState::PendingConfirmation { requested, .. } = &self.resize {
            return Err(CoreError::Conflict(format!(
                "Resize to {requested} rows is awaiting confirmation"
            )));
        }
        Ok(())
    }
}

fn no_pending_resize() -> CoreError {
    CoreError::Conflict("No resize is awaiting confirmation".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::dimensions::{DimensionField, DimensionRecord};
    use crate::units::Measure;

    fn filled(n: usize) -> Vec<DimensionRecord> {
        (1..=n)
            .map(|i| DimensionRecord::slab(Measure::inches(i as f64), Measure::inches(10.0)))
            .collect()
    }

    fn form(records: Vec<DimensionRecord>) -> DimensionForm {
        DimensionForm::new(RowList::from_records(records).unwrap())
    }

    #[test]
    fn growing_keeps_prefix_and_appends_defaults() {
        let original = filled(3);
        let mut f = form(original.clone());

        let outcome = f.request_resize(6).unwrap();

        assert_eq!(outcome, ResizeOutcome::Resized { len: 6 });
        assert_eq!(&f.rows().rows()[..3], original.as_slice());
        assert!(f.rows().rows()[3..].iter().all(DimensionRecord::is_default));
        assert_eq!(f.resize_state(), &ResizeState::Idle);
    }

    #[test]
    fn same_count_is_a_no_op() {
        let mut f = form(filled(2));
        assert_eq!(f.request_resize(2).unwrap(), ResizeOutcome::Resized { len: 2 });
        assert_eq!(f.rows().len(), 2);
    }

    #[test]
    fn shrinking_over_filled_rows_waits_for_confirmation() {
        let original = filled(5);
        let mut f = form(original.clone());

        let outcome = f.request_resize(2).unwrap();

        assert_eq!(
            outcome,
            ResizeOutcome::NeedsConfirmation { affected: vec![2, 3, 4] }
        );
        assert_eq!(f.rows().rows(), original.as_slice());
        assert_eq!(f.displayed_count(), 2);
        assert!(f.resize_state().is_pending());
    }

    #[test]
    fn confirm_truncates_to_original_prefix() {
        let original = filled(5);
        let mut f = form(original.clone());
        f.request_resize(2).unwrap();

        assert_eq!(f.confirm_resize().unwrap(), 2);

        assert_eq!(f.rows().rows(), &original[..2]);
        assert_eq!(f.resize_state(), &ResizeState::Idle);
    }

    #[test]
    fn cancel_restores_prior_count() {
        let original = filled(4);
        let mut f = form(original.clone());
        f.request_resize(1).unwrap();

        assert_eq!(f.cancel_resize().unwrap(), 4);

        assert_eq!(f.rows().rows(), original.as_slice());
        assert_eq!(f.displayed_count(), 4);
    }

    #[test]
    fn shrinking_over_blank_rows_needs_no_confirmation() {
        let mut records = filled(2);
        records.extend(vec![DimensionRecord::default(); 3]);
        let mut f = form(records);

        assert_eq!(f.request_resize(2).unwrap(), ResizeOutcome::Resized { len: 2 });
        assert_eq!(f.rows().len(), 2);
        assert_eq!(f.resize_state(), &ResizeState::Idle);
    }

    #[test]
    fn only_filled_rows_are_reported_as_affected() {
        let mut records = filled(1);
        records.push(DimensionRecord::default());
        records.extend(filled(1));
        let mut f = form(records);

        assert_eq!(
            f.request_resize(0).unwrap(),
            ResizeOutcome::NeedsConfirmation { affected: vec![0, 2] }
        );
    }

    #[test]
    fn edits_are_rejected_while_pending() {
        let mut f = form(filled(3));
        f.request_resize(1).unwrap();

        assert_matches!(
            f.dispatch(RowAction::ApplyToAll { field: DimensionField::Length, value: 1.0 }),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(f.request_resize(5), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn confirm_or_cancel_without_pending_is_conflict() {
        let mut f = form(filled(1));
        assert_matches!(f.confirm_resize(), Err(CoreError::Conflict(_)));
        assert_matches!(f.cancel_resize(), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn resize_beyond_max_is_rejected() {
        let mut f = form(filled(1));
        assert_matches!(
            f.request_resize(crate::rows::MAX_ROW_COUNT + 1),
            Err(CoreError::Validation(_))
        );
        assert_eq!(f.rows().len(), 1);
    }

    #[test]
    fn dispatch_updates_rows_when_idle() {
        let mut f = form(filled(2));
        f.dispatch(RowAction::Delete { index: 0 }).unwrap();
        assert_eq!(f.rows().len(), 1);
    }

    #[test]
    fn pending_state_serializes_with_tag() {
        let mut f = form(filled(2));
        f.request_resize(0).unwrap();
        let json = serde_json::to_value(f.resize_state()).unwrap();
        assert_eq!(json["state"], "pending_confirmation");
        assert_eq!(json["requested"], 0);
        assert_eq!(json["prior_len"], 2);
    }
}
