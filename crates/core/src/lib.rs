//! Stoneyard domain core.
//!
//! Pure block/slab bookkeeping: unit conversion, dimension records, derived
//! metrics, the row-list state container with its resize flow, draft
//! snapshots, and backend request construction. No I/O.

pub mod dimensions;
pub mod draft;
pub mod error;
pub mod metrics;
pub mod resize;
pub mod rows;
pub mod submission;
pub mod threshold_validation;
pub mod types;
pub mod units;
