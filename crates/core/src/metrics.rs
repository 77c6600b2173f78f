//! Derived metrics for blocks and slabs.
//!
//! Slab area is computed in inches (the finishing allowance constants are
//! inch margins). Block volume is computed in centimetres. Everything is a
//! plain function of the current record; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::dimensions::DimensionRecord;
use crate::units::{cm3_to_m3, tons_from_m3};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Added to the trimmed slab length (inches).
pub const LENGTH_ALLOWANCE: f64 = 6.0;
/// Subtracted from the trimmed slab length (inches).
pub const LENGTH_REDUCTION: f64 = 4.0;
/// Added to the trimmed slab height (inches).
pub const HEIGHT_ALLOWANCE: f64 = 2.0;
/// Subtracted from the trimmed slab height (inches).
pub const HEIGHT_REDUCTION: f64 = 2.0;

/// Square inches per square foot.
pub const SQ_INCHES_PER_SQ_FOOT: f64 = 144.0;

/// Price per square foot of finished slab.
pub const RATE_PER_SQF: f64 = 11.0;

// ---------------------------------------------------------------------------
// Trim
// ---------------------------------------------------------------------------

/// Per-slab finishing allowance in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Trim {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub height: f64,
}

impl Trim {
    pub fn new(length: f64, height: f64) -> Self {
        Self { length, height }
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

pub fn adjusted_length(raw_inches: f64, trim_inches: f64) -> f64 {
    raw_inches - trim_inches + LENGTH_ALLOWANCE - LENGTH_REDUCTION
}

pub fn adjusted_height(raw_inches: f64, trim_inches: f64) -> f64 {
    raw_inches - trim_inches + HEIGHT_ALLOWANCE - HEIGHT_REDUCTION
}

pub fn square_feet(length_inches: f64, height_inches: f64) -> f64 {
    (length_inches * height_inches) / SQ_INCHES_PER_SQ_FOOT
}

pub fn amount(square_feet: f64) -> f64 {
    square_feet * RATE_PER_SQF
}

/// Volume in cubic metres from dimensions in centimetres.
pub fn volume_m3(length_cm: f64, breadth_cm: f64, height_cm: f64) -> f64 {
    cm3_to_m3(length_cm * breadth_cm * height_cm)
}

/// Block mass in tons from dimensions in centimetres.
pub fn weight_tons(length_cm: f64, breadth_cm: f64, height_cm: f64) -> f64 {
    tons_from_m3(volume_m3(length_cm, breadth_cm, height_cm))
}

/// Round half away from zero to two decimals, as displayed in tables.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Slab metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlabMetrics {
    pub adjusted_length: f64,
    pub adjusted_height: f64,
    pub square_feet: f64,
    pub amount: f64,
}

impl SlabMetrics {
    /// Two-decimal copy. Amount is rounded from the unrounded area.
    pub fn rounded(&self) -> Self {
        Self {
            adjusted_length: round2(self.adjusted_length),
            adjusted_height: round2(self.adjusted_height),
            square_feet: round2(self.square_feet),
            amount: round2(self.amount),
        }
    }
}

pub fn slab_metrics(record: &DimensionRecord, trim: &Trim) -> SlabMetrics {
    let adjusted_length = adjusted_length(record.length.to_inches(), trim.length);
    let adjusted_height = adjusted_height(record.height.to_inches(), trim.height);
    let square_feet = square_feet(adjusted_length, adjusted_height);
    SlabMetrics {
        adjusted_length,
        adjusted_height,
        square_feet,
        amount: amount(square_feet),
    }
}

// ---------------------------------------------------------------------------
// Block metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockMetrics {
    pub volume_m3: f64,
    pub weight_tons: f64,
}

impl BlockMetrics {
    pub fn rounded(&self) -> Self {
        Self {
            volume_m3: round2(self.volume_m3),
            weight_tons: round2(self.weight_tons),
        }
    }
}

/// Missing breadth yields zero volume.
pub fn block_metrics(record: &DimensionRecord) -> BlockMetrics {
    let length = record.length.to_cm();
    let breadth = record.breadth.map_or(0.0, |b| b.to_cm());
    let height = record.height.to_cm();
    let volume = volume_m3(length, breadth, height);
    BlockMetrics {
        volume_m3: volume,
        weight_tons: tons_from_m3(volume),
    }
}

// ---------------------------------------------------------------------------
// Row metrics and totals
// ---------------------------------------------------------------------------

/// Both metric families for one row, as shown in a table line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowMetrics {
    pub index: usize,
    pub block: BlockMetrics,
    pub slab: SlabMetrics,
}

/// Footer sums across a row list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RowTotals {
    pub rows: usize,
    pub volume_m3: f64,
    pub weight_tons: f64,
    pub square_feet: f64,
    pub amount: f64,
}

impl RowTotals {
    pub fn rounded(&self) -> Self {
        Self {
            rows: self.rows,
            volume_m3: round2(self.volume_m3),
            weight_tons: round2(self.weight_tons),
            square_feet: round2(self.square_feet),
            amount: round2(self.amount),
        }
    }
}

pub fn row_metrics(rows: &[DimensionRecord], trim: &Trim) -> Vec<RowMetrics> {
    rows.iter()
        .enumerate()
        .map(|(index, record)| RowMetrics {
            index,
            block: block_metrics(record),
            slab: slab_metrics(record, trim),
        })
        .collect()
}

pub fn totals(rows: &[DimensionRecord], trim: &Trim) -> RowTotals {
    row_metrics(rows, trim)
        .iter()
        .fold(RowTotals::default(), |mut acc, m| {
            acc.rows += 1;
            acc.volume_m3 += m.block.volume_m3;
            acc.weight_tons += m.block.weight_tons;
            acc.square_feet += m.slab.square_feet;
            acc.amount += m.slab.amount;
            acc
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Measure;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS * a.abs().max(b.abs()).max(1.0)
    }

    // -- block formulas ------------------------------------------------------

    #[test]
    fn volume_and_weight_formulas_hold() {
        for (l, b, h) in [(0.0, 5.0, 5.0), (1.0, 1.0, 1.0), (200.0, 100.0, 150.0), (33.3, 71.2, 9.9)] {
            let v = volume_m3(l, b, h);
            assert!(close(v, (l * b * h) / 1_000_000.0));
            assert!(close(weight_tons(l, b, h), v * 3.5));
        }
    }

    #[test]
    fn block_scenario_200_100_150_cm() {
        let record = DimensionRecord::block(Measure::cm(200.0), Measure::cm(100.0), Measure::cm(150.0));
        let m = block_metrics(&record);
        assert!(close(m.volume_m3, 3.0));
        assert!(close(m.weight_tons, 10.5));
    }

    #[test]
    fn block_in_inches_is_converted_to_cm() {
        let record = DimensionRecord::block(Measure::inches(10.0), Measure::inches(10.0), Measure::inches(10.0));
        let m = block_metrics(&record);
        assert!(close(m.volume_m3, 25.4 * 25.4 * 25.4 / 1_000_000.0));
    }

    #[test]
    fn block_without_breadth_has_no_volume() {
        let record = DimensionRecord::slab(Measure::cm(200.0), Measure::cm(150.0));
        assert_eq!(block_metrics(&record).volume_m3, 0.0);
    }

    // -- slab formulas -------------------------------------------------------

    #[test]
    fn square_feet_and_amount_formulas_hold() {
        for (l, h) in [(118.0, 58.0), (12.0, 12.0), (0.0, 40.0)] {
            let sqf = square_feet(l, h);
            assert!(close(sqf, l * h / 144.0));
            assert!(close(amount(sqf), sqf * 11.0));
        }
    }

    #[test]
    fn slab_scenario_with_trim() {
        let record = DimensionRecord::slab(Measure::inches(120.0), Measure::inches(60.0));
        let m = slab_metrics(&record, &Trim::new(4.0, 2.0));
        assert!(close(m.adjusted_length, 118.0));
        assert!(close(m.adjusted_height, 58.0));
        assert!(close(m.square_feet, 118.0 * 58.0 / 144.0));

        let r = m.rounded();
        assert_eq!(r.square_feet, 47.53);
        assert_eq!(r.amount, 522.81);
    }

    #[test]
    fn slab_without_trim_gets_net_allowance() {
        let record = DimensionRecord::slab(Measure::inches(100.0), Measure::inches(50.0));
        let m = slab_metrics(&record, &Trim::default());
        assert!(close(m.adjusted_length, 102.0));
        assert!(close(m.adjusted_height, 50.0));
    }

    #[test]
    fn slab_in_cm_is_converted_to_inches() {
        let record = DimensionRecord::slab(Measure::cm(254.0), Measure::cm(127.0));
        let m = slab_metrics(&record, &Trim::default());
        assert!(close(m.adjusted_length, 102.0));
        assert!(close(m.adjusted_height, 50.0));
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(47.527_777), 47.53);
        assert_eq!(round2(10.5), 10.5);
        assert_eq!(round2(0.004), 0.0);
    }

    // -- totals --------------------------------------------------------------

    #[test]
    fn totals_sum_every_row() {
        let rows = vec![
            DimensionRecord::block(Measure::cm(200.0), Measure::cm(100.0), Measure::cm(150.0)),
            DimensionRecord::block(Measure::cm(100.0), Measure::cm(100.0), Measure::cm(100.0)),
        ];
        let t = totals(&rows, &Trim::default());
        assert_eq!(t.rows, 2);
        assert!(close(t.volume_m3, 4.0));
        assert!(close(t.weight_tons, 14.0));
    }

    #[test]
    fn totals_of_empty_list_are_zero() {
        assert_eq!(totals(&[], &Trim::default()), RowTotals::default());
    }

    #[test]
    fn row_metrics_keep_positional_index() {
        let rows = vec![DimensionRecord::default(); 3];
        let metrics = row_metrics(&rows, &Trim::default());
        let indices: Vec<usize> = metrics.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
