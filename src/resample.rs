//! Downsampling of dense daily simulation tables.
//!
//! Charts cannot show hundreds of daily points, so the table is thinned to
//! every 7th row plus, unconditionally, the first and last rows. Near the
//! end of the sequence two kept points may therefore be closer than the
//! stride.

use chrono::NaiveDate;

use crate::horizon::relative_label;
use crate::model::{ResampledSimulationPoint, SimulationRow};
use crate::stats;

const STRIDE: usize = 7;

fn is_kept(index: usize, len: usize) -> bool {
    index % STRIDE == 0 || index == 0 || index == len - 1
}

/// Resample a dense, date-ordered simulation table into sparse summary
/// points. `reference` anchors the relative-time labels; callers inject it
/// so outputs are a pure function of their inputs.
pub fn resample(rows: &[SimulationRow], reference: NaiveDate) -> Vec<ResampledSimulationPoint> {
    let mut points = Vec::new();
    let len = rows.len();
    for (index, row) in rows.iter().enumerate() {
        if !is_kept(index, len) {
            continue;
        }
        let values: Vec<f64> = row.values.iter().filter_map(|v| *v).collect();
        // A kept row with no present trial values has nothing to summarize;
        // the summarizer contract forbids empty samples.
        if values.is_empty() {
            continue;
        }
        let median = match stats::median(&values) {
            Ok(m) => m,
            Err(_) => continue,
        };
        let lower05 = stats::percentile(&values, 0.05).unwrap_or(median);
        let upper95 = stats::percentile(&values, 0.95).unwrap_or(median);
        points.push(ResampledSimulationPoint {
            timestamp: relative_label(&row.date, reference),
            median,
            lower05,
            upper95,
            values,
        });
    }
    points
}
