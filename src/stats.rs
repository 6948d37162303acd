//! Sample summary statistics for simulation trial values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// Callers must never summarize zero samples; this is a contract
    /// violation, not a recoverable data condition.
    #[error("cannot summarize an empty sample")]
    EmptySample,
}

fn sorted(samples: &[f64]) -> Result<Vec<f64>, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let mut s = samples.to_vec();
    s.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(s)
}

/// Median: middle element for odd counts, average of the two middle
/// elements for even counts.
pub fn median(samples: &[f64]) -> Result<f64, StatsError> {
    let s = sorted(samples)?;
    let n = s.len();
    if n % 2 == 1 {
        Ok(s[n / 2])
    } else {
        Ok((s[n / 2 - 1] + s[n / 2]) / 2.0)
    }
}

/// Nearest-rank percentile for `p` in [0, 1]: the element at
/// index = ceil(p * n) - 1, clamped into [0, n - 1].
///
/// This is deliberately NOT the interpolated percentile; downstream
/// consumers were calibrated against this exact convention and a different
/// formula produces different confidence bands.
pub fn percentile(samples: &[f64], p: f64) -> Result<f64, StatsError> {
    let s = sorted(samples)?;
    let n = s.len();
    let rank = (p * n as f64).ceil() as i64 - 1;
    let idx = rank.clamp(0, n as i64 - 1) as usize;
    Ok(s[idx])
}
