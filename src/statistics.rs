//! # Ensemble statistics
//!
//! Reduces the stack of per-member histogram triples into mean and
//! percentile-band matrices, cell by cell across the member axis.
//!
//! The stack arrives in completion order, which carries no meaning; every
//! statistic here is invariant to member order. Percentiles use linear
//! interpolation between order statistics (rank = p/100 · (M−1)), so a single
//! member makes mean, upper and lower coincide.

use nalgebra::DMatrix;

use crate::constants::{LOWER_PERCENTILE, UPPER_PERCENTILE};
use crate::histogram::CrossingHistograms;
use crate::loncross_errors::LoncrossError;

/// Mean and percentile-band matrices of one synthetic ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleSummary {
    pub mean: CrossingHistograms,
    /// 95th percentile across members.
    pub upper: CrossingHistograms,
    /// 5th percentile across members.
    pub lower: CrossingHistograms,
}

/// Percentile of an ascending-sorted slice, linear interpolation between ranks.
pub(crate) fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Reduce one channel (total, eastward or westward) across the member axis.
fn channel_stats(
    members: &[&DMatrix<f64>],
) -> Result<(DMatrix<f64>, DMatrix<f64>, DMatrix<f64>), LoncrossError> {
    let shape = members[0].shape();
    if members.iter().any(|m| m.shape() != shape) {
        return Err(LoncrossError::ShapeMismatch);
    }

    let (rows, cols) = shape;
    let mut mean = DMatrix::zeros(rows, cols);
    let mut upper = DMatrix::zeros(rows, cols);
    let mut lower = DMatrix::zeros(rows, cols);

    let mut samples = vec![0.0; members.len()];
    for col in 0..cols {
        for row in 0..rows {
            for (k, member) in members.iter().enumerate() {
                samples[k] = member[(row, col)];
            }
            mean[(row, col)] = samples.iter().sum::<f64>() / samples.len() as f64;
            samples.sort_unstable_by(|a, b| a.partial_cmp(b).expect("finite histogram values"));
            upper[(row, col)] = percentile(&samples, UPPER_PERCENTILE);
            lower[(row, col)] = percentile(&samples, LOWER_PERCENTILE);
        }
    }

    Ok((mean, upper, lower))
}

/// Reduce a stack of member histogram triples into an [`EnsembleSummary`].
///
/// Arguments
/// -----------------
/// * `stack` – one histogram triple per ensemble member, any order.
///
/// Return
/// ----------
/// * `Ok(EnsembleSummary)` – mean/upper/lower per channel.
/// * `Err(LoncrossError::EmptyEnsemble)` – the stack is empty (precondition
///   violation; the distributor never produces this for a non-empty member list).
pub fn summarize(stack: &[CrossingHistograms]) -> Result<EnsembleSummary, LoncrossError> {
    if stack.is_empty() {
        return Err(LoncrossError::EmptyEnsemble);
    }

    let totals: Vec<&DMatrix<f64>> = stack.iter().map(|h| &h.total).collect();
    let eastwards: Vec<&DMatrix<f64>> = stack.iter().map(|h| &h.eastward).collect();
    let westwards: Vec<&DMatrix<f64>> = stack.iter().map(|h| &h.westward).collect();

    let (mean_t, upper_t, lower_t) = channel_stats(&totals)?;
    let (mean_e, upper_e, lower_e) = channel_stats(&eastwards)?;
    let (mean_w, upper_w, lower_w) = channel_stats(&westwards)?;

    Ok(EnsembleSummary {
        mean: CrossingHistograms {
            total: mean_t,
            eastward: mean_e,
            westward: mean_w,
        },
        upper: CrossingHistograms {
            total: upper_t,
            eastward: upper_e,
            westward: upper_w,
        },
        lower: CrossingHistograms {
            total: lower_t,
            eastward: lower_e,
            westward: lower_w,
        },
    })
}
