//! Price distribution estimation: histogram, kernel density, percentiles and
//! the empirical cumulative distribution.
use std::collections::BTreeMap;

use crate::analyzer::descriptive;
use crate::model::{CumulativePoint, DensityPoint, HistogramBin, PriceDistribution};

/// Number of evaluation points for the kernel density curve, independent of
/// the sample size.
pub const DENSITY_GRID_POINTS: usize = 101;

const PERCENTILE_LEVELS: [u8; 8] = [5, 10, 25, 50, 75, 90, 95, 99];

/// Estimates the price distribution of a batch. `sorted` must be ascending;
/// `bandwidth` overrides Scott's rule for the kernel density when supplied.
pub fn estimate(sorted: &[f64], bandwidth: Option<f64>) -> PriceDistribution {
    if sorted.is_empty() {
        return PriceDistribution::default();
    }

    PriceDistribution {
        histogram: histogram(sorted),
        density: kernel_density(sorted, bandwidth),
        percentiles: percentiles(sorted),
        cumulative_distribution: cumulative(sorted),
    }
}

/// Uniform histogram over [min, max] with `min(20, ceil(sqrt(n)))` bins.
/// The final bin is closed so the maximum value is counted.
fn histogram(sorted: &[f64]) -> Vec<HistogramBin> {
    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let bins = ((n as f64).sqrt().ceil() as usize).clamp(1, 20);
    let width = (max - min) / bins as f64;

    if width == 0.0 {
        // All observations share one price: a single zero-width bin.
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: n,
            percentage: 100.0,
            density: 0.0,
        }];
    }

    let mut counts = vec![0usize; bins];
    for &p in sorted {
        let idx = (((p - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
            percentage: count as f64 / n as f64 * 100.0,
            density: count as f64 / (width * n as f64),
        })
        .collect()
}

/// Gaussian kernel density on a fixed grid across [min, max]. Bandwidth is
/// Scott's rule `1.06 * sigma * n^(-1/5)` unless overridden. A zero spread
/// (or non-positive override) yields a flat zero curve rather than NaN.
fn kernel_density(sorted: &[f64], bandwidth: Option<f64>) -> Vec<DensityPoint> {
    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let sigma = descriptive::population_std(sorted);
    let h = bandwidth.unwrap_or_else(|| 1.06 * sigma * (n as f64).powf(-0.2));

    let step = if DENSITY_GRID_POINTS > 1 {
        (max - min) / (DENSITY_GRID_POINTS - 1) as f64
    } else {
        0.0
    };

    (0..DENSITY_GRID_POINTS)
        .map(|i| {
            let x = min + i as f64 * step;
            let density = if h > 0.0 {
                let sum: f64 = sorted.iter().map(|&p| gaussian((x - p) / h)).sum();
                sum / (n as f64 * h)
            } else {
                0.0
            };
            DensityPoint { x, density }
        })
        .collect()
}

/// Standard normal density.
fn gaussian(u: f64) -> f64 {
    (-0.5 * u * u).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Percentiles by linear interpolation between bracketing order statistics.
fn percentiles(sorted: &[f64]) -> BTreeMap<u8, f64> {
    let n = sorted.len();
    PERCENTILE_LEVELS
        .iter()
        .map(|&p| {
            let idx = p as f64 / 100.0 * (n - 1) as f64;
            let lo = idx.floor() as usize;
            let hi = idx.ceil() as usize;
            let value = if lo == hi {
                sorted[lo]
            } else {
                let frac = idx - lo as f64;
                sorted[lo] + (sorted[hi] - sorted[lo]) * frac
            };
            (p, value)
        })
        .collect()
}

/// Empirical CDF: rank i (0-based) maps to (i + 1) / n.
fn cumulative(sorted: &[f64]) -> Vec<CumulativePoint> {
    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &price)| CumulativePoint {
            price,
            cumulative: (i + 1) as f64 / n,
        })
        .collect()
}
