//! Descriptive statistics over a batch of observed sale prices.
use std::collections::HashMap;

use crate::model::{DescriptiveStats, PriceBounds};

/// Arithmetic mean. 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divide by n, not n-1). 0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Computes the full descriptive profile of a price batch. Input may arrive
/// in any order; values must already be positive and finite.
pub fn calculate(prices: &[f64]) -> DescriptiveStats {
    if prices.is_empty() {
        return DescriptiveStats::default();
    }

    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let mean = mean(&sorted);
    let variance = population_variance(&sorted);
    let std_dev = variance.sqrt();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    // Nearest-rank quartiles: index floor(n * f), clamped for safety.
    let rank = |f: f64| sorted[((n as f64 * f) as usize).min(n - 1)];
    let quartiles = [rank(0.25), rank(0.5), rank(0.75)];
    let iqr = quartiles[2] - quartiles[0];

    // Tukey's fences.
    let lower_fence = quartiles[0] - 1.5 * iqr;
    let upper_fence = quartiles[2] + 1.5 * iqr;
    let outliers: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|&p| p < lower_fence || p > upper_fence)
        .collect();

    let (skewness, kurtosis) = standardized_moments(&sorted, mean, std_dev);

    DescriptiveStats {
        mean,
        median,
        mode: mode(&sorted),
        standard_deviation: std_dev,
        variance,
        quartiles,
        outliers,
        skewness,
        kurtosis,
        range: PriceBounds {
            min: sorted[0],
            max: sorted[n - 1],
        },
        interquartile_range: iqr,
    }
}

/// All values sharing the maximum observed frequency, ascending.
fn mode(sorted: &[f64]) -> Vec<f64> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &v in sorted {
        *counts.entry(v.to_bits()).or_insert(0) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);
    let mut modes: Vec<f64> = counts
        .into_iter()
        .filter(|&(_, c)| c == max_count)
        .map(|(bits, _)| f64::from_bits(bits))
        .collect();
    modes.sort_by(f64::total_cmp);
    modes
}

/// Bias-corrected skewness and excess kurtosis. Both collapse to 0 when the
/// spread is zero; skewness additionally needs n >= 3 for its correction
/// factor to be defined.
fn standardized_moments(values: &[f64], mean: f64, std_dev: f64) -> (f64, f64) {
    let n = values.len();
    if std_dev == 0.0 {
        return (0.0, 0.0);
    }

    let nf = n as f64;
    let z3: f64 = values.iter().map(|v| ((v - mean) / std_dev).powi(3)).sum();
    let z4: f64 = values.iter().map(|v| ((v - mean) / std_dev).powi(4)).sum();

    let skewness = if n >= 3 {
        nf / ((nf - 1.0) * (nf - 2.0)) * z3
    } else {
        0.0
    };
    let kurtosis = z4 / nf - 3.0;

    (skewness, kurtosis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_are_ordered_and_inside_range() {
        let stats = calculate(&[7.0, 3.0, 9.0, 1.0, 5.0, 8.0, 2.0]);
        assert!(stats.range.min <= stats.quartiles[0]);
        assert!(stats.quartiles[0] <= stats.median);
        assert!(stats.median <= stats.quartiles[2]);
        assert!(stats.quartiles[2] <= stats.range.max);
    }

    #[test]
    fn constant_prices_degenerate_cleanly() {
        let stats = calculate(&[25.0; 8]);
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.median, 25.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.standard_deviation, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
        assert!(stats.outliers.is_empty());
        assert_eq!(stats.mode, vec![25.0]);
    }

    #[test]
    fn tukey_rule_flags_the_extreme_sale() {
        // Worked example: Q1 = 20, Q3 = 40, IQR = 20, upper fence = 70.
        let stats = calculate(&[10.0, 20.0, 30.0, 40.0, 1000.0]);
        assert_eq!(stats.quartiles[0], 20.0);
        assert_eq!(stats.quartiles[2], 40.0);
        assert_eq!(stats.interquartile_range, 20.0);
        assert_eq!(stats.outliers, vec![1000.0]);
    }

    #[test]
    fn even_count_median_averages_the_middle_pair() {
        let stats = calculate(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn mode_picks_most_frequent_values() {
        let stats = calculate(&[5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mode, vec![5.0]);

        let tied = calculate(&[5.0, 5.0, 7.0, 7.0, 9.0]);
        assert_eq!(tied.mode, vec![5.0, 7.0]);
    }

    #[test]
    fn empty_input_returns_zeroed_stats() {
        let stats = calculate(&[]);
        assert_eq!(stats, DescriptiveStats::default());
    }

    #[test]
    fn right_skewed_data_has_positive_skewness() {
        let stats = calculate(&[1.0, 1.0, 1.0, 1.0, 10.0]);
        assert!(stats.skewness > 0.0);
    }
}
