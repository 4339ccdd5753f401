//! Pairwise comparison of stored analysis snapshots.
use crate::model::{AnalysisSnapshot, ComparisonMetrics, Delta, SnapshotComparison};

/// Price moves beyond this percentage are worth a textual insight.
const PRICE_INSIGHT_THRESHOLD: f64 = 10.0;
/// Volume moves beyond this percentage are worth a textual insight.
const VOLUME_INSIGHT_THRESHOLD: f64 = 20.0;

/// Compares every unordered snapshot pair `(i < j)` and ranks the results by
/// significance, most significant first.
pub fn compare_all(snapshots: &[AnalysisSnapshot]) -> Vec<SnapshotComparison> {
    let mut comparisons = Vec::new();
    for i in 0..snapshots.len() {
        for j in (i + 1)..snapshots.len() {
            comparisons.push(compare_pair(&snapshots[i], &snapshots[j]));
        }
    }
    comparisons.sort_by(|a, b| b.significance.total_cmp(&a.significance));
    comparisons
}

fn compare_pair(baseline: &AnalysisSnapshot, other: &AnalysisSnapshot) -> SnapshotComparison {
    let price = delta(baseline.average_price, other.average_price);
    let volume = delta(baseline.sales_volume as f64, other.sales_volume as f64);

    let mut insights = Vec::new();
    if price.percentage.abs() > PRICE_INSIGHT_THRESHOLD {
        let verb = if price.percentage > 0.0 { "rose" } else { "fell" };
        insights.push(format!(
            "Average price {} {:.1}% between '{}' and '{}'",
            verb,
            price.percentage.abs(),
            baseline.id,
            other.id
        ));
    }
    if volume.percentage.abs() > VOLUME_INSIGHT_THRESHOLD {
        let verb = if volume.percentage > 0.0 { "grew" } else { "shrank" };
        insights.push(format!(
            "Sales volume {} {:.1}% between '{}' and '{}'",
            verb,
            volume.percentage.abs(),
            baseline.id,
            other.id
        ));
    }

    let significance = ((price.percentage.abs() + volume.percentage.abs()) / 100.0).min(1.0);

    SnapshotComparison {
        baseline_id: baseline.id.clone(),
        comparison_id: other.id.clone(),
        metrics: ComparisonMetrics {
            price_difference: price,
            volume_difference: volume,
            // Cross-correlating the two snapshots' temporal trends is not
            // implemented; fixed placeholder values keep the shape stable.
            trend_similarity: 0.5,
            market_position_shift: 0.0,
        },
        insights,
        significance,
    }
}

/// Signed difference against the baseline; percentage is 0 when the baseline
/// value is 0.
fn delta(baseline: f64, comparison: f64) -> Delta {
    let absolute = comparison - baseline;
    let percentage = if baseline != 0.0 {
        absolute / baseline * 100.0
    } else {
        0.0
    };
    Delta {
        absolute,
        percentage,
    }
}
