//! Top-level entry points tying the analysis steps together.
use tracing::debug;

use crate::analyzer::{comparison, competitive, descriptive, distribution, quality, temporal};
use crate::error::AnalysisError;
use crate::model::{
    AdvancedMetrics, AnalysisSnapshot, HistoricalPoint, PriceObservation, SnapshotComparison,
    TrendData,
};
use crate::utils::{item_timestamp, parse_amount, parse_datetime};

/// Stateless market statistics engine. Every method is a pure function of
/// its input; one instance can serve any number of snapshots.
#[derive(Debug, Default)]
pub struct StatsEngine;

impl StatsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes the full metrics aggregate for one snapshot.
    ///
    /// Items with an unusable price are dropped entirely; items whose price
    /// parses but whose timestamp does not still count toward the price
    /// statistics and are only excluded from the temporal analysis. The
    /// result is always fully populated, degrading to zeroed sub-structures
    /// when the data is too sparse.
    pub fn analyze(&self, snapshot: &AnalysisSnapshot) -> AdvancedMetrics {
        let mut prices: Vec<f64> = snapshot
            .raw_items
            .iter()
            .filter_map(|item| parse_amount(&item.price.amount))
            .collect();
        prices.sort_by(f64::total_cmp);

        let observations: Vec<PriceObservation> = snapshot
            .raw_items
            .iter()
            .filter_map(|item| {
                let price = parse_amount(&item.price.amount)?;
                let timestamp = item_timestamp(item)?;
                Some(PriceObservation { price, timestamp })
            })
            .collect();

        debug!(
            snapshot = %snapshot.id,
            items = snapshot.raw_items.len(),
            prices = prices.len(),
            observations = observations.len(),
            "analyzing snapshot"
        );

        AdvancedMetrics {
            descriptive: descriptive::calculate(&prices),
            distribution: distribution::estimate(&prices, None),
            temporal: temporal::analyze(&observations),
            competitive: competitive::assess(snapshot, &prices),
            quality: quality::score(&snapshot.raw_items),
        }
    }

    /// Trend over a series of previously aggregated averages, using the same
    /// regression and change-point logic as the per-snapshot analysis.
    /// Unusable points are dropped; fewer than 3 survivors degrade to the
    /// stable/zero trend.
    pub fn historical_trend(&self, points: &[HistoricalPoint]) -> TrendData {
        let mut observations: Vec<PriceObservation> = points
            .iter()
            .filter_map(|p| {
                let timestamp = parse_datetime(&p.created_at)?;
                (p.avg_price.is_finite() && p.avg_price > 0.0).then_some(PriceObservation {
                    price: p.avg_price,
                    timestamp,
                })
            })
            .collect();
        observations.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        debug!(
            points = points.len(),
            usable = observations.len(),
            "computing historical trend"
        );
        temporal::trend(&observations)
    }

    /// Ranks every snapshot pair by how much the market moved between them.
    /// Fewer than two snapshots is a broken call contract, not sparse data.
    pub fn compare(
        &self,
        snapshots: &[AnalysisSnapshot],
    ) -> Result<Vec<SnapshotComparison>, AnalysisError> {
        if snapshots.len() < 2 {
            return Err(AnalysisError::NotEnoughSnapshots {
                got: snapshots.len(),
            });
        }
        Ok(comparison::compare_all(snapshots))
    }
}
