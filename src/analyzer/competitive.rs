//! Competitive positioning of a snapshot against the observed price field.
use crate::analyzer::descriptive;
use crate::model::{
    AnalysisSnapshot, CompetitiveAdvantage, CompetitiveAnalysis, MarketPosition, MarketShare,
    PriceGap,
};

/// A gap wider than twice the average inter-price gap is an opportunity.
const GAP_FACTOR: f64 = 2.0;
/// At most this many gap opportunities are reported.
const MAX_GAPS: usize = 5;
/// Price advantages smaller than this are noise and not reported.
const PRICE_ADVANTAGE_THRESHOLD: f64 = 0.1;

/// Assesses where the snapshot's average price sits in the market and which
/// price windows are underserved. `sorted` must be ascending.
pub fn assess(snapshot: &AnalysisSnapshot, sorted: &[f64]) -> CompetitiveAnalysis {
    if sorted.is_empty() {
        return CompetitiveAnalysis::default();
    }
    let n = sorted.len();

    // Insertion rank of the average price. The observed average is rarely
    // present verbatim in the list, so an exact-match lookup is useless here.
    let rank = sorted
        .iter()
        .filter(|&&p| p < snapshot.average_price)
        .count() as f64
        / n as f64;
    let market_position = if rank < 0.33 {
        MarketPosition::Low
    } else if rank > 0.67 {
        MarketPosition::High
    } else {
        MarketPosition::Average
    };

    let span = snapshot.price_range.max - snapshot.price_range.min;
    let competitor_density = n as f64 / span.max(1.0);

    CompetitiveAnalysis {
        market_position,
        competitor_density,
        price_gaps: price_gaps(sorted),
        market_share: MarketShare {
            estimate: 1.0 / n as f64,
            confidence: (n as f64 / 100.0).min(1.0),
        },
        competitive_advantage: advantages(snapshot, sorted),
    }
}

/// Successive gaps in the sorted price list that are wide relative to the
/// average gap, strongest first, capped at five.
fn price_gaps(sorted: &[f64]) -> Vec<PriceGap> {
    let gaps: Vec<(f64, f64, f64)> = sorted
        .windows(2)
        .map(|w| (w[0], w[1], w[1] - w[0]))
        .collect();
    if gaps.is_empty() {
        return Vec::new();
    }

    let avg_gap = descriptive::mean(&gaps.iter().map(|g| g.2).collect::<Vec<_>>());
    if avg_gap == 0.0 {
        return Vec::new();
    }

    let mut opportunities: Vec<PriceGap> = gaps
        .into_iter()
        .filter(|&(_, _, gap)| gap > GAP_FACTOR * avg_gap)
        .map(|(lower, upper, gap)| PriceGap {
            min: lower,
            max: upper,
            opportunity: gap / avg_gap,
            confidence: (gap / (lower * 0.1)).min(1.0),
        })
        .collect();

    opportunities.sort_by(|a, b| b.opportunity.total_cmp(&a.opportunity));
    opportunities.truncate(MAX_GAPS);
    opportunities
}

fn advantages(snapshot: &AnalysisSnapshot, sorted: &[f64]) -> Vec<CompetitiveAdvantage> {
    let mut result = Vec::new();

    let market_mean = descriptive::mean(sorted);
    if market_mean > 0.0 {
        let price_advantage = (market_mean - snapshot.average_price) / market_mean;
        if price_advantage.abs() > PRICE_ADVANTAGE_THRESHOLD {
            result.push(CompetitiveAdvantage {
                factor: "price".into(),
                score: price_advantage,
            });
        }
    }

    result.push(CompetitiveAdvantage {
        factor: "volume".into(),
        score: snapshot.sales_volume as f64 / sorted.len().max(1) as f64,
    });

    result
}
