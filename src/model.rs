// Core structs: raw marketplace items, snapshots, and engine output types.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price payload as it arrives from the data-access layer. Marketplaces
/// deliver the amount either as a bare number or as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrice {
    pub amount: Amount,
}

/// One sold/listed item exactly as the persistence layer hands it over.
/// Everything except the price is optional; parsing decides what survives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    pub price: RawPrice,
    #[serde(default)]
    pub sold_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A validated observation: positive finite price plus a parseable timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// A previously computed market summary, owned by the analysis store.
/// The engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub id: String,
    pub average_price: f64,
    pub sales_volume: u64,
    pub price_range: PriceBounds,
    pub raw_items: Vec<RawItem>,
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub median: f64,
    pub mode: Vec<f64>,
    pub standard_deviation: f64,
    pub variance: f64,
    /// [Q1, Q2, Q3] by the nearest-rank method.
    pub quartiles: [f64; 3],
    pub outliers: Vec<f64>,
    pub skewness: f64,
    pub kurtosis: f64,
    pub range: PriceBounds,
    pub interquartile_range: f64,
}

// ---------------------------------------------------------------------------
// Distribution estimation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub percentage: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub price: f64,
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceDistribution {
    pub histogram: Vec<HistogramBin>,
    pub density: Vec<DensityPoint>,
    /// Keyed by percentile (5, 10, 25, 50, 75, 90, 95, 99).
    pub percentiles: BTreeMap<u8, f64>,
    pub cumulative_distribution: Vec<CumulativePoint>,
}

// ---------------------------------------------------------------------------
// Temporal analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalPattern {
    Weekly,
    Monthly,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPeak {
    /// Bucket index within the detected profile (weekday 0 = Sunday,
    /// month 0 = January).
    pub bucket: usize,
    pub mean_price: f64,
    /// Relative excess over the profile mean.
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub detected: bool,
    pub pattern: SeasonalPattern,
    pub confidence: f64,
    pub weekly_profile: [f64; 7],
    pub monthly_profile: [f64; 12],
    pub peaks: Vec<SeasonalPeak>,
}

impl Default for Seasonality {
    fn default() -> Self {
        Self {
            detected: false,
            pattern: SeasonalPattern::None,
            confidence: 0.0,
            weekly_profile: [0.0; 7],
            monthly_profile: [0.0; 12],
            peaks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    pub timestamp: DateTime<Utc>,
    pub direction: ChangeDirection,
    /// Absolute relative change between the windows around the point.
    pub magnitude: f64,
    pub significance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendData {
    pub direction: TrendDirection,
    /// |slope|, in price units per day.
    pub strength: f64,
    pub slope: f64,
    pub r_squared: f64,
    /// Days between the first and last observation.
    pub duration_days: f64,
    pub change_points: Vec<ChangePoint>,
}

impl Default for TrendData {
    fn default() -> Self {
        Self {
            direction: TrendDirection::Stable,
            strength: 0.0,
            slope: 0.0,
            r_squared: 0.0,
            duration_days: 0.0,
            change_points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Volatility {
    /// Population stddev of period-over-period returns.
    pub overall: f64,
    pub rolling: Vec<VolatilityWindow>,
}

/// Reserved output slot: no spectral analysis is performed and the list is
/// always empty. The type keeps the output shape stable for callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclicalPattern {
    pub period_days: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    pub seasonality: Seasonality,
    pub trends: TrendData,
    pub cyclical_patterns: Vec<CyclicalPattern>,
    pub volatility: Volatility,
}

// ---------------------------------------------------------------------------
// Competitive positioning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Low,
    Average,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceGap {
    pub min: f64,
    pub max: f64,
    /// Gap size relative to the average inter-price gap.
    pub opportunity: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketShare {
    pub estimate: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAdvantage {
    pub factor: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub market_position: MarketPosition,
    pub competitor_density: f64,
    pub price_gaps: Vec<PriceGap>,
    pub market_share: MarketShare,
    pub competitive_advantage: Vec<CompetitiveAdvantage>,
}

impl Default for CompetitiveAnalysis {
    fn default() -> Self {
        Self {
            market_position: MarketPosition::Average,
            competitor_density: 0.0,
            price_gaps: Vec::new(),
            market_share: MarketShare {
                estimate: 0.0,
                confidence: 0.0,
            },
            competitive_advantage: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quality score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityScore {
    pub completeness: f64,
    pub sample_size: f64,
    pub time_range: f64,
    pub price_diversity: f64,
    pub overall: f64,
}

/// Everything the engine derives from one snapshot. Created fresh per
/// invocation and always fully populated, possibly with zeroed sub-fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    pub descriptive: DescriptiveStats,
    pub distribution: PriceDistribution,
    pub temporal: TemporalAnalysis,
    pub competitive: CompetitiveAnalysis,
    pub quality: QualityScore,
}

// ---------------------------------------------------------------------------
// Snapshot comparison
// ---------------------------------------------------------------------------

/// One aggregated point for the historical-trend entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub created_at: String,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    pub absolute: f64,
    /// Relative to the baseline value, as a percentage. 0 when the baseline
    /// is 0.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub price_difference: Delta,
    pub volume_difference: Delta,
    /// Placeholder, fixed at 0.5 until a real trend cross-correlation lands.
    pub trend_similarity: f64,
    /// Placeholder, fixed at 0.
    pub market_position_shift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotComparison {
    pub baseline_id: String,
    pub comparison_id: String,
    pub metrics: ComparisonMetrics,
    pub insights: Vec<String>,
    pub significance: f64,
}
