//! End-to-end tests of the public engine surface, driving it with raw items
//! shaped exactly like the persistence layer delivers them.
use market_pulse::model::{
    AnalysisSnapshot, HistoricalPoint, PriceBounds, RawItem, TrendDirection,
};
use market_pulse::{AdvancedMetrics, AnalysisError, StatsEngine};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn raw_items(value: serde_json::Value) -> Vec<RawItem> {
    serde_json::from_value(value).expect("fixture must deserialize")
}

fn snapshot(id: &str, avg: f64, volume: u64, items: Vec<RawItem>) -> AnalysisSnapshot {
    let prices: Vec<f64> = items
        .iter()
        .filter_map(|i| market_pulse::utils::parse_amount(&i.price.amount))
        .collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    AnalysisSnapshot {
        id: id.into(),
        average_price: avg,
        sales_volume: volume,
        price_range: if prices.is_empty() {
            PriceBounds::default()
        } else {
            PriceBounds { min, max }
        },
        raw_items: items,
    }
}

#[test]
fn analyzes_a_realistic_snapshot_end_to_end() {
    init_tracing();
    let items = raw_items(json!([
        { "price": { "amount": "120.00" }, "sold_at": "2025-03-01T10:00:00Z", "title": "Console, boxed" },
        { "price": { "amount": 135.5 },    "sold_at": "2025-03-04T18:30:00Z", "title": "Console" },
        { "price": { "amount": "99.99" },  "sold_at": "2025-03-08T09:15:00Z", "title": "Console, scratched" },
        { "price": { "amount": 150.0 },    "sold_at": "2025-03-12T14:00:00Z", "title": "Console + 2 games" },
        { "price": { "amount": "110" },    "sold_at": "2025-03-15T11:45:00Z", "title": "Console" },
        { "price": { "amount": 142.0 },    "created_at": "2025-03-20", "title": "Console, like new" },
        { "price": { "amount": "125.00" }, "sold_at": "2025-03-25T16:20:00Z", "title": "Console" }
    ]));
    let snap = snapshot("2025-03", 126.07, 7, items);

    let metrics = StatsEngine::new().analyze(&snap);

    assert!((metrics.descriptive.mean - 126.07).abs() < 0.01);
    assert_eq!(metrics.descriptive.range.min, 99.99);
    assert_eq!(metrics.descriptive.range.max, 150.0);
    assert!(metrics.descriptive.quartiles[0] <= metrics.descriptive.median);
    assert!(metrics.descriptive.median <= metrics.descriptive.quartiles[2]);

    let counted: usize = metrics.distribution.histogram.iter().map(|b| b.count).sum();
    assert_eq!(counted, 7);
    assert_eq!(metrics.distribution.cumulative_distribution.len(), 7);

    // Seven observations are below the seasonality threshold.
    assert!(!metrics.temporal.seasonality.detected);

    assert!(metrics.competitive.market_share.estimate > 0.0);
    assert_eq!(metrics.quality.completeness, 1.0);
    assert!(metrics.quality.overall > 0.0);
}

#[test]
fn malformed_prices_and_timestamps_are_dropped_not_fatal() {
    init_tracing();
    let items = raw_items(json!([
        { "price": { "amount": "49.99" }, "sold_at": "2025-04-01T08:00:00Z", "title": "Keyboard" },
        { "price": { "amount": "free" } },
        { "price": { "amount": -10.0 }, "sold_at": "2025-04-02T08:00:00Z", "title": "Refund row" },
        { "price": { "amount": 0 } },
        { "price": { "amount": 55.0 }, "sold_at": "last tuesday", "title": "Keyboard" },
        { "price": { "amount": "60.00" }, "sold_at": "2025-04-05T12:00:00Z", "title": "Keyboard, RGB" }
    ]));
    let snap = snapshot("2025-04", 55.0, 6, items);

    let metrics = StatsEngine::new().analyze(&snap);

    // Three usable prices: 49.99, 55, 60.
    assert_eq!(metrics.distribution.cumulative_distribution.len(), 3);
    assert!((metrics.descriptive.mean - 55.0).abs() < 0.01);
    // The item with the broken timestamp still counted toward price stats.
    assert!(metrics.quality.completeness < 1.0);
}

#[test]
fn empty_snapshot_returns_fully_zeroed_metrics() {
    let snap = snapshot("empty", 0.0, 0, Vec::new());
    let metrics = StatsEngine::new().analyze(&snap);
    assert_eq!(metrics, AdvancedMetrics::default());
}

#[test]
fn historical_trend_recovers_a_linear_drift() {
    let points: Vec<HistoricalPoint> = (0..12)
        .map(|day| HistoricalPoint {
            created_at: format!("2025-05-{:02}T00:00:00Z", day + 1),
            avg_price: 10.0 + 2.0 * day as f64,
        })
        .collect();

    let trend = StatsEngine::new().historical_trend(&points);
    assert_eq!(trend.direction, TrendDirection::Up);
    assert!((trend.slope - 2.0).abs() < 1e-9);
    assert!((trend.r_squared - 1.0).abs() < 1e-9);
    assert!((trend.duration_days - 11.0).abs() < 1e-9);
}

#[test]
fn historical_trend_with_too_few_usable_points_is_stable() {
    let points = vec![
        HistoricalPoint {
            created_at: "2025-05-01".into(),
            avg_price: 10.0,
        },
        HistoricalPoint {
            created_at: "not a date".into(),
            avg_price: 12.0,
        },
        HistoricalPoint {
            created_at: "2025-05-03".into(),
            avg_price: 14.0,
        },
    ];
    let trend = StatsEngine::new().historical_trend(&points);
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert_eq!(trend.slope, 0.0);
}

#[test]
fn comparing_a_single_snapshot_is_a_contract_violation() {
    let snap = snapshot("only", 10.0, 1, Vec::new());
    let err = StatsEngine::new().compare(std::slice::from_ref(&snap)).unwrap_err();
    assert!(matches!(err, AnalysisError::NotEnoughSnapshots { got: 1 }));

    let ok = StatsEngine::new().compare(&[snap.clone(), snap]).unwrap();
    assert_eq!(ok.len(), 1);
}

#[test]
fn metrics_serialize_for_the_ui_layer() {
    let items = raw_items(json!([
        { "price": { "amount": 20.0 }, "sold_at": "2025-06-01T00:00:00Z", "title": "Mouse" },
        { "price": { "amount": 24.0 }, "sold_at": "2025-06-08T00:00:00Z", "title": "Mouse" },
        { "price": { "amount": 22.0 }, "sold_at": "2025-06-15T00:00:00Z", "title": "Mouse" }
    ]));
    let metrics = StatsEngine::new().analyze(&snapshot("2025-06", 22.0, 3, items));

    let value = serde_json::to_value(&metrics).unwrap();
    assert_eq!(value["temporal"]["trends"]["direction"], "up");
    assert!(value["distribution"]["percentiles"]["50"].is_number());
    assert_eq!(value["competitive"]["market_position"], "average");
}
