//! Composite data-quality score for a batch of raw items.
use crate::analyzer::descriptive;
use crate::model::{QualityScore, RawItem};
use crate::utils::{item_timestamp, parse_amount};

/// Samples of this size or more score full marks for adequacy.
const FULL_SAMPLE: f64 = 50.0;
/// A time span of this many days scores full marks for coverage.
const FULL_SPAN_DAYS: f64 = 30.0;

/// Scores how trustworthy an analysis over `items` would be. Every component
/// is in [0, 1] and the overall score is their unweighted mean. An empty
/// batch scores 0 across the board.
pub fn score(items: &[RawItem]) -> QualityScore {
    if items.is_empty() {
        return QualityScore::default();
    }

    let complete = items
        .iter()
        .filter(|item| {
            parse_amount(&item.price.amount).is_some()
                && item_timestamp(item).is_some()
                && item.title.as_deref().is_some_and(|t| !t.is_empty())
        })
        .count();
    let completeness = complete as f64 / items.len() as f64;

    let prices: Vec<f64> = items
        .iter()
        .filter_map(|item| parse_amount(&item.price.amount))
        .collect();
    let sample_size = (prices.len() as f64 / FULL_SAMPLE).min(1.0);

    let timestamps: Vec<_> = items.iter().filter_map(item_timestamp).collect();
    let time_range = match (timestamps.iter().min(), timestamps.iter().max()) {
        (Some(first), Some(last)) => {
            let span_days = (*last - *first).num_seconds() as f64 / 86_400.0;
            (span_days / FULL_SPAN_DAYS).min(1.0)
        }
        _ => 0.0,
    };

    let mean = descriptive::mean(&prices);
    let price_diversity = if mean > 0.0 {
        (descriptive::population_std(&prices) / mean).min(1.0)
    } else {
        0.0
    };

    let overall = (completeness + sample_size + time_range + price_diversity) / 4.0;

    QualityScore {
        completeness,
        sample_size,
        time_range,
        price_diversity,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, RawPrice};

    fn item(price: f64, date: Option<&str>, title: Option<&str>) -> RawItem {
        RawItem {
            price: RawPrice {
                amount: Amount::Number(price),
            },
            sold_at: date.map(String::from),
            created_at: None,
            title: title.map(String::from),
        }
    }

    #[test]
    fn empty_batch_scores_zero() {
        assert_eq!(score(&[]), QualityScore::default());
    }

    #[test]
    fn complete_month_of_varied_sales_scores_high() {
        let items: Vec<RawItem> = (0..50)
            .map(|i| {
                let date = format!("2025-03-{:02}T10:00:00Z", i % 30 + 1);
                item(80.0 + (i % 10) as f64 * 8.0, Some(&date), Some("Console"))
            })
            .collect();
        let q = score(&items);

        assert_eq!(q.completeness, 1.0);
        assert_eq!(q.sample_size, 1.0);
        assert!((q.time_range - 29.0 / 30.0).abs() < 1e-9);
        assert!(q.price_diversity > 0.0);
        assert!(q.overall > 0.5);
    }

    #[test]
    fn missing_titles_and_dates_lower_completeness() {
        let items = vec![
            item(10.0, Some("2025-01-01"), Some("A")),
            item(12.0, None, Some("B")),
            item(14.0, Some("2025-01-05"), None),
            item(16.0, Some("2025-01-09"), Some("D")),
        ];
        let q = score(&items);
        assert!((q.completeness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn constant_prices_have_zero_diversity() {
        let items: Vec<RawItem> = (0..10)
            .map(|i| {
                let date = format!("2025-02-{:02}", i + 1);
                item(99.0, Some(&date), Some("Same"))
            })
            .collect();
        let q = score(&items);
        assert_eq!(q.price_diversity, 0.0);
        assert!(q.overall > 0.0);
    }
}
