//! Temporal analysis of timestamped price observations: seasonality, trend
//! regression, change points and volatility.
use chrono::Datelike;

use crate::analyzer::descriptive;
use crate::model::{
    ChangeDirection, ChangePoint, PriceObservation, SeasonalPattern, SeasonalPeak, Seasonality,
    TemporalAnalysis, TrendData, TrendDirection, Volatility, VolatilityWindow,
};

/// Minimum observations before seasonality detection is attempted.
const SEASONALITY_MIN_OBSERVATIONS: usize = 14;
/// Relative window-mean change that counts as a change point.
const CHANGE_POINT_THRESHOLD: f64 = 0.15;
/// Slope thresholds separating up/down from stable, in price units per day.
const TREND_SLOPE_THRESHOLD: f64 = 0.01;
/// Bucket means above `1.1 x profile mean` count as seasonal peaks.
const PEAK_EXCESS: f64 = 1.1;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Runs the full temporal pipeline. Observations may arrive in any order;
/// they are sorted ascending by timestamp here.
pub fn analyze(observations: &[PriceObservation]) -> TemporalAnalysis {
    let mut obs = observations.to_vec();
    obs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    TemporalAnalysis {
        seasonality: seasonality(&obs),
        trends: trend(&obs),
        // Spectral/autocorrelation analysis is not performed; the list stays
        // empty (see the contract on `CyclicalPattern`).
        cyclical_patterns: Vec::new(),
        volatility: volatility(&obs),
    }
}

/// Weekly/monthly seasonality from bucketed mean prices. Needs at least 14
/// observations, otherwise reports `pattern: none`.
pub fn seasonality(obs: &[PriceObservation]) -> Seasonality {
    if obs.len() < SEASONALITY_MIN_OBSERVATIONS {
        return Seasonality::default();
    }

    let weekly = bucket_means::<7>(obs, |o| {
        o.timestamp.weekday().num_days_from_sunday() as usize
    });
    let monthly = bucket_means::<12>(obs, |o| o.timestamp.month0() as usize);

    let weekly_conf = profile_confidence(&weekly);
    let monthly_conf = profile_confidence(&monthly);

    let (pattern, confidence) = if weekly_conf > 0.6 {
        (SeasonalPattern::Weekly, weekly_conf)
    } else if monthly_conf > 0.5 {
        (SeasonalPattern::Monthly, monthly_conf)
    } else {
        (SeasonalPattern::None, weekly_conf.max(monthly_conf))
    };

    let peaks = match pattern {
        SeasonalPattern::Weekly => profile_peaks(&weekly),
        SeasonalPattern::Monthly => profile_peaks(&monthly),
        SeasonalPattern::None => Vec::new(),
    };

    tracing::debug!(?pattern, confidence, "seasonality profile selected");

    Seasonality {
        detected: pattern != SeasonalPattern::None,
        pattern,
        confidence,
        weekly_profile: weekly,
        monthly_profile: monthly,
        peaks,
    }
}

/// Mean price per bucket; empty buckets stay 0.
fn bucket_means<const N: usize>(
    obs: &[PriceObservation],
    bucket_of: impl Fn(&PriceObservation) -> usize,
) -> [f64; N] {
    let mut sums = [0.0; N];
    let mut counts = [0usize; N];
    for o in obs {
        let b = bucket_of(o);
        sums[b] += o.price;
        counts[b] += 1;
    }
    let mut means = [0.0; N];
    for i in 0..N {
        if counts[i] > 0 {
            means[i] = sums[i] / counts[i] as f64;
        }
    }
    means
}

/// `max(0, 1 - CV)` over the non-empty buckets. Fewer than 3 populated
/// buckets cannot support a profile, so confidence is 0.
fn profile_confidence(profile: &[f64]) -> f64 {
    let filled: Vec<f64> = profile.iter().copied().filter(|&v| v > 0.0).collect();
    if filled.len() < 3 {
        return 0.0;
    }
    let mean = descriptive::mean(&filled);
    if mean == 0.0 {
        return 0.0;
    }
    let cv = descriptive::population_std(&filled) / mean;
    (1.0 - cv).max(0.0)
}

/// Buckets exceeding 1.1x the mean of populated buckets, strongest first.
fn profile_peaks(profile: &[f64]) -> Vec<SeasonalPeak> {
    let filled: Vec<f64> = profile.iter().copied().filter(|&v| v > 0.0).collect();
    if filled.is_empty() {
        return Vec::new();
    }
    let mean = descriptive::mean(&filled);
    let mut peaks: Vec<SeasonalPeak> = profile
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > PEAK_EXCESS * mean)
        .map(|(bucket, &v)| SeasonalPeak {
            bucket,
            mean_price: v,
            strength: v / mean - 1.0,
        })
        .collect();
    peaks.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    peaks
}

/// Ordinary least-squares regression of price against elapsed days since the
/// first observation. Input must be sorted ascending by timestamp. Fewer
/// than 3 points yields the stable/zero trend.
pub fn trend(obs: &[PriceObservation]) -> TrendData {
    if obs.len() < 3 {
        return TrendData::default();
    }

    let t0 = obs[0].timestamp;
    let xs: Vec<f64> = obs
        .iter()
        .map(|o| (o.timestamp - t0).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();
    let ys: Vec<f64> = obs.iter().map(|o| o.price).collect();

    let x_mean = descriptive::mean(&xs);
    let y_mean = descriptive::mean(&ys);

    let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    let sxy: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();

    // All observations at the same instant: no usable time axis.
    if sxx == 0.0 {
        return TrendData {
            change_points: change_points(obs),
            ..TrendData::default()
        };
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let direction = if slope > TREND_SLOPE_THRESHOLD {
        TrendDirection::Up
    } else if slope < -TREND_SLOPE_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    TrendData {
        direction,
        strength: slope.abs(),
        slope,
        r_squared,
        duration_days: *xs.last().unwrap_or(&0.0),
        change_points: change_points(obs),
    }
}

/// Sliding-window mean comparison. At each index the means of the window
/// immediately before and immediately after are compared; a relative shift
/// beyond 15% is recorded.
pub fn change_points(obs: &[PriceObservation]) -> Vec<ChangePoint> {
    let n = obs.len();
    let window = (n / 10).max(3);
    if n < 2 * window {
        return Vec::new();
    }

    let mut points = Vec::new();
    for i in window..=(n - window) {
        let before = descriptive::mean(
            &obs[i - window..i].iter().map(|o| o.price).collect::<Vec<_>>(),
        );
        let after =
            descriptive::mean(&obs[i..i + window].iter().map(|o| o.price).collect::<Vec<_>>());
        if before == 0.0 {
            continue;
        }
        let relative = (after - before) / before;
        if relative.abs() > CHANGE_POINT_THRESHOLD {
            points.push(ChangePoint {
                timestamp: obs[i].timestamp,
                direction: if relative > 0.0 {
                    ChangeDirection::Increase
                } else {
                    ChangeDirection::Decrease
                },
                magnitude: relative.abs(),
                significance: (relative.abs() / 0.5).min(1.0),
            });
        }
    }
    points
}

/// Period-over-period return volatility, overall and per rolling window.
pub fn volatility(obs: &[PriceObservation]) -> Volatility {
    if obs.len() < 2 {
        return Volatility::default();
    }

    let returns = returns_of(obs);
    let overall = descriptive::population_std(&returns);

    let n = obs.len();
    let window = (n / 4).max(5);
    let stride = (window / 2).max(1);

    let mut rolling = Vec::new();
    let mut start = 0;
    while start + window <= n {
        let slice = &obs[start..start + window];
        rolling.push(VolatilityWindow {
            start: slice[0].timestamp,
            end: slice[window - 1].timestamp,
            volatility: descriptive::population_std(&returns_of(slice)),
        });
        start += stride;
    }

    Volatility { overall, rolling }
}

fn returns_of(obs: &[PriceObservation]) -> Vec<f64> {
    obs.windows(2)
        .filter(|w| w[0].price > 0.0)
        .map(|w| (w[1].price - w[0].price) / w[0].price)
        .collect()
}
