//! Datasets behind the four charts.

use crate::models::FlightTable;
use crate::utils::constants::WHISKER_IQR_FACTOR;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]`; the last bin is closed on the right.
/// A single distinct value is centred in a bin range of width one.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for v in finite {
        let index = (((v - lo) / width) as usize).min(bins - 1);
        result[index].count += 1;
    }

    result
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirlineMean {
    pub airline: String,
    pub mean_price: f64,
    pub flights: usize,
}

/// Mean price per airline, highest first. Ties keep name order.
pub fn mean_price_by_airline(table: &FlightTable) -> Vec<AirlineMean> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in &table.records {
        if let Some(airline) = record.airline.as_deref() {
            let entry = groups.entry(airline).or_insert((0.0, 0));
            entry.0 += record.price;
            entry.1 += 1;
        }
    }

    let mut means: Vec<AirlineMean> = groups
        .into_iter()
        .map(|(airline, (sum, flights))| AirlineMean {
            airline: airline.to_string(),
            mean_price: sum / flights as f64,
            flights,
        })
        .collect();

    means.sort_by(|a, b| {
        b.mean_price
            .partial_cmp(&a.mean_price)
            .unwrap_or(Ordering::Equal)
    });
    means
}

/// `(duration_min, price)` for every row with a duration.
pub fn price_vs_duration(table: &FlightTable) -> Vec<(f64, f64)> {
    table
        .records
        .iter()
        .filter_map(|r| r.duration_min.map(|d| (f64::from(d), r.price)))
        .collect()
}

/// Box-and-whisker figures for one group, outliers excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

impl BoxStats {
    /// Quartiles by linear interpolation; whiskers reach the furthest data
    /// point within 1.5 IQR of the box.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
        })
    }
}

/// Linear-interpolated percentile of an ascending, non-empty slice.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopsGroup {
    pub stops: u32,
    pub stats: BoxStats,
}

/// Price distribution per stop count, fewest stops first.
pub fn price_by_stops(table: &FlightTable) -> Vec<StopsGroup> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in &table.records {
        if let Some(stops) = record.stops {
            groups.entry(stops).or_default().push(record.price);
        }
    }

    groups
        .into_iter()
        .filter_map(|(stops, prices)| {
            BoxStats::compute(&prices).map(|stats| StopsGroup { stops, stats })
        })
        .collect()
}
