use crate::models::FlightTable;
use crate::utils::format::format_optional;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Descriptive statistics over a numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl PriceStats {
    /// Compute statistics, ignoring NaN values. `None` for an empty series.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut vals: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = vals.iter().sum::<f64>() / count as f64;

        vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let median = if count % 2 == 0 {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        } else {
            vals[count / 2]
        };

        let variance = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// The eight metrics written to the summary CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub rows: usize,
    pub price_min: Option<f64>,
    pub price_mean: Option<f64>,
    pub price_median: Option<f64>,
    pub price_max: Option<f64>,
    pub price_std: Option<f64>,
    pub nulls_total: usize,
    pub duration_min_mean: Option<f64>,
}

/// A single summary value, as written to the CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Value(Option<f64>),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Value(Some(v)) => write!(f, "{}", v),
            MetricValue::Value(None) => Ok(()),
        }
    }
}

impl FlightSummary {
    /// Metric names and values in output order.
    pub fn metrics(&self) -> [(&'static str, MetricValue); 8] {
        [
            ("rows", MetricValue::Count(self.rows)),
            ("price_min", MetricValue::Value(self.price_min)),
            ("price_mean", MetricValue::Value(self.price_mean)),
            ("price_median", MetricValue::Value(self.price_median)),
            ("price_max", MetricValue::Value(self.price_max)),
            ("price_std", MetricValue::Value(self.price_std)),
            ("nulls_total", MetricValue::Count(self.nulls_total)),
            ("duration_min_mean", MetricValue::Value(self.duration_min_mean)),
        ]
    }

    pub fn report(&self) -> String {
        format!(
            "Flight Price Summary:\n  \
            Rows: {}\n  \
            Price: min {}, mean {}, median {}, max {}\n  \
            Price Std Dev: {}\n  \
            Null cells: {}\n  \
            Mean duration (min): {}",
            self.rows,
            format_optional(self.price_min),
            format_optional(self.price_mean),
            format_optional(self.price_median),
            format_optional(self.price_max),
            format_optional(self.price_std),
            self.nulls_total,
            format_optional(self.duration_min_mean),
        )
    }
}

pub struct SummaryAnalyzer;

impl SummaryAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, table: &FlightTable) -> FlightSummary {
        let price = PriceStats::compute(&table.prices());
        let duration = PriceStats::compute(&table.durations());
        let nulls_total = table.records.iter().map(|r| r.null_count()).sum();

        debug!(
            "Summarized {} rows ({} null cells, {} durations)",
            table.len(),
            nulls_total,
            duration.as_ref().map_or(0, |d| d.count)
        );

        FlightSummary {
            rows: table.len(),
            price_min: price.as_ref().map(|p| p.min),
            price_mean: price.as_ref().map(|p| p.mean),
            price_median: price.as_ref().map(|p| p.median),
            price_max: price.as_ref().map(|p| p.max),
            price_std: price.as_ref().map(|p| p.std_dev),
            nulls_total,
            duration_min_mean: duration.map(|d| d.mean),
        }
    }
}

impl Default for SummaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
