pub mod distribution;
pub mod summary_analyzer;

pub use distribution::{
    histogram, mean_price_by_airline, price_by_stops, price_vs_duration, AirlineMean, BoxStats,
    HistogramBin, StopsGroup,
};
pub use summary_analyzer::{FlightSummary, MetricValue, PriceStats, SummaryAnalyzer};
