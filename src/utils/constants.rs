/// Input column names
pub const COL_DATE_OF_JOURNEY: &str = "Date_of_Journey";
pub const COL_DURATION: &str = "Duration";
pub const COL_TOTAL_STOPS: &str = "Total_Stops";
pub const COL_AIRLINE: &str = "Airline";
pub const COL_PRICE: &str = "Price";

/// File names
pub const DEFAULT_INPUT_FILE: &str = "flight_price.xlsx";
pub const SUMMARY_FILE: &str = "flight_price_summary.csv";
pub const PRICE_DISTRIBUTION_PLOT: &str = "plot_price_distribution.png";
pub const AVG_PRICE_BY_AIRLINE_PLOT: &str = "plot_avg_price_by_airline.png";
pub const PRICE_VS_DURATION_PLOT: &str = "plot_price_vs_duration.png";
pub const PRICE_BY_STOPS_PLOT: &str = "plot_price_by_stops.png";
pub const DEFAULT_CONFIG_FILE: &str = "flight-eda.toml";

/// Environment prefix for settings overrides (FLIGHT_EDA_CHART__WIDTH=...)
pub const ENV_PREFIX: &str = "FLIGHT_EDA";

/// Chart defaults
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;
pub const DEFAULT_CHART_WIDTH: u32 = 768;
pub const DEFAULT_CHART_HEIGHT: u32 = 576;
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Currency glyph for price axes
pub const CURRENCY_SYMBOL: char = '₹';

/// Cell text treated as missing on load
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];
