use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_CONFIG_FILE, DEFAULT_HISTOGRAM_BINS,
    DEFAULT_INPUT_FILE, ENV_PREFIX, SUMMARY_FILE,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChartSettings {
    #[validate(range(min = 200, max = 8000))]
    pub width: u32,

    #[validate(range(min = 200, max = 8000))]
    pub height: u32,

    #[validate(range(min = 1, max = 500))]
    pub histogram_bins: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub input: PathBuf,
    pub output_dir: PathBuf,

    #[validate(nested)]
    pub chart: ChartSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            chart: ChartSettings::default(),
        }
    }
}

impl Settings {
    /// Defaults, then the settings file, then `FLIGHT_EDA_*` variables.
    ///
    /// An explicit `config_file` must exist; the default `flight-eda.toml` is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, env_layer())
    }

    fn load_with_env(config_file: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("input", defaults.input.to_string_lossy().to_string())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("chart.width", i64::from(defaults.chart.width))?
            .set_default("chart.height", i64::from(defaults.chart.height))?
            .set_default("chart.histogram_bins", defaults.chart.histogram_bins as i64)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;

        debug!("Loaded settings: {:?}", settings);
        settings.validated()
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }
}

/// `FLIGHT_EDA_CHART__WIDTH=1024` sets `chart.width`.
fn env_layer() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
