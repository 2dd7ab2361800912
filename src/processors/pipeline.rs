use crate::analyzers::{FlightSummary, SummaryAnalyzer};
use crate::error::Result;
use crate::models::FlightTable;
use crate::processors::Normalizer;
use crate::readers::load_table;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ChartOutcome, ChartWriter, SummaryWriter};
use std::path::PathBuf;
use tracing::info;

/// What a full run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub summary: FlightSummary,
    pub summary_path: PathBuf,
    pub charts: Vec<ChartOutcome>,
    pub dropped_rows: usize,
}

impl PipelineReport {
    pub fn written_files(&self) -> Vec<PathBuf> {
        std::iter::once(self.summary_path.clone())
            .chain(
                self.charts
                    .iter()
                    .filter_map(|c| c.written_path().map(|p| p.to_path_buf())),
            )
            .collect()
    }
}

/// Load -> normalize -> summarize -> report, run once.
pub struct EdaPipeline {
    settings: Settings,
}

impl EdaPipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load the input and clean it. Both fatal conditions surface here.
    pub fn prepare(&self) -> Result<FlightTable> {
        let raw = load_table(&self.settings.input)?;
        Normalizer::new().normalize(raw)
    }

    /// Load, clean and summarize without writing anything.
    pub fn summarize(&self) -> Result<FlightSummary> {
        let table = self.prepare()?;
        Ok(SummaryAnalyzer::new().summarize(&table))
    }

    pub fn run(&self, progress: Option<&ProgressReporter>) -> Result<PipelineReport> {
        let step = |message: &str| {
            if let Some(p) = progress {
                p.set_message(message);
            }
        };

        step("Loading input...");
        let table = self.prepare()?;

        step("Computing summary...");
        let summary = SummaryAnalyzer::new().summarize(&table);

        let summary_path = self.settings.summary_path();
        SummaryWriter::new().write(&summary, &summary_path)?;

        step("Rendering charts...");
        let charts = ChartWriter::new(&self.settings.chart)
            .render_all(&table, &self.settings.output_dir)?;

        info!(
            "Pipeline finished: {} rows, {} charts written",
            summary.rows,
            charts.iter().filter(|c| c.written_path().is_some()).count()
        );

        Ok(PipelineReport {
            summary,
            summary_path,
            charts,
            dropped_rows: table.dropped_rows,
        })
    }
}
