use crate::analyzers::FlightSummary;
use crate::error::Result;
use csv::Writer;
use std::path::Path;
use tracing::info;

/// Writes the summary metrics as a two-column `metric,value` CSV.
pub struct SummaryWriter;

impl SummaryWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the summary, replacing any existing file at `path`.
    pub fn write(&self, summary: &FlightSummary, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = Writer::from_path(path)?;
        writer.write_record(["metric", "value"])?;
        for (name, value) in summary.metrics() {
            writer.write_record([name, value.to_string().as_str()])?;
        }
        writer.flush()?;

        info!("Wrote summary to {}", path.display());
        Ok(())
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_write_summary() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("summary.csv");
        std::fs::write(&path, "stale contents that should disappear\n")?;

        let summary = FlightSummary {
            rows: 2,
            price_min: Some(100.0),
            price_mean: Some(200.0),
            price_median: Some(200.0),
            price_max: Some(300.0),
            price_std: Some(100.0),
            nulls_total: 4,
            duration_min_mean: None,
        };
        SummaryWriter::new().write(&summary, &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert_eq!(
            written,
            "metric,value\n\
             rows,2\n\
             price_min,100\n\
             price_mean,200\n\
             price_median,200\n\
             price_max,300\n\
             price_std,100\n\
             nulls_total,4\n\
             duration_min_mean,\n"
        );
        Ok(())
    }
}
