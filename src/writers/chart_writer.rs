use crate::analyzers::{histogram, mean_price_by_airline, price_by_stops, price_vs_duration};
use crate::error::{EdaError, Result};
use crate::models::FlightTable;
use crate::settings::ChartSettings;
use crate::utils::constants::{
    AVG_PRICE_BY_AIRLINE_PLOT, PRICE_BY_STOPS_PLOT, PRICE_DISTRIBUTION_PLOT,
    PRICE_VS_DURATION_PLOT,
};
use crate::utils::format::format_rupees;
use crate::writers::text_safe_backend::TextSafeBackend;
use plotters::prelude::*;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const MEDIAN_COLOR: RGBColor = RGBColor(255, 127, 14);
const FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PriceDistribution,
    AvgPriceByAirline,
    PriceVsDuration,
    PriceByStops,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::PriceDistribution,
        ChartKind::AvgPriceByAirline,
        ChartKind::PriceVsDuration,
        ChartKind::PriceByStops,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::PriceDistribution => PRICE_DISTRIBUTION_PLOT,
            ChartKind::AvgPriceByAirline => AVG_PRICE_BY_AIRLINE_PLOT,
            ChartKind::PriceVsDuration => PRICE_VS_DURATION_PLOT,
            ChartKind::PriceByStops => PRICE_BY_STOPS_PLOT,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::PriceDistribution => "Price Distribution",
            ChartKind::AvgPriceByAirline => "Average Price by Airline",
            ChartKind::PriceVsDuration => "Price vs Duration (minutes)",
            ChartKind::PriceByStops => "Price by Number of Stops",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Written { kind: ChartKind, path: PathBuf },
    Skipped { kind: ChartKind, reason: &'static str },
}

impl ChartOutcome {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartOutcome::Written { kind, .. } | ChartOutcome::Skipped { kind, .. } => *kind,
        }
    }

    pub fn written_path(&self) -> Option<&Path> {
        match self {
            ChartOutcome::Written { path, .. } => Some(path),
            ChartOutcome::Skipped { .. } => None,
        }
    }
}

fn render_err<E: fmt::Display>(e: E) -> EdaError {
    EdaError::Render(e.to_string())
}

/// Renders the four PNG charts for a cleaned table.
pub struct ChartWriter {
    width: u32,
    height: u32,
    histogram_bins: usize,
}

impl ChartWriter {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            histogram_bins: settings.histogram_bins,
        }
    }

    /// Render every chart into `output_dir`, skipping those without data.
    pub fn render_all(&self, table: &FlightTable, output_dir: &Path) -> Result<Vec<ChartOutcome>> {
        std::fs::create_dir_all(output_dir)?;

        ChartKind::ALL
            .iter()
            .map(|kind| self.render(*kind, table, &output_dir.join(kind.file_name())))
            .collect()
    }

    pub fn render(&self, kind: ChartKind, table: &FlightTable, path: &Path) -> Result<ChartOutcome> {
        let skip_reason = match kind {
            ChartKind::PriceDistribution
                if histogram(&table.prices(), self.histogram_bins).is_empty() =>
            {
                Some("no rows with a valid price")
            }
            ChartKind::AvgPriceByAirline if !table.has_airlines() => {
                Some("airline column absent or empty")
            }
            ChartKind::PriceVsDuration if !table.has_durations() => Some("no parsable durations"),
            ChartKind::PriceByStops if !table.has_stops() => Some("no parsable stop counts"),
            _ => None,
        };

        if let Some(reason) = skip_reason {
            warn!("Skipping '{}': {}", kind, reason);
            discard_stale(path)?;
            return Ok(ChartOutcome::Skipped { kind, reason });
        }

        match kind {
            ChartKind::PriceDistribution => self.draw_price_distribution(table, path)?,
            ChartKind::AvgPriceByAirline => self.draw_avg_price_by_airline(table, path)?,
            ChartKind::PriceVsDuration => self.draw_price_vs_duration(table, path)?,
            ChartKind::PriceByStops => self.draw_price_by_stops(table, path)?,
        }

        info!("Saved '{}' to {}", kind, path.display());
        Ok(ChartOutcome::Written {
            kind,
            path: path.to_path_buf(),
        })
    }

    fn draw_price_distribution(&self, table: &FlightTable, path: &Path) -> Result<()> {
        let bins = histogram(&table.prices(), self.histogram_bins);
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Err(EdaError::Render("histogram has no bins".to_string()));
        };
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.05;
        debug!("Histogram over {} bins, tallest {}", bins.len(), y_max);

        let root = TextSafeBackend::new(BitMapBackend::new(path, (self.width, self.height)))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::PriceDistribution.title(), (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(first.lower..last.upper, 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Price (₹)")
            .y_desc("Count")
            .x_label_formatter(&|v| format_rupees(*v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(bins.iter().map(|b| {
                Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], BAR_COLOR.filled())
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw_avg_price_by_airline(&self, table: &FlightTable, path: &Path) -> Result<()> {
        let means = mean_price_by_airline(table);
        let names: Vec<&str> = means.iter().map(|m| m.airline.as_str()).collect();
        let y_max = upper_bound(means.iter().map(|m| m.mean_price));

        let root = TextSafeBackend::new(BitMapBackend::new(path, (self.width, self.height)))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::AvgPriceByAirline.title(), (FONT, 22))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(70)
            .build_cartesian_2d((0..means.len()).into_segmented(), 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Airline")
            .y_desc("Average Price (₹)")
            .x_labels(means.len() + 1)
            .x_label_style(
                (FONT, 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => {
                    names.get(*i).map(|n| n.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .y_label_formatter(&|v| format_rupees(*v))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(6)
                    .data(means.iter().enumerate().map(|(i, m)| (i, m.mean_price))),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw_price_vs_duration(&self, table: &FlightTable, path: &Path) -> Result<()> {
        let points = price_vs_duration(table);
        let x_range = padded_range(points.iter().map(|p| p.0));
        let y_range = padded_range(points.iter().map(|p| p.1));

        let root = TextSafeBackend::new(BitMapBackend::new(path, (self.width, self.height)))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::PriceVsDuration.title(), (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Duration (min)")
            .y_desc("Price (₹)")
            .x_label_formatter(&|v| format!("{:.0}", v))
            .y_label_formatter(&|v| format_rupees(*v))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(d, p)| Circle::new((d, p), 3, BAR_COLOR.mix(0.7).filled())),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    fn draw_price_by_stops(&self, table: &FlightTable, path: &Path) -> Result<()> {
        let groups = price_by_stops(table);
        let labels: Vec<String> = groups.iter().map(|g| g.stops.to_string()).collect();
        let y_range = padded_range(
            groups
                .iter()
                .flat_map(|g| [g.stats.whisker_low, g.stats.whisker_high]),
        );
        let x_range = -0.5..(groups.len() as f64 - 0.5);

        let root = TextSafeBackend::new(BitMapBackend::new(path, (self.width, self.height)))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::PriceByStops.title(), (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Stops")
            .y_desc("Price (₹)")
            .x_labels(groups.len())
            .x_label_formatter(&|v| slot_label(*v, &labels))
            .y_label_formatter(&|v| format_rupees(*v))
            .draw()
            .map_err(render_err)?;

        const HALF_BOX: f64 = 0.25;
        const HALF_CAP: f64 = 0.12;
        for (i, group) in groups.iter().enumerate() {
            let x = i as f64;
            let s = &group.stats;

            chart
                .draw_series([
                    PathElement::new(vec![(x, s.whisker_low), (x, s.q1)], BLACK),
                    PathElement::new(vec![(x, s.q3), (x, s.whisker_high)], BLACK),
                    PathElement::new(
                        vec![(x - HALF_CAP, s.whisker_low), (x + HALF_CAP, s.whisker_low)],
                        BLACK,
                    ),
                    PathElement::new(
                        vec![(x - HALF_CAP, s.whisker_high), (x + HALF_CAP, s.whisker_high)],
                        BLACK,
                    ),
                ])
                .map_err(render_err)?;
            chart
                .draw_series([
                    Rectangle::new(
                        [(x - HALF_BOX, s.q1), (x + HALF_BOX, s.q3)],
                        BAR_COLOR.mix(0.3).filled(),
                    ),
                    Rectangle::new(
                        [(x - HALF_BOX, s.q1), (x + HALF_BOX, s.q3)],
                        BLACK.stroke_width(1),
                    ),
                ])
                .map_err(render_err)?;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x - HALF_BOX, s.median), (x + HALF_BOX, s.median)],
                    MEDIAN_COLOR.stroke_width(2),
                )))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}

/// Remove an image left by an earlier run so absence means "no data".
fn discard_stale(path: &Path) -> Result<()> {
    if path.is_file() {
        std::fs::remove_file(path)?;
        debug!("Removed stale chart {}", path.display());
    }
    Ok(())
}

/// `[0, max * 1.1]`, never empty.
fn upper_bound(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Data extent with 5% padding on both sides, never empty.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Label for a box slot when the tick falls on its centre.
fn slot_label(v: f64, labels: &[String]) -> String {
    let slot = v.round();
    if (v - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, FlightRecord};

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0.0, 100.0].into_iter()), -5.0..105.0);
        assert_eq!(padded_range([7.0].into_iter()), 6.0..8.0);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_upper_bound() {
        assert!((upper_bound([50.0, 100.0].into_iter()) - 110.0).abs() < 1e-9);
        assert_eq!(upper_bound(std::iter::empty()), 1.0);
        assert!((upper_bound([f64::INFINITY, 100.0].into_iter()) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_prices_skip_histogram() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join(ChartKind::PriceDistribution.file_name());
        std::fs::write(&path, b"old image")?;

        let table = FlightTable {
            columns: vec!["Price".into()],
            records: vec![FlightRecord {
                cells: vec![CellValue::Number(f64::INFINITY)],
                date: None,
                duration_min: None,
                stops: None,
                airline: None,
                price: f64::INFINITY,
            }],
            has_airline: false,
            dropped_rows: 0,
        };

        let outcome = ChartWriter::new(&ChartSettings::default()).render(
            ChartKind::PriceDistribution,
            &table,
            &path,
        )?;

        assert!(matches!(outcome, ChartOutcome::Skipped { .. }));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_slot_label() {
        let labels = vec!["0".to_string(), "1".to_string(), "3".to_string()];
        assert_eq!(slot_label(2.0, &labels), "3");
        assert_eq!(slot_label(0.5, &labels), "");
        assert_eq!(slot_label(-1.0, &labels), "");
        assert_eq!(slot_label(5.0, &labels), "");
    }

    #[test]
    fn test_chart_file_names() {
        let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "plot_price_distribution.png",
                "plot_avg_price_by_airline.png",
                "plot_price_vs_duration.png",
                "plot_price_by_stops.png",
            ]
        );
    }
}
