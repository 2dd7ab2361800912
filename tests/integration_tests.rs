use flight_price_eda::processors::EdaPipeline;
use flight_price_eda::settings::Settings;
use flight_price_eda::writers::{ChartKind, ChartOutcome};
use flight_price_eda::EdaError;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FULL_SHEET: &str = "\
Airline,Date_of_Journey,Source,Destination,Duration,Total_Stops,Price
IndiGo,24/03/2019,Banglore,New Delhi,2h 50m,non-stop,3897
Air India,1/05/2019,Kolkata,Banglore,7h 25m,2 stops,7662
Jet Airways,9/06/2019,Delhi,Cochin,19h,2 stops,13882
IndiGo,12/05/2019,Kolkata,Banglore,5h 25m,1 stop,6218
IndiGo,01/03/2019,Banglore,New Delhi,4h 45m,1 stop,13302
SpiceJet,24/06/2019,Kolkata,Banglore,2h 25m,non-stop,3873
";

fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write input sheet");
    path
}

fn settings_for(input: PathBuf, output_dir: &Path) -> Settings {
    Settings {
        input,
        output_dir: output_dir.to_path_buf(),
        ..Settings::default()
    }
}

fn read_summary(path: &Path) -> Vec<(String, String)> {
    let mut reader = csv::Reader::from_path(path).expect("open summary");
    reader
        .records()
        .map(|r| {
            let r = r.expect("summary row");
            (r[0].to_string(), r[1].to_string())
        })
        .collect()
}

fn chart_path(dir: &Path, kind: ChartKind) -> PathBuf {
    dir.join(kind.file_name())
}

#[test]
fn test_full_pipeline_writes_all_outputs() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "flights.csv", FULL_SHEET);
    let out = dir.path().join("out");

    let report = EdaPipeline::new(settings_for(input, &out))
        .run(None)
        .expect("pipeline run");

    assert_eq!(report.summary.rows, 6);
    assert_eq!(report.summary.price_min, Some(3873.0));
    assert_eq!(report.summary.price_max, Some(13882.0));
    assert_eq!(report.summary.price_median, Some(6940.0));
    assert_eq!(report.summary.nulls_total, 0);
    assert_eq!(report.dropped_rows, 0);

    assert!(report.summary_path.exists());
    for kind in ChartKind::ALL {
        assert!(chart_path(&out, kind).exists(), "missing {}", kind);
    }
    assert_eq!(report.written_files().len(), 5);
}

#[test]
fn test_summary_csv_contents() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        dir.path(),
        "flights.csv",
        "Airline,Duration,Total_Stops,Price\n\
         IndiGo,1h,non-stop,100\n\
         Vistara,garbage,1 stop,x\n\
         Air India,,1 stop,300\n",
    );

    let report = EdaPipeline::new(settings_for(input, dir.path()))
        .run(None)
        .expect("pipeline run");

    let rows = read_summary(&report.summary_path);
    let names: Vec<&str> = rows.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "rows",
            "price_min",
            "price_mean",
            "price_median",
            "price_max",
            "price_std",
            "nulls_total",
            "duration_min_mean",
        ]
    );
    assert_eq!(rows[0].1, "2");
    assert_eq!(rows[1].1, "100");
    assert_eq!(rows[2].1, "200");
    assert_eq!(rows[5].1, "100");
    // two missing dates, one empty duration cell, one missing duration
    assert_eq!(rows[6].1, "4");
    assert_eq!(rows[7].1, "60");
}

#[test]
fn test_price_filter_keeps_order() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "prices.csv", "Price\n100\nx\n300\n");

    let pipeline = EdaPipeline::new(settings_for(input, dir.path()));
    let table = pipeline.prepare().expect("prepare");

    assert_eq!(table.prices(), vec![100.0, 300.0]);
    assert_eq!(table.dropped_rows, 1);
}

#[test]
fn test_infinite_price_is_dropped() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        dir.path(),
        "flights.csv",
        "Airline,Duration,Total_Stops,Price\n\
         IndiGo,2h,non-stop,inf\n\
         Vistara,3h,1 stop,100\n",
    );

    let report = EdaPipeline::new(settings_for(input, dir.path()))
        .run(None)
        .expect("pipeline run");

    assert_eq!(report.dropped_rows, 1);
    assert_eq!(report.summary.rows, 1);
    assert_eq!(report.summary.price_max, Some(100.0));
    for kind in ChartKind::ALL {
        assert!(chart_path(dir.path(), kind).exists(), "missing {}", kind);
    }
}

#[test]
fn test_summary_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "flights.csv", FULL_SHEET);
    let pipeline = EdaPipeline::new(settings_for(input, dir.path()));

    let first = pipeline.summarize().expect("first summary");
    let second = pipeline.summarize().expect("second summary");
    assert_eq!(first, second);
}

#[test]
fn test_empty_after_filter_skips_every_chart() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        dir.path(),
        "flights.csv",
        "Airline,Duration,Total_Stops,Price\n\
         IndiGo,2h 50m,non-stop,n/a\n\
         Vistara,1h,1 stop,free\n",
    );

    let report = EdaPipeline::new(settings_for(input, dir.path()))
        .run(None)
        .expect("pipeline run");

    assert_eq!(report.summary.rows, 0);
    assert_eq!(report.summary.price_min, None);
    assert_eq!(report.summary.price_mean, None);
    assert_eq!(report.summary.price_median, None);
    assert_eq!(report.summary.price_max, None);
    assert_eq!(report.summary.price_std, None);
    assert!(report
        .charts
        .iter()
        .all(|c| matches!(c, ChartOutcome::Skipped { .. })));
    for kind in ChartKind::ALL {
        assert!(!chart_path(dir.path(), kind).exists());
    }

    let rows = read_summary(&report.summary_path);
    assert_eq!(rows[0], ("rows".to_string(), "0".to_string()));
    assert_eq!(rows[1], ("price_min".to_string(), String::new()));
}

#[test]
fn test_missing_airline_column_skips_only_airline_chart() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        dir.path(),
        "flights.csv",
        "Date_of_Journey,Duration,Total_Stops,Price\n\
         24/03/2019,2h 50m,non-stop,3897\n\
         1/05/2019,7h 25m,2 stops,7662\n\
         9/06/2019,19h,1 stop,13882\n",
    );

    let report = EdaPipeline::new(settings_for(input, dir.path()))
        .run(None)
        .expect("pipeline run");

    assert!(report.summary_path.exists());
    assert!(!chart_path(dir.path(), ChartKind::AvgPriceByAirline).exists());
    assert!(chart_path(dir.path(), ChartKind::PriceDistribution).exists());
    assert!(chart_path(dir.path(), ChartKind::PriceVsDuration).exists());
    assert!(chart_path(dir.path(), ChartKind::PriceByStops).exists());

    let skipped: Vec<ChartKind> = report
        .charts
        .iter()
        .filter(|c| c.written_path().is_none())
        .map(|c| c.kind())
        .collect();
    assert_eq!(skipped, vec![ChartKind::AvgPriceByAirline]);
}

#[test]
fn test_stale_chart_removed_when_data_missing() {
    let dir = TempDir::new().expect("temp dir");
    let stale = chart_path(dir.path(), ChartKind::PriceVsDuration);
    std::fs::write(&stale, b"old image").expect("write stale chart");

    let input = write_input(dir.path(), "flights.csv", "Airline,Price\nIndiGo,3897\n");
    EdaPipeline::new(settings_for(input, dir.path()))
        .run(None)
        .expect("pipeline run");

    assert!(!stale.exists());
}

#[test]
fn test_missing_input_is_fatal_before_output() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_for(dir.path().join("flight_price.xlsx"), dir.path());
    let summary_path = settings.summary_path();

    let err = EdaPipeline::new(settings).run(None).unwrap_err();

    assert!(matches!(err, EdaError::InputNotFound { .. }));
    assert!(err.to_string().contains("flight_price.xlsx"));
    assert!(!summary_path.exists());
}

#[test]
fn test_missing_price_column_is_fatal_before_output() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(dir.path(), "flights.csv", "Airline,Duration\nIndiGo,2h 50m\n");
    let settings = settings_for(input, dir.path());
    let summary_path = settings.summary_path();

    let err = EdaPipeline::new(settings).run(None).unwrap_err();

    assert!(matches!(err, EdaError::MissingColumn(ref c) if c == "Price"));
    assert!(!summary_path.exists());
    for kind in ChartKind::ALL {
        assert!(!chart_path(dir.path(), kind).exists());
    }
}
