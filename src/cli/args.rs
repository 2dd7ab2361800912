use crate::settings::Settings;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flight-price-eda")]
#[command(about = "Exploratory analysis of flight-price spreadsheets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: flight-eda.toml when present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the data, write the summary CSV and render the charts (default)
    Run(RunArgs),

    /// Print summary statistics without writing any files
    Summary {
        #[arg(short, long, help = "Input spreadsheet (.xlsx, .xls, .ods or .csv)")]
        input: Option<PathBuf>,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    #[arg(short, long, help = "Input spreadsheet (.xlsx, .xls, .ods or .csv)")]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Directory for the summary CSV and charts")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Histogram bin count")]
    pub bins: Option<usize>,

    #[arg(long, help = "Chart width in pixels")]
    pub width: Option<u32>,

    #[arg(long, help = "Chart height in pixels")]
    pub height: Option<u32>,
}

impl RunArgs {
    /// Layer command-line values over loaded settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(input) = &self.input {
            settings.input = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(bins) = self.bins {
            settings.chart.histogram_bins = bins;
        }
        if let Some(width) = self.width {
            settings.chart.width = width;
        }
        if let Some(height) = self.height {
            settings.chart.height = height;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["flight-price-eda"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "flight-price-eda",
            "run",
            "--input",
            "flights.csv",
            "--bins",
            "15",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        let settings = args.apply(Settings::default());
        assert_eq!(settings.input, PathBuf::from("flights.csv"));
        assert_eq!(settings.chart.histogram_bins, 15);
        assert_eq!(settings.output_dir, PathBuf::from("."));
    }
}
