use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::processors::EdaPipeline;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::ChartOutcome;

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let settings = args.apply(settings).validated()?;
            println!("Input file: {}", settings.input.display());
            println!("Output directory: {}", settings.output_dir.display());

            let progress = ProgressReporter::new_spinner("Analyzing flight prices...", cli.quiet);
            let pipeline = EdaPipeline::new(settings);
            let report = pipeline.run(Some(&progress))?;
            progress.finish_with_message(&format!("Analyzed {} rows", report.summary.rows));

            if report.dropped_rows > 0 {
                println!(
                    "Dropped {} rows without a numeric price",
                    report.dropped_rows
                );
            }
            println!("\n{}", report.summary.report());

            println!("\nDone.");
            println!("Saved summary -> {}", report.summary_path.display());
            println!("Saved plots ->");
            for chart in &report.charts {
                match chart {
                    ChartOutcome::Written { path, .. } => println!(" - {}", path.display()),
                    ChartOutcome::Skipped { kind, reason } => {
                        println!(" - skipped {} ({})", kind.file_name(), reason)
                    }
                }
            }
        }

        Commands::Summary { input, json } => {
            let args = RunArgs {
                input,
                ..RunArgs::default()
            };
            let settings = args.apply(settings).validated()?;
            let summary = EdaPipeline::new(settings).summarize()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.report());
            }
        }
    }

    Ok(())
}
