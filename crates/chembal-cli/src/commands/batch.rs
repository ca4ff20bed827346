use crate::cli::BatchArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use chembal::core::io::corpus::read_corpus;
use chembal::engine::progress::ProgressReporter;
use chembal::workflows::batch::{self, BatchReport};
use std::io::Write;
use tracing::info;

pub fn run(args: BatchArgs, config: &AppConfig) -> Result<()> {
    info!("Reading corpus from {:?}", &args.file);
    let entries = read_corpus(&args.file)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Scoring {} equation(s)...", entries.len());
    let report = batch::run(&entries, &config.solver, &reporter);

    let stdout = std::io::stdout();
    write_summary(&mut stdout.lock(), &report, args.show_failures)?;
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, report: &BatchReport, show_failures: bool) -> Result<()> {
    if show_failures {
        for failure in &report.failures {
            writeln!(out, "*** Failed: {} ***", failure.entry.equation)?;
        }
    }
    writeln!(out, "Equations read: {}", report.read)?;
    writeln!(out, "Equations balanced correctly: {}", report.correct)?;
    writeln!(out, "Success rate: {:.2}%", report.success_rate() * 100.0)?;
    Ok(())
}
