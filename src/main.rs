use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use censo_tools::io::error_log::{ERROR_LOG_FILE, FileFailureSink};
use censo_tools::pipeline::{self, EXPORT_FILE, RunConfig, ScanReport};
use censo_tools::{Result, ScanError};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Scan(args) => execute_scan(args),
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ScanError::Logging(error.to_string()))
}

fn execute_scan(args: ScanArgs) -> Result<()> {
    let config = RunConfig::new(&args.directory).with_export_path(&args.output);
    let error_log = args.error_log.clone();

    let spinner = scan_spinner(args.quiet || args.json);

    // The pipeline itself is synchronous; it runs on a worker thread so the
    // host stays responsive while a large directory is scanned.
    let worker = thread::spawn(move || -> Result<ScanReport> {
        let mut sink = FileFailureSink::create(&error_log)?;
        pipeline::run(&config, &mut sink)
    });

    let outcome = worker.join();
    spinner.finish_and_clear();
    let report = outcome.map_err(|_| ScanError::Worker("scan worker panicked".into()))??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&args, &report);
    Ok(())
}

fn print_report(args: &ScanArgs, report: &ScanReport) {
    if report.is_empty() {
        println!(
            "no collaborator records found in {} ({} documents scanned)",
            args.directory.display(),
            report.documents
        );
        return;
    }

    if let Some(export_path) = &report.export_path {
        println!("export written to {}", export_path.display());
    }
    for team in &report.teams {
        println!(
            "{} - {} collaborators ({})",
            team.team,
            team.collaborator_count,
            team.first_names.join(", ")
        );
    }
}

fn scan_spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("scanning spreadsheets...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compile per-collaborator technology records from a directory of ODS sheets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory of .ods workbooks and summarize collaborators per team.
    Scan(ScanArgs),
}

#[derive(clap::Args)]
struct ScanArgs {
    /// Directory containing the .ods workbooks to scan.
    #[arg(long)]
    directory: PathBuf,

    /// Destination of the compiled export workbook.
    #[arg(long, default_value = EXPORT_FILE)]
    output: PathBuf,

    /// Plain-text log receiving one line per skipped document or sheet.
    #[arg(long, default_value = ERROR_LOG_FILE)]
    error_log: PathBuf,

    /// Emit the scan report as JSON instead of the textual summary.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long)]
    quiet: bool,
}
