use clap::Parser;
use medreport::{generate_to_file, summarize, AnalysisRecord, MedReportError, ReportConfig};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generates a PDF report from an AI medical analysis JSON document.
#[derive(Parser, Debug)]
#[command(name = "medreport", version, about)]
struct Cli {
    /// Report JSON as served by the analysis backend.
    input: PathBuf,

    /// Directory the PDF is written to.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// TOML configuration file. Defaults to ./medreport.toml when present.
    #[arg(short, long, env = "MEDREPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the page and section layout instead of writing a PDF.
    #[arg(long)]
    summary: bool,
}

fn run(cli: Cli) -> Result<(), MedReportError> {
    let config = ReportConfig::load(cli.config.as_deref())?;

    log::info!("Loading report from {}", cli.input.display());
    let json = fs::read_to_string(&cli.input)?;
    let record = AnalysisRecord::from_json(&json)?;

    if cli.summary {
        let summary = summarize(&record, &config)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    fs::create_dir_all(&cli.output)?;
    let path = generate_to_file(&record, &cli.output, &config)?;
    println!("{}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
