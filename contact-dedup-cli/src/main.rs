mod config;

use clap::Parser;
use config::{Config, OutputFormat};
use contact_dedup::dedup::DedupRun;
use contact_dedup::error::DedupError;
use contact_dedup::report::RunSummary;
use contact_dedup::util::{read_records, write_matches, write_matches_json};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let config = Config::parse();
    match dedup(&config) {
        Ok(summary) => {
            println!("Total execution time: {:.2} seconds", summary.total_secs);
            println!(
                "Time spent finding duplicates: {:.2} seconds",
                summary.dedup_secs
            );
            println!("Matches written to {}", config.output.display());
            if config.summary {
                match summary.to_json() {
                    Ok(json) => println!("{json}"),
                    Err(err) => return fail(err),
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(err),
    }
}

fn fail(err: DedupError) -> ExitCode {
    eprintln!("{err}");
    ExitCode::from(err.kind.code())
}

fn dedup(config: &Config) -> Result<RunSummary, DedupError> {
    config.validate()?;
    let start = Instant::now();
    let records = read_records(BufReader::new(open(&config.input)?))?;
    let read_secs = start.elapsed().as_secs_f64();
    info!("Read {} records in {:.4} secs", records.len(), read_secs);

    let dedup_start = Instant::now();
    let run = if config.parallel {
        DedupRun::parallel(&records)
    } else {
        DedupRun::sequential(&records)
    };
    let dedup_secs = dedup_start.elapsed().as_secs_f64();
    info!("Dedupe completed in {:.4} secs", dedup_secs);

    let write_start = Instant::now();
    let sink = BufWriter::new(create(&config.output)?);
    match config.format {
        OutputFormat::Csv => write_matches(sink, &run.matches)?,
        OutputFormat::Json => write_matches_json(sink, &run.matches)?,
    }
    let write_secs = write_start.elapsed().as_secs_f64();
    info!(
        "Wrote {} matches in {:.4} secs",
        run.matches.len(),
        write_secs
    );

    Ok(RunSummary {
        read_secs,
        dedup_secs,
        write_secs,
        total_secs: start.elapsed().as_secs_f64(),
        ..RunSummary::from_run(&run)
    })
}

fn open(path: &Path) -> Result<File, DedupError> {
    File::open(path).map_err(|err| DedupError::io(format!("Unable to open {}: {err}", path.display())))
}

fn create(path: &Path) -> Result<File, DedupError> {
    File::create(path)
        .map_err(|err| DedupError::io(format!("Unable to create {}: {err}", path.display())))
}
