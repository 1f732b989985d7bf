use clap::{Parser, ValueEnum};
use contact_dedup::error::DedupError;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "contact-dedup")]
#[command(about = "Report likely duplicate contacts in a CSV file")]
#[command(version)]
pub struct Config {
    /// Contacts CSV with columns contactID, name, name1, email and optional address
    #[arg(long, short = 'i', env = "DEDUP_INPUT", default_value = "contacts.csv")]
    pub input: PathBuf,

    /// Destination for the match report
    #[arg(long, short = 'o', env = "DEDUP_OUTPUT", default_value = "matches.csv")]
    pub output: PathBuf,

    #[arg(long, value_enum, env = "DEDUP_FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    /// Score clusters on all cores
    #[arg(long, env = "DEDUP_PARALLEL")]
    pub parallel: bool,

    /// Print run counters and timings as JSON
    #[arg(long)]
    pub summary: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), DedupError> {
        if self.input == self.output {
            return Err(DedupError::config(format!(
                "output path {} would overwrite the input",
                self.output.display()
            )));
        }
        Ok(())
    }
}
