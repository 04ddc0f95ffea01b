//! maillog - Postfix log correlation and export
//!
//! Main entry point for the maillog CLI.

use clap::{Parser, ValueEnum};
use maillog::record::MessageRecord;
use maillog::{export, parser, reader, MaillogError};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Output format for the exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

/// maillog - Reconstruct per-message delivery history from Postfix logs
#[derive(Parser, Debug)]
#[command(name = "maillog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Input log file or directory (required unless input is piped)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (standard output when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    if let Err(e) = maillog::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> maillog::Result<()> {
    let stdin = io::stdin();

    let records = if stdin.is_terminal() {
        let input = cli.input.as_deref().ok_or(MaillogError::MissingInput)?;
        collect_from_path(input)?
    } else {
        // Piped input: parse stdin directly
        let records = parser::parse(stdin.lock()).map_err(MaillogError::Pipe)?;

        if records.is_empty() {
            tracing::info!("no mail transfer events found in piped input");
            return Ok(());
        }

        records
    };

    write_output(&cli, &records)
}

fn collect_from_path(input: &Path) -> maillog::Result<Vec<MessageRecord>> {
    if reader::is_directory(input)? {
        reader::read_from_directory(input)
    } else {
        reader::read_from_file(input)
    }
}

fn write_output(cli: &Cli, records: &[MessageRecord]) -> maillog::Result<()> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| MaillogError::CreateOutput {
                path: path.clone(),
                source,
            })?;

            export_records(cli.format, records, BufWriter::new(file))
        }
        None => export_records(cli.format, records, io::stdout().lock()),
    }
}

fn export_records<W: Write>(
    format: Format,
    records: &[MessageRecord],
    output: W,
) -> maillog::Result<()> {
    match format {
        Format::Json => export::export_json(records, output),
        Format::Csv => export::export_csv(records, output),
    }
}
