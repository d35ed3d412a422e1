// pdf2txt - convert a directory of PDFs into one flat .txt per document
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pdf2txt::{batch, Config, ErrorPolicy, LopdfExtractor};

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch PDF text extraction: one flat UTF-8 .txt per PDF")]
struct Args {
    /// Directory containing the PDFs
    #[arg(short, long, env = "PDF2TXT_SOURCE_DIR")]
    source: Option<PathBuf>,

    /// Directory receiving the .txt files
    #[arg(short, long, env = "PDF2TXT_DEST_DIR")]
    dest: Option<PathBuf>,

    /// What to do when a document fails
    #[arg(long, value_enum)]
    on_error: Option<ErrorPolicy>,

    /// Convert this many documents in parallel
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Document extension to look for
    #[arg(long)]
    extension: Option<String>,

    /// Descend into subdirectories of the source directory
    #[arg(short, long)]
    recursive: bool,

    /// Create the destination directory if it does not exist
    #[arg(long)]
    create_dest: bool,

    /// TOML config file
    #[arg(short, long, env = "PDF2TXT_CONFIG")]
    config: Option<PathBuf>,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> Result<(Config, Option<PathBuf>)> {
        let mut config = Config::load_or_default(self.config.as_deref())?;

        if let Some(source) = self.source {
            config.source_dir = source;
        }
        if let Some(dest) = self.dest {
            config.dest_dir = dest;
        }
        if let Some(policy) = self.on_error {
            config.on_error = policy;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(extension) = self.extension {
            config.extension = extension;
        }
        config.recursive |= self.recursive;
        config.create_dest_dir |= self.create_dest;

        Ok((config.validate()?, self.report))
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<bool> {
    let (config, report_path) = args.into_config()?;
    tracing::debug!(?config, "effective configuration");

    let report = batch::run(&config, &LopdfExtractor)
        .with_context(|| format!("cannot convert {}", config.source_dir.display()))?;

    if let Some(path) = report_path {
        report.write_json(&path)?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(report.is_success())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
