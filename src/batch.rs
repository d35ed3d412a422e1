// Batch conversion: discover documents, extract, flatten, write
use chrono::Utc;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::{Config, ErrorPolicy};
use crate::error::ExtractError;
use crate::normalize;
use crate::pdf_extraction::TextExtractor;
use crate::report::{BatchReport, Converted, Failure};

enum Outcome {
    Done(Converted),
    Failed(Failure),
    Skipped,
}

/// Documents under `config.source_dir`, sorted by path.
///
/// Dot-files and dot-directories are ignored and the extension match is ASCII
/// case-insensitive. Symlinked files count; symlinked directories are never
/// descended into.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>, ExtractError> {
    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&config.source_dir)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&config.source_dir).to_path_buf();
            ExtractError::fs(&path, "list", io::Error::from(e))
        })?;
        if entry.depth() == 0 {
            continue;
        }
        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && has_extension(entry.path(), &config.extension) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// `<dest_dir>/<relative dir>/<stem>.txt`. Only the last extension is replaced.
///
/// The relative dir is the source's parent below `source_dir`; it is empty
/// unless discovery was recursive.
pub fn output_path(config: &Config, source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".txt");

    let relative = source
        .parent()
        .and_then(|parent| parent.strip_prefix(&config.source_dir).ok())
        .unwrap_or(Path::new(""));
    config.dest_dir.join(relative).join(name)
}

/// Convert one document. Nothing is written if extraction fails.
pub fn convert_document<E: TextExtractor + ?Sized>(
    extractor: &E,
    source: &Path,
    output: &Path,
) -> Result<Converted, ExtractError> {
    info!("Reading file: {}", source.display());

    let raw = extractor.extract_text(source)?;
    let text = normalize::flatten(&raw);

    fs::write(output, text.as_bytes()).map_err(|e| ExtractError::fs(output, "write", e))?;
    debug!(output = %output.display(), bytes = text.len(), "wrote text");

    Ok(Converted {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        chars: text.chars().count(),
    })
}

fn process_one<E: TextExtractor + ?Sized>(config: &Config, extractor: &E, source: &Path) -> Outcome {
    let output = output_path(config, source);
    let result = ensure_parent(config, &output).and_then(|()| convert_document(extractor, source, &output));
    match result {
        Ok(converted) => Outcome::Done(converted),
        Err(err) => {
            match config.on_error {
                ErrorPolicy::Continue => warn!("{}; continuing", err),
                ErrorPolicy::Abort => error!("{}; aborting batch", err),
            }
            Outcome::Failed(Failure::new(source, &err))
        }
    }
}

// Subdirectories below dest_dir only exist in recursive runs. dest_dir itself
// must already exist unless the run created it up front.
fn ensure_parent(config: &Config, output: &Path) -> Result<(), ExtractError> {
    match output.parent() {
        Some(parent) if parent != config.dest_dir => {
            if !config.dest_dir.is_dir() {
                return Err(ExtractError::fs(
                    &config.dest_dir,
                    "write into",
                    io::Error::from(io::ErrorKind::NotFound),
                ));
            }
            fs::create_dir_all(parent).map_err(|e| ExtractError::fs(parent, "create", e))
        }
        _ => Ok(()),
    }
}

/// Convert every document `config` selects.
///
/// Returns `Err` only when the batch cannot start (source directory
/// unreadable, destination not creatable). Per-document failures are
/// recorded in the report and handled per `config.on_error`.
pub fn run<E: TextExtractor + ?Sized>(config: &Config, extractor: &E) -> Result<BatchReport, ExtractError> {
    let started = Instant::now();
    let started_at = Utc::now();

    if config.create_dest_dir {
        fs::create_dir_all(&config.dest_dir).map_err(|e| ExtractError::fs(&config.dest_dir, "create", e))?;
    }

    let sources = discover(config)?;
    info!(
        "Found {} document(s) in {}",
        sources.len(),
        config.source_dir.display()
    );

    let outcomes = if config.jobs > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.jobs).build() {
            Ok(pool) => pool.install(|| run_parallel(config, extractor, &sources)),
            Err(e) => {
                warn!("could not start {} workers ({}); converting sequentially", config.jobs, e);
                run_sequential(config, extractor, &sources)
            }
        }
    } else {
        run_sequential(config, extractor, &sources)
    };

    let mut report = BatchReport::new(started_at, sources.len());
    for outcome in outcomes {
        match outcome {
            Outcome::Done(converted) => report.converted.push(converted),
            Outcome::Failed(failure) => report.failed.push(failure),
            Outcome::Skipped => report.skipped += 1,
        }
    }
    report.aborted = config.on_error == ErrorPolicy::Abort && !report.failed.is_empty();

    let report = report.finish(started.elapsed());
    info!("{}", report.summary());
    Ok(report)
}

fn run_sequential<E: TextExtractor + ?Sized>(config: &Config, extractor: &E, sources: &[PathBuf]) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(sources.len());
    let mut stopped = false;
    for source in sources {
        if stopped {
            outcomes.push(Outcome::Skipped);
            continue;
        }
        let outcome = process_one(config, extractor, source);
        stopped = should_stop(config, &outcome);
        outcomes.push(outcome);
    }
    outcomes
}

fn run_parallel<E: TextExtractor + ?Sized>(config: &Config, extractor: &E, sources: &[PathBuf]) -> Vec<Outcome> {
    let stop = AtomicBool::new(false);
    sources
        .par_iter()
        .map(|source| {
            if stop.load(Ordering::Acquire) {
                return Outcome::Skipped;
            }
            let outcome = process_one(config, extractor, source);
            if should_stop(config, &outcome) {
                stop.store(true, Ordering::Release);
            }
            outcome
        })
        .collect()
}

fn should_stop(config: &Config, outcome: &Outcome) -> bool {
    config.on_error == ErrorPolicy::Abort && matches!(outcome, Outcome::Failed(_))
}
