// WHY: end-to-end training entry point shared by the CLI, tests and benchmarks
// Reads the corpora, builds the matrix, calibrates, and reports without printing or exiting

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::markov::{calibrate, Alphabet, Calibration, CountMatrix, TransitionMatrix, DEFAULT_PRIOR};
use crate::model::Model;
use crate::reader::{AsyncFileReader, ReadStats, ReaderConfig};

/// Configuration for a training run
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub alphabet: Alphabet,
    /// Pseudo-count seeded into every matrix cell
    pub prior: f64,
    pub reader: ReaderConfig,
    /// Show a console progress bar over training files
    pub show_progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            prior: DEFAULT_PRIOR,
            reader: ReaderConfig::default(),
            show_progress: false,
        }
    }
}

/// Per-corpus reading statistics
/// WHY: mirrors ReadStats with the role the file played in training
#[derive(Serialize, Debug, Clone)]
pub struct CorpusStats {
    /// training, good or bad
    pub role: &'static str,
    #[serde(flatten)]
    pub read: ReadStats,
}

/// Summary of a finished training run, serializable for `--stats-out`
#[derive(Serialize, Debug, Clone)]
pub struct TrainingReport {
    pub corpora: Vec<CorpusStats>,
    pub alphabet_size: usize,
    pub prior: f64,
    /// Bigrams counted from the training corpus (excluding the prior)
    pub observed_transitions: u64,
    pub calibration: Calibration,
    pub margin: f64,
    pub separated: bool,
    pub duration_ms: u64,
}

/// Train and calibrate a model from corpus files
///
/// Training files are streamed line by line into the count matrix; the good and
/// bad calibration corpora are read whole. Any read failure aborts the run.
pub async fn train_model(
    training_files: &[PathBuf],
    good_path: &Path,
    bad_path: &Path,
    config: &TrainingConfig,
) -> Result<(Model, TrainingReport)> {
    let start_time = Instant::now();
    let reader = AsyncFileReader::new(config.reader.clone());
    let mut counts = CountMatrix::with_prior(config.alphabet.clone(), config.prior)?;
    let mut corpora = Vec::with_capacity(training_files.len() + 2);

    info!("Starting training over {} corpus files", training_files.len());

    let progress = if config.show_progress {
        let bar = ProgressBar::new(training_files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?,
        );
        Some(bar)
    } else {
        None
    };

    for path in training_files {
        if let Some(bar) = &progress {
            bar.set_message(path.display().to_string());
        }
        let stats = reader
            .for_each_line(path, |line| counts.observe_line(line))
            .await
            .with_context(|| format!("Failed to read training corpus {}", path.display()))?;
        corpora.push(CorpusStats { role: "training", read: stats });
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let observed_transitions = counts.observed_transitions();
    info!(observed_transitions, "Normalizing transition counts");
    let matrix = counts.normalize();

    let (good_lines, good_stats) = reader
        .read_file_lines(good_path)
        .await
        .with_context(|| format!("Failed to read good corpus {}", good_path.display()))?;
    let (bad_lines, bad_stats) = reader
        .read_file_lines(bad_path)
        .await
        .with_context(|| format!("Failed to read bad corpus {}", bad_path.display()))?;
    corpora.push(CorpusStats { role: "good", read: good_stats });
    corpora.push(CorpusStats { role: "bad", read: bad_stats });

    let (model, calibration) = finish(matrix, &good_lines, &bad_lines)?;

    let report = TrainingReport {
        corpora,
        alphabet_size: model.alphabet().len(),
        prior: config.prior,
        observed_transitions,
        calibration,
        margin: calibration.margin(),
        separated: calibration.is_separated(),
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    info!(
        threshold = model.threshold(),
        separated = report.separated,
        duration_ms = report.duration_ms,
        "Training completed"
    );

    Ok((model, report))
}

/// Train and calibrate from in-memory lines
pub fn train_from_lines<S: AsRef<str>>(
    training: &[S],
    good: &[S],
    bad: &[S],
    config: &TrainingConfig,
) -> Result<(Model, Calibration)> {
    let matrix = TransitionMatrix::build(config.alphabet.clone(), training, config.prior)?;
    finish(matrix, good, bad)
}

fn finish<S: AsRef<str>>(
    matrix: TransitionMatrix,
    good: &[S],
    bad: &[S],
) -> Result<(Model, Calibration)> {
    let calibration = calibrate(&matrix, good, bad).context("Calibration failed")?;
    Ok((Model::from_calibration(matrix, &calibration), calibration))
}

/// Write the training report as pretty JSON
pub async fn write_report(report: &TrainingReport, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write training report {}", path.display()))?;
    info!("Wrote training report to {}", path.display());
    Ok(())
}
