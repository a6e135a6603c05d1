use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use gibberish::{
    corpus, load_model, pipeline, save_model, Classification, Model, ReaderConfig,
    TrainingConfig,
};

#[derive(Parser, Debug)]
#[command(name = "gibberish")]
#[command(about = "Character-bigram Markov model for telling text from gibberish")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on a reference corpus and calibrate against good/bad samples
    Train {
        /// Training corpus file or glob pattern (repeatable)
        #[arg(long = "corpus", required = true)]
        corpus: Vec<String>,

        /// Known-good calibration lines
        #[arg(long)]
        good: PathBuf,

        /// Known-gibberish calibration lines
        #[arg(long)]
        bad: PathBuf,

        /// Where to write the trained model
        #[arg(long, default_value = "gibberish_model.json")]
        out: PathBuf,

        /// Pseudo-count added to every transition before training
        #[arg(long, default_value_t = gibberish::DEFAULT_PRIOR)]
        prior: f64,

        /// Use memory-mapped I/O instead of async buffered
        #[arg(long)]
        use_mmap: bool,

        /// Suppress console progress bars
        #[arg(long)]
        no_progress: bool,

        /// Training report output file path
        #[arg(long)]
        stats_out: Option<PathBuf>,

        /// Fail when good and bad calibration scores overlap
        #[arg(long)]
        require_separation: bool,
    },

    /// Print the plausibility score of each input line
    Score {
        #[arg(long)]
        model: PathBuf,

        /// Text to score; reads lines from stdin when omitted
        text: Vec<String>,
    },

    /// Classify each input line as plausible or gibberish
    Classify {
        #[arg(long)]
        model: PathBuf,

        /// Emit one JSON object per line instead of tab-separated text
        #[arg(long)]
        json: bool,

        /// Text to classify; reads lines from stdin when omitted
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging on stderr keeps stdout clean for scores
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Train {
            corpus: corpus_patterns,
            good,
            bad,
            out,
            prior,
            use_mmap,
            no_progress,
            stats_out,
            require_separation,
        } => {
            let training_files = corpus::resolve_all(&corpus_patterns)?;
            let config = TrainingConfig {
                prior,
                reader: ReaderConfig {
                    use_mmap,
                    ..Default::default()
                },
                show_progress: !no_progress,
                ..Default::default()
            };

            let (model, report) =
                pipeline::train_model(&training_files, &good, &bad, &config).await?;
            save_model(&model, &out)?;

            if let Some(ref path) = stats_out {
                pipeline::write_report(&report, path).await?;
            }

            println!("gibberish v{} - training complete", env!("CARGO_PKG_VERSION"));
            println!("  Training files: {}", training_files.len());
            println!("  Transitions counted: {}", report.observed_transitions);
            println!("  Worst good score: {:.6}", report.calibration.min_good);
            println!("  Best bad score: {:.6}", report.calibration.max_bad);
            println!("  Threshold: {:.6}", model.threshold());
            println!("  Separated: {}", report.separated);
            println!("  Model written to {}", out.display());

            if !report.separated {
                warn!("Good and bad calibration samples overlap; threshold cannot separate them");
                if require_separation {
                    anyhow::bail!(
                        "Calibration overlap: worst good score {:.6} <= best bad score {:.6}",
                        report.calibration.min_good,
                        report.calibration.max_bad
                    );
                }
            }
        }
        Command::Score { model, text } => {
            let model = load_model(&model)?;
            for_each_input(text, |line, out| {
                writeln!(out, "{:.6}\t{}", model.score(line), line)
            })?;
        }
        Command::Classify { model, json, text } => {
            let model: Model = load_model(&model)?;
            for_each_input(text, |line, out| {
                let verdict = model.classify(line);
                if json {
                    serde_json::to_writer(&mut *out, &ClassifiedLine { text: line, verdict })?;
                    writeln!(out)
                } else {
                    let label = if verdict.plausible { "plausible" } else { "gibberish" };
                    writeln!(out, "{}\t{:.6}\t{}", label, verdict.score, line)
                }
            })?;
        }
    }

    Ok(())
}

/// One line of `classify --json` output
#[derive(Serialize)]
struct ClassifiedLine<'a> {
    text: &'a str,
    #[serde(flatten)]
    verdict: Classification,
}

/// Run `emit` over the given arguments, or over stdin lines when there are none
fn for_each_input<F>(args: Vec<String>, mut emit: F) -> Result<()>
where
    F: FnMut(&str, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    let out: &mut dyn Write = &mut lock;

    if args.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            emit(line.as_str(), &mut *out)?;
        }
    } else {
        for line in &args {
            emit(line.as_str(), &mut *out)?;
        }
    }

    out.flush()?;
    Ok(())
}
