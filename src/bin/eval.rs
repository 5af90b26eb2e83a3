//! Evaluation CLI: score a packed batch of ranked lists and report the
//! configured metric.

use clap::Parser;
use listeval::{
    measure::seeded_rng,
    Batch, EvalConfig, ListwiseEvaluator, Method,
};
use std::path::PathBuf;

/// Listwise ranking-metric evaluation: read a batch, report the batch mean.
#[derive(Parser, Debug)]
#[command(name = "eval")]
struct Args {
    /// Path to batch JSON (default: batch.json).
    #[arg(long, default_value = "batch.json")]
    batch: PathBuf,

    /// Path to config TOML (default: LISTEVAL_CONFIG or ./listeval.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metric override: MRR, P@k, nDCG@k, MAP or P@R.
    #[arg(long)]
    method: Option<Method>,

    /// Fixed tie-breaking seed; omit for wall-clock seeding.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EvalConfig::load_from(path)?,
        None => EvalConfig::load()?,
    };
    if let Some(method) = args.method {
        config.method = method;
    }

    let batch_json = std::fs::read_to_string(&args.batch)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.batch.display(), e))?;
    let batch = Batch::from_json(&batch_json)?;

    if batch.is_empty() {
        anyhow::bail!("No items in {}", args.batch.display());
    }

    let evaluator = ListwiseEvaluator::new(config)?;
    let result = match args.seed {
        Some(seed) => evaluator.evaluate_with_rng(&batch, &mut seeded_rng(seed))?,
        None => evaluator.evaluate(&batch)?,
    };

    println!(
        "Evaluated {} items in {} lists\n",
        batch.len(),
        evaluator.config().batch_size
    );
    println!("=== Evaluation Results ===");
    println!("{}: {:.4}", evaluator.config().method, result);

    Ok(())
}
