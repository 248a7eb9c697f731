use super::InputArgs;
use crate::reports;
use cipherforge::cipher::{apply_key, compare_keys, KeyAccuracy};
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::key::Key;
use cipherforge::model::FrequencyModel;
use cipherforge::optimizer::{ChainObserver, ChainResult, Optimizer, RunOutcome, SamplerOptions, Snapshot};
use cipherforge::scorer::Scorer;
use cipherforge::stats::ScoreSummary;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub input: InputArgs,

    /// Treat the input as ciphertext instead of encrypting it with a random key first
    #[arg(long, default_value_t = false)]
    pub ciphertext: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Log a decoded preview of each chain at every snapshot
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Write every chain's score history as CSV
    #[arg(long)]
    pub history_out: Option<String>,

    /// Write the full run as JSON
    #[arg(long)]
    pub json_out: Option<String>,
}

struct CliLogger {
    preview: usize,
}

impl ChainObserver for CliLogger {
    fn on_snapshot(&self, s: &Snapshot<'_>) {
        let preview: String = s.decoded.chars().take(self.preview).collect();
        info!(
            "Chain {:3} | Iter {:7} | Score {:10.2} | {}",
            s.chain, s.iteration, s.score, preview
        );
    }

    fn on_chain_complete(&self, r: &ChainResult) {
        info!(
            "✅ Chain {} done: {:.2} -> {:.2} ({:.1}% accepted)",
            r.chain,
            r.initial_score,
            r.score,
            r.acceptance_rate() * 100.0
        );
    }
}

struct QuietLogger;

impl ChainObserver for QuietLogger {
    fn on_snapshot(&self, _s: &Snapshot<'_>) {}

    fn on_chain_complete(&self, r: &ChainResult) {
        info!("✅ Chain {} done: {:.2}", r.chain, r.score);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecryptReport<'a> {
    options: &'a SamplerOptions,
    formula: String,
    seed: Option<u64>,
    ciphertext: &'a str,
    decrypted: String,
    encryption_key: Option<Key>,
    accuracy: Option<KeyAccuracy>,
    summary: Option<ScoreSummary>,
    outcome: &'a RunOutcome,
}

pub fn run(args: &DecryptArgs, config: Config, model: Arc<FrequencyModel>) -> CfResult<()> {
    let input = args.input.resolve()?;

    let mut rng = if let Some(s) = args.seed {
        fastrand::Rng::with_seed(s.wrapping_add(9999))
    } else {
        fastrand::Rng::new()
    };

    let (ciphertext, encryption_key) = if args.ciphertext {
        (input, None)
    } else {
        let key = Key::random(&mut rng);
        info!("🔐 Encrypted input with key {}", key);
        (apply_key(&key, &input), Some(key))
    };
    println!("Ciphertext: {}", ciphertext);

    let scorer = Arc::new(Scorer::new(model, &ciphertext, config.scoring.formula));
    let options = SamplerOptions::from(&config);
    let optimizer = Optimizer::new(scorer.clone(), options);

    let outcome = if args.progress {
        optimizer.run(args.seed, &CliLogger { preview: 60 })?
    } else {
        optimizer.run(args.seed, &QuietLogger)?
    };

    let summary = outcome.summary();
    reports::print_chain_report(&outcome);
    if let Some(s) = &summary {
        reports::print_summary(s);
    }

    let mut accuracy = None;
    let mut decrypted = String::new();
    if let Some(best) = outcome.best() {
        decrypted = scorer.decode(&best.key);
        reports::print_key_grid("BEST", &best.key);
        if let Some(enc) = &encryption_key {
            let acc = compare_keys(enc, &best.key);
            reports::print_key_accuracy(&acc);
            accuracy = Some(acc);
        }

        println!("\n=== 🏆 FINAL RESULT ===");
        println!("Best Score: {:.4}", best.score);
        println!("Best Key: {}", best.key);
        println!("Decrypted: {}", decrypted);
    }

    if let Some(path) = &args.history_out {
        reports::write_history_csv(path, &outcome)?;
        info!("💾 Score history written to {}", path);
    }

    if let Some(path) = &args.json_out {
        let report = DecryptReport {
            options: optimizer.options(),
            formula: config.scoring.formula.to_string(),
            seed: args.seed,
            ciphertext: &ciphertext,
            decrypted,
            encryption_key,
            accuracy,
            summary,
            outcome: &outcome,
        };
        reports::write_json(path, &report)?;
        info!("💾 Run report written to {}", path);
    }

    Ok(())
}
