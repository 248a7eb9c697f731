use super::{Chain, ChainResult, HistoryPoint};
use crate::config::Config;
use crate::error::{CfResult, CipherForgeError};
use crate::scorer::Scorer;
use crate::stats::ScoreSummary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerOptions {
    pub chains: usize,
    pub iterations: usize,
    pub report_interval: usize,
    pub threads: Option<usize>,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            chains: 8,
            iterations: 10_000,
            report_interval: 500,
            threads: None,
        }
    }
}

impl From<&Config> for SamplerOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            chains: cfg.search.chains,
            iterations: cfg.search.iterations,
            report_interval: cfg.search.report_interval,
            threads: cfg.search.threads,
        }
    }
}

/// A periodic view of one chain, handed to the reporting side.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub chain: usize,
    pub iteration: usize,
    pub score: f64,
    pub decoded: &'a str,
}

/// Receives progress from chains running on worker threads.
pub trait ChainObserver: Send + Sync {
    fn on_snapshot(&self, snapshot: &Snapshot<'_>);

    fn on_chain_complete(&self, _result: &ChainResult) {}
}

pub struct SilentObserver;

impl ChainObserver for SilentObserver {
    fn on_snapshot(&self, _snapshot: &Snapshot<'_>) {}
}

/// All chain results, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub results: Vec<ChainResult>,
}

impl RunOutcome {
    pub fn best(&self) -> Option<&ChainResult> {
        self.results.first()
    }

    pub fn final_scores(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.score).collect()
    }

    /// Per-chain histories in chain order.
    pub fn histories(&self) -> Vec<(usize, &[HistoryPoint])> {
        let mut out: Vec<(usize, &[HistoryPoint])> = self
            .results
            .iter()
            .map(|r| (r.chain, r.history.as_slice()))
            .collect();
        out.sort_by_key(|(chain, _)| *chain);
        out
    }

    pub fn summary(&self) -> Option<ScoreSummary> {
        ScoreSummary::from_scores(&self.final_scores())
    }
}

/// Runs independent chains in parallel and ranks their final keys.
pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: SamplerOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: SamplerOptions) -> Self {
        Self { scorer, options }
    }

    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Chain `i` is seeded with `seed + i` when a base seed is given.
    pub fn run<O: ChainObserver>(&self, seed: Option<u64>, observer: &O) -> CfResult<RunOutcome> {
        let opts = &self.options;

        if self.scorer.model.is_empty() {
            return Err(CipherForgeError::MissingModel(
                "bigram model has no counts; build or load one before sampling".to_string(),
            ));
        }
        if opts.chains == 0 {
            return Err(CipherForgeError::Config(
                "at least one chain is required".to_string(),
            ));
        }

        info!(
            "🔥 Running {} chains x {} iterations",
            opts.chains, opts.iterations
        );
        let start = Instant::now();

        let run_chains = || -> Vec<ChainResult> {
            (0..opts.chains)
                .into_par_iter()
                .map(|i| {
                    let chain_seed = seed.map(|s| s.wrapping_add(i as u64));
                    let mut chain = Chain::new(i, self.scorer.clone(), chain_seed);
                    chain.run(opts.iterations, opts.report_interval, observer);
                    let result = chain.into_result();
                    observer.on_chain_complete(&result);
                    result
                })
                .collect()
        };

        let mut results = match opts.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| CipherForgeError::Config(e.to_string()))?;
                pool.install(run_chains)
            }
            None => run_chains(),
        };

        // Stable: equal scores keep chain order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        if let Some(best) = results.first() {
            info!(
                "🏆 Best chain #{} scored {:.2} in {:.2}s",
                best.chain,
                best.score,
                start.elapsed().as_secs_f32()
            );
        }

        Ok(RunOutcome { results })
    }
}
