pub mod mutation;
pub mod runner;

pub use self::runner::{
    ChainObserver, Optimizer, RunOutcome, SamplerOptions, SilentObserver, Snapshot,
};

use crate::key::Key;
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Metropolis acceptance probability `min(1, exp(proposed - current))`.
///
/// Lies in `(0, 1]` for any finite difference that does not underflow `exp`.
#[inline(always)]
pub fn acceptance_ratio(current: f64, proposed: f64) -> f64 {
    let delta = proposed - current;
    if delta >= 0.0 {
        1.0
    } else {
        delta.exp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub iteration: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResult {
    pub chain: usize,
    pub key: Key,
    pub score: f64,
    pub initial_score: f64,
    pub best_key: Key,
    pub best_score: f64,
    pub history: Vec<HistoryPoint>,
    pub iterations: usize,
    pub accepted: usize,
}

impl ChainResult {
    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted as f64 / self.iterations as f64
        }
    }
}

/// One Metropolis-Hastings chain over substitution keys.
///
/// The scorer is a pure function of key, ciphertext and model, so the score of
/// the current key is carried forward instead of recomputed each iteration.
pub struct Chain {
    pub id: usize,
    pub scorer: Arc<Scorer>,

    pub key: Key,
    pub score: f64,
    pub initial_score: f64,

    pub best_key: Key,
    pub best_score: f64,

    pub history: Vec<HistoryPoint>,
    pub iterations: usize,
    pub accepted: usize,

    pub rng: fastrand::Rng,
}

impl Chain {
    pub fn new(id: usize, scorer: Arc<Scorer>, seed: Option<u64>) -> Self {
        let mut rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };
        let key = mutation::random_key(&mut rng);
        Self::with_key(id, scorer, key, rng)
    }

    pub fn with_key(id: usize, scorer: Arc<Scorer>, key: Key, rng: fastrand::Rng) -> Self {
        let score = scorer.score(&key);
        Self {
            id,
            scorer,
            key,
            score,
            initial_score: score,
            best_key: key,
            best_score: score,
            history: Vec::new(),
            iterations: 0,
            accepted: 0,
            rng,
        }
    }

    /// PROPOSE then DECIDE. Returns true when the candidate was accepted.
    #[inline(always)]
    pub fn step(&mut self) -> bool {
        let candidate = mutation::propose(&self.key, &mut self.rng);
        let new_score = self.scorer.score(&candidate);
        let threshold = acceptance_ratio(self.score, new_score);
        let u = self.rng.f64();

        self.iterations += 1;

        if u <= threshold {
            self.key = candidate;
            self.score = new_score;
            self.accepted += 1;
            if new_score > self.best_score {
                self.best_score = new_score;
                self.best_key = candidate;
            }
            true
        } else {
            false
        }
    }

    /// Runs exactly `iterations` steps, snapshotting at the first step and then
    /// every `report_interval` steps. An interval of 0 disables snapshots.
    pub fn run<O: ChainObserver + ?Sized>(
        &mut self,
        iterations: usize,
        report_interval: usize,
        observer: &O,
    ) {
        for i in 0..iterations {
            self.step();
            if report_interval > 0 && i % report_interval == 0 {
                self.record(observer);
            }
        }
    }

    fn record<O: ChainObserver + ?Sized>(&mut self, observer: &O) {
        self.history.push(HistoryPoint {
            iteration: self.iterations,
            score: self.score,
        });

        debug!(
            "Chain {:3} | Iter {:7} | Score {:.2} | Accepted {}",
            self.id, self.iterations, self.score, self.accepted
        );

        let decoded = self.scorer.decode(&self.key);
        observer.on_snapshot(&Snapshot {
            chain: self.id,
            iteration: self.iterations,
            score: self.score,
            decoded: &decoded,
        });
    }

    pub fn into_result(self) -> ChainResult {
        ChainResult {
            chain: self.id,
            key: self.key,
            score: self.score,
            initial_score: self.initial_score,
            best_key: self.best_key,
            best_score: self.best_score,
            history: self.history,
            iterations: self.iterations,
            accepted: self.accepted,
        }
    }
}
