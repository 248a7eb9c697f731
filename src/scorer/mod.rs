pub mod engine;
pub mod types;

pub use self::types::{ScoreDetails, ScoreFormula};

use crate::cipher::apply_key;
use crate::key::Key;
use crate::model::{
    symbol_of, tally_symbols, FrequencyModel, BIGRAM_SLOTS, BLANK_SYMBOL, SYMBOL_COUNT,
};
use std::sync::Arc;

/// Log-likelihood of candidate keys for one fixed ciphertext.
///
/// The ciphertext's bigram table is tabulated once. A key relabels letters
/// bijectively and leaves blank alone, so the decoded table is the same set
/// of counts under new labels and never has to be rebuilt per key.
pub struct Scorer {
    pub model: Arc<FrequencyModel>,
    pub formula: ScoreFormula,

    ciphertext: String,

    // ln(reference count), valid only where `known` is set
    pub(crate) log_freqs: [f64; BIGRAM_SLOTS],
    pub(crate) known: [bool; BIGRAM_SLOTS],

    // Distinct ciphertext bigrams after trimming blank padding: (first, second, count)
    pub(crate) cipher_bigrams: Vec<(u8, u8, u64)>,
    pub(crate) total_bigrams: u64,
}

impl Scorer {
    pub fn new(model: Arc<FrequencyModel>, ciphertext: &str, formula: ScoreFormula) -> Self {
        let mut log_freqs = [0.0f64; BIGRAM_SLOTS];
        let mut known = [false; BIGRAM_SLOTS];
        for (i, &f) in model.counts().iter().enumerate() {
            if f > 0 {
                log_freqs[i] = (f as f64).ln();
                known[i] = true;
            }
        }

        let symbols: Vec<usize> = ciphertext.chars().map(symbol_of).collect();
        let start = symbols
            .iter()
            .position(|&s| s != BLANK_SYMBOL)
            .unwrap_or(symbols.len());
        let end = symbols
            .iter()
            .rposition(|&s| s != BLANK_SYMBOL)
            .map_or(start, |p| p + 1);

        let mut table = [0u64; BIGRAM_SLOTS];
        tally_symbols(symbols[start..end].iter().copied(), &mut table);

        let mut cipher_bigrams = Vec::new();
        let mut total_bigrams = 0;
        for (i, &c) in table.iter().enumerate() {
            if c > 0 {
                let first = (i / SYMBOL_COUNT) as u8;
                let second = (i % SYMBOL_COUNT) as u8;
                cipher_bigrams.push((first, second, c));
                total_bigrams += c;
            }
        }

        Self {
            model,
            formula,
            ciphertext: ciphertext.to_string(),
            log_freqs,
            known,
            cipher_bigrams,
            total_bigrams,
        }
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Bigrams in the trimmed ciphertext.
    pub fn total_bigrams(&self) -> u64 {
        self.total_bigrams
    }

    /// Hot path used by the sampler.
    #[inline(always)]
    pub fn score(&self, key: &Key) -> f64 {
        engine::score_full(self, key)
    }

    pub fn score_details(&self, key: &Key) -> ScoreDetails {
        engine::score_details(self, key)
    }

    pub fn decode(&self, key: &Key) -> String {
        apply_key(key, &self.ciphertext)
    }
}
