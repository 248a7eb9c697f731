use super::{ScoreDetails, ScoreFormula, Scorer};
use crate::cipher::apply_key;
use crate::key::{Key, BLANK};
use crate::model::{
    bigram_index, symbol_of, tally_symbols, FrequencyModel, BIGRAM_SLOTS, BLANK_SYMBOL,
};

#[inline(always)]
fn map_symbol(key: &Key, symbol: usize) -> usize {
    if symbol == BLANK_SYMBOL {
        BLANK_SYMBOL
    } else {
        key.map_index(symbol)
    }
}

/// Fast Path: Used by the Sampler.
pub fn score_full(scorer: &Scorer, key: &Key) -> f64 {
    let mut score = 0.0;
    for &(a, b, count) in &scorer.cipher_bigrams {
        let idx = bigram_index(map_symbol(key, a as usize), map_symbol(key, b as usize));
        if scorer.known[idx] {
            score += scorer.formula.contribution(count, scorer.log_freqs[idx]);
        }
    }
    score
}

/// Detailed Path: Used by reports.
pub fn score_details(scorer: &Scorer, key: &Key) -> ScoreDetails {
    let mut d = ScoreDetails {
        total_bigrams: scorer.total_bigrams,
        distinct_bigrams: scorer.cipher_bigrams.len(),
        ..Default::default()
    };

    for &(a, b, count) in &scorer.cipher_bigrams {
        let idx = bigram_index(map_symbol(key, a as usize), map_symbol(key, b as usize));
        if scorer.known[idx] {
            d.known_bigrams += count;
            d.log_likelihood += scorer.formula.contribution(count, scorer.log_freqs[idx]);
        } else {
            d.unknown_bigrams += count;
        }
    }
    d
}

/// Reference path: decode, strip blank padding, count decoded bigrams, sum.
///
/// Agrees with [`score_full`] up to floating-point summation order.
pub fn score_text(
    key: &Key,
    ciphertext: &str,
    model: &FrequencyModel,
    formula: ScoreFormula,
) -> f64 {
    let decoded = apply_key(key, ciphertext);
    let stripped = decoded.trim_matches(BLANK);

    let mut table = [0u64; BIGRAM_SLOTS];
    tally_symbols(stripped.chars().map(symbol_of), &mut table);

    let mut score = 0.0;
    for (idx, &observed) in table.iter().enumerate() {
        if observed == 0 {
            continue;
        }
        let reference = model.counts()[idx];
        if reference > 0 {
            score += formula.contribution(observed, (reference as f64).ln());
        }
    }
    score
}
