pub mod builder;
pub mod loader;

pub use self::builder::ModelBuilder;
pub use self::loader::{load_model, load_model_from_path, save_model, save_model_to_path};

use crate::key::{index_letter, letter_index, ALPHABET_LEN, BLANK};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// 26 letters plus one collapsed blank.
pub const SYMBOL_COUNT: usize = ALPHABET_LEN + 1;
pub const BLANK_SYMBOL: usize = ALPHABET_LEN;
pub const BIGRAM_SLOTS: usize = SYMBOL_COUNT * SYMBOL_COUNT;

#[inline(always)]
pub fn symbol_of(c: char) -> usize {
    letter_index(c).unwrap_or(BLANK_SYMBOL)
}

#[inline(always)]
pub fn symbol_char(symbol: usize) -> char {
    if symbol == BLANK_SYMBOL {
        BLANK
    } else {
        index_letter(symbol)
    }
}

#[inline(always)]
pub fn bigram_index(first: usize, second: usize) -> usize {
    first * SYMBOL_COUNT + second
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BigramKind {
    LetterLetter,
    LetterBlank,
    BlankLetter,
    BlankBlank,
}

impl BigramKind {
    pub fn classify(first: usize, second: usize) -> Self {
        match (first == BLANK_SYMBOL, second == BLANK_SYMBOL) {
            (false, false) => Self::LetterLetter,
            (false, true) => Self::LetterBlank,
            (true, false) => Self::BlankLetter,
            (true, true) => Self::BlankBlank,
        }
    }
}

/// Adds one count per adjacent pair in `symbols` to a 27x27 table.
pub fn tally_symbols<I>(symbols: I, table: &mut [u64; BIGRAM_SLOTS])
where
    I: IntoIterator<Item = usize>,
{
    let mut prev: Option<usize> = None;
    for s in symbols {
        if let Some(p) = prev {
            table[bigram_index(p, s)] += 1;
        }
        prev = Some(s);
    }
}

/// Bigram counts over the canonical alphabet plus blank.
///
/// Built once before sampling and shared read-only afterwards. A zero cell
/// means the bigram never occurred in the reference text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyModel {
    counts: [u64; BIGRAM_SLOTS],
}

impl Default for FrequencyModel {
    fn default() -> Self {
        Self {
            counts: [0; BIGRAM_SLOTS],
        }
    }
}

impl FrequencyModel {
    pub fn from_counts(counts: [u64; BIGRAM_SLOTS]) -> Self {
        Self { counts }
    }

    #[inline(always)]
    pub fn count(&self, first: usize, second: usize) -> u64 {
        self.counts[bigram_index(first, second)]
    }

    /// Looks up a bigram by characters, classifying non-letters as blank.
    pub fn count_chars(&self, first: char, second: char) -> u64 {
        self.count(symbol_of(first), symbol_of(second))
    }

    #[inline(always)]
    pub fn counts(&self) -> &[u64; BIGRAM_SLOTS] {
        &self.counts
    }

    pub(crate) fn add(&mut self, first: usize, second: usize, n: u64) {
        self.counts[bigram_index(first, second)] += n;
    }

    pub(crate) fn counts_mut(&mut self) -> &mut [u64; BIGRAM_SLOTS] {
        &mut self.counts
    }

    pub fn merge(&mut self, other: &FrequencyModel) {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Number of bigrams with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Non-zero cells as `(first, second, count)` in table order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i / SYMBOL_COUNT, i % SYMBOL_COUNT, c))
    }

    pub fn kind_totals(&self) -> Vec<(BigramKind, u64)> {
        BigramKind::iter()
            .map(|kind| {
                let total: u64 = self
                    .iter_nonzero()
                    .filter(|&(a, b, _)| BigramKind::classify(a, b) == kind)
                    .map(|(_, _, c)| c)
                    .sum();
                (kind, total)
            })
            .collect()
    }

    /// The `n` most frequent bigrams, highest first.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .iter_nonzero()
            .map(|(a, b, c)| (format!("{}{}", symbol_char(a), symbol_char(b)), c))
            .collect();
        entries.sort_by(|x, y| y.1.cmp(&x.1).then_with(|| x.0.cmp(&y.0)));
        entries.truncate(n);
        entries
    }
}
