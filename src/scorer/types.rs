use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How a decoded bigram with observed count `c` and reference count `f`
/// contributes to the log-likelihood. Bigrams with `f == 0` never contribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoreFormula {
    /// `c * ln(f)`
    #[default]
    Reference,
    /// `ln(c) + ln(f)`, once per distinct bigram
    ObservedReference,
}

impl ScoreFormula {
    #[inline(always)]
    pub fn contribution(self, observed: u64, log_reference: f64) -> f64 {
        match self {
            Self::Reference => observed as f64 * log_reference,
            Self::ObservedReference => (observed as f64).ln() + log_reference,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub log_likelihood: f64,

    // Occurrence counts over the trimmed decoded text
    pub total_bigrams: u64,
    pub known_bigrams: u64,
    pub unknown_bigrams: u64,

    pub distinct_bigrams: usize,
}

impl ScoreDetails {
    /// Share of bigram occurrences the reference model has seen.
    pub fn coverage(&self) -> f64 {
        if self.total_bigrams == 0 {
            0.0
        } else {
            self.known_bigrams as f64 / self.total_bigrams as f64
        }
    }
}
