use crate::error::{CfResult, CipherForgeError};
use crate::scorer::ScoreFormula;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub scoring: ScoringParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Independent chains, each from its own random key
    #[arg(long, default_value_t = 8)]
    pub chains: usize,
    /// Iterations per chain
    #[arg(long, default_value_t = 10_000)]
    pub iterations: usize,
    /// Record the chain score every N iterations
    #[arg(long, default_value_t = 500)]
    pub report_interval: usize,
    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            chains: 8,
            iterations: 10_000,
            report_interval: 500,
            threads: None,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, default_value_t = ScoreFormula::Reference)]
    pub formula: ScoreFormula,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_json::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CfResult<()> {
        if self.search.chains == 0 {
            return Err(CipherForgeError::Config("chains must be at least 1".into()));
        }
        if self.search.threads == Some(0) {
            return Err(CipherForgeError::Config("threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Overlays only the flags that were typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.chains);
        update_if_present!(search.iterations);
        update_if_present!(search.report_interval);
        update_if_present!(search.threads);
        update_if_present!(scoring.formula);
    }
}
