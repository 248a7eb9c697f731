#![allow(dead_code)]

use cipherforge::cipher::apply_key;
use cipherforge::corpus::builtin_model;
use cipherforge::key::Key;
use cipherforge::model::{FrequencyModel, ModelBuilder};
use cipherforge::scorer::{ScoreFormula, Scorer};
use std::sync::Arc;

pub fn reference_model() -> Arc<FrequencyModel> {
    Arc::new(builtin_model())
}

pub fn model_from(text: &str) -> Arc<FrequencyModel> {
    let mut builder = ModelBuilder::new();
    builder.add_text(text);
    Arc::new(builder.build())
}

/// Encrypts `plaintext` with a key drawn from `seed`; returns (encryption key, ciphertext).
pub fn encrypt_seeded(plaintext: &str, seed: u64) -> (Key, String) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let key = Key::random(&mut rng);
    (key, apply_key(&key, plaintext))
}

pub fn scorer_for(model: Arc<FrequencyModel>, ciphertext: &str) -> Arc<Scorer> {
    Arc::new(Scorer::new(model, ciphertext, ScoreFormula::Reference))
}
