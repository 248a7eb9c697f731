use crate::key::{index_letter, Key, ALPHABET_LEN, BLANK};
use serde::{Deserialize, Serialize};

/// Substitutes every letter of `text` through `key`. Anything outside A-Z
/// (after case folding) becomes a blank, so punctuation and case never survive.
pub fn apply_key(key: &Key, text: &str) -> String {
    text.chars()
        .map(|c| key.map_char(c).unwrap_or(BLANK))
        .collect()
}

/// Uppercased letters of `text` with everything else dropped.
pub fn letters_only(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAccuracy {
    /// The alphabet after encrypting with the true key and decrypting with the guess.
    pub guess: String,
    pub correct: usize,
    pub fraction: f64,
}

/// Pushes the alphabet through `encrypt_key` then `decrypt_key` and counts the
/// letters that come back in place.
pub fn compare_keys(encrypt_key: &Key, decrypt_key: &Key) -> KeyAccuracy {
    let mut guess = String::with_capacity(ALPHABET_LEN);
    let mut correct = 0;

    for i in 0..ALPHABET_LEN {
        let recovered = decrypt_key.map_index(encrypt_key.map_index(i));
        if recovered == i {
            correct += 1;
        }
        guess.push(index_letter(recovered));
    }

    KeyAccuracy {
        guess,
        correct,
        fraction: correct as f64 / ALPHABET_LEN as f64,
    }
}
