use crate::error::{CfResult, CipherForgeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ALPHABET_LEN: usize = 26;

/// Placeholder written for every character outside the alphabet.
pub const BLANK: char = ' ';

/// Index of an ASCII letter in the alphabet, case-folded.
#[inline(always)]
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
    } else {
        None
    }
}

#[inline(always)]
pub fn index_letter(idx: usize) -> char {
    ALPHABET[idx] as char
}

/// A substitution key: position `i` maps alphabet letter `i` to `symbols[i]`.
///
/// The inner array is private so every `Key` in circulation is a permutation of
/// `0..26`. Keys are `Copy`; mutation always yields a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
    symbols: [u8; ALPHABET_LEN],
}

impl Key {
    pub fn identity() -> Self {
        let mut symbols = [0u8; ALPHABET_LEN];
        for (i, s) in symbols.iter_mut().enumerate() {
            *s = i as u8;
        }
        Self { symbols }
    }

    /// Uniform random permutation drawn from the caller's generator.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut key = Self::identity();
        rng.shuffle(&mut key.symbols);
        key
    }

    pub fn from_symbols(symbols: [u8; ALPHABET_LEN]) -> CfResult<Self> {
        if !is_permutation(&symbols) {
            return Err(CipherForgeError::InvalidKey(format!(
                "{:?} is not a permutation of 0..{}",
                symbols, ALPHABET_LEN
            )));
        }
        Ok(Self { symbols })
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[u8; ALPHABET_LEN] {
        &self.symbols
    }

    #[inline(always)]
    pub fn map_index(&self, idx: usize) -> usize {
        self.symbols[idx] as usize
    }

    /// Maps a letter through the key. Non-letters yield `None`.
    pub fn map_char(&self, c: char) -> Option<char> {
        letter_index(c).map(|i| index_letter(self.map_index(i)))
    }

    pub fn inverse(&self) -> Self {
        let mut symbols = [0u8; ALPHABET_LEN];
        for (i, &s) in self.symbols.iter().enumerate() {
            symbols[s as usize] = i as u8;
        }
        Self { symbols }
    }

    /// Returns a copy of this key with the images at `a` and `b` exchanged.
    #[inline(always)]
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut next = *self;
        next.symbols.swap(a, b);
        next
    }

    /// Number of positions where both keys agree.
    pub fn agreement(&self, other: &Key) -> usize {
        self.symbols
            .iter()
            .zip(other.symbols.iter())
            .filter(|(a, b)| a == b)
            .count()
    }

    /// Positions at which the two keys differ.
    pub fn diff_positions(&self, other: &Key) -> Vec<usize> {
        (0..ALPHABET_LEN)
            .filter(|&i| self.symbols[i] != other.symbols[i])
            .collect()
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::identity()
    }
}

pub fn is_permutation(symbols: &[u8]) -> bool {
    if symbols.len() != ALPHABET_LEN {
        return false;
    }
    let mut seen = [false; ALPHABET_LEN];
    for &s in symbols {
        let s = s as usize;
        if s >= ALPHABET_LEN || seen[s] {
            return false;
        }
        seen[s] = true;
    }
    true
}

impl FromStr for Key {
    type Err = CipherForgeError;

    fn from_str(s: &str) -> CfResult<Self> {
        let trimmed = s.trim();
        let count = trimmed.chars().count();
        if count != ALPHABET_LEN {
            return Err(CipherForgeError::InvalidKey(format!(
                "'{}' has {} symbols, expected {}",
                trimmed, count, ALPHABET_LEN
            )));
        }

        let mut symbols = [0u8; ALPHABET_LEN];
        for (i, c) in trimmed.chars().enumerate() {
            match letter_index(c) {
                Some(idx) => symbols[i] = idx as u8,
                None => {
                    return Err(CipherForgeError::InvalidKey(format!(
                        "'{}' contains non-letter '{}'",
                        trimmed, c
                    )))
                }
            }
        }

        Self::from_symbols(symbols).map_err(|_| {
            CipherForgeError::InvalidKey(format!("'{}' repeats a letter", trimmed))
        })
    }
}

impl TryFrom<String> for Key {
    type Error = CipherForgeError;

    fn try_from(value: String) -> CfResult<Self> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in &self.symbols {
            write!(f, "{}", index_letter(s as usize))?;
        }
        Ok(())
    }
}
