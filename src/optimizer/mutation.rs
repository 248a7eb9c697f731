use crate::key::{Key, ALPHABET_LEN};
use fastrand::Rng;

/// Generates a uniformly random starting key.
pub fn random_key(rng: &mut Rng) -> Key {
    Key::random(rng)
}

/// Two distinct positions, uniform over all unordered pairs.
///
/// The second draw comes from the 25 remaining slots, so the pair can never
/// collapse to a single position and no draw is wasted.
#[inline(always)]
pub fn pick_distinct_pair(rng: &mut Rng) -> (usize, usize) {
    let a = rng.usize(0..ALPHABET_LEN);
    let mut b = rng.usize(0..ALPHABET_LEN - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

/// Neighbouring key: the images of two distinct letters are exchanged.
///
/// Swapping two positions of a permutation swaps two symbols, so choosing the
/// pair of positions uniformly is the same as choosing the pair of symbols
/// uniformly. Every move is its own inverse, which keeps the proposal symmetric.
#[inline(always)]
pub fn propose(key: &Key, rng: &mut Rng) -> Key {
    let (a, b) = pick_distinct_pair(rng);
    key.swapped(a, b)
}
