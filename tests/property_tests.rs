use cipherforge::cipher::{apply_key, letters_only};
use cipherforge::key::{is_permutation, Key, ALPHABET_LEN};
use cipherforge::optimizer::{acceptance_ratio, mutation};
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_key()(seed in any::<u64>()) -> Key {
        let mut rng = fastrand::Rng::with_seed(seed);
        mutation::random_key(&mut rng)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_generated_keys_are_permutations(key in arb_key()) {
        prop_assert!(is_permutation(key.symbols()));
    }

    #[test]
    fn test_proposal_is_one_transposition(key in arb_key(), seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let next = mutation::propose(&key, &mut rng);

        prop_assert!(is_permutation(next.symbols()));
        let diff = key.diff_positions(&next);
        prop_assert_eq!(diff.len(), 2);

        // Swapping the same pair back restores the input, so every move is its own inverse.
        prop_assert_eq!(next.swapped(diff[0], diff[1]), key);
        prop_assert_eq!(key.agreement(&next), ALPHABET_LEN - 2);
    }

    #[test]
    fn test_long_proposal_walks_stay_valid(key in arb_key(), seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut current = key;
        for _ in 0..200 {
            current = mutation::propose(&current, &mut rng);
        }
        prop_assert!(is_permutation(current.symbols()));
    }

    #[test]
    fn test_round_trip_on_letters(key in arb_key(), text in "[A-Za-z]{0,200}") {
        let plain = letters_only(&text);
        let cipher = apply_key(&key, &plain);
        prop_assert_eq!(apply_key(&key.inverse(), &cipher), plain);
    }

    #[test]
    fn test_acceptance_ratio_bounded(current in -1e4f64..0.0, proposed in -1e4f64..0.0) {
        let r = acceptance_ratio(current, proposed);
        prop_assert!(!r.is_nan());
        prop_assert!(r <= 1.0);
        prop_assert!(r > 0.0 || proposed - current < -700.0);
    }

    #[test]
    fn test_key_string_round_trip(key in arb_key()) {
        let parsed: Key = key.to_string().parse().unwrap();
        prop_assert_eq!(parsed, key);
    }
}
