mod common;

use cipherforge::corpus::SampleText;
use cipherforge::key::Key;
use cipherforge::scorer::{engine, ScoreFormula, Scorer};
use common::{encrypt_seeded, model_from, reference_model, scorer_for};
use rstest::rstest;
use strum::IntoEnumIterator;

const EPS: f64 = 1e-9;

#[test]
fn test_precomputed_matches_literal_decode() {
    let model = reference_model();
    let (_, ciphertext) = encrypt_seeded(SampleText::Lorem.get_str(), 21);

    for formula in ScoreFormula::iter() {
        let scorer = Scorer::new(model.clone(), &ciphertext, formula);
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..25 {
            let key = Key::random(&mut rng);
            let fast = scorer.score(&key);
            let slow = engine::score_text(&key, &ciphertext, &model, formula);
            assert!(
                (fast - slow).abs() < 1e-6 * slow.abs().max(1.0),
                "{}: {} vs {} for key {}",
                formula,
                fast,
                slow,
                key
            );
        }
    }
}

#[rstest]
#[case("")]
#[case("Q")]
#[case("     ")]
#[case("... !!! 123")]
fn test_no_bigrams_scores_neutral(#[case] ciphertext: &str) {
    let scorer = scorer_for(reference_model(), ciphertext);
    let score = scorer.score(&Key::identity());
    assert_eq!(score, 0.0);
    assert_eq!(scorer.score_details(&Key::identity()).total_bigrams, 0);
}

#[test]
fn test_unknown_bigrams_contribute_nothing() {
    let model = model_from("ABABAB");
    let scorer = scorer_for(model, "ABX");
    let d = scorer.score_details(&Key::identity());

    assert!((d.log_likelihood - 3f64.ln()).abs() < EPS);
    assert_eq!(d.known_bigrams, 1);
    assert_eq!(d.unknown_bigrams, 1);
    assert!((d.coverage() - 0.5).abs() < EPS);
    assert!(d.log_likelihood.is_finite());
}

#[test]
fn test_formulas_differ_as_documented() {
    let model = model_from("ABABAB");
    let key = Key::identity();

    let reference = Scorer::new(model.clone(), "ABAB", ScoreFormula::Reference);
    let expected = 2.0 * 3f64.ln() + 2f64.ln();
    assert!((reference.score(&key) - expected).abs() < EPS);

    let observed = Scorer::new(model, "ABAB", ScoreFormula::ObservedReference);
    let expected = (2f64.ln() + 3f64.ln()) + (1f64.ln() + 2f64.ln());
    assert!((observed.score(&key) - expected).abs() < EPS);
}

#[test]
fn test_padding_is_trimmed_but_inner_blanks_count() {
    let model = reference_model();
    let key = Key::identity();

    let bare = scorer_for(model.clone(), "THE END");
    let padded = scorer_for(model.clone(), "  THE END!! ");
    assert!((bare.score(&key) - padded.score(&key)).abs() < EPS);
    assert_eq!(padded.total_bigrams(), 6);

    let joined = scorer_for(model, "THEEND");
    assert!((joined.score(&key) - bare.score(&key)).abs() > EPS);
}

#[test]
fn test_true_key_beats_random_keys() {
    let model = reference_model();
    let (encrypt, ciphertext) = encrypt_seeded(SampleText::Lorem.get_str(), 5);
    assert!(ciphertext.len() > 200);

    let scorer = scorer_for(model, &ciphertext);
    let truth = scorer.score(&encrypt.inverse());

    let mut rng = fastrand::Rng::with_seed(1234);
    for _ in 0..50 {
        let guess = Key::random(&mut rng);
        assert!(
            truth > scorer.score(&guess),
            "random key {} outscored the true key",
            guess
        );
    }
}

#[test]
fn test_decode_with_true_key_recovers_plaintext() {
    let plain = SampleText::Pangram.get_str();
    let (encrypt, ciphertext) = encrypt_seeded(plain, 8);
    let scorer = scorer_for(reference_model(), &ciphertext);
    let decoded = scorer.decode(&encrypt.inverse());

    assert_eq!(decoded, cipherforge::cipher::apply_key(&Key::identity(), plain));
    assert_eq!(scorer.ciphertext(), ciphertext);
}
