use cipherforge::cipher::apply_key;
use cipherforge::corpus::{builtin_model, SampleText};
use cipherforge::key::Key;
use cipherforge::optimizer::{mutation, Chain, SilentObserver};
use cipherforge::scorer::{engine, Scorer, ScoreFormula};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

fn setup_scorer() -> Arc<Scorer> {
    let mut rng = fastrand::Rng::with_seed(7);
    let encrypt = Key::random(&mut rng);
    let ciphertext = apply_key(&encrypt, SampleText::Lorem.get_str());
    Arc::new(Scorer::new(
        Arc::new(builtin_model()),
        &ciphertext,
        ScoreFormula::Reference,
    ))
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = setup_scorer();
    let mut rng = fastrand::Rng::with_seed(42);
    let key = mutation::random_key(&mut rng);

    c.bench_function("score_full", |b| {
        b.iter(|| scorer.score(black_box(&key)))
    });

    c.bench_function("score_text", |b| {
        b.iter(|| {
            engine::score_text(
                black_box(&key),
                scorer.ciphertext(),
                &scorer.model,
                scorer.formula,
            )
        })
    });
}

fn bench_chain(c: &mut Criterion) {
    let scorer = setup_scorer();

    c.bench_function("chain_1000_steps", |b| {
        b.iter(|| {
            let mut chain = Chain::new(0, scorer.clone(), Some(1));
            chain.run(black_box(1000), 0, &SilentObserver);
            chain.score
        })
    });
}

criterion_group!(benches, bench_scoring, bench_chain);
criterion_main!(benches);
