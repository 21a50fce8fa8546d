use criterion::{Criterion, black_box, criterion_group, criterion_main};
use toponym::prelude::*;

const SYLLABLES: &[&str] = &[
    "san", "ta", "ro", "sa", "rio", "mar", "tin", "bel", "gra", "no", "cor", "do", "ba", "val",
];

fn generate_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let first: String = (0..3).map(|j| SYLLABLES[(i + j * 7) % SYLLABLES.len()]).collect();
            let second: String = (0..2).map(|j| SYLLABLES[(i / 3 + j * 5) % SYLLABLES.len()]).collect();
            format!("{first} {second}")
        })
        .collect()
}

fn bench_lookup(c: &mut Criterion) {
    let names = generate_names(2000);
    let source = InMemorySource::new().with_context("MLA", names.iter().cloned());
    let corrector = SpellingCorrector::train(CorrectorConfig::default(), &source).unwrap();

    let mut group = c.benchmark_group("spelling");

    group.bench_function("correct_exact", |b| {
        b.iter(|| black_box(corrector.correct(black_box(&names[10]), "MLA")))
    });
    group.bench_function("correct_one_edit", |b| {
        let query = names[10].replacen('a', "e", 1);
        b.iter(|| black_box(corrector.correct(black_box(&query), "MLA")))
    });
    group.bench_function("correct_miss", |b| {
        b.iter(|| black_box(corrector.correct(black_box("qwxz kjvp"), "MLA")))
    });

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("damerau_levenshtein", |b| {
        b.iter(|| {
            black_box(damerau_levenshtein_distance(
                black_box("general san martin"),
                black_box("genreal sna martni"),
            ))
        })
    });
}

fn bench_suggest(c: &mut Criterion) {
    let names = generate_names(5000);
    let source = InMemorySource::new().with_context("MLA", names);
    let mut suggestor = Suggestor::new(SuggestorConfig::default());
    suggestor.train(&source).unwrap();

    c.bench_function("suggest_substring", |b| {
        b.iter(|| black_box(suggestor.suggest(black_box("rio"), "MLA")))
    });
}

criterion_group!(benches, bench_lookup, bench_distance, bench_suggest);
criterion_main!(benches);
