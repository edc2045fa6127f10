use bk_index::{BkTree, Levenshtein};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn k_random_words(rng: &mut StdRng, k: usize) -> Vec<String> {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    (0..k)
        .map(|_| {
            let len = rng.gen_range(3..10);
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for k in [1_000, 10_000] {
        let words = k_random_words(&mut StdRng::seed_from_u64(1), k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &words, |b, words| {
            b.iter(|| BkTree::from_items(Levenshtein, words.iter().cloned()))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let mut rng = StdRng::seed_from_u64(2);
    let tree = BkTree::from_items(Levenshtein, k_random_words(&mut rng, 10_000));
    let queries = k_random_words(&mut rng, 100);

    for radius in [0u32, 1, 2, 3] {
        group.bench_with_input(BenchmarkId::new("radius", radius), &radius, |b, &radius| {
            b.iter(|| {
                for q in queries.iter() {
                    black_box(tree.search(q.as_str(), radius));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_search);
criterion_main!(benches);
