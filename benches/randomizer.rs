use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use randomizer::{RandomizerBuilder, Sampler, SecureRandom};

fn gen_pairs(n: usize) -> Vec<(f64, usize)> {
    let mut rng = Pcg32::seed_from_u64(777);
    (0..n).map(|i| (0.1 + rng.random::<f64>(), i)).collect()
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("randomizer_prepare");
    for &n in &[2usize, 8, 64, 256, 1024] {
        let pairs = gen_pairs(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("from_pairs_n={n}"), |b| {
            b.iter(|| black_box(Sampler::from_pairs(black_box(pairs.clone()))).unwrap());
        });
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("randomizer_sample");
    const DRAWS_PER_ITER: usize = 1024;

    for &n in &[2usize, 8, 64, 256, 1024] {
        let fast: Sampler<usize> = Sampler::from_pairs(gen_pairs(n)).unwrap();
        let mut secure = RandomizerBuilder::secure();
        secure.add_many(gen_pairs(n)).unwrap();
        let secure: Sampler<usize, SecureRandom> = secure.prepare().unwrap();
        group.throughput(Throughput::Elements(DRAWS_PER_ITER as u64));

        group.bench_function(format!("fast_n={n}"), |b| {
            b.iter(|| {
                let mut s = 0usize;
                for _ in 0..DRAWS_PER_ITER {
                    s ^= *fast.sample();
                }
                black_box(s)
            });
        });

        group.bench_function(format!("secure_n={n}"), |b| {
            b.iter(|| {
                let mut s = 0usize;
                for _ in 0..DRAWS_PER_ITER {
                    s ^= *secure.sample();
                }
                black_box(s)
            });
        });

        group.bench_function(format!("pcg_n={n}"), |b| {
            b.iter_batched_ref(
                || Pcg32::seed_from_u64(999),
                |rng| {
                    let mut s = 0usize;
                    for _ in 0..DRAWS_PER_ITER {
                        s ^= *fast.sample_with(rng);
                    }
                    black_box(s)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(randomizer, bench_prepare, bench_sample);
criterion_main!(randomizer);
