use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::{setup, unit_ciphertexts, BALLOT_COUNTS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use homomorphic_ballot::{elgamal::Ciphertext, scalar::random_scalar_with, Scalar};

fn encryption_and_decryption(c: &mut Criterion) {
    let (mut rng, ctx, kp) = setup();
    let m = Scalar::from(3u64);

    c.bench_function("Encrypt", |b| {
        b.iter(|| {
            let r = random_scalar_with(&mut rng);
            Ciphertext::new(black_box(&ctx), black_box(&kp.public_key), &m, &r)
        })
    });

    let (ct, _) = Ciphertext::new_using_rng(&mut rng, &ctx, &kp.public_key, 3);
    c.bench_function("Decrypt to point", |b| {
        b.iter(|| black_box(&ct).decrypt_point(&ctx, &kp.secret_key))
    });

    let mut group = c.benchmark_group("Decrypt with bound");
    for max in [10u64, 1_000, 100_000] {
        let (ct, _) = Ciphertext::new_using_rng(&mut rng, &ctx, &kp.public_key, max);
        group.bench_with_input(BenchmarkId::from_parameter(max), &max, |b, &max| {
            b.iter(|| ct.decrypt(&ctx, &kp.secret_key, black_box(max)).unwrap())
        });
    }
    group.finish();
}

fn aggregation(c: &mut Criterion) {
    let (_, ctx, kp) = setup();
    let mut rng = StdRng::seed_from_u64(1u64);
    let ciphertexts = unit_ciphertexts(&mut rng, &ctx, &kp, BALLOT_COUNTS[BALLOT_COUNTS.len() - 1]);

    let mut group = c.benchmark_group("Aggregate ciphertexts");
    group.sample_size(10);
    for count in BALLOT_COUNTS {
        let cts = &ciphertexts[..count];
        group.bench_with_input(BenchmarkId::new("sum", count), &count, |b, _| {
            b.iter(|| Ciphertext::sum(black_box(cts)))
        });
        group.bench_with_input(BenchmarkId::new("pairwise", count), &count, |b, _| {
            b.iter(|| {
                black_box(cts)
                    .iter()
                    .fold(Ciphertext::zero(), |acc, c| acc + *c)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, encryption_and_decryption, aggregation);
criterion_main!(benches);
