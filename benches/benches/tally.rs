use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::{setup, vector_ballots};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use homomorphic_ballot::{
    elgamal::Ciphertext,
    tally::{encrypt_scalar_vote, ScalarTally, VectorTally},
};

fn vector_tally(c: &mut Criterion) {
    let (_, ctx, kp) = setup();
    let mut rng = StdRng::seed_from_u64(1u64);
    let num_choices = 8;
    let ballot_counts = [100, 1_000, 10_000];
    let ballots = vector_ballots(
        &mut rng,
        &ctx,
        &kp,
        num_choices,
        ballot_counts[ballot_counts.len() - 1],
    );

    let mut add_group = c.benchmark_group("Vector tally: add ballots");
    add_group.sample_size(10);
    for count in ballot_counts {
        add_group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut tally = VectorTally::new(num_choices).unwrap();
                for ballot in &ballots[..count] {
                    tally.add_ballot(black_box(ballot)).unwrap();
                }
                tally
            })
        });
    }
    add_group.finish();

    let mut decrypt_group = c.benchmark_group("Vector tally: decrypt");
    decrypt_group.sample_size(10);
    for count in ballot_counts {
        let mut tally = VectorTally::new(num_choices).unwrap();
        for ballot in &ballots[..count] {
            tally.add_ballot(ballot).unwrap();
        }
        decrypt_group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(&tally).decrypt(&ctx, &kp.secret_key).unwrap())
        });
    }
    decrypt_group.finish();
}

fn scalar_tally(c: &mut Criterion) {
    let (_, ctx, kp) = setup();
    let mut rng = StdRng::seed_from_u64(2u64);
    let num_choices = 8;
    let ballots = (0..1_000)
        .map(|i| {
            encrypt_scalar_vote(&mut rng, &ctx, &kp.public_key, i % num_choices, num_choices)
                .unwrap()
                .0
        })
        .collect::<Vec<Ciphertext>>();

    let mut group = c.benchmark_group("Scalar tally: decrypt every ballot");
    group.sample_size(10);
    for count in [100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut tally = ScalarTally::new(&ctx, num_choices).unwrap();
                for ballot in &ballots[..count] {
                    tally.add_ballot(&ctx, &kp.secret_key, black_box(ballot)).unwrap();
                }
                tally.num_ballots()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, vector_tally, scalar_tally);
criterion_main!(benches);
