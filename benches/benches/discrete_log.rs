use ark_ec::AffineRepr;
use ballot_crypto_utils::solve_discrete_log::{
    solve_discrete_log_brute_force, solve_discrete_log_bsgs, BabyStepTable,
};
use benches::setup;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bsgs(c: &mut Criterion) {
    let (_, ctx, _) = setup();
    let g = ctx.generator().into_group();

    let mut group = c.benchmark_group("BSGS");
    group.sample_size(10);
    for max in [100u64, 10_000, 1_000_000, 100_000_000] {
        // Worst case, the target is at the bound
        let target = ctx.encode_message(max).into_group();
        group.bench_with_input(BenchmarkId::new("one shot", max), &max, |b, &max| {
            b.iter(|| solve_discrete_log_bsgs(black_box(max), g, target).unwrap())
        });

        let table = BabyStepTable::for_max(max, g);
        group.bench_with_input(BenchmarkId::new("precomputed table", max), &max, |b, &max| {
            b.iter(|| table.search(black_box(max), target).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Brute force");
    group.sample_size(10);
    for max in [100u64, 10_000] {
        let target = ctx.encode_message(max).into_group();
        group.bench_with_input(BenchmarkId::from_parameter(max), &max, |b, &max| {
            b.iter(|| solve_discrete_log_brute_force(black_box(max), g, target).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bsgs);
criterion_main!(benches);
