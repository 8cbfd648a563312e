use criterion::{criterion_group, Criterion};
use htable_table::{
    chain::{Config, Writer},
    Entries, ValueSize,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_build(c: &mut Criterion) {
    for n in [1_000, 10_000, 100_000] {
        // Generate random entries
        let mut entries = Entries::new(ValueSize::Int);
        let mut rng = StdRng::seed_from_u64(0);
        while entries.len() < n {
            entries.put(rng.gen(), &rng.gen::<f32>()).unwrap();
        }

        for filling_ratio in [50, 90] {
            let writer = Writer::new(Config {
                value_size: ValueSize::Int,
                filling_ratio,
                min_table_size: 16,
            })
            .unwrap();
            c.bench_function(
                &format!("{}/n={} ratio={}", module_path!(), n, filling_ratio),
                |b| b.iter(|| writer.write(&entries).unwrap()),
            );
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_build
}
