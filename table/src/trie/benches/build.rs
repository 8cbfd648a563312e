use criterion::{criterion_group, Criterion};
use htable_table::{
    trie::{BitmaskSize, Config, Writer},
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

        for bitmask in [
            BitmaskSize::Byte,
            BitmaskSize::Short,
            BitmaskSize::Int,
            BitmaskSize::Long,
        ] {
            let writer = Writer::new(Config {
                bitmask,
                value_size: ValueSize::Int,
            })
            .unwrap();
            c.bench_function(
                &format!("{}/n={} bitmask={}", module_path!(), n, bitmask.bits()),
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
