use criterion::{black_box, criterion_group, Criterion};
use htable_table::{
    chain::{Config, Reader, Writer},
    Entries, Reader as _, ValueSize,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const LOOKUPS: usize = 1_000;

fn bench_lookup(c: &mut Criterion) {
    for n in [1_000, 100_000] {
        let mut entries = Entries::new(ValueSize::Int);
        let mut rng = StdRng::seed_from_u64(0);
        while entries.len() < n {
            entries.put(rng.gen(), &rng.gen::<f32>()).unwrap();
        }

        // Half of the probed keys are present
        let mut keys: Vec<u64> = entries.iter().map(|(key, _)| key).collect();
        keys.shuffle(&mut rng);
        keys.truncate(LOOKUPS / 2);
        keys.extend((0..LOOKUPS / 2).map(|_| rng.gen::<u64>()));

        for filling_ratio in [25, 50, 100] {
            let blob = Writer::new(Config {
                value_size: ValueSize::Int,
                filling_ratio,
                min_table_size: 16,
            })
            .unwrap()
            .write(&entries)
            .unwrap();
            let reader = Reader::new(&blob).unwrap();
            c.bench_function(
                &format!(
                    "{}/n={} ratio={} lookups={}",
                    module_path!(),
                    n,
                    filling_ratio,
                    LOOKUPS
                ),
                |b| {
                    b.iter(|| {
                        for key in &keys {
                            black_box(reader.lookup(*key));
                        }
                    })
                },
            );
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_lookup
}
