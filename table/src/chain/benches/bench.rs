use criterion::criterion_main;

mod build;
mod lookup;

criterion_main!(build::benches, lookup::benches);
