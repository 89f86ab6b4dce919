//! Builder and table access benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use ironfb_core::{Builder, Table, UOffset};
use std::hint::black_box;

fn build_record(builder: &mut Builder) -> UOffset {
    let name = builder.create_string("benchmark").unwrap();
    builder.start_vector(1, 8, 1).unwrap();
    for i in (0..8u8).rev() {
        builder.prepend(i);
    }
    let inventory = builder.end_vector(8);

    builder.start_object(4).unwrap();
    builder.prepend_uoffset_relative_slot(3, inventory, 0).unwrap();
    builder.prepend_uoffset_relative_slot(2, name, 0).unwrap();
    builder.prepend_slot::<i16>(1, 300, 100).unwrap();
    builder.prepend_slot::<i16>(0, 150, 150).unwrap();
    let root = builder.end_object().unwrap();
    builder.finish(root).unwrap();
    root
}

fn benchmark_build(c: &mut Criterion) {
    let mut builder = Builder::new();

    c.bench_function("build_table", |b| {
        b.iter(|| {
            builder.reset();
            black_box(build_record(&mut builder));
        })
    });
}

fn benchmark_create_string(c: &mut Criterion) {
    let mut builder = Builder::new();

    c.bench_function("create_string", |b| {
        b.iter(|| {
            builder.reset();
            black_box(builder.create_string(black_box("hello world")).unwrap());
        })
    });
}

fn benchmark_read(c: &mut Criterion) {
    let mut builder = Builder::new();
    build_record(&mut builder);
    let buf = builder.finished_data().to_vec();

    c.bench_function("read_slot", |b| {
        b.iter(|| {
            let tab = Table::get_root(black_box(&buf), 0);
            black_box(tab.get_slot::<i16>(6, 100))
        })
    });

    c.bench_function("read_string", |b| {
        b.iter(|| {
            let tab = Table::get_root(black_box(&buf), 0);
            let o = tab.offset(8);
            black_box(tab.string(o))
        })
    });
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_create_string,
    benchmark_read
);
criterion_main!(benches);
