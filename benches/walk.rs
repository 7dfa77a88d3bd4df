// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

mod fixtures;

use capella_export::walk::Exporter;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_walk(c: &mut Criterion) {
    let (wide, wide_root) = fixtures::wide_model(32);
    c.bench_function("export/wide-32x32", |b| {
        let exporter = Exporter::new(&wide);
        b.iter(|| black_box(exporter.export(std::slice::from_ref(&wide_root))))
    });

    let (deep, deep_root) = fixtures::deep_model(1024);
    c.bench_function("export/deep-1024", |b| {
        let exporter = Exporter::new(&deep);
        b.iter(|| black_box(exporter.export(std::slice::from_ref(&deep_root))))
    });
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
