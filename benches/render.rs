// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

mod fixtures;

use capella_export::extract::record_for;
use capella_export::render;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_render(c: &mut Criterion) {
    let (graph, root) = fixtures::wide_model(64);
    let element = graph.get(&root).expect("bench root");
    let record = record_for(&graph, element);

    c.bench_function("render/wide-64-root", |b| {
        b.iter(|| black_box(render::fragment(&record, None)))
    });

    c.bench_function("extract/wide-64-root", |b| {
        b.iter(|| black_box(record_for(&graph, element)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
