// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_template::{RichText, parse};

fn template_with(slots: usize) -> String {
    let mut text = String::new();
    for i in 0..slots {
        text.push_str("Some <b>literal</b> text before ");
        text.push_str(&format!("[[pos_{}]]", i % 8));
        text.push_str(" & after; ");
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("template/parse");
    for slots in [4usize, 32, 256] {
        let text = template_with(slots);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(slots), &text, |b, text| {
            b.iter(|| black_box(parse(black_box(text))));
        });
    }
    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("template/escaped");
    let plain = RichText::new("plain text with no markup at all, repeated ".repeat(16));
    let marked = RichText::new("H<sub>2</sub>O &amp; CO<sub>2</sub> ".repeat(16));
    group.bench_function("plain", |b| b.iter(|| black_box(plain.escaped())));
    group.bench_function("markup", |b| b.iter(|| black_box(marked.escaped())));
    group.finish();
}

criterion_group!(benches, bench_parse, bench_escape);
criterion_main!(benches);
