// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;
use understory_question::{EngineOptions, QuestionEngine, QuestionPayload};

fn payload_json(items: usize) -> String {
    let text: String = (0..items).map(|i| format!("word [[pos_{i}]] ")).collect();
    let data: Vec<_> = (0..items)
        .map(|i| json!({ "id": i, "value": format!("w{i}"), "positionId": i }))
        .collect();
    json!({
        "id": 1,
        "questionType": "DRAG_AND_DROP",
        "questionText": text,
        "content": { "data": data },
    })
    .to_string()
}

fn bench_mount_and_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("question/mount_view");
    for items in [4usize, 32] {
        let json = payload_json(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &json, |b, json| {
            b.iter(|| {
                let payload = QuestionPayload::from_json(json).unwrap();
                let engine = QuestionEngine::from_payload(&payload, &EngineOptions::default())
                    .unwrap();
                black_box(engine.view());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mount_and_view);
criterion_main!(benches);
