// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_placement::{DragPlacement, ItemPool, Rearrange};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn below(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

fn machine(entries: usize) -> DragPlacement<usize> {
    let values: Vec<String> = (0..entries).map(|i| format!("word{}", i % 5)).collect();
    DragPlacement::new(ItemPool::new(values, 0..entries))
}

/// Random start/drop/cancel traffic, the way a restless user produces it.
fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/gestures");
    for entries in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(entries), &entries, |b, &n| {
            b.iter_batched(
                || (machine(n), Lcg::new(0x5eed)),
                |(mut drag, mut rng)| {
                    for _ in 0..256 {
                        match rng.below(4) {
                            0 | 1 => {
                                let pool = drag.pool().pool();
                                if !pool.is_empty() {
                                    let instance = pool[rng.below(pool.len())].instance();
                                    drag.start_from_pool(instance);
                                }
                            }
                            2 => {
                                drag.start_from_slot(&rng.below(n));
                            }
                            _ => {
                                drag.end_without_drop();
                                continue;
                            }
                        }
                        drag.drag_over(&rng.below(n));
                        drag.drop_on_slot(&rng.below(n));
                    }
                    black_box(drag);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_rearrange_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/rearrange_fill");
    for entries in [8usize, 64] {
        let values: Vec<String> = (0..entries).map(|i| format!("w{i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(entries), &values, |b, values| {
            b.iter_batched(
                || Rearrange::new(values.iter().cloned()),
                |mut rearrange| {
                    for slot in 0..rearrange.slot_count() {
                        let instance = rearrange.drag().pool().pool()[0].instance();
                        rearrange.start_from_pool(instance);
                        rearrange.drop_on_slot(slot);
                    }
                    black_box(rearrange.is_complete());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gestures, bench_rearrange_fill);
criterion_main!(benches);
