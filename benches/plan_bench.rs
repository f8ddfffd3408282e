// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Planner benchmarks over synthetic directories.
//!
//! Every directory is spaced by 10 so small moves squash into free slots,
//! while a packed directory forces a full cascade.

use criterion::{
    BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use nmv::plan::{PlanOptions, plan_with};

fn spaced(count: u64, step: u64) -> Vec<String> {
    return (0..count)
        .map(|i| format!("{:06}_file{}.md", i * step, i))
        .collect();
}

// =============================================================================
// Move Planning
// =============================================================================

fn bench_move_to_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_to_front");

    for size in [100u64, 1000, 10000] {
        group.throughput(Throughput::Elements(size));

        for (label, step) in [("spaced", 10), ("packed", 1)] {
            let names = spaced(size, step);
            let target = names[names.len() - 1].clone();

            for squash in [true, false] {
                let id = format!("{}/{}", label, if squash { "squash" } else { "shift" });
                group.bench_with_input(BenchmarkId::new(id, size), &names, |b, names| {
                    b.iter(|| {
                        let plan = plan_with(names, &target, 0, PlanOptions { squash }).unwrap();
                        black_box(plan.renames.len())
                    });
                });
            }
        }
    }

    group.finish();
}

fn bench_move_to_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_to_back");

    for size in [100u64, 1000, 10000] {
        group.throughput(Throughput::Elements(size));

        let names = spaced(size, 1);
        let target = names[0].clone();
        group.bench_with_input(BenchmarkId::new("packed", size), &names, |b, names| {
            b.iter(|| {
                let plan = plan_with(names, &target, size - 1, PlanOptions::default()).unwrap();
                black_box(plan.renames.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_move_to_front, bench_move_to_back);

criterion_main!(benches);
