use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frameline_core::{
    Direction, Frame, IterationCount, Keyframes, TimelineOptions, TimelineResolver,
};

/// Keyframes with `count` evenly spaced keys over one second, mixing numeric,
/// discrete and grouped properties
fn create_keyframes(count: usize) -> Keyframes {
    let mut keyframes = Keyframes::new();
    for i in 0..count {
        let t = i as f64 / (count.max(2) - 1) as f64;
        let mut frame = Frame::new();
        frame.set("opacity", t);
        frame.set("display", if i % 2 == 0 { "block" } else { "none" });
        frame.set(["transform", "translate"], format!("{}px", i * 10));
        frame.set(["transform", "rotate"], format!("{}deg", i * 15));
        keyframes.add(t, frame);
    }
    keyframes.refresh();
    keyframes
}

fn create_resolver(keys: usize, iterations: f64) -> TimelineResolver {
    TimelineResolver::new(
        create_keyframes(keys),
        TimelineOptions {
            name: Some("bench".into()),
            iteration_count: Some(IterationCount::Finite(iterations)),
            direction: Some(Direction::Alternate),
            ..Default::default()
        },
    )
    .unwrap()
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for keys in [4usize, 32, 256] {
        let resolver = create_resolver(keys, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(keys), &resolver, |b, r| {
            b.iter(|| r.snapshot(black_box(0.37), None))
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_text");
    for iterations in [1.0, 4.5, 16.0] {
        let resolver = create_resolver(32, iterations);
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &resolver,
            |b, r| b.iter(|| black_box(r.to_export_text())),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_snapshot, bench_export);
criterion_main!(benches);
