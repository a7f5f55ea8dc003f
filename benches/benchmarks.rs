//! Benchmarks for flowguard
//!
//! Run with: cargo bench

#[cfg(not(all(feature = "statistics", feature = "anomaly")))]
compile_error!("Benchmarks require the statistics and anomaly features. Run: cargo bench --features full");

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use flowguard::anomaly::{AnomalyDetector, DetectorConfig, HistoryPolicy};
use flowguard::statistics::{Moments, SlidingWindow};

/// Cheap deterministic signal: a sawtooth with a spike every 97 samples
fn signal(i: u64) -> f64 {
    if i % 97 == 0 {
        50.0
    } else {
        (i % 17) as f64 * 0.1
    }
}

// ============================================================================
// Moments Benchmarks
// ============================================================================

fn bench_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("moments");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        let mut m = Moments::new();
        let mut i = 0u64;
        b.iter(|| {
            m.add(black_box(signal(i)));
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("add_remove", |b| {
        let mut m = Moments::from_values(&[1.0, 2.0, 3.0]);
        let mut i = 0u64;
        b.iter(|| {
            let v = signal(i);
            m.add(black_box(v));
            m.remove(black_box(v));
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

// ============================================================================
// Sliding Window Benchmarks
// ============================================================================

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("sliding_window");
    group.throughput(Throughput::Elements(1));

    for capacity in [16, 256, 4096, 65536] {
        group.bench_with_input(BenchmarkId::new("push", capacity), &capacity, |b, &cap| {
            let mut w = SlidingWindow::new(cap).unwrap();
            for i in 0..cap as u64 {
                w.push(signal(i)).unwrap();
            }
            let mut i = 0u64;
            b.iter(|| {
                black_box(w.push(signal(i)).unwrap());
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("statistics", |b| {
        let mut w = SlidingWindow::new(1024).unwrap();
        for i in 0..2048u64 {
            w.push(signal(i)).unwrap();
        }
        b.iter(|| black_box(w.statistics().unwrap()));
    });

    group.finish();
}

// ============================================================================
// Detector Benchmarks
// ============================================================================

fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector");
    group.throughput(Throughput::Elements(1));

    for capacity in [30, 1024] {
        group.bench_with_input(BenchmarkId::new("evaluate", capacity), &capacity, |b, &cap| {
            let mut det = AnomalyDetector::new(cap, 3.0, false).unwrap();
            let mut i = 0u64;
            b.iter(|| {
                black_box(det.evaluate(signal(i)).unwrap());
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("evaluate_exclude_anomalies", |b| {
        let config = DetectorConfig::default()
            .with_window_capacity(30)
            .with_history_policy(HistoryPolicy::ExcludeAnomalies);
        let mut det = AnomalyDetector::with_config(config).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            black_box(det.evaluate(signal(i)).unwrap());
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_moments, bench_window, bench_detector);
criterion_main!(benches);
