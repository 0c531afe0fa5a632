//! Throughput of window classification and recording assessment
//!
//! A 3 s window at 250 Hz must classify well inside one window period for
//! live sessions to keep up with the sensor.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ecgq_processing::{assess_recording, AssessmentConfig, OnlineMeanVariance, WindowedQualityClassifier};
use ecgq_simulation::{ContactPattern, EcgSimConfig, EcgSimulator};

fn simulated_values(pattern: ContactPattern, sampling_rate_hz: f32, duration_ms: u64) -> Vec<i32> {
    let mut simulator = EcgSimulator::new(EcgSimConfig {
        sampling_rate_hz,
        pattern,
        seed: Some(1),
        ..Default::default()
    })
    .unwrap();
    simulator.generate_window(duration_ms).values()
}

/// Benchmark single-window classification at several sampling rates
fn bench_classify_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_window");
    let config = AssessmentConfig::autosense_chest_band();

    for &rate in &[64.0f32, 250.0, 1000.0] {
        let values = simulated_values(ContactPattern::Attached, rate, 3_000);
        group.throughput(Throughput::Elements(values.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("attached", format!("{}Hz", rate)),
            &values,
            |b, values| {
                let mut classifier = WindowedQualityClassifier::new(config.quality.clone()).unwrap();
                b.iter(|| black_box(classifier.classify_window(black_box(values)).unwrap()));
            },
        );
    }

    let motion = simulated_values(ContactPattern::from_name("motion").unwrap(), 250.0, 3_000);
    group.throughput(Throughput::Elements(motion.len() as u64));
    group.bench_function("motion/250Hz", |b| {
        let mut classifier = WindowedQualityClassifier::new(config.quality.clone()).unwrap();
        b.iter(|| black_box(classifier.classify_window(black_box(&motion)).unwrap()));
    });

    group.finish();
}

/// Benchmark a full one-hour recording
fn bench_assess_recording(c: &mut Criterion) {
    let config = AssessmentConfig::autosense_chest_band();
    let mut simulator = EcgSimulator::new(EcgSimConfig {
        seed: Some(2),
        ..Default::default()
    })
    .unwrap();
    let recording = simulator.generate(3_600_000).unwrap();

    let mut group = c.benchmark_group("assess_recording");
    group.sample_size(10);
    group.throughput(Throughput::Elements(recording.len() as u64));
    group.bench_function("attached_1h_250Hz", |b| {
        b.iter(|| black_box(assess_recording(black_box(&recording), &config).unwrap()));
    });
    group.finish();
}

fn bench_online_variance(c: &mut Criterion) {
    let data: Vec<f64> = (0..10_000).map(|i| (i % 97) as f64 * 1.5).collect();
    c.bench_function("online_mean_variance_10k", |b| {
        b.iter(|| {
            let stats: OnlineMeanVariance = black_box(&data).iter().copied().collect();
            black_box(stats.variance().unwrap())
        });
    });
}

criterion_group!(benches, bench_classify_window, bench_assess_recording, bench_online_variance);
criterion_main!(benches);
