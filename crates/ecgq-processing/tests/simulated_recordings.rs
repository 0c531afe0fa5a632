//! Simulated recordings through windowing, classification and aggregation

use approx::assert_relative_eq;
use ecgq_core::{AggregateLabel, QualityLabel};
use ecgq_processing::{
    assess_recording, spawn_session, window_by_duration, AssessmentConfig, SessionEvent,
    WindowedQualityClassifier,
};
use ecgq_simulation::{start_ecg_stream, ContactPattern, EcgSimConfig, EcgSimulator, StreamCommand, StreamConfig};

fn simulator(pattern: ContactPattern) -> EcgSimulator {
    EcgSimulator::new(EcgSimConfig {
        pattern,
        seed: Some(42),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn attached_recording_passes() {
    let recording = simulator(ContactPattern::Attached).generate(60_000).unwrap();
    let assessment = assess_recording(&recording, &AssessmentConfig::autosense_chest_band()).unwrap();

    assert_eq!(assessment.label_counts.total(), 20);
    assert!(assessment.quality.good_fraction > 0.9);
    assert_eq!(assessment.aggregate().label, AggregateLabel::Good);

    let amplitude = assessment.amplitude.unwrap();
    assert!(amplitude.mean > 250.0, "mean peak-to-peak {}", amplitude.mean);
}

#[test]
fn loose_band_never_good() {
    let recording = simulator(ContactPattern::Loose { attenuation: 0.05 })
        .generate(30_000)
        .unwrap();
    let assessment = assess_recording(&recording, &AssessmentConfig::autosense_chest_band()).unwrap();

    assert_eq!(assessment.label_counts.good, 0);
    assert_eq!(assessment.aggregate().label, AggregateLabel::Bad);
    assert_relative_eq!(assessment.quality.good_fraction, 0.0);
    assert!(assessment.amplitude.is_none());
}

#[test]
fn detached_band_is_off() {
    let recording = simulator(ContactPattern::from_name("detached").unwrap())
        .generate(30_000)
        .unwrap();
    let assessment = assess_recording(&recording, &AssessmentConfig::autosense_chest_band()).unwrap();

    assert_eq!(assessment.label_counts.band_off, 10);
    assert_eq!(assessment.aggregate().label, AggregateLabel::Bad);
}

#[test]
fn motion_bursts_are_mostly_off() {
    let recording = simulator(ContactPattern::from_name("motion").unwrap())
        .generate(30_000)
        .unwrap();
    let assessment = assess_recording(&recording, &AssessmentConfig::autosense_chest_band()).unwrap();

    assert!(assessment.label_counts.band_off >= 8);
    assert_eq!(assessment.aggregate().label, AggregateLabel::Bad);
}

#[test]
fn band_coming_off_midway() {
    let mut sim = simulator(ContactPattern::Attached);
    let mut recording = sim.generate(15_000).unwrap();
    sim.set_pattern(ContactPattern::Detached { rail: 4095 });
    recording.extend(sim.generate(15_000).unwrap().samples);

    let config = AssessmentConfig::autosense_chest_band();
    let windows = window_by_duration(&recording.samples, config.window.window_duration_ms).unwrap();
    let mut classifier = WindowedQualityClassifier::new(config.quality.clone()).unwrap();
    let labels: Vec<QualityLabel> = windows
        .iter()
        .map(|w| classifier.classify_window(&w.values()).unwrap())
        .collect();

    assert_eq!(labels.len(), 10);
    assert!(labels[..5].iter().filter(|l| l.is_good()).count() >= 4);
    assert!(labels[5..].iter().all(|&l| l == QualityLabel::BandOff));

    // Exactly half GOOD at best, which cannot exceed 0.67
    let assessment = assess_recording(&recording, &config).unwrap();
    assert_eq!(assessment.aggregate().label, AggregateLabel::Bad);
}

#[test]
fn same_seed_same_assessment() {
    let config = AssessmentConfig::autosense_chest_band();
    let pattern = ContactPattern::from_name("motion").unwrap();
    let a = assess_recording(&simulator(pattern).generate(12_000).unwrap(), &config).unwrap();
    let b = assess_recording(&simulator(pattern).generate(12_000).unwrap(), &config).unwrap();
    assert_eq!(a.quality, b.quality);
}

#[tokio::test]
async fn live_stream_into_session() {
    let config = AssessmentConfig::autosense_chest_band();
    let stream_config = StreamConfig {
        sim: EcgSimConfig {
            seed: Some(5),
            ..Default::default()
        },
        window_duration_ms: config.window.window_duration_ms,
        update_rate_hz: 100.0,
        buffer_size: 16,
    };

    let (mut windows, control) = start_ecg_stream(stream_config).unwrap();
    let (session, task) = spawn_session(config.quality.clone(), config.quality_threshold).unwrap();
    let mut events = session.subscribe();

    control.send(StreamCommand::Start).await.unwrap();
    for _ in 0..5 {
        let window = windows.recv().await.unwrap();
        session.submit(window).await.unwrap();
    }
    control.send(StreamCommand::Shutdown).await.unwrap();
    session.finish().await.unwrap();

    let quality = task.await.unwrap().unwrap();
    assert_eq!(quality.windows.len(), 5);
    assert_eq!(quality.aggregate.label, AggregateLabel::Good);
    assert_eq!(quality.aggregate.timestamp.as_millis(), 0);

    let mut window_events = 0;
    while let Ok(event) = events.try_recv() {
        if let SessionEvent::Window(_) = event {
            window_events += 1;
        }
    }
    assert_eq!(window_events, 5);
}
