//! Integration tests for calibration, sampling and the shared snapshot.

use myrtio_tilt::{
    AngleUnit, AxisReader, AxisSample, CalibrationOffset, OrientationSnapshot, ReferencePose,
    Sampler, format_body, sample::DEFAULT_COUNTS_PER_G,
};

/// Replays a fixed list of samples, repeating the last one.
struct ScriptedReader {
    samples: &'static [AxisSample],
    next: usize,
}

impl ScriptedReader {
    fn new(samples: &'static [AxisSample]) -> Self {
        Self { samples, next: 0 }
    }
}

impl AxisReader for ScriptedReader {
    fn read_axes(&mut self) -> AxisSample {
        let index = self.next.min(self.samples.len() - 1);
        self.next += 1;
        self.samples[index]
    }
}

// -----------------------------------------------------------------------------
// Calibration
// -----------------------------------------------------------------------------

#[test]
fn default_offset_is_mid_supply() {
    assert_eq!(
        CalibrationOffset::default(),
        CalibrationOffset::new(1650, 1650, 1650)
    );
}

#[test]
fn upside_down_pose_adds_one_g_to_z() {
    let reference = AxisSample::new(1700, 1600, 850);
    let offset =
        CalibrationOffset::from_reference(reference, ReferencePose::UpsideDown, DEFAULT_COUNTS_PER_G);

    assert_eq!(offset, CalibrationOffset::new(1700, 1600, 1650));
}

#[test]
fn level_pose_subtracts_one_g_from_z() {
    let reference = AxisSample::new(1650, 1650, 2450);
    let offset =
        CalibrationOffset::from_reference(reference, ReferencePose::Level, DEFAULT_COUNTS_PER_G);

    assert_eq!(offset, CalibrationOffset::new(1650, 1650, 1650));
}

#[test]
fn calibration_uses_the_first_sample_only() {
    static SAMPLES: [AxisSample; 2] = [AxisSample::new(1650, 1650, 850), AxisSample::new(0, 0, 0)];
    let sampler = Sampler::calibrate(
        ScriptedReader::new(&SAMPLES),
        ReferencePose::UpsideDown,
        DEFAULT_COUNTS_PER_G,
    );

    assert_eq!(sampler.offset(), CalibrationOffset::new(1650, 1650, 1650));
    assert_eq!(sampler.unit(), AngleUnit::Degrees);
}

#[test]
fn offset_is_unchanged_by_sampling() {
    static SAMPLES: [AxisSample; 4] = [
        AxisSample::new(1640, 1660, 860),
        AxisSample::new(2450, 1650, 1650),
        AxisSample::new(100, 4000, 2000),
        AxisSample::new(0, 0, 0),
    ];
    let mut sampler = Sampler::calibrate(
        ScriptedReader::new(&SAMPLES),
        ReferencePose::UpsideDown,
        DEFAULT_COUNTS_PER_G,
    );
    let offset = sampler.offset();

    for _ in 0..10 {
        sampler.sample();
        assert_eq!(sampler.offset(), offset);
    }
}

// -----------------------------------------------------------------------------
// Sampling
// -----------------------------------------------------------------------------

#[test]
fn sample_uses_calibrated_baseline() {
    static SAMPLES: [AxisSample; 2] = [
        AxisSample::new(1650, 1650, 850),
        AxisSample::new(2450, 1650, 1650),
    ];
    let mut sampler = Sampler::calibrate(
        ScriptedReader::new(&SAMPLES),
        ReferencePose::UpsideDown,
        DEFAULT_COUNTS_PER_G,
    );

    let reading = sampler.sample();
    assert!((reading.pitch - 90.0).abs() < 1e-4);
    assert!(reading.roll.abs() < 1e-4);
}

#[test]
fn radian_sampler_reports_radians() {
    static SAMPLES: [AxisSample; 1] = [AxisSample::new(2450, 1650, 1650)];
    let mut sampler = Sampler::new(
        ScriptedReader::new(&SAMPLES),
        CalibrationOffset::default(),
        DEFAULT_COUNTS_PER_G,
        AngleUnit::Radians,
    );

    let reading = sampler.sample();
    assert!((reading.pitch - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// Snapshot
// -----------------------------------------------------------------------------

#[test]
fn snapshot_is_empty_before_first_publish() {
    let snapshot = OrientationSnapshot::new();
    assert!(snapshot.read().is_empty());
}

#[test]
fn snapshot_keeps_the_last_value() {
    static SAMPLES: [AxisSample; 2] = [
        AxisSample::new(1650, 1650, 2450),
        AxisSample::new(2450, 1650, 1650),
    ];
    let snapshot = OrientationSnapshot::new();
    let mut sampler = Sampler::new(
        ScriptedReader::new(&SAMPLES),
        CalibrationOffset::default(),
        DEFAULT_COUNTS_PER_G,
        AngleUnit::Degrees,
    );

    sampler.sample_and_publish(&snapshot);
    assert_eq!(snapshot.read().as_str(), r#"{"pitch":0.0,"roll":0.0}"#);

    sampler.sample_and_publish(&snapshot);
    assert_eq!(snapshot.read().as_str(), r#"{"pitch":90.0,"roll":0.0}"#);
}

#[test]
fn published_body_is_the_serialized_reading() {
    static SAMPLES: [AxisSample; 1] = [AxisSample::new(1900, 1400, 2300)];
    let snapshot = OrientationSnapshot::new();
    let mut sampler = Sampler::new(
        ScriptedReader::new(&SAMPLES),
        CalibrationOffset::default(),
        DEFAULT_COUNTS_PER_G,
        AngleUnit::Degrees,
    );

    let reading = sampler.sample_and_publish(&snapshot);

    assert_eq!(snapshot.read(), format_body(&reading).unwrap());
    assert!(snapshot.read().starts_with(r#"{"pitch":"#));
}
