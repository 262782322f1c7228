use log::{debug, info, warn};

use crate::{
    body::format_body,
    orientation::{AngleUnit, OrientationReading, compute_orientation},
    sample::{AxisSample, CalibrationOffset, ReferencePose},
    snapshot::OrientationSnapshot,
};

/// Source of raw tri-axis samples.
///
/// Reads have no error path: a failed conversion is reported as whatever the
/// converter returned.
pub trait AxisReader {
    fn read_axes(&mut self) -> AxisSample;
}

/// Calibrated sampler.
///
/// Owns the sensor and the calibration offset. The offset is fixed when the
/// sampler is built and is never changed afterwards.
pub struct Sampler<R: AxisReader> {
    reader: R,
    offset: CalibrationOffset,
    counts_per_g: f32,
    unit: AngleUnit,
}

impl<R: AxisReader> Sampler<R> {
    /// Build a sampler with a known offset.
    pub fn new(reader: R, offset: CalibrationOffset, counts_per_g: f32, unit: AngleUnit) -> Self {
        Self {
            reader,
            offset,
            counts_per_g,
            unit,
        }
    }

    /// Calibration step.
    ///
    /// Takes one sample with the device resting in `pose` and uses it as the
    /// zero-g baseline for the rest of the process lifetime. No averaging.
    pub fn calibrate(mut reader: R, pose: ReferencePose, counts_per_g: f32) -> Self {
        let reference = reader.read_axes();
        let offset = CalibrationOffset::from_reference(reference, pose, counts_per_g);
        info!(
            "sensor: offsets ({}, {}, {}) from {:?} pose",
            offset.x(),
            offset.y(),
            offset.z(),
            pose
        );

        Self::new(reader, offset, counts_per_g, AngleUnit::Degrees)
    }

    pub fn offset(&self) -> CalibrationOffset {
        self.offset
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Read one sample and compute the orientation.
    pub fn sample(&mut self) -> OrientationReading {
        let raw = self.reader.read_axes();
        let accel = self.offset.normalize(raw, self.counts_per_g);
        let reading = compute_orientation(accel, self.unit);
        debug!(
            "sensor: g=({:.2}, {:.2}, {:.2}) pitch={:.1} roll={:.1}",
            accel.x, accel.y, accel.z, reading.pitch, reading.roll
        );

        reading
    }

    /// Sample once and publish the formatted body.
    ///
    /// If formatting fails the previous body stays in place.
    pub fn sample_and_publish(&mut self, snapshot: &OrientationSnapshot) -> OrientationReading {
        let reading = self.sample();
        match format_body(&reading) {
            Ok(body) => snapshot.publish(&body),
            Err(_) => warn!(
                "sensor: reading does not fit the body buffer: {:?}",
                reading
            ),
        }

        reading
    }
}
