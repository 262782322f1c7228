use embassy_time::{Duration, Timer};
use myrtio_tilt::{AxisReader, OrientationReading, OrientationSnapshot, ReferencePose, Sampler};

/// Acquire, compute and publish orientation readings.
///
/// Owns the calibrated sampler; the snapshot is the only state shared with
/// the HTTP responder.
pub struct OrientationUsecases<R: AxisReader> {
    sampler: Sampler<R>,
    snapshot: &'static OrientationSnapshot,
    period: Duration,
}

impl<R: AxisReader> OrientationUsecases<R> {
    /// Run the calibration step and prepare the sampling loop.
    ///
    /// The device must rest in `pose` while this runs.
    pub fn calibrate(
        reader: R,
        pose: ReferencePose,
        counts_per_g: f32,
        period: Duration,
        snapshot: &'static OrientationSnapshot,
    ) -> Self {
        Self {
            sampler: Sampler::calibrate(reader, pose, counts_per_g),
            snapshot,
            period,
        }
    }

    /// Take one sample and publish it.
    pub fn publish_once(&mut self) -> OrientationReading {
        self.sampler.sample_and_publish(self.snapshot)
    }

    /// Sampling loop. Never returns.
    pub async fn run(mut self) -> ! {
        loop {
            self.publish_once();
            Timer::after(self.period).await;
        }
    }
}
