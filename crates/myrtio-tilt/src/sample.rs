/// Nominal sensitivity of the analog accelerometer at ±1.5 g (800 mV/g).
pub const DEFAULT_COUNTS_PER_G: f32 = 800.0;

/// Zero-g baseline used until the sensor is calibrated (1.65 V on each axis).
pub const DEFAULT_ZERO_G_COUNTS: i32 = 1650;

/// Raw ADC counts for the X, Y and Z channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AxisSample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Acceleration in g on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Orientation the device rests in while it is calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePose {
    /// Flat, face up. Z senses +1 g.
    Level,
    /// Flat, face down. Z senses -1 g.
    UpsideDown,
}

impl ReferencePose {
    /// Gravity seen on the Z axis in this pose, in g.
    const fn z_gravity(self) -> i32 {
        match self {
            ReferencePose::Level => 1,
            ReferencePose::UpsideDown => -1,
        }
    }
}

/// Per-axis zero-g baseline in raw counts.
///
/// Fields are private: once built the offset can only be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationOffset {
    x: i32,
    y: i32,
    z: i32,
}

impl Default for CalibrationOffset {
    fn default() -> Self {
        Self::new(
            DEFAULT_ZERO_G_COUNTS,
            DEFAULT_ZERO_G_COUNTS,
            DEFAULT_ZERO_G_COUNTS,
        )
    }
}

impl CalibrationOffset {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Build the baseline from a sample taken while resting in `pose`.
    ///
    /// X and Y see no gravity in either pose, so their raw value is the
    /// baseline. Z is shifted by one g worth of counts.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_reference(sample: AxisSample, pose: ReferencePose, counts_per_g: f32) -> Self {
        let one_g = libm::roundf(counts_per_g) as i32;
        Self {
            x: sample.x,
            y: sample.y,
            z: sample.z - pose.z_gravity() * one_g,
        }
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Subtract the baseline and scale to g.
    #[allow(clippy::cast_precision_loss)]
    pub fn normalize(&self, sample: AxisSample, counts_per_g: f32) -> Acceleration {
        Acceleration {
            x: (sample.x - self.x) as f32 / counts_per_g,
            y: (sample.y - self.y) as f32 / counts_per_g,
            z: (sample.z - self.z) as f32 / counts_per_g,
        }
    }
}
