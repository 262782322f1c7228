use core::f32::consts::PI;

use crate::sample::Acceleration;

/// Unit of the computed angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

/// Pitch and roll derived from the gravity vector.
///
/// Yaw is not observable from an accelerometer and is never computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationReading {
    pub pitch: f32,
    pub roll: f32,
}

/// Compute pitch and roll from acceleration.
///
/// A zero denominator is not an error: `atan2` yields ±90° there.
pub fn compute_orientation(accel: Acceleration, unit: AngleUnit) -> OrientationReading {
    let Acceleration { x, y, z } = accel;
    let pitch = libm::atan2f(x, libm::sqrtf(y * y + z * z));
    let roll = libm::atan2f(y, libm::sqrtf(x * x + z * z));

    match unit {
        AngleUnit::Radians => OrientationReading { pitch, roll },
        AngleUnit::Degrees => OrientationReading {
            pitch: to_degrees(pitch),
            roll: to_degrees(roll),
        },
    }
}

#[inline]
fn to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}
