use heapless::String;
use serde::Serialize;

use crate::orientation::OrientationReading;

/// Capacity of the orientation response body.
pub const BODY_CAPACITY: usize = 128;

/// Fixed-capacity JSON body served by the HTTP responder.
pub type OrientationBody = String<BODY_CAPACITY>;

/// Wire shape of the orientation response, angles rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrientationPayload {
    pub pitch: f32,
    pub roll: f32,
}

impl From<&OrientationReading> for OrientationPayload {
    fn from(reading: &OrientationReading) -> Self {
        Self {
            pitch: round_tenth(reading.pitch),
            roll: round_tenth(reading.roll),
        }
    }
}

fn round_tenth(value: f32) -> f32 {
    libm::roundf(value * 10.0) / 10.0
}

/// Serialize a reading as `{"pitch":P,"roll":R}` with one decimal place each.
pub fn format_body(
    reading: &OrientationReading,
) -> Result<OrientationBody, serde_json_core::ser::Error> {
    serde_json_core::to_string::<_, BODY_CAPACITY>(&OrientationPayload::from(reading))
}
