use myrtio_tilt::{OrientationBody, OrientationSnapshot};

use crate::domain::ports::OrientationSource;

/// Latest orientation body, written by the sampling loop only
pub static ORIENTATION: OrientationSnapshot = OrientationSnapshot::new();

impl OrientationSource for OrientationSnapshot {
    fn orientation_body(&self) -> OrientationBody {
        self.read()
    }
}
