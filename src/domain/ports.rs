use myrtio_tilt::OrientationBody;

/// Read-only access to the latest orientation body.
pub trait OrientationSource: Sync {
    /// Copy of the most recently published body
    fn orientation_body(&self) -> OrientationBody;
}
