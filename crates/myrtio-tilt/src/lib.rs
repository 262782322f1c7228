#![no_std]

//! Tilt sensing core
//!
//! Hardware independent part of the tilt firmware:
//! - `sample` - raw ADC samples, calibration offsets and scaling to g
//! - `orientation` - pitch/roll from a gravity vector
//! - `body` - serialized JSON body for the HTTP responder
//! - `snapshot` - last-value cell shared between the sampler and readers
//! - `sampler` - calibration step and per-cycle sampling
//! - `connection` - `WiFi` station connection state machine
//! - `http` - response header writer, request line parser and routing

pub mod body;
pub mod connection;
pub mod http;
pub mod orientation;
pub mod sample;
pub mod sampler;
pub mod snapshot;

pub use body::{BODY_CAPACITY, OrientationBody, OrientationPayload, format_body};
pub use connection::{
    ConnectionAction, ConnectionEvent, ConnectionOutcome, ConnectionState, ConnectionTracker,
};
pub use orientation::{AngleUnit, OrientationReading, compute_orientation};
pub use sample::{Acceleration, AxisSample, CalibrationOffset, ReferencePose};
pub use sampler::{AxisReader, Sampler};
pub use snapshot::OrientationSnapshot;
