mod http;

pub use http::{OrientationController, OrientationHttpController};
