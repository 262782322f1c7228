mod accelerometer;
pub mod wifi_sta;

pub use accelerometer::AnalogAccelerometer;
pub use wifi_sta::{start_wifi_sta, wait_for_outcome};
