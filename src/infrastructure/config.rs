use core::str::FromStr;

use embassy_time::Duration;
use log::LevelFilter;
use myrtio_tilt::{
    ReferencePose,
    connection::{DEFAULT_MAX_RETRIES, retry_budget_ms},
    sample::DEFAULT_COUNTS_PER_G,
};

pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
    /// Reconnect attempts before the connection is reported as failed
    pub max_retries: u8,
    pub retry_delay: Duration,
    /// How long one association attempt may take
    pub association_timeout: Duration,
    /// How long to wait for a DHCP lease after association
    pub dhcp_timeout: Duration,
    /// How long startup waits for a connection outcome.
    ///
    /// Longer than the whole retry budget, so `Failed` arrives before it.
    pub connect_timeout: Duration,
}

pub struct DeviceConfig {
    pub name: &'static str,
    pub hostname: &'static str,
}

pub struct SensorConfig {
    /// Raw ADC counts per g
    pub counts_per_g: f32,
    /// Pose the device rests in during calibration
    pub reference_pose: ReferencePose,
    pub sample_period: Duration,
}

pub struct HttpConfig {
    pub port: u16,
    pub socket_timeout: Duration,
}

pub struct FirmwareConfig {
    pub version: &'static str,
}

const RETRY_DELAY_MS: u64 = 1_000;
const ASSOCIATION_TIMEOUT_MS: u64 = 5_000;
const DHCP_TIMEOUT_MS: u64 = 10_000;
const OUTCOME_MARGIN_MS: u64 = 5_000;

pub const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
    max_retries: DEFAULT_MAX_RETRIES,
    retry_delay: Duration::from_millis(RETRY_DELAY_MS),
    association_timeout: Duration::from_millis(ASSOCIATION_TIMEOUT_MS),
    dhcp_timeout: Duration::from_millis(DHCP_TIMEOUT_MS),
    connect_timeout: Duration::from_millis(
        retry_budget_ms(
            DEFAULT_MAX_RETRIES,
            ASSOCIATION_TIMEOUT_MS + DHCP_TIMEOUT_MS,
            RETRY_DELAY_MS,
        ) + OUTCOME_MARGIN_MS,
    ),
};

pub const DEVICE: DeviceConfig = DeviceConfig {
    name: "MyrtIO Tilt",
    hostname: "myrtio-tilt",
};

pub const SENSOR: SensorConfig = SensorConfig {
    counts_per_g: DEFAULT_COUNTS_PER_G,
    reference_pose: ReferencePose::UpsideDown,
    sample_period: Duration::from_millis(50),
};

/// Number of HTTP server tasks, each owning one listening socket
pub const HTTP_SERVER_WORKERS: usize = 3;

pub const HTTP: HttpConfig = HttpConfig {
    port: 80,
    socket_timeout: Duration::from_secs(10),
};

pub const FIRMWARE: FirmwareConfig = FirmwareConfig {
    version: env!("BUILD_VERSION"),
};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Log level from `TILT_LOG` at build time, `info` when unset or invalid.
pub fn log_level() -> LevelFilter {
    option_env!("TILT_LOG")
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Accelerometer ADC1 inputs as `(x, y, z)`.
///
/// X on GPIO39 (channel 3), Y on GPIO35 (channel 7), Z on GPIO34 (channel 6).
#[macro_export]
macro_rules! accel_pins {
    ($p:expr) => {
        ($p.GPIO39, $p.GPIO35, $p.GPIO34)
    };
}
