//! Tilt Firmware
//!
//! Samples an analog accelerometer, derives pitch and roll and serves the
//! latest reading over HTTP:
//! - Calibrates the sensor once at boot (device resting in the reference pose)
//! - Joins the configured Wi-Fi network with a bounded number of retries
//! - Serves `GET /` and `GET /orientation` on port 80
//! - Samples every 50 ms forever

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use log::{error, info, warn};
use myrtio_tilt::ConnectionOutcome;

use myrtio_esp_tilt::{
    accel_pins,
    app::OrientationUsecases,
    controllers::{OrientationController, OrientationHttpController},
    infrastructure::{
        config,
        drivers::{AnalogAccelerometer, start_wifi_sta, wait_for_outcome},
        services::ORIENTATION,
        tasks::http_server_task,
    },
    mk_static,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger(config::log_level());
    info!("{} firmware {}", config::DEVICE.name, config::FIRMWARE.version);

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Allocate heap memory for the radio (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Calibrate before anything else touches the device
    let (x_pin, y_pin, z_pin) = accel_pins!(peripherals);
    let accelerometer = AnalogAccelerometer::new(peripherals.ADC1, x_pin, y_pin, z_pin);
    let mut orientation = OrientationUsecases::calibrate(
        accelerometer,
        config::SENSOR.reference_pose,
        config::SENSOR.counts_per_g,
        config::SENSOR.sample_period,
        &ORIENTATION,
    );

    // Join the network. The server starts whatever the outcome.
    let stack = start_wifi_sta(spawner, peripherals.WIFI);
    match wait_for_outcome().await {
        ConnectionOutcome::Connected => info!("wifi: connected to {}", config::WIFI.ssid),
        ConnectionOutcome::Failed => warn!(
            "wifi: failed to connect to {}, server will be unreachable",
            config::WIFI.ssid
        ),
        ConnectionOutcome::TimedOut => error!("wifi: no connection outcome, continuing"),
    }

    // Publish a first reading so the server never serves an empty body
    orientation.publish_once();

    let controller = mk_static!(
        OrientationController,
        OrientationHttpController::new(&ORIENTATION)
    );
    for worker in 0..config::HTTP_SERVER_WORKERS {
        spawner.spawn(http_server_task(worker, stack, controller)).ok();
    }

    orientation.run().await
}
