use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Stack, StackResources};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::with_timeout;
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::Config;
use heapless::String;
use log::info;
use myrtio_tilt::ConnectionOutcome;

use crate::infrastructure::config;
use crate::infrastructure::tasks::{network_runner_task, wifi_connection_task};
use crate::mk_static;

/// One socket per HTTP worker plus the DHCP client
const MAX_NETWORK_CONNECTIONS: usize = config::HTTP_SERVER_WORKERS + 1;

/// Maximum length of the hostname
const MAX_HOSTNAME_LEN: usize = 32;

/// Outcome reported by the connection task, consumed once at startup
pub(crate) static CONNECTION_OUTCOME: Signal<CriticalSectionRawMutex, ConnectionOutcome> =
    Signal::new();

/// Start the Wi-Fi STA (Station) mode
///
/// Brings up the radio and the IP stack and spawns the connection and
/// runner tasks. Does not wait for the connection; see [`wait_for_outcome`].
pub fn start_wifi_sta(spawner: Spawner, wifi_device: WIFI<'static>) -> Stack<'static> {
    let esp_radio_ctrl = &*mk_static!(
        esp_radio::Controller<'static>,
        esp_radio::init().expect("radio init failed")
    );
    let (controller, interfaces) = esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
        .expect("wifi controller init failed");

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = String::<MAX_HOSTNAME_LEN>::from_str(config::DEVICE.hostname).ok();
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = mk_static!(
        StackResources<MAX_NETWORK_CONNECTIONS>,
        StackResources::<MAX_NETWORK_CONNECTIONS>::new()
    );
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());

    spawner.spawn(wifi_connection_task(controller, stack)).ok();
    spawner.spawn(network_runner_task(runner)).ok();
    info!("wifi: station started, ssid={}", config::WIFI.ssid);

    stack
}

/// Block until the connection task reports an outcome or the timeout expires
pub async fn wait_for_outcome() -> ConnectionOutcome {
    with_timeout(config::WIFI.connect_timeout, CONNECTION_OUTCOME.wait())
        .await
        .unwrap_or(ConnectionOutcome::TimedOut)
}

fn get_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}
