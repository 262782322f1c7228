use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer, with_timeout};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};
use log::{error, info, warn};
use myrtio_tilt::{ConnectionAction, ConnectionEvent, ConnectionOutcome, ConnectionTracker};

use crate::infrastructure::config;
use crate::infrastructure::drivers::wifi_sta::CONNECTION_OUTCOME;

/// Background task for connecting to the `WiFi` network
///
/// Associates with the configured access point, retrying a bounded number of
/// times. Reports `Connected` once a DHCP lease is held and `Failed` once the
/// retry budget is spent, after which the task stops.
#[embassy_executor::task]
pub async fn wifi_connection_task(mut controller: WifiController<'static>, stack: Stack<'static>) {
    let client_config = if config::WIFI.password.is_empty() {
        ClientConfig::default()
            .with_ssid(config::WIFI.ssid.into())
            .with_auth_method(esp_radio::wifi::AuthMethod::None)
    } else {
        ClientConfig::default()
            .with_ssid(config::WIFI.ssid.into())
            .with_password(config::WIFI.password.into())
    };
    if let Err(e) = controller.set_config(&ModeConfig::Client(client_config)) {
        error!("wifi: invalid station config: {:?}", e);
        CONNECTION_OUTCOME.signal(ConnectionOutcome::Failed);
        return;
    }
    if let Err(e) = controller.start_async().await {
        error!("wifi: station start failed: {:?}", e);
        CONNECTION_OUTCOME.signal(ConnectionOutcome::Failed);
        return;
    }

    let mut tracker = ConnectionTracker::new(config::WIFI.max_retries);
    let mut action = tracker.handle(ConnectionEvent::StationStarted);
    loop {
        action = match action {
            ConnectionAction::Connect | ConnectionAction::Retry => {
                if action == ConnectionAction::Retry {
                    info!(
                        "wifi: retrying ({}/{})",
                        tracker.retries(),
                        tracker.max_retries()
                    );
                    Timer::after(config::WIFI.retry_delay).await;
                }
                let event = connect(&mut controller, stack).await;
                tracker.handle(event)
            }
            ConnectionAction::ReportConnected => {
                CONNECTION_OUTCOME.signal(ConnectionOutcome::Connected);
                controller.wait_for_event(WifiEvent::StaDisconnected).await;
                warn!("wifi: link lost");
                tracker.handle(ConnectionEvent::Disconnected)
            }
            // The tracker only answers `None` once it has failed
            ConnectionAction::ReportFailed | ConnectionAction::None => {
                error!(
                    "wifi: giving up on {} after {} retries",
                    config::WIFI.ssid,
                    tracker.retries()
                );
                CONNECTION_OUTCOME.signal(ConnectionOutcome::Failed);
                return;
            }
        };
    }
}

/// One association attempt followed by the wait for a DHCP lease.
async fn connect(controller: &mut WifiController<'static>, stack: Stack<'static>) -> ConnectionEvent {
    match with_timeout(config::WIFI.association_timeout, controller.connect_async()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!("wifi: connection failed: {:?}", e);
            return ConnectionEvent::Disconnected;
        }
        Err(_) => {
            warn!("wifi: association timed out");
            disconnect(controller);
            return ConnectionEvent::Disconnected;
        }
    }

    match with_timeout(config::WIFI.dhcp_timeout, wait_for_ip(stack)).await {
        Ok(ip) => {
            info!("wifi: connected, ip={}", ip.address);
            ConnectionEvent::IpAcquired
        }
        Err(_) => {
            warn!("wifi: no DHCP lease, dropping association");
            disconnect(controller);
            ConnectionEvent::Disconnected
        }
    }
}

/// Drop the association without waiting for the event, so an attempt stays bounded.
fn disconnect(controller: &mut WifiController<'static>) {
    if let Err(e) = controller.disconnect() {
        warn!("wifi: disconnect failed: {:?}", e);
    }
}

/// Wait for the network stack to obtain an IPv4 address via DHCP
async fn wait_for_ip(stack: Stack<'_>) -> embassy_net::StaticConfigV4 {
    loop {
        if let Some(config) = stack.config_v4() {
            return config;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
pub async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
