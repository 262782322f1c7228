//! `WiFi` station connection state machine
//!
//! The tracker is fed driver events and answers with the action the driver
//! should take. It keeps the bounded retry counter.

/// Default number of reconnect attempts before giving up.
pub const DEFAULT_MAX_RETRIES: u8 = 5;

/// Longest time the driver can take to spend a retry budget, in milliseconds.
///
/// Covers the first attempt and `max_retries` retries, each bounded by
/// `attempt_ms` and preceded by `retry_delay_ms`.
#[allow(clippy::cast_lossless)]
pub const fn retry_budget_ms(max_retries: u8, attempt_ms: u64, retry_delay_ms: u64) -> u64 {
    let retries = max_retries as u64;
    (retries + 1) * attempt_ms + retries * retry_delay_ms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

/// Events reported by the `WiFi` driver and the IP stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Station interface started.
    StationStarted,
    /// Association failed or an established link dropped.
    Disconnected,
    /// DHCP lease obtained.
    IpAcquired,
}

/// What the driver should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionAction {
    /// Start the first association attempt.
    Connect,
    /// Try to associate again.
    Retry,
    /// Signal the startup sequence that the station is up.
    ReportConnected,
    /// Signal the startup sequence that retries are exhausted.
    ReportFailed,
    /// Nothing to do.
    None,
}

/// Result of the startup connection handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    Connected,
    Failed,
    /// Neither outcome arrived before the deadline.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    state: ConnectionState,
    retries: u8,
    max_retries: u8,
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl ConnectionTracker {
    pub const fn new(max_retries: u8) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            retries: 0,
            max_retries,
        }
    }

    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    pub const fn retries(&self) -> u8 {
        self.retries
    }

    pub const fn max_retries(&self) -> u8 {
        self.max_retries
    }

    /// Advance the state machine.
    pub fn handle(&mut self, event: ConnectionEvent) -> ConnectionAction {
        match event {
            ConnectionEvent::StationStarted => {
                self.state = ConnectionState::Connecting;
                ConnectionAction::Connect
            }
            ConnectionEvent::Disconnected => {
                if self.state == ConnectionState::Failed {
                    return ConnectionAction::None;
                }
                if self.retries < self.max_retries {
                    self.retries += 1;
                    self.state = ConnectionState::Connecting;
                    ConnectionAction::Retry
                } else {
                    self.state = ConnectionState::Failed;
                    ConnectionAction::ReportFailed
                }
            }
            ConnectionEvent::IpAcquired => {
                self.retries = 0;
                self.state = ConnectionState::Connected;
                ConnectionAction::ReportConnected
            }
        }
    }
}
