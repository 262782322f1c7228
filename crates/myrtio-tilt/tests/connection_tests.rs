//! Integration tests for the `WiFi` connection state machine.

use myrtio_tilt::{
    ConnectionAction, ConnectionEvent, ConnectionState, ConnectionTracker,
    connection::retry_budget_ms,
};

fn started(max_retries: u8) -> ConnectionTracker {
    let mut tracker = ConnectionTracker::new(max_retries);
    assert_eq!(
        tracker.handle(ConnectionEvent::StationStarted),
        ConnectionAction::Connect
    );
    tracker
}

#[test]
fn starts_disconnected() {
    let tracker = ConnectionTracker::default();

    assert_eq!(tracker.state(), ConnectionState::Disconnected);
    assert_eq!(tracker.retries(), 0);
    assert_eq!(tracker.max_retries(), 5);
}

#[test]
fn station_start_moves_to_connecting() {
    let tracker = started(5);
    assert_eq!(tracker.state(), ConnectionState::Connecting);
}

#[test]
fn ip_acquisition_connects() {
    let mut tracker = started(5);

    assert_eq!(
        tracker.handle(ConnectionEvent::IpAcquired),
        ConnectionAction::ReportConnected
    );
    assert_eq!(tracker.state(), ConnectionState::Connected);
}

#[test]
fn each_failed_attempt_counts_once() {
    let mut tracker = started(5);

    for expected in 1..=5 {
        assert_eq!(
            tracker.handle(ConnectionEvent::Disconnected),
            ConnectionAction::Retry
        );
        assert_eq!(tracker.retries(), expected);
        assert_eq!(tracker.state(), ConnectionState::Connecting);
    }
}

#[test]
fn failure_is_reported_exactly_once() {
    let mut tracker = started(5);
    for _ in 0..5 {
        tracker.handle(ConnectionEvent::Disconnected);
    }

    assert_eq!(
        tracker.handle(ConnectionEvent::Disconnected),
        ConnectionAction::ReportFailed
    );
    assert_eq!(tracker.state(), ConnectionState::Failed);
    assert_eq!(tracker.retries(), 5);

    for _ in 0..3 {
        assert_eq!(
            tracker.handle(ConnectionEvent::Disconnected),
            ConnectionAction::None
        );
    }
    assert_eq!(tracker.retries(), 5);
}

#[test]
fn connecting_resets_retry_counter() {
    let mut tracker = started(5);
    for _ in 0..3 {
        tracker.handle(ConnectionEvent::Disconnected);
    }
    assert_eq!(tracker.retries(), 3);

    tracker.handle(ConnectionEvent::IpAcquired);
    assert_eq!(tracker.retries(), 0);

    // A later drop gets the full retry budget again.
    for _ in 0..5 {
        assert_eq!(
            tracker.handle(ConnectionEvent::Disconnected),
            ConnectionAction::Retry
        );
    }
    assert_eq!(
        tracker.handle(ConnectionEvent::Disconnected),
        ConnectionAction::ReportFailed
    );
}

#[test]
fn zero_retry_budget_fails_on_first_drop() {
    let mut tracker = started(0);

    assert_eq!(
        tracker.handle(ConnectionEvent::Disconnected),
        ConnectionAction::ReportFailed
    );
}

// -----------------------------------------------------------------------------
// Retry budget
// -----------------------------------------------------------------------------

#[test]
fn retry_budget_covers_every_attempt_and_delay() {
    // Six attempts of 15 s and five 1 s pauses between them
    assert_eq!(retry_budget_ms(5, 15_000, 1_000), 95_000);
}

#[test]
fn retry_budget_without_retries_is_one_attempt() {
    assert_eq!(retry_budget_ms(0, 15_000, 1_000), 15_000);
}
