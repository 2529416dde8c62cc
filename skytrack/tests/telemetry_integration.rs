//! Integration tests for the telemetry pipeline.
//!
//! These tests drive a real receiver over loopback UDP:
//! - Datagram → Receiver → Snapshot
//! - Connection liveness and staleness
//! - Shutdown latency and port release
//! - Snapshot → FlightTracker statistics
//!
//! Run with: `cargo test --test telemetry_integration`

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;

use skytrack::flight::{FlightPhase, FlightTracker};
use skytrack::telemetry::{
    AttitudeSample, TelemetryReceiver, TelemetryReceiverConfig, TelemetrySnapshot,
};

// ============================================================================
// Test Helpers
// ============================================================================

const WAIT_LIMIT: Duration = Duration::from_secs(2);

fn test_config(receive_timeout: Duration) -> TelemetryReceiverConfig {
    TelemetryReceiverConfig {
        bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        receive_timeout,
        poll_timeout: Duration::from_millis(50),
        ..Default::default()
    }
}

async fn sender() -> UdpSocket {
    UdpSocket::bind("127.0.0.1:0").await.unwrap()
}

async fn send(socket: &UdpSocket, target: SocketAddr, line: &str) {
    socket.send_to(line.as_bytes(), target).await.unwrap();
}

/// Poll the receiver until `predicate` holds or the wait limit passes.
async fn wait_for<F>(receiver: &TelemetryReceiver, predicate: F) -> TelemetrySnapshot
where
    F: Fn(&TelemetrySnapshot) -> bool,
{
    let deadline = Instant::now() + WAIT_LIMIT;
    loop {
        let snapshot = receiver.snapshot();
        if predicate(&snapshot) {
            return snapshot;
        }
        assert!(
            Instant::now() < deadline,
            "condition not reached, last snapshot: {:?}",
            snapshot
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// ============================================================================
// Receiver tests
// ============================================================================

#[tokio::test]
async fn test_position_and_attitude_delivered() {
    let mut receiver = TelemetryReceiver::start(test_config(Duration::from_secs(5))).unwrap();
    let target = receiver.local_addr();
    let tx = sender().await;

    assert!(!receiver.snapshot().connected);

    send(&tx, target, "XGPSAerofly FS 4,-122.5,45.5,3048.0,270.5,154.3").await;
    send(&tx, target, "XATTAerofly FS 4,45.5,5.2,-3.1").await;

    let snapshot = wait_for(&receiver, |s| s.is_complete()).await;
    let pos = snapshot.position.unwrap();
    assert!(snapshot.connected);
    assert_eq!(snapshot.position_seq, 1);
    assert_eq!(pos.longitude, -122.5);
    assert_eq!(pos.latitude, 45.5);
    assert_eq!(pos.altitude, 3048.0);
    assert_eq!(pos.track, 270.5);
    assert_eq!(pos.ground_speed, 154.3);
    assert_eq!(snapshot.attitude, Some(AttitudeSample::new(45.5, 5.2, -3.1)));

    let stats = receiver.stats();
    assert_eq!(stats.positions_accepted, 1);
    assert_eq!(stats.attitudes_accepted, 1);
    assert_eq!(stats.datagrams_rejected, 0);

    receiver.stop().await;
}

#[tokio::test]
async fn test_connection_goes_stale() {
    let timeout = Duration::from_millis(200);
    let mut receiver = TelemetryReceiver::start(test_config(timeout)).unwrap();
    let target = receiver.local_addr();
    let tx = sender().await;

    send(&tx, target, "XATTAerofly FS 4,90.0,0.0,0.0").await;
    wait_for(&receiver, |s| s.connected).await;

    tokio::time::sleep(timeout * 2).await;
    let snapshot = receiver.snapshot();
    assert!(!snapshot.connected);
    // Stale data is still reported
    assert!(snapshot.attitude.is_some());

    // A fresh datagram reconnects
    send(&tx, target, "XATTAerofly FS 4,91.0,0.0,0.0").await;
    wait_for(&receiver, |s| s.connected).await;

    receiver.stop().await;
}

#[tokio::test]
async fn test_malformed_datagrams_keep_last_sample() {
    let mut receiver = TelemetryReceiver::start(test_config(Duration::from_secs(5))).unwrap();
    let target = receiver.local_addr();
    let tx = sender().await;

    send(&tx, target, "XGPSAerofly FS 4,-74.0,40.0,1000.0,0.0,60.0").await;
    let before = wait_for(&receiver, |s| s.position.is_some()).await;

    send(&tx, target, "XGPSAerofly FS 4,abc,40.0,1000.0,0.0,60.0").await;
    send(&tx, target, "XGPSX-Plane,-74.0,41.0,1000.0,0.0,60.0").await;
    send(&tx, target, "XATTAerofly FS 4,1,2").await;
    tx.send_to(&[0xff, 0xfe, 0x00], target).await.unwrap();

    let deadline = Instant::now() + WAIT_LIMIT;
    while receiver.stats().datagrams_rejected < 4 {
        assert!(Instant::now() < deadline, "rejections not counted");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let after = receiver.snapshot();
    assert_eq!(after.position, before.position);
    assert_eq!(after.position_seq, before.position_seq);
    assert!(after.attitude.is_none());

    receiver.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stop_is_prompt_and_releases_port() {
    // A long poll timeout must not delay shutdown
    let config = TelemetryReceiverConfig {
        poll_timeout: Duration::from_secs(5),
        ..test_config(Duration::from_secs(5))
    };
    let mut receiver = TelemetryReceiver::start(config.clone()).unwrap();
    let port = receiver.port();

    // One handled datagram proves the loop is running; it then parks in its
    // next 5 s read
    let tx = sender().await;
    send(&tx, receiver.local_addr(), "XATTAerofly FS 4,90.0,0.0,0.0").await;
    wait_for(&receiver, |s| s.attitude.is_some()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = Instant::now();
    receiver.stop().await;
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "stop took {:?}",
        started.elapsed()
    );
    assert!(!receiver.is_running());

    // The port is free again, even for a socket without address reuse
    let rebound = std::net::UdpSocket::bind((Ipv4Addr::LOCALHOST, port));
    assert!(rebound.is_ok(), "port {} still in use", port);
    drop(rebound);

    let mut again = TelemetryReceiver::start(TelemetryReceiverConfig { port, ..config }).unwrap();
    assert_eq!(again.port(), port);
    again.stop().await;
}

// ============================================================================
// Receiver → FlightTracker tests
// ============================================================================

#[tokio::test]
async fn test_snapshots_feed_flight_statistics() {
    let mut receiver = TelemetryReceiver::start(test_config(Duration::from_secs(5))).unwrap();
    let target = receiver.local_addr();
    let tx = sender().await;
    let mut tracker = FlightTracker::default();

    let route = [
        "XGPSAerofly FS 4,-74.0,40.0,1000.0,0.0,60.0",
        "XGPSAerofly FS 4,-74.0,40.01,1000.0,0.0,60.0",
    ];
    for (i, line) in route.iter().enumerate() {
        send(&tx, target, line).await;
        let snapshot = wait_for(&receiver, |s| s.position_seq == i as u64 + 1).await;

        assert!(tracker.ingest(&snapshot));
        // Polling again without a new fix changes nothing
        assert!(!tracker.ingest(&receiver.snapshot()));
    }

    let report = tracker.get_statistics();
    assert_eq!(tracker.phase(), FlightPhase::Active);
    assert!((report.distance - 0.6).abs() < 0.01);
    assert!((report.max_speed - 116.6).abs() < 0.1);
    assert!((report.max_altitude - 3280.84).abs() < 0.01);
    assert_eq!(report.start_position, Some((40.0, -74.0)));
    assert_eq!(report.point_count, 2);

    receiver.stop().await;
}
