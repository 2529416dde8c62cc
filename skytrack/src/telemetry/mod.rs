//! Telemetry Receiver - UDP listener for simulator position and attitude data.
//!
//! Listens for ForeFlight-style UDP broadcasts (`XGPS` / `XATT`) and keeps
//! the most recent sample of each kind. Consumers poll [`TelemetryReceiver::snapshot`]
//! on their own schedule; nothing is pushed.
//!
//! # Setup
//!
//! In Aerofly FS 4: Settings → Miscellaneous → "Broadcast flight info to IP
//! address" with port 49002.
//!
//! # Example
//!
//! ```ignore
//! let mut receiver = TelemetryReceiver::start(TelemetryReceiverConfig::default())?;
//!
//! let snapshot = receiver.snapshot();
//! if let Some(pos) = snapshot.position {
//!     println!("Position: {}, {}", pos.latitude, pos.longitude);
//! }
//!
//! receiver.stop().await;
//! ```

pub mod protocol;
mod state;

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

pub use protocol::{parse_datagram, parse_line, Datagram};
pub use state::{
    AttitudeSample, PositionSample, ReceiverStats, TelemetrySnapshot, TelemetryState,
};

/// Default UDP port for ForeFlight-style broadcasts.
pub const DEFAULT_PORT: u16 = 49002;

/// Default simulator name expected after the record tag.
pub const DEFAULT_CLIENT_NAME: &str = "Aerofly FS 4";

/// Default staleness threshold for the `connected` flag.
pub const DEFAULT_RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default socket read timeout.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(500);

/// Maximum datagram size we expect.
const MAX_PACKET_SIZE: usize = 1024;

/// Pause after a transport error before reading again.
const ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// How often to remind the log that nothing has arrived yet.
const WAITING_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Telemetry receiver configuration.
#[derive(Debug, Clone)]
pub struct TelemetryReceiverConfig {
    /// Address to bind (default: all interfaces).
    pub bind_address: IpAddr,

    /// UDP port to listen on (default: 49002). Port 0 picks an ephemeral port.
    pub port: u16,

    /// Simulator name that must follow the `XGPS`/`XATT` tag.
    pub client_name: String,

    /// Maximum age of the last datagram for the link to count as connected.
    pub receive_timeout: Duration,

    /// Timeout for a single socket read.
    pub poll_timeout: Duration,
}

impl Default for TelemetryReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            receive_timeout: DEFAULT_RECEIVE_TIMEOUT,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Error type for telemetry receiver.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to bind the UDP socket.
    #[error("Failed to bind UDP socket on port {port}: {source}")]
    SocketBind {
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// Lock-free datagram counters shared with the receive task.
#[derive(Default)]
struct Counters {
    datagrams_received: AtomicU64,
    positions_accepted: AtomicU64,
    attitudes_accepted: AtomicU64,
    datagrams_rejected: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> ReceiverStats {
        ReceiverStats {
            datagrams_received: self.datagrams_received.load(Ordering::Relaxed),
            positions_accepted: self.positions_accepted.load(Ordering::Relaxed),
            attitudes_accepted: self.attitudes_accepted.load(Ordering::Relaxed),
            datagrams_rejected: self.datagrams_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Telemetry receiver for simulator UDP broadcasts.
///
/// Owns a background task that reads datagrams and publishes the latest
/// samples into a `watch` cell. The socket lives inside the task, so once
/// [`stop`](Self::stop) returns the port has been released.
pub struct TelemetryReceiver {
    config: TelemetryReceiverConfig,
    local_addr: SocketAddr,
    state_rx: watch::Receiver<TelemetryState>,
    counters: Arc<Counters>,
    cancellation: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TelemetryReceiver {
    /// Bind the socket and start the receive loop.
    ///
    /// Must be called from within a tokio runtime. Binding is the only
    /// failure that surfaces to the caller; everything that goes wrong
    /// afterwards is logged and absorbed by the loop.
    pub fn start(config: TelemetryReceiverConfig) -> Result<Self, TelemetryError> {
        let socket = bind_socket(config.bind_address, config.port)
            .and_then(UdpSocket::from_std)
            .map_err(|source| TelemetryError::SocketBind {
                port: config.port,
                source,
            })?;

        let local_addr = socket
            .local_addr()
            .map_err(|source| TelemetryError::SocketBind {
                port: config.port,
                source,
            })?;

        info!(
            port = local_addr.port(),
            local_addr = %local_addr,
            client = %config.client_name,
            "Telemetry receiver started"
        );

        let (state_tx, state_rx) = watch::channel(TelemetryState::default());
        let counters = Arc::new(Counters::default());
        let cancellation = CancellationToken::new();

        let receive_loop = ReceiveLoop {
            socket,
            client_name: config.client_name.clone(),
            poll_timeout: config.poll_timeout,
            state_tx,
            counters: Arc::clone(&counters),
            cancellation: cancellation.clone(),
        };
        let handle = tokio::spawn(receive_loop.run());

        Ok(Self {
            config,
            local_addr,
            state_rx,
            counters,
            cancellation,
            handle: Some(handle),
        })
    }

    /// Start with default configuration.
    pub fn with_defaults() -> Result<Self, TelemetryError> {
        Self::start(TelemetryReceiverConfig::default())
    }

    /// Point-in-time view of the latest samples and link liveness.
    ///
    /// Never waits on the network and never changes receiver state.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.state_rx
            .borrow()
            .snapshot_at(Instant::now(), self.config.receive_timeout)
    }

    /// Datagram counters since start.
    pub fn stats(&self) -> ReceiverStats {
        self.counters.snapshot()
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Port the socket is bound to.
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// The configuration this receiver was started with.
    pub fn config(&self) -> &TelemetryReceiverConfig {
        &self.config
    }

    /// Whether the receive loop is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the receive loop and wait for it to finish.
    ///
    /// The socket is closed by the time this returns. Further calls are
    /// no-ops.
    pub async fn stop(&mut self) {
        self.cancellation.cancel();

        let Some(handle) = self.handle.take() else {
            return;
        };

        if let Err(e) = handle.await {
            warn!(error = %e, "Telemetry receive task ended abnormally");
        }

        let stats = self.counters.snapshot();
        info!(
            port = self.local_addr.port(),
            datagrams = stats.datagrams_received,
            positions = stats.positions_accepted,
            attitudes = stats.attitudes_accepted,
            rejected = stats.datagrams_rejected,
            "Telemetry receiver stopped"
        );
    }
}

impl Drop for TelemetryReceiver {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

/// Create a non-blocking UDP socket with address reuse and broadcast enabled.
fn bind_socket(address: IpAddr, port: u16) -> io::Result<std::net::UdpSocket> {
    let addr = SocketAddr::new(address, port);
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_broadcast(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    Ok(socket.into())
}

/// State moved into the background receive task.
struct ReceiveLoop {
    socket: UdpSocket,
    client_name: String,
    poll_timeout: Duration,
    state_tx: watch::Sender<TelemetryState>,
    counters: Arc<Counters>,
    cancellation: CancellationToken,
}

impl ReceiveLoop {
    async fn run(self) {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let started = Instant::now();
        let mut last_waiting_log = started;

        loop {
            let recv_result = tokio::select! {
                _ = self.cancellation.cancelled() => break,
                result = tokio::time::timeout(
                    self.poll_timeout,
                    self.socket.recv_from(&mut buffer),
                ) => result,
            };

            match recv_result {
                Ok(Ok((len, peer))) => self.handle_datagram(&buffer[..len], peer),
                Ok(Err(e)) => {
                    warn!(error = %e, "UDP receive error");
                    tokio::select! {
                        _ = self.cancellation.cancelled() => break,
                        _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                    }
                }
                Err(_) => {
                    trace!("No telemetry data received (timeout)");
                    if self.counters.datagrams_received.load(Ordering::Relaxed) == 0
                        && last_waiting_log.elapsed() >= WAITING_LOG_INTERVAL
                    {
                        info!(
                            elapsed_secs = started.elapsed().as_secs(),
                            "Waiting for telemetry data..."
                        );
                        last_waiting_log = Instant::now();
                    }
                }
            }
        }

        debug!("Telemetry receive loop exited");
    }

    fn handle_datagram(&self, data: &[u8], peer: SocketAddr) {
        let received = self.counters.datagrams_received.fetch_add(1, Ordering::Relaxed) + 1;
        if received == 1 {
            log_first_datagram(data, peer);
        }

        let now = Instant::now();
        match parse_datagram(data, &self.client_name) {
            Some(Datagram::Position(position)) => {
                let next = self.state_tx.borrow().with_position(position, now);
                self.state_tx.send_replace(next);
                self.counters
                    .positions_accepted
                    .fetch_add(1, Ordering::Relaxed);
            }
            Some(Datagram::Attitude(attitude)) => {
                let next = self.state_tx.borrow().with_attitude(attitude, now);
                self.state_tx.send_replace(next);
                self.counters
                    .attitudes_accepted
                    .fetch_add(1, Ordering::Relaxed);
            }
            None => {
                let rejected = self
                    .counters
                    .datagrams_rejected
                    .fetch_add(1, Ordering::Relaxed)
                    + 1;
                if rejected <= 5 {
                    let preview = String::from_utf8_lossy(&data[..data.len().min(50)]);
                    debug!(%peer, preview = %preview, "Ignoring unrecognized datagram");
                }
            }
        }
    }
}

fn log_first_datagram(data: &[u8], peer: SocketAddr) {
    let header = if data.len() >= 4 {
        String::from_utf8_lossy(&data[..4]).to_string()
    } else {
        format!("{:?}", data)
    };
    info!(
        %peer,
        header = %header,
        len = data.len(),
        "Received first telemetry datagram"
    );
}
