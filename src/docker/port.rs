use std::io;
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Settings;
use crate::{Error, Result};

/// How a port poll paces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPoll {
    /// Bound on each individual connect attempt.
    pub connect_timeout: Duration,
    /// Pause between attempts.
    pub interval: Duration,
}

impl Default for PortPoll {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(500),
            interval: Duration::from_millis(200),
        }
    }
}

impl From<&Settings> for PortPoll {
    fn from(settings: &Settings) -> Self {
        Self {
            connect_timeout: Duration::from_millis(settings.connect_timeout_ms),
            interval: Duration::from_millis(settings.poll_interval_ms),
        }
    }
}

/// Try one TCP connect to `ip:port`.
///
/// `Ok(false)` means the connection was refused. Every other socket error is
/// returned unchanged.
pub fn is_port_live(ip: IpAddr, port: u16, timeout: Duration) -> io::Result<bool> {
    let addr = SocketAddr::new(ip, port);
    // connect_timeout rejects a zero duration.
    let timeout = timeout.max(Duration::from_millis(1));
    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => Ok(false),
        Err(e) => Err(e),
    }
}

/// Poll until `ip:port` accepts a connection or `timeout` elapses.
pub fn wait_for_port(ip: IpAddr, port: u16, timeout: Duration, poll: PortPoll) -> Result<()> {
    let start = Instant::now();
    loop {
        if is_port_live(ip, port, poll.connect_timeout)? {
            debug!(%ip, port, elapsed = ?start.elapsed(), "port is live");
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(Error::Timeout {
                addr: SocketAddr::new(ip, port),
                timeout,
            });
        }
        std::thread::sleep(poll.interval.min(timeout - elapsed));
    }
}
