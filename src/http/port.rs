use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;
use url::{Host, Url};

/// Attempts a TCP connect to `host:port`. Any error, including name
/// resolution failure, and any timeout map to `false`.
pub async fn check_port_open(host: &str, port: u16, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(err)) => {
            debug!("Port check {}:{} failed: {}", host, port, err);
            false
        }
        Err(_elapsed) => {
            debug!("Port check {}:{} timed out after {:?}", host, port, timeout);
            false
        }
    }
}

/// Extracts a connectable host (no IPv6 brackets) and port from a URL.
#[must_use]
pub fn host_and_port(url: &Url) -> Option<(String, u16)> {
    let host = match url.host()? {
        Host::Domain(domain) => domain.to_owned(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };
    let port = url.port_or_known_default()?;
    Some((host, port))
}
