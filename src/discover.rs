use super::config::DiscoveryConfig;
use super::constants::{SSDP_IP, SSDP_PORT, SSDP_SERVICE};
use super::device::DeviceEndpoint;
use super::error::Result;

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::{net::UdpSocket, time::timeout};

use std::collections::HashSet;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};

// Patterns run on the lowercased datagram
static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http://((?:\d{1,3}\.){3}\d{1,3}):(\d{1,5})/").expect("location pattern compiles")
});
static DEVICE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"roku:ecp:([a-z0-9]{12})").expect("device id pattern compiles"));

const RECV_BUFFER: usize = 0x1000;

/// The two socket calls a discovery round needs
///
/// Implemented for [`tokio::net::UdpSocket`]. Implement it yourself to drive
/// [`search()`] from something other than a real socket.
#[async_trait]
pub trait DatagramSocket: Send + Sync {
    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;
    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

#[async_trait]
impl DatagramSocket for UdpSocket {
    async fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target).await
    }

    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, _) = self.recv_from(buf).await?;
        Ok(len)
    }
}

pub(super) fn search_request() -> String {
    [
        "M-SEARCH * HTTP/1.1",
        &format!("HOST: {}", SSDP_IP),
        &format!("ST: {}", SSDP_SERVICE),
        "MAN: \"ssdp:discover\"",
        "",
        "",
    ]
    .join("\r\n")
}

/// Run one discovery round on `socket`: send the search once to `target`, then collect
/// answers until a receive fails or times out.
///
/// Only a failed send is reported as an error. Datagrams that do not describe an ECP
/// device are ignored.
pub async fn search<S: DatagramSocket + ?Sized>(
    socket: &S,
    target: SocketAddr,
    config: &DiscoveryConfig,
) -> Result<Vec<DeviceEndpoint>> {
    timeout(
        config.send_timeout(),
        socket.send_to(search_request().as_bytes(), target),
    )
    .await??;
    debug!("Sent M-SEARCH to {}", target);

    let mut devices: Vec<DeviceEndpoint> = Vec::new();
    let mut rbuf = [0; RECV_BUFFER];
    loop {
        match timeout(config.receive_timeout(), socket.recv(&mut rbuf)).await {
            Ok(Ok(len)) => match parse_response(&rbuf[..len]) {
                Some(device) => {
                    debug!("Found {}", device);
                    devices.push(device);
                }
                None => debug!("Ignoring {} byte datagram", len),
            },
            Ok(Err(e)) => {
                debug!("Receive failed, ending discovery: {}", e);
                break;
            }
            Err(_) => break,
        }
    }

    if config.dedup_by_address() {
        let mut seen = HashSet::new();
        devices.retain(|d| seen.insert(d.ip()));
    }
    Ok(devices)
}

/// Discovery round sent to a specific address instead of the broadcast address, e.g. a
/// subnet broadcast or a single known device.
pub async fn discover_at(target: SocketAddr, config: &DiscoveryConfig) -> Result<Vec<DeviceEndpoint>> {
    let socket = bind(config).await?;
    search(&socket, target, config).await
}

/// Discovery round broadcast to `255.255.255.255:1900`
pub async fn discover_with(config: &DiscoveryConfig) -> Result<Vec<DeviceEndpoint>> {
    discover_at(SocketAddr::from((Ipv4Addr::BROADCAST, SSDP_PORT)), config).await
}

async fn bind(config: &DiscoveryConfig) -> Result<UdpSocket> {
    let local = SocketAddr::from((
        config.source_address().unwrap_or(Ipv4Addr::UNSPECIFIED),
        0,
    ));
    let socket = UdpSocket::bind(local).await?;
    socket.set_broadcast(true)?;
    Ok(socket)
}

/// Pull address, port and device id out of a search response.
///
/// Matching is case insensitive and the id is returned uppercased. Returns `None` unless
/// the datagram mentions `roku:ecp` and all three fields are present and valid.
pub fn parse_response(datagram: &[u8]) -> Option<DeviceEndpoint> {
    let text = String::from_utf8_lossy(datagram).to_lowercase();
    if !text.contains(SSDP_SERVICE) {
        return None;
    }

    let location = LOCATION.captures(&text)?;
    let id = DEVICE_ID.captures(&text)?;
    let address: Ipv4Addr = location[1].parse().ok()?;
    let port: u16 = location[2].parse().ok()?;

    Some(DeviceEndpoint::with_port(address, port).device_id(id[1].to_uppercase()))
}
