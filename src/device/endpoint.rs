use crate::constants::DEFAULT_ECP_PORT;

use serde::{Deserialize, Serialize};

use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Where a Roku device listens for ECP traffic
///
/// Two endpoints are equal when address and port match. `device_id` and `nickname` are
/// descriptive only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEndpoint {
    address: Ipv4Addr,
    port: u16,
    device_id: Option<String>,
    nickname: Option<String>,
}

impl DeviceEndpoint {
    /// Endpoint on the default ECP port 8060
    pub fn new(address: Ipv4Addr) -> Self {
        Self::with_port(address, DEFAULT_ECP_PORT)
    }

    pub fn with_port(address: Ipv4Addr, port: u16) -> Self {
        Self {
            address,
            port,
            device_id: None,
            nickname: None,
        }
    }

    pub fn device_id<S: Into<String>>(mut self, id: S) -> Self {
        self.device_id = Some(id.into());
        self
    }

    pub fn nickname<S: Into<String>>(mut self, nickname: S) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Get device's local IP
    pub fn ip(&self) -> Ipv4Addr {
        self.address
    }

    /// Get device's ECP port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the 12 character id reported during discovery
    pub fn id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddrV4::new(self.address, self.port).into()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "http://{}:{}/{}",
            self.address,
            self.port,
            path.trim_start_matches('/')
        )
    }
}

impl From<Ipv4Addr> for DeviceEndpoint {
    fn from(address: Ipv4Addr) -> Self {
        Self::new(address)
    }
}

impl From<SocketAddrV4> for DeviceEndpoint {
    fn from(addr: SocketAddrV4) -> Self {
        Self::with_port(*addr.ip(), addr.port())
    }
}

impl PartialEq for DeviceEndpoint {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.port == other.port
    }
}

impl Eq for DeviceEndpoint {}

impl Hash for DeviceEndpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.port.hash(state);
    }
}

impl Display for DeviceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.device_id {
            Some(id) => write!(f, "{}:{} ({})", self.address, self.port, id),
            None => write!(f, "{}:{}", self.address, self.port),
        }
    }
}
