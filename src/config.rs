use super::constants::{DEFAULT_DISCOVERY_TIMEOUT_MS, DEFAULT_HTTP_TIMEOUT};

use serde::{Deserialize, Serialize};

use std::net::Ipv4Addr;
use std::time::Duration;

/// Options for one discovery round
///
/// Durations are (de)serialized as milliseconds so the struct can be embedded in a
/// caller's own config file. Missing fields take the defaults: 500 ms to send, 500 ms
/// per receive, the OS default route, no deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    #[serde(rename = "send_timeout_ms", with = "millis")]
    send_timeout: Duration,
    #[serde(rename = "receive_timeout_ms", with = "millis")]
    receive_timeout: Duration,
    source_address: Option<Ipv4Addr>,
    dedup_by_address: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_millis(DEFAULT_DISCOVERY_TIMEOUT_MS),
            receive_timeout: Duration::from_millis(DEFAULT_DISCOVERY_TIMEOUT_MS),
            source_address: None,
            dedup_by_address: false,
        }
    }
}

impl DiscoveryConfig {
    /// Use the same timeout for sending the search and for every receive
    pub fn uniform(timeout: Duration) -> Self {
        Self::default()
            .with_send_timeout(timeout)
            .with_receive_timeout(timeout)
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Bind the discovery socket to a local address before broadcasting.
    ///
    /// On multi-homed hosts this picks the interface the search goes out on. The
    /// address must belong to a local interface, otherwise binding fails.
    pub fn with_source_address(mut self, addr: Ipv4Addr) -> Self {
        self.source_address = Some(addr);
        self
    }

    /// Keep only the first endpoint reported for each address.
    ///
    /// Off by default: a device that answers twice is listed twice.
    pub fn with_dedup_by_address(mut self, dedup: bool) -> Self {
        self.dedup_by_address = dedup;
        self
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    pub fn receive_timeout(&self) -> Duration {
        self.receive_timeout
    }

    pub fn source_address(&self) -> Option<Ipv4Addr> {
        self.source_address
    }

    pub fn dedup_by_address(&self) -> bool {
        self.dedup_by_address
    }
}

/// Options for commands and queries sent to a [`Device`](super::Device)
///
/// `timeout` bounds connect, send and receive of POST commands. It is unset by
/// default, which leaves those commands unbounded. The liveness probe always uses
/// its own 500 ms bound regardless of this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    #[serde(rename = "timeout_ms", with = "opt_millis")]
    timeout: Option<Duration>,
    #[serde(rename = "http_timeout_ms", with = "millis")]
    http_timeout: Duration,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT),
        }
    }
}

impl CommandConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

mod opt_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
