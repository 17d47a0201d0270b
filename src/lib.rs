//! Discover and control Roku devices over the External Control Protocol (ECP).
//!
//! Commands are tiny `POST` requests written straight onto a fresh TCP connection, queries
//! are plain HTTP `GET`s, and devices are found with an SSDP style broadcast.
//!
//! ```no_run
//! # async fn run() {
//! use roku_ecp::{Device, Key, KeyAction};
//!
//! for endpoint in roku_ecp::discover_devices().await {
//!     let dev = Device::new(endpoint);
//!     for app in dev.list_applications().await {
//!         println!("{} {}", app.id(), app.name());
//!     }
//!     dev.send_key(KeyAction::Press, Key::Home).await;
//! }
//! # }
//! ```

mod config;
mod constants;
mod device;
mod discover;
mod error;

pub use config::{CommandConfig, DiscoveryConfig};
pub use constants::{DEFAULT_ECP_PORT, SSDP_PORT};
pub use device::{
    classify, parse_apps, ApplicationRecord, Device, DeviceEndpoint, Key, KeyAction,
    ResponseMode, TouchAction, TouchPoint,
};
pub use discover::{discover_at, discover_with, parse_response, search, DatagramSocket};
pub use error::{Error, Result};

use log::warn;

/// Discover Roku devices on network
///
/// Broadcasts one `roku:ecp` search with 500 ms send and receive timeouts and returns
/// every device that answered before the first silent receive. See
/// [`discover_devices_with()`] to change the timeouts or the outgoing interface.
pub async fn discover_devices() -> Vec<DeviceEndpoint> {
    discover_devices_with(&DiscoveryConfig::default()).await
}

/// Discover Roku devices on network using `config`
///
/// Never fails: if the socket cannot be set up or the search cannot be sent, the problem
/// is logged and the list is empty.
pub async fn discover_devices_with(config: &DiscoveryConfig) -> Vec<DeviceEndpoint> {
    match discover_with(config).await {
        Ok(devices) => devices,
        Err(e) => {
            warn!("Discovery failed: {}", e);
            Vec::new()
        }
    }
}
