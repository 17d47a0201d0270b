use super::config::CommandConfig;

mod apps;
mod channel;
mod command;
mod endpoint;
mod remote;
mod response;

pub use self::apps::{parse_apps, ApplicationRecord};
pub use self::endpoint::DeviceEndpoint;
pub use self::remote::{Key, KeyAction, TouchAction, TouchPoint};
pub use self::response::{classify, ResponseMode};

use self::command::Command;
use log::{debug, warn};
use reqwest::Client;

/// A Roku device
///
/// More specifically, a client for sending ECP commands to one device. Search for devices
/// on your local network using [`discover_devices()`](crate::discover_devices), or build a
/// [`DeviceEndpoint`] by hand.
///
/// The client keeps no connection open between calls. Every POST command opens and closes
/// its own TCP connection, and GET queries do not pool idle connections.
///
/// Commands report only whether the device accepted them. Failures are logged at `debug`.
#[derive(Debug, Clone)]
pub struct Device {
    endpoint: DeviceEndpoint,
    config: CommandConfig,
    client: Client,
}

impl Device {
    /// Build a client with the default [`CommandConfig`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use roku_ecp::{Device, DeviceEndpoint, Key, KeyAction};
    /// # use std::net::Ipv4Addr;
    /// #
    /// # async fn go_home() {
    /// let dev = Device::new(DeviceEndpoint::new(Ipv4Addr::new(192, 168, 0, 14)));
    /// if dev.is_alive().await {
    ///     dev.send_key(KeyAction::Press, Key::Home).await;
    /// }
    /// # }
    /// ```
    pub fn new<E: Into<DeviceEndpoint>>(endpoint: E) -> Self {
        Self::with_config(endpoint, CommandConfig::default())
    }

    pub fn with_config<E: Into<DeviceEndpoint>>(endpoint: E, config: CommandConfig) -> Self {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default http client: {}", e);
                Client::new()
            });

        Self {
            endpoint: endpoint.into(),
            config,
            client,
        }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Emulates a key interaction on a remote control
    ///
    /// ```no_run
    /// # use roku_ecp::{Device, Key, KeyAction};
    /// # async fn search(dev: &Device) {
    /// dev.send_key(KeyAction::Press, Key::Search).await;
    /// for c in "star wars".chars() {
    ///     dev.send_key(KeyAction::Press, Key::Lit(c)).await;
    /// }
    /// # }
    /// ```
    pub async fn send_key(&self, action: KeyAction, key: Key) -> bool {
        self.send_command(Command::Key(action, key)).await
    }

    /// Type a single character. Same as [`send_key()`](Self::send_key) with [`Key::Lit`].
    pub async fn send_literal(&self, action: KeyAction, c: char) -> bool {
        self.send_key(action, Key::Lit(c)).await
    }

    /// Check whether the device answers at all.
    ///
    /// Sends an empty key press with 500 ms connect, send and receive bounds and succeeds
    /// if the reply mentions the vendor, whatever its status.
    pub async fn is_alive(&self) -> bool {
        self.send_key(KeyAction::Press, Key::Probe).await
    }

    pub async fn send_touch<P: Into<TouchPoint>>(&self, action: TouchAction, point: P) -> bool {
        self.send_command(Command::Touch(action, point.into())).await
    }

    /// Launch an app by the id found in [`list_applications()`](Self::list_applications)
    pub async fn launch_app(&self, app_id: u32) -> bool {
        self.send_command(Command::Launch(app_id)).await
    }

    /// POST an arbitrary path, e.g. `/launch/12?contentID=80057281&MediaType=movie`.
    ///
    /// The path is sent verbatim. Escaping it is up to the caller.
    pub async fn send_custom_post<S: Into<String>>(&self, path: S) -> bool {
        self.send_command(Command::Custom(path.into())).await
    }

    /// GET an arbitrary path and return the body of a success response
    pub async fn send_custom_get(&self, path: &str) -> Option<String> {
        match apps::get(&self.client, &self.endpoint, path).await {
            Ok(body) => Some(String::from_utf8_lossy(&body).into_owned()),
            Err(e) => {
                debug!("{} GET {} failed: {}", self.endpoint, path, e);
                None
            }
        }
    }

    /// List the installed applications in the order the device shows them.
    ///
    /// Entries the device describes incompletely are skipped. An unreachable device gives an
    /// empty list.
    pub async fn list_applications(&self) -> Vec<ApplicationRecord> {
        match apps::list(&self.client, &self.endpoint).await {
            Ok(apps) => apps,
            Err(e) => {
                debug!("{} app list failed: {}", self.endpoint, e);
                Vec::new()
            }
        }
    }

    /// Raw bytes of an app's icon, left for the caller to decode
    pub async fn fetch_icon_bytes(&self, app_id: u32) -> Option<Vec<u8>> {
        match apps::icon(&self.client, &self.endpoint, app_id).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!("{} icon {} failed: {}", self.endpoint, app_id, e);
                None
            }
        }
    }

    async fn send_command(&self, command: Command) -> bool {
        channel::execute(&self.endpoint, &command, &self.config).await
    }
}

impl From<DeviceEndpoint> for Device {
    fn from(endpoint: DeviceEndpoint) -> Self {
        Self::new(endpoint)
    }
}
