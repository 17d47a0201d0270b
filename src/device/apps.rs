use super::endpoint::DeviceEndpoint;
use crate::error::{Error, Result};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const APPS_PATH: &str = "/query/apps";
pub const ICON_PATH: &str = "/query/icon";

// `.` stops at line breaks, so each element has to sit on one line
static APP_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<app\s(.+?)/app>").expect("app pattern compiles"));
static APP_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"id="(\d+?)""#).expect("id pattern compiles"));
static APP_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"version="(.+?)""#).expect("version pattern compiles"));
static APP_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"">(.+?)<"#).expect("name pattern compiles"));

/// An application installed on the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    name: String,
    version: String,
    id: u32,
}

impl ApplicationRecord {
    /// Get the display name of the App
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Id used by [`Device::launch_app()`](super::Device::launch_app) and
    /// [`Device::fetch_icon_bytes()`](super::Device::fetch_icon_bytes)
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// Extract every `<app>` element of a `/query/apps` payload, in document order.
///
/// Elements missing an id, version or name, or whose id is not a number, are
/// skipped with a warning. The remaining elements are still returned.
pub fn parse_apps(payload: &str) -> Vec<ApplicationRecord> {
    APP_ELEMENT
        .captures_iter(payload)
        .filter_map(|element| match parse_app(&element[1]) {
            Ok(app) => Some(app),
            Err(e) => {
                warn!("Skipping app element '{}': {}", &element[0], e);
                None
            }
        })
        .collect()
}

fn parse_app(raw: &str) -> Result<ApplicationRecord> {
    let field = |re: &Regex, name: &str| -> Result<String> {
        re.captures(raw)
            .map(|c| c[1].to_string())
            .ok_or_else(|| Error::parse(format!("missing {}", name)))
    };

    let id = field(&APP_ID, "id")?;
    let version = field(&APP_VERSION, "version")?;
    let name = field(&APP_NAME, "name")?;

    Ok(ApplicationRecord {
        id: id
            .parse()
            .map_err(|_| Error::parse(format!("id '{}' out of range", id)))?,
        version,
        name,
    })
}

/// GET `path` and hand back the body of a success response
pub(super) async fn get(client: &Client, endpoint: &DeviceEndpoint, path: &str) -> Result<Vec<u8>> {
    let url = endpoint.url(path);
    let res = client.get(&url).send().await?;
    let status = res.status();
    debug!("GET {} -> {}", url, status);

    if !status.is_success() {
        return Err(Error::Status(status.as_u16()));
    }
    Ok(res.bytes().await?.to_vec())
}

pub(super) async fn list(client: &Client, endpoint: &DeviceEndpoint) -> Result<Vec<ApplicationRecord>> {
    let body = get(client, endpoint, APPS_PATH).await?;
    Ok(parse_apps(&String::from_utf8_lossy(&body)))
}

pub(super) async fn icon(client: &Client, endpoint: &DeviceEndpoint, app_id: u32) -> Result<Vec<u8>> {
    get(client, endpoint, &format!("{}/{}", ICON_PATH, app_id)).await
}
