use super::init_logger;

use roku_ecp::{Device, DeviceEndpoint};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

pub const APPS_XML: &str = indoc::indoc! {r#"
    <?xml version="1.0" encoding="UTF-8" ?>
    <apps>
        <app id="31012" type="menu" version="2.0.52">FandangoNOW Movies &amp; TV</app>
        <app id="tvinput.hdmi1" type="tvin" version="1.0.0">Blu-ray player</app>
        <app id="12" subtype="ndka" type="appl" version="5.2.98079445">Netflix</app>
        <app id="2285" subtype="rsga" type="appl" version="6.73.5">Hulu</app>
    </apps>
"#};

const DEVICE_INFO_XML: &str = indoc::indoc! {r#"
    <?xml version="1.0" encoding="UTF-8" ?>
    <device-info>
        <udn>015e5108-9000-1046-8035-b0a737964dfb</udn>
        <serial-number>1GU48T017973</serial-number>
        <model-name>Roku Ultra</model-name>
    </device-info>
"#};

const KEY_VERBS: [&str; 3] = ["keypress", "keyup", "keydown"];
const TOUCH_VERBS: [&str; 3] = ["touchdrag", "touchup", "touchdown"];
const KEYS: [&str; 15] = [
    "Home",
    "Rev",
    "Fwd",
    "Play",
    "Select",
    "Left",
    "Right",
    "Down",
    "Up",
    "Back",
    "InstantReplay",
    "Info",
    "Backspace",
    "Search",
    "Enter",
];
const APP_IDS: [&str; 3] = ["31012", "12", "2285"];

/// Emulated Roku ECP server on a random local port
///
/// Answers commands and queries the way a device does and records every request line it
/// receives as `"METHOD /path"`.
#[derive(Debug, Clone)]
pub struct EmulatedDevice {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl EmulatedDevice {
    pub async fn serve() -> Self {
        init_logger();

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        tokio::spawn({
            let requests = requests.clone();
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    tokio::spawn(handle(stream, requests.clone()));
                }
            }
        });

        Self { addr, requests }
    }

    pub fn endpoint(&self) -> DeviceEndpoint {
        DeviceEndpoint::with_port(Ipv4Addr::LOCALHOST, self.addr.port())
    }

    pub fn device(&self) -> Device {
        Device::new(self.endpoint())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn icon(app_id: &str) -> Vec<u8> {
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.extend_from_slice(app_id.as_bytes());
        png
    }
}

async fn handle(mut stream: TcpStream, requests: Arc<Mutex<Vec<String>>>) {
    let mut data = Vec::new();
    let mut rbuf = [0; 1024];

    let (method, path) = loop {
        let len = match stream.read(&mut rbuf).await {
            Ok(0) | Err(_) => return,
            Ok(len) => len,
        };
        data.extend_from_slice(&rbuf[..len]);

        let mut headers = [httparse::EMPTY_HEADER; 16];
        let mut req = httparse::Request::new(&mut headers);
        match req.parse(&data) {
            Ok(httparse::Status::Complete(_)) => {
                break (
                    req.method.unwrap_or_default().to_string(),
                    req.path.unwrap_or_default().to_string(),
                )
            }
            Ok(httparse::Status::Partial) => continue,
            Err(e) => {
                log::warn!(target: "test::emulated_device", "Bad request: {}", e);
                return;
            }
        }
    };

    log::debug!(target: "test::emulated_device", "{} {}", method, path);
    requests.lock().unwrap().push(format!("{} {}", method, path));

    let reply = route(&method, &path);
    let _ = stream.write_all(&reply).await;
    let _ = stream.shutdown().await;
}

fn route(method: &str, path: &str) -> Vec<u8> {
    let path = path.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path.trim_start_matches('/').splitn(2, '/').collect();

    match (method, segments.as_slice()) {
        ("POST", [verb, key]) if KEY_VERBS.contains(verb) => {
            if KEYS.contains(key) || (key.starts_with("Lit_") && key.len() > 4) {
                reply("200 OK", "text/plain", b"")
            } else {
                reply("400 Bad Request", "text/plain", b"")
            }
        }
        ("POST", [verb, point]) if TOUCH_VERBS.contains(verb) => {
            let valid = point
                .split('.')
                .map(|n| n.parse::<u32>().is_ok())
                .filter(|ok| *ok)
                .count()
                == 2;
            if valid {
                reply("200 OK", "text/plain", b"")
            } else {
                reply("400 Bad Request", "text/plain", b"")
            }
        }
        ("POST", ["launch", id]) if APP_IDS.contains(id) => reply("200 OK", "text/plain", b""),
        ("GET", ["query", "apps"]) => reply("200 OK", "text/xml; charset=\"utf-8\"", APPS_XML.as_bytes()),
        ("GET", ["query", "device-info"]) => {
            reply("200 OK", "text/xml; charset=\"utf-8\"", DEVICE_INFO_XML.as_bytes())
        }
        ("GET", ["query", icon]) if icon.starts_with("icon/") => {
            let id = icon.trim_start_matches("icon/");
            if APP_IDS.contains(&id) {
                reply("200 OK", "image/png", &EmulatedDevice::icon(id))
            } else {
                reply("404 Not Found", "text/plain", b"")
            }
        }
        _ => reply("404 Not Found", "text/plain", b""),
    }
}

fn reply(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
    let mut res = [
        format!("HTTP/1.1 {}", status),
        "Server: Roku/9.4.0 UPnP/1.0 Roku/9.4.0".to_string(),
        format!("Content-Length: {}", body.len()),
        format!("Content-Type: {}", content_type),
        "Connection: close".to_string(),
        String::new(),
        String::new(),
    ]
    .join("\r\n")
    .into_bytes();
    res.extend_from_slice(body);
    res
}
