use super::{init_logger, rand_data};

use chrono::prelude::*;
use roku_ecp::DeviceEndpoint;
use tokio::net::UdpSocket;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Emulated network segment answering `roku:ecp` searches
///
/// Every search is answered with one datagram per Roku device, plus one per unrelated
/// DIAL device, all sent from the responder socket.
pub struct EmulatedSsdp {
    addr: SocketAddr,
    expected: Vec<DeviceEndpoint>,
    searches: Arc<AtomicUsize>,
}

impl EmulatedSsdp {
    pub async fn start(rokus: &[(Ipv4Addr, u16)], others: usize) -> Self {
        init_logger();

        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = socket.local_addr().unwrap();
        let searches = Arc::new(AtomicUsize::new(0));

        let expected: Vec<DeviceEndpoint> = rokus
            .iter()
            .map(|(ip, port)| DeviceEndpoint::with_port(*ip, *port).device_id(rand_data::device_id()))
            .collect();

        let mut answers: Vec<String> = expected
            .iter()
            .map(|d| roku_response(d.ip(), d.port(), d.id().unwrap_or_default()))
            .collect();
        answers.extend((0..others).map(|_| dial_response()));

        tokio::spawn({
            let searches = searches.clone();
            async move {
                let mut rbuf = [0; 1024];
                while let Ok((len, from)) = socket.recv_from(&mut rbuf).await {
                    let request = String::from_utf8_lossy(&rbuf[..len]).to_string();
                    if !request.starts_with("M-SEARCH") || !request.contains("ST: roku:ecp") {
                        continue;
                    }
                    searches.fetch_add(1, Ordering::SeqCst);

                    for answer in answers.iter() {
                        socket.send_to(answer.as_bytes(), from).await.unwrap();
                    }
                }
            }
        });

        Self {
            addr,
            expected,
            searches,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn expected(&self) -> &[DeviceEndpoint] {
        &self.expected
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

fn roku_response(ip: Ipv4Addr, port: u16, id: &str) -> String {
    [
        "HTTP/1.1 200 OK",
        "Cache-Control: max-age=3600",
        "ST: roku:ecp",
        &format!("USN: uuid:roku:ecp:{}", id),
        "Ext: ",
        "Server: Roku/9.4.0 UPnP/1.0 Roku/9.4.0",
        &format!("LOCATION: http://{}:{}/", ip, port),
        &format!("DATE: {}", Utc::now().format("%a, %d %b %Y %X GMT")),
        "",
        "",
    ]
    .join("\r\n")
}

fn dial_response() -> String {
    [
        "HTTP/1.1 200 OK",
        "CACHE-CONTROL: max-age=1800",
        &format!("DATE: {}", Utc::now().format("%a, %d %b %Y %X GMT")),
        "EXT:",
        "LOCATION: http://127.0.0.1:8008/ssdp/device-desc.xml",
        "SERVER: Linux/4.19.71+, UPnP/1.0, Portable SDK for UPnP devices/1.6.18",
        "ST: urn:dial-multiscreen-org:device:dial:1",
        &format!(
            "USN: uuid:{}::urn:dial-multiscreen-org:device:dial:1",
            rand_data::string(32)
        ),
        "",
        "",
    ]
    .join("\r\n")
}
