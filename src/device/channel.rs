use super::command::Command;
use super::endpoint::DeviceEndpoint;
use super::response::{classify, ResponseMode};
use crate::config::CommandConfig;
use crate::constants::{PROBE_TIMEOUT_MS, RESPONSE_WINDOW};
use crate::error::Result;

use log::debug;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::{timeout, Duration},
};

use std::future::Future;

/// Send one command over a fresh connection and judge the reply.
///
/// Every failure (refused, reset, timed out) is logged and reported as `false`.
pub(crate) async fn execute(
    endpoint: &DeviceEndpoint,
    command: &Command,
    config: &CommandConfig,
) -> bool {
    let mode = command.response_mode();
    let limit = match mode {
        ResponseMode::Liveness => Some(Duration::from_millis(PROBE_TIMEOUT_MS)),
        ResponseMode::Status => config.timeout(),
    };

    match exchange(endpoint, &command.encode(), limit).await {
        Ok(response) => {
            let success = classify(&response, mode);
            debug!(
                "{} POST {} -> {} ({} bytes)",
                endpoint,
                command.endpoint(),
                success,
                response.len()
            );
            success
        }
        Err(e) => {
            debug!("{} POST {} failed: {}", endpoint, command.endpoint(), e);
            false
        }
    }
}

// The stream is dropped, and so closed, on every return path.
async fn exchange(
    endpoint: &DeviceEndpoint,
    request: &[u8],
    limit: Option<Duration>,
) -> Result<Vec<u8>> {
    let mut stream = bounded(limit, TcpStream::connect(endpoint.socket_addr())).await?;
    bounded(limit, stream.write_all(request)).await?;

    // A single read, a short one is fine
    let mut rbuf = [0; RESPONSE_WINDOW];
    let len = bounded(limit, stream.read(&mut rbuf)).await?;
    Ok(rbuf[..len].to_vec())
}

async fn bounded<F, T>(limit: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = std::io::Result<T>>,
{
    match limit {
        Some(limit) => Ok(timeout(limit, fut).await??),
        None => Ok(fut.await?),
    }
}
