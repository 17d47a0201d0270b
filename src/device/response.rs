use crate::constants::RESPONSE_WINDOW;

use once_cell::sync::Lazy;
use regex::Regex;

static STATUS_OK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"HTTP.+?200\sOK").expect("status pattern compiles"));

/// What counts as a successful reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// An HTTP status line carrying `200 OK`
    Status,
    /// Any reply mentioning the vendor, with or without a status line
    Liveness,
}

/// Judge a reply from the first [`RESPONSE_WINDOW`] bytes. Anything shorter is judged as is.
pub fn classify(response: &[u8], mode: ResponseMode) -> bool {
    let window = &response[..response.len().min(RESPONSE_WINDOW)];
    let text = String::from_utf8_lossy(window);
    match mode {
        ResponseMode::Liveness => text.contains("Roku"),
        ResponseMode::Status => STATUS_OK.is_match(&text),
    }
}
