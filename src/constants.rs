pub const DEFAULT_ECP_PORT: u16 = 8060;
pub const DEFAULT_HTTP_TIMEOUT: u64 = 3;

pub const SSDP_PORT: u16 = 1900;
pub const SSDP_IP: &str = "255.255.255.255:1900";
pub const SSDP_SERVICE: &str = "roku:ecp";
pub const DEFAULT_DISCOVERY_TIMEOUT_MS: u64 = 500;

/// Status line plus the first headers of an ECP reply fit in this window
pub const RESPONSE_WINDOW: usize = 71;
pub const PROBE_TIMEOUT_MS: u64 = 500;
