use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const MIN_RECEIVE_BUFFER: usize = 512;
pub const MAX_RECEIVE_BUFFER: usize = 65536;
pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Per-query time budget in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_receive_buffer_size")]
    pub receive_buffer_size: usize,

    /// `ip` or `ip:port`; when unset the first `nameserver` in
    /// `resolv_conf` is used.
    #[serde(default)]
    pub nameserver: Option<String>,

    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses `nameserver`, defaulting the port to 53. `Ok(None)` when unset.
    pub fn nameserver_addr(&self) -> Result<Option<SocketAddr>, String> {
        let Some(raw) = self.nameserver.as_deref() else {
            return Ok(None);
        };
        parse_nameserver(raw).map(Some)
    }
}

pub fn parse_nameserver(raw: &str) -> Result<SocketAddr, String> {
    let raw = raw.trim();
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Ok(addr);
    }
    raw.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|e| format!("invalid nameserver '{}': {}", raw, e))
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            receive_buffer_size: default_receive_buffer_size(),
            nameserver: None,
            resolv_conf: default_resolv_conf(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_receive_buffer_size() -> usize {
    MAX_RECEIVE_BUFFER
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}
