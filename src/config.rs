use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;

/// Per-phase timeout applied when a request does not carry its own.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub port: u16,
    pub bind: IpAddr,
    pub request_timeout_ms: u64,
    /// Remote command host used by `reqly send`; in-process when unset.
    pub backend_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            bind: lookup("REQLY_BIND")
                .and_then(|b| b.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            request_timeout_ms: lookup("REQLY_TIMEOUT_MS")
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            backend_url: lookup("REQLY_BACKEND_URL").filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.request_timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.backend_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("REQLY_BIND", "0.0.0.0"),
            ("REQLY_TIMEOUT_MS", "1500"),
            ("REQLY_BACKEND_URL", "http://localhost:8080"),
        ]));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout_ms, 1500);
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("REQLY_TIMEOUT_MS", "0"),
            ("REQLY_BACKEND_URL", "  "),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.request_timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.backend_url.is_none());
    }
}
