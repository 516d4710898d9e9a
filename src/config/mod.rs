use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::errors::WikiError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub template_dir: PathBuf,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            template_dir: PathBuf::from("templates"),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Defaults overridden by `WIKI_DATA_DIR`, `WIKI_TEMPLATE_DIR`, `WIKI_HOST` and `WIKI_PORT`
    pub fn from_env() -> Result<Self, WikiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WikiError> {
        let mut config = Self::new();

        if let Some(dir) = lookup("WIKI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WIKI_TEMPLATE_DIR") {
            config.template_dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("WIKI_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("WIKI_PORT") {
            config.port = port
                .parse()
                .map_err(|_| WikiError::Config(format!("WIKI_PORT is not a port number: {:?}", port)))?;
        }

        Ok(config)
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| WikiError::Config(format!("invalid host address: {:?}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, WikiError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_listen_on_8080() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.template_dir, PathBuf::from("templates"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = from_pairs(&[
            ("WIKI_DATA_DIR", "/srv/wiki"),
            ("WIKI_TEMPLATE_DIR", "/srv/tpl"),
            ("WIKI_HOST", "127.0.0.1"),
            ("WIKI_PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/wiki"));
        assert_eq!(config.template_dir, PathBuf::from("/srv/tpl"));
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(matches!(from_pairs(&[("WIKI_PORT", "http")]), Err(WikiError::Config(_))));
    }

    #[test]
    fn bad_host_is_rejected() {
        let config = from_pairs(&[("WIKI_HOST", "not a host")]).unwrap();
        assert!(matches!(config.socket_addr(), Err(WikiError::Config(_))));
    }
}
