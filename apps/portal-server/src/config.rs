//! Server configuration: YAML file layered under `PORTAL__` environment variables

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use portal_service::config::Config as PortalConfig;
use serde::Deserialize;
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "portal-server", version, about = "Regional portal back-office server")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "PORTAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, overrides `server.listen_addr`
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
    /// JSON when stdout is not a terminal
    #[default]
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Default filter when `RUST_LOG` is unset
    #[serde(default)]
    pub level: Option<String>,
}

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub portal: PortalConfig,
}

impl AppConfig {
    /// Load the optional YAML file, then apply `PORTAL__SECTION__KEY` overrides
    pub fn load(path: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
            figment = figment.merge(Yaml::file(path));
        }
        let config: Self = figment
            .merge(Env::prefixed("PORTAL__").split("__"))
            .extract()?;
        config.portal.validate()?;
        Ok(config)
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  request_timeout: 5s
database:
  url: "sqlite::memory:"
logging:
  format: json
portal:
  session_secret: "s3cret"
  secure_cookies: false
  access_codes:
    kenya: "ke-code"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.listen_addr, default_listen_addr());
        assert_eq!(config.server.request_timeout, Duration::from_secs(5));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.portal.session_ttl_days, 7);
        assert!(!config.portal.secure_cookies);
        assert_eq!(config.portal.access_codes.kenya.as_deref(), Some("ke-code"));
        assert!(config.portal.access_codes.global.is_none());
    }

    #[test]
    fn rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
database:
  url: "sqlite::memory:"
portal:
  sesion_secret: "typo"
"#
        )
        .unwrap();

        assert!(AppConfig::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn rejects_zero_session_lifetime() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
database:
  url: "sqlite::memory:"
portal:
  session_ttl_days: 0
"#
        )
        .unwrap();

        let err = AppConfig::load(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("session_ttl_days"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/definitely/not/here/portal.yaml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
