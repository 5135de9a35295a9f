use crate::constants::{DEFAULT_LISTEN_PORT, DEFAULT_SERVER_NAME, DEFAULT_SESSION_TIMEOUT_SECS};
use crate::core_auth::{Authenticator, FixedCredentials, HashedCredentials};
use crate::core_cli::Cli;
use crate::core_fs::{ListFormatter, LsFormatter, NativeFormatter};
use crate::core_tls::{TlsConfig, TlsError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Data directory {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Tls(#[from] TlsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormatterKind {
    Ls,
    Native,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: IpAddr,
    pub listen_port: u16,
    pub pasv_address: Ipv4Addr, // Address advertised and bound for PASV
    pub chroot_dir: Option<PathBuf>,
    pub server_name: String,
    pub response_delay_secs: u64,
    pub session_timeout_secs: u64, // 0 disables the idle timeout
    pub allow_low_data_ports: bool,
    pub list_formatter: ListFormatterKind,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            listen_port: DEFAULT_LISTEN_PORT,
            pasv_address: Ipv4Addr::LOCALHOST,
            chroot_dir: None,
            server_name: String::from(DEFAULT_SERVER_NAME),
            response_delay_secs: 0,
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            allow_low_data_ports: false,
            list_formatter: ListFormatterKind::Ls,
            debug: false,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub user: String,
    pub password: String,
    pub password_hash: Option<String>, // bcrypt, wins over `password`
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user: String::from("user"),
            password: String::from("password"),
            password_hash: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("user", &self.user)
            .field("hashed", &self.password_hash.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub tls: TlsConfig,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {:?}", path))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {:?}", path))?;
        Ok(config)
    }

    /// Command-line values win over the file.
    pub fn apply_cli(&mut self, args: &Cli) {
        if let Some(port) = args.port {
            self.server.listen_port = port;
        }
        if let Some(dir) = &args.data_dir {
            self.server.chroot_dir = Some(dir.clone());
        }
        if let Some(user) = &args.user {
            self.auth.user = user.clone();
        }
        if let Some(password) = &args.password {
            self.auth.password = password.clone();
            self.auth.password_hash = None;
        }
        if args.implicit_tls {
            self.tls.implicit_tls = true;
        }
        if args.debug {
            self.server.debug = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.server.chroot_dir {
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.clone()));
            }
        }
        self.tls.validate()?;
        Ok(())
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_secs(self.server.response_delay_secs)
    }

    pub fn session_timeout(&self) -> Option<Duration> {
        match self.server.session_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        match &self.auth.password_hash {
            Some(hash) => Arc::new(HashedCredentials::new(&self.auth.user, hash)),
            None => Arc::new(FixedCredentials::new(&self.auth.user, &self.auth.password)),
        }
    }

    pub fn list_formatter(&self) -> Arc<dyn ListFormatter> {
        match self.server.list_formatter {
            ListFormatterKind::Ls => Arc::new(LsFormatter),
            ListFormatterKind::Native => Arc::new(NativeFormatter),
        }
    }
}
