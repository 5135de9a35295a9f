use crate::config::Config;
use crate::constants::SCAFFOLD_FILES;
use crate::core_auth::Authenticator;
use crate::core_fs::{ListFormatter, PathSandbox};
use crate::core_network::network;
use crate::core_tls::TlsConnection;
use anyhow::{Context, Result};
use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Read-only state shared by every session of one server.
pub struct ServerContext {
    pub config: Config,
    pub sandbox: PathSandbox,
    pub authenticator: Arc<dyn Authenticator>,
    pub list_formatter: Arc<dyn ListFormatter>,
    pub tls: Option<Arc<TlsConnection>>, // Present when [tls] is enabled
}

impl ServerContext {
    /// Builds the context serving `root`. The TLS material is loaded here,
    /// once, so a bad certificate stops the server before it listens.
    pub fn new(config: Config, root: &Path) -> Result<Self> {
        let sandbox = PathSandbox::new(root)
            .with_context(|| format!("Failed to resolve data directory {:?}", root))?;
        let tls = if config.tls.enabled {
            let connection = TlsConnection::from_config(&config.tls)
                .context("Failed to initialize TLS")?;
            Some(Arc::new(connection))
        } else {
            None
        };

        Ok(Self {
            authenticator: config.authenticator(),
            list_formatter: config.list_formatter(),
            config,
            sandbox,
            tls,
        })
    }
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("root", &self.sandbox.root())
            .field("authenticator", &self.authenticator)
            .field("tls", &self.tls.is_some())
            .finish_non_exhaustive()
    }
}

/// Runs the FTP server until the listener fails.
///
/// Without a configured data directory a temporary one is created and
/// seeded with a couple of files; it lives as long as the server.
pub async fn run(config: Config) -> Result<()> {
    let scaffold;
    let root = match &config.server.chroot_dir {
        Some(dir) => dir.clone(),
        None => {
            scaffold = create_scaffold().context("Failed to create scaffold directory")?;
            scaffold.path().to_path_buf()
        }
    };

    let context = Arc::new(ServerContext::new(config, &root)?);
    display_connection_info(&context);

    if let Err(e) = network::start_server(context).await {
        error!("Failed to start server: {}", e);
        return Err(e);
    }
    Ok(())
}

/// A temporary data directory holding `SCAFFOLD_FILES`.
pub fn create_scaffold() -> Result<TempDir> {
    let dir = tempfile::Builder::new().prefix("fakeftpd").tempdir()?;
    for relative in SCAFFOLD_FILES {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&path, format!("Contents of {}\n", relative))
            .with_context(|| format!("Failed to write {:?}", path))?;
    }
    Ok(dir)
}

fn display_connection_info(context: &ServerContext) {
    let server = &context.config.server;
    info!("Host: {}", server.listen_address);
    info!("Port: {}", server.listen_port);
    info!("User: {}", context.config.auth.user);
    if context.config.auth.password_hash.is_none() {
        info!("Pass: {}", context.config.auth.password);
    }
    info!("Directory: {}", context.sandbox.root().display());
    if context.tls.is_some() {
        let mode = if context.config.tls.implicit_tls {
            "implicit"
        } else {
            "explicit (AUTH TLS)"
        };
        info!("TLS: {}", mode);
    }
}
