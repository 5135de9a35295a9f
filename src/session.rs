use crate::core_error::FtpError;
use crate::core_ftpcommand::handlers::{dispatch_command, CommandOutcome};
use crate::core_network::control::ControlChannel;
use crate::core_network::data_channel::DataChannel;
use crate::core_transfer::TransferParameters;
use crate::core_tls::ProtectionState;
use crate::server::ServerContext;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Unauthenticated,
    AwaitingPassword,
    LoggedIn,
}

/// Everything one control connection owns. Nothing here is shared with
/// other sessions; `context` is read-only.
pub struct Session {
    pub context: Arc<ServerContext>,
    pub control: ControlChannel,
    pub state: LoginState,
    pub username: Option<String>, // From the last USER
    pub cwd: PathBuf,             // Canonical, always inside the sandbox
    pub transfer: TransferParameters,
    pub protection: ProtectionState,
    pub data_channel: DataChannel,
}

impl Session {
    pub fn new(socket: TcpStream, context: Arc<ServerContext>) -> Self {
        let control = ControlChannel::new(
            socket,
            context.tls.clone(),
            context.config.response_delay(),
        );
        let cwd = context.sandbox.root().to_path_buf();
        Self {
            context,
            control,
            state: LoginState::Unauthenticated,
            username: None,
            cwd,
            transfer: TransferParameters::default(),
            protection: ProtectionState::default(),
            data_channel: DataChannel::default(),
        }
    }

    /// Drives the session until the client quits or goes away.
    pub async fn run(mut self) {
        let peer = self
            .control
            .peer_addr()
            .map_or_else(|| "unknown peer".to_string(), |addr| addr.to_string());

        match self.serve().await {
            Ok(()) => info!("Session with {} ended", peer),
            Err(e) if e.is_connection_lost() => info!("Connection lost from {}", peer),
            Err(e) => error!("Session with {} terminated: {}", peer, e),
        }
    }

    async fn serve(&mut self) -> Result<(), FtpError> {
        if self.context.config.tls.implicit_tls {
            self.control.encrypt().await?;
        }
        let banner = format!("220 {}", self.context.config.server.server_name);
        self.reply(&banner).await?;

        loop {
            let line = match self.next_command().await? {
                Some(line) => line,
                None => return Ok(()),
            };

            match dispatch_command(self, &line).await {
                Ok(CommandOutcome::Continue) => {}
                Ok(CommandOutcome::Quit) => return Ok(()),
                Err(e) => match e.to_ftp_response() {
                    Some(response) => self.reply(&response).await?,
                    None => return Err(e),
                },
            }
        }
    }

    /// Waits for the next command line, within the idle timeout if any.
    async fn next_command(&mut self) -> Result<Option<String>, FtpError> {
        let timeout = match self.context.config.session_timeout() {
            Some(timeout) => timeout,
            None => return Ok(self.control.read_command().await?),
        };

        match tokio::time::timeout(timeout, self.control.read_command()).await {
            Ok(line) => Ok(line?),
            Err(_) => {
                warn!("Session idle for {:?}, closing", timeout);
                self.reply("421 Control connection timed out.").await?;
                Ok(None)
            }
        }
    }

    pub async fn reply(&mut self, line: &str) -> Result<(), FtpError> {
        Ok(self.control.reply(line).await?)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == LoginState::LoggedIn
    }

    pub fn check_logged_in(&self) -> Result<(), FtpError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(FtpError::not_logged_in())
        }
    }

    pub fn target_path(&self, raw: &str) -> PathBuf {
        self.context.sandbox.target_path(&self.cwd, raw)
    }

    pub fn ensure_in_sandbox(&self, path: &Path) -> Result<PathBuf, FtpError> {
        self.context.sandbox.ensure_in_sandbox(path)
    }

    /// The working directory as the client sees it.
    pub fn sanitized_cwd(&self) -> String {
        self.context.sandbox.relative_display(&self.cwd)
    }
}
