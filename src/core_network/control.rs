use crate::constants::{MAX_COMMAND_LINE, WIRE_LOG_TARGET};
use crate::core_network::stream::FtpStream;
use crate::core_tls::{TlsConnection, TlsError};
use log::debug;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// The control connection of one session: line based reads, CRLF replies,
/// and an in-place upgrade to TLS.
pub struct ControlChannel {
    stream: Option<BufReader<FtpStream>>,
    tls: Option<Arc<TlsConnection>>,
    response_delay: Duration,
}

impl ControlChannel {
    pub fn new(socket: TcpStream, tls: Option<Arc<TlsConnection>>, response_delay: Duration) -> Self {
        Self {
            stream: Some(BufReader::new(FtpStream::Plain(socket))),
            tls,
            response_delay,
        }
    }

    fn stream(&mut self) -> io::Result<&mut BufReader<FtpStream>> {
        self.stream.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "control connection is gone")
        })
    }

    pub fn is_encrypted(&self) -> bool {
        self.stream
            .as_ref()
            .map_or(false, |stream| stream.get_ref().is_encrypted())
    }

    pub fn tls_available(&self) -> bool {
        self.tls.is_some()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream
            .as_ref()
            .and_then(|stream| stream.get_ref().tcp().peer_addr().ok())
    }

    /// Reads one command line without its line terminator. `None` means the
    /// peer closed the connection. A line longer than `MAX_COMMAND_LINE`
    /// is an `InvalidData` error.
    pub async fn read_command(&mut self) -> io::Result<Option<String>> {
        let mut buffer = Vec::new();
        let n = self
            .stream()?
            .take(MAX_COMMAND_LINE)
            .read_until(b'\n', &mut buffer)
            .await?;
        if n == 0 {
            return Ok(None);
        }
        if buffer.last() != Some(&b'\n') && n as u64 >= MAX_COMMAND_LINE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "command line too long",
            ));
        }
        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
        let line = String::from_utf8_lossy(&buffer).into_owned();
        debug!(target: WIRE_LOG_TARGET, "<-- {}", line);
        Ok(Some(line))
    }

    /// Sends one reply line, after the configured artificial delay.
    pub async fn reply(&mut self, line: &str) -> io::Result<()> {
        if !self.response_delay.is_zero() {
            debug!(
                target: WIRE_LOG_TARGET,
                "{:?} delay before replying", self.response_delay
            );
            tokio::time::sleep(self.response_delay).await;
        }
        debug!(target: WIRE_LOG_TARGET, "--> {}", line);
        let stream = self.stream()?;
        stream.write_all(line.as_bytes()).await?;
        stream.write_all(b"\r\n").await?;
        stream.flush().await
    }

    /// Performs the server side of a TLS handshake on the live connection.
    /// On failure the connection is unusable and the session must end.
    pub async fn encrypt(&mut self) -> Result<(), TlsError> {
        let tls = self.tls.clone().ok_or(TlsError::TlsNotConfigured)?;
        let stream = self.stream.take().ok_or_else(|| {
            TlsError::TlsHandshakeError("control connection is gone".to_string())
        })?;
        match stream.into_inner() {
            FtpStream::Plain(socket) => {
                let tls_stream = tls.accept_tls(socket).await?;
                self.stream = Some(BufReader::new(FtpStream::Tls(Box::new(tls_stream))));
                Ok(())
            }
            already @ FtpStream::Tls(_) => {
                self.stream = Some(BufReader::new(already));
                Err(TlsError::TlsConfigError(
                    "control connection is already encrypted".to_string(),
                ))
            }
        }
    }
}
