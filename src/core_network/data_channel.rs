use crate::core_error::FtpError;
use crate::core_network::stream::FtpStream;
use crate::core_tls::TlsConnection;
use log::{debug, error, trace};
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Where the next data connection comes from: a passive listener the client
/// connects to, or an address the client told us to connect to.
#[derive(Debug, Default)]
pub struct DataChannel {
    listener: Option<TcpListener>,
    target: Option<SocketAddr>,
}

impl DataChannel {
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub fn set_listener(&mut self, listener: TcpListener) {
        self.listener = Some(listener);
    }

    /// PORT: the passive listener, if any, is dropped in favour of the target.
    pub fn set_active_target(&mut self, target: SocketAddr) {
        self.close_listener();
        self.target = Some(target);
    }

    /// Called once the command that used the listener is over, win or lose.
    pub fn close_listener(&mut self) {
        if let Some(listener) = self.listener.take() {
            trace!("Closing passive listener {:?}", listener.local_addr());
        }
    }

    /// Fails before anything is sent when neither PASV nor PORT was issued.
    pub fn ensure_ready(&self) -> Result<(), FtpError> {
        if self.listener.is_none() && self.target.is_none() {
            return Err(FtpError::reply(425, "Use PORT or PASV first"));
        }
        Ok(())
    }

    /// Establishes the data connection, wrapping it in TLS when `tls` is
    /// given. The returned stream closes when dropped.
    pub async fn open(&self, tls: Option<&TlsConnection>) -> Result<FtpStream, FtpError> {
        let socket = self.connect().await.map_err(|e| {
            error!("Failed to establish data connection: {}", e);
            FtpError::cant_open_data_connection()
        })?;

        match tls {
            Some(tls) => {
                let tls_stream = tls.accept_tls(socket).await.map_err(|e| {
                    error!("Data connection {}", e);
                    FtpError::cant_open_data_connection()
                })?;
                Ok(FtpStream::Tls(Box::new(tls_stream)))
            }
            None => Ok(FtpStream::Plain(socket)),
        }
    }

    async fn connect(&self) -> io::Result<TcpStream> {
        if let Some(listener) = &self.listener {
            let (socket, addr) = listener.accept().await?;
            debug!("Accepted passive data connection from {}", addr);
            return Ok(socket);
        }
        match self.target {
            Some(target) => {
                let socket = TcpStream::connect(target).await?;
                debug!("Connected active data connection to {}", target);
                Ok(socket)
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "no data connection requested",
            )),
        }
    }
}

/// Writes the whole payload and closes our side of the connection.
pub async fn send_data(stream: &mut FtpStream, data: &[u8]) -> io::Result<()> {
    stream.write_all(data).await?;
    stream.shutdown().await
}

/// Reads until the client closes the connection.
pub async fn receive_data(stream: &mut FtpStream) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    match stream.read_to_end(&mut data).await {
        Ok(_) => {}
        // Clients often drop TLS data connections without close_notify.
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && stream.is_encrypted() => {
            debug!("Data connection closed without close_notify");
        }
        Err(e) => return Err(e),
    }
    if let Err(e) = stream.shutdown().await {
        trace!("Ignoring data connection shutdown error: {}", e);
    }
    Ok(data)
}
