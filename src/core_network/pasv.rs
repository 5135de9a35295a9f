use crate::core_error::FtpError;
use crate::session::Session;
use log::{debug, error, info};
use std::net::{Ipv4Addr, SocketAddrV4};
use tokio::net::TcpListener;

/// Handles the PASV command.
///
/// Binds an OS-assigned port and reports it as `h1,h2,h3,h4,p1,p2`. While a
/// listener is still pending, a second PASV only says so.
pub async fn handle_pasv_command(session: &mut Session, _arg: Option<&str>) -> Result<(), FtpError> {
    if session.data_channel.has_listener() {
        return session.reply("200 Already in passive mode").await;
    }

    let pasv_ip = session.context.config.server.pasv_address;
    let (listener, addr) = setup_pasv_listener(pasv_ip).await.map_err(|e| {
        error!("Failed to bind passive listener on {}: {}", pasv_ip, e);
        FtpError::cant_open_data_connection()
    })?;
    session.data_channel.set_listener(listener);
    info!("Passive listener ready on {}", addr);

    session
        .reply(&format!("227 Entering passive mode ({})", pasv_quads(addr)))
        .await
}

/// Sets up a passive mode listener on `pasv_ip` with an OS-assigned port.
pub async fn setup_pasv_listener(
    pasv_ip: Ipv4Addr,
) -> Result<(TcpListener, SocketAddrV4), std::io::Error> {
    let listener = TcpListener::bind((pasv_ip, 0)).await?;
    let port = listener.local_addr()?.port();
    debug!("PASV listener set up on IP: {}, Port: {}", pasv_ip, port);
    Ok((listener, SocketAddrV4::new(pasv_ip, port)))
}

/// The RFC 959 `h1,h2,h3,h4,p1,p2` encoding of an address.
pub fn pasv_quads(addr: SocketAddrV4) -> String {
    let [h1, h2, h3, h4] = addr.ip().octets();
    let port = addr.port();
    format!("{},{},{},{},{},{}", h1, h2, h3, h4, port >> 8, port & 0xff)
}
