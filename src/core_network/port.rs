use crate::constants::MIN_UNPRIVILEGED_PORT;
use crate::core_error::FtpError;
use crate::session::Session;
use log::{info, warn};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Handles the PORT (Active Mode) FTP command.
///
/// Only records the target; each transfer connects to it afresh.
pub async fn handle_port_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let target = parse_port_argument(arg.unwrap_or_default())?;

    if target.port() < MIN_UNPRIVILEGED_PORT && !session.context.config.server.allow_low_data_ports {
        warn!("Refusing PORT to privileged port {}", target);
        return Err(FtpError::reply(
            504,
            "Command not implemented for that parameter",
        ));
    }

    info!("Received PORT command with target {}", target);
    session.data_channel.set_active_target(SocketAddr::V4(target));
    session.reply("200 PORT command successful").await
}

/// Parses `h1,h2,h3,h4,p1,p2`: exactly six decimal octets of one to three
/// digits each.
pub fn parse_port_argument(arg: &str) -> Result<SocketAddrV4, FtpError> {
    let parts: Vec<&str> = arg.split(',').collect();
    if parts.len() != 6 {
        return Err(FtpError::syntax());
    }

    let mut octets = [0u8; 6];
    for (octet, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FtpError::syntax());
        }
        *octet = part.parse::<u8>().map_err(|_| FtpError::syntax())?;
    }

    let ip = Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]);
    let port = u16::from(octets[4]) << 8 | u16::from(octets[5]);
    Ok(SocketAddrV4::new(ip, port))
}
