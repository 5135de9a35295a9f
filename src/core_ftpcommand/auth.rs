use crate::core_error::FtpError;
use crate::core_tls::TlsError;
use crate::session::Session;
use log::{error, info};

/// Handles the AUTH FTP command (RFC 4217).
///
/// Replies 234 in the clear, then the TLS handshake happens on the same
/// connection. A failed handshake ends the session.
pub async fn handle_auth_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let scheme = arg.ok_or_else(FtpError::syntax)?;
    if session.control.is_encrypted() {
        return Err(FtpError::reply(503, "AUTH already done"));
    }
    if !matches!(scheme.to_ascii_uppercase().as_str(), "TLS" | "TLS-C") {
        return Err(FtpError::reply(
            500,
            format!("Security scheme not implemented: {}", scheme),
        ));
    }
    if !session.control.tls_available() {
        return Err(FtpError::tls_refused(&TlsError::TlsNotConfigured));
    }

    session.reply(&format!("234 AUTH {} OK.", scheme)).await?;
    session.control.encrypt().await.map_err(|e| {
        error!("Control connection {}", e);
        FtpError::from(e)
    })?;
    info!("Control connection encrypted");
    Ok(())
}
