use crate::core_error::FtpError;
use crate::session::Session;

/// Handles the PBSZ FTP command. Only `PBSZ 0` after AUTH is accepted.
pub async fn handle_pbsz_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let encrypted = session.control.is_encrypted();
    session.protection.set_buffer_size(encrypted, arg)?;
    session.reply("200 PBSZ=0").await
}
