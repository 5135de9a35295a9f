use crate::core_error::FtpError;
use crate::core_transfer::TransferCode;
use crate::session::Session;

/// Handles the MODE FTP command. Only stream mode is implemented.
pub async fn handle_mode_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let mode = session.transfer.set_mode(arg)?;
    session
        .reply(&format!("200 Mode set to {}", mode.name()))
        .await
}
