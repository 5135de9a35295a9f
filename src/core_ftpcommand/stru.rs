use crate::core_error::FtpError;
use crate::core_transfer::TransferCode;
use crate::session::Session;

/// Handles the STRU FTP command. Only file structure is implemented.
pub async fn handle_stru_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let structure = session.transfer.set_structure(arg)?;
    session
        .reply(&format!("200 File structure set to {}", structure.name()))
        .await
}
