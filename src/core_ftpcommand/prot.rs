use crate::core_error::FtpError;
use crate::session::Session;
use log::info;

/// Handles the PROT FTP command. Only `P` (private) can be provided.
pub async fn handle_prot_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let level = session.protection.set_level(arg)?;
    info!("Data protection level set to {}", level);
    session
        .reply(&format!("200 Data protection level {}", level.code()))
        .await
}
