use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::receive_file;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the STOR (Store) FTP command.
///
/// The whole upload is received before the file is written; an aborted
/// transfer leaves any existing file untouched.
pub async fn handle_stor_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let path = arg.ok_or_else(FtpError::syntax)?;
    let target = session.target_path(path);
    let resolved = session.ensure_in_sandbox(&target)?;

    let contents = receive_file(session).await?;
    fs::write(&resolved, &contents).await.map_err(|e| {
        error!("Failed to write file {:?}: {}", resolved, e);
        FtpError::system(e)
    })?;

    info!("Stored {} bytes to {:?}", contents.len(), resolved);
    session.reply("226 Transfer complete").await
}
