use crate::core_error::FtpError;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the DELE FTP command.
pub async fn handle_dele_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let path = arg.ok_or_else(|| FtpError::reply(501, "Path required"))?;
    let target = session.target_path(path);
    let resolved = session.ensure_in_sandbox(&target)?;

    fs::remove_file(&resolved).await.map_err(|e| {
        error!("Failed to delete file {:?}: {}", resolved, e);
        FtpError::system(e)
    })?;

    info!("File deleted successfully: {:?}", resolved);
    session.reply("250 DELE command successful").await
}
