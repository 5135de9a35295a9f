use crate::core_error::FtpError;
use crate::core_ftpcommand::pwd::reply_current_directory;
use crate::session::Session;
use log::{info, warn};
use std::fs;

/// Handles the CWD FTP command.
///
/// The new directory must exist, be a directory, and lie inside the data
/// directory. If the reply cannot be sent the old directory is restored.
pub async fn handle_cwd_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let raw = arg.ok_or_else(FtpError::syntax)?;
    change_directory(session, raw).await
}

pub async fn change_directory(session: &mut Session, raw: &str) -> Result<(), FtpError> {
    let target = session.target_path(raw);
    let resolved = session.ensure_in_sandbox(&target)?;

    let metadata = fs::metadata(&resolved).map_err(|e| {
        warn!("CWD to {:?} failed: {}", resolved, e);
        FtpError::system(e)
    })?;
    if !metadata.is_dir() {
        return Err(FtpError::reply(550, "Not a directory"));
    }

    let previous = std::mem::replace(&mut session.cwd, resolved);
    if let Err(e) = reply_current_directory(session).await {
        session.cwd = previous;
        return Err(e);
    }
    info!("Changed directory to {}", session.sanitized_cwd());
    Ok(())
}
