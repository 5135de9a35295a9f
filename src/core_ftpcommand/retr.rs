use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::transmit_file;
use crate::session::Session;
use log::{error, info};
use tokio::fs;

/// Handles the RETR (Retrieve) FTP command.
///
/// The file is located and read before the data connection is touched, so
/// a bad path never opens one.
pub async fn handle_retr_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let path = arg.ok_or_else(FtpError::syntax)?;
    let target = session.target_path(path);
    let resolved = session.ensure_in_sandbox(&target)?;

    let contents = fs::read(&resolved).await.map_err(|e| {
        error!(
            "File not found or could not be opened: {:?}, error: {}",
            resolved, e
        );
        FtpError::system(e)
    })?;

    info!("Sending file: {:?}", resolved);
    let data_type = session.transfer.data_type;
    transmit_file(session, contents, data_type).await?;
    info!("File transfer completed successfully: {:?}", resolved);
    Ok(())
}
