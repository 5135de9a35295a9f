use crate::core_error::FtpError;
use crate::core_fs::ListStyle;
use crate::core_ftpcommand::utils::transmit_file;
use crate::core_transfer::DataType;
use crate::session::Session;
use log::{error, info};
use std::io;
use std::sync::Arc;

/// Handles the LIST FTP command: long listing of a directory, a file, or a
/// glob.
pub async fn handle_list_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    send_listing(session, arg, ListStyle::Long).await
}

/// Handles the NLST FTP command: names only.
pub async fn handle_nlst_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    send_listing(session, arg, ListStyle::NamesOnly).await
}

/// Listings always go out as ASCII, whatever TYPE says.
async fn send_listing(
    session: &mut Session,
    arg: Option<&str>,
    style: ListStyle,
) -> Result<(), FtpError> {
    let (dir, remainder) = session.context.sandbox.resolve_listing(&session.cwd, arg)?;
    info!(
        "Listing {:?} {}",
        dir,
        remainder.as_deref().unwrap_or_default()
    );

    let formatter = Arc::clone(&session.context.list_formatter);
    let listing = tokio::task::spawn_blocking(move || {
        formatter.list(&dir, remainder.as_deref(), style)
    })
    .await
    .map_err(|e| FtpError::system(io::Error::new(io::ErrorKind::Other, e)))?
    .map_err(|e| {
        error!("Failed to list directory: {}", e);
        FtpError::system(e)
    })?;

    transmit_file(session, listing.into_bytes(), DataType::Ascii).await
}
