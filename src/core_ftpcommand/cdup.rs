use crate::core_error::FtpError;
use crate::core_ftpcommand::cwd::change_directory;
use crate::session::Session;

/// Handles the CDUP FTP command, a CWD to the parent. At the root of the
/// data directory this is denied like any other escape.
pub async fn handle_cdup_command(session: &mut Session, _arg: Option<&str>) -> Result<(), FtpError> {
    change_directory(session, "..").await
}
