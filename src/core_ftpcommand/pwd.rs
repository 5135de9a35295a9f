use crate::core_error::FtpError;
use crate::session::Session;

/// Handles the PWD FTP command. The root of the data directory is `/`.
pub async fn handle_pwd_command(session: &mut Session, _arg: Option<&str>) -> Result<(), FtpError> {
    reply_current_directory(session).await
}

pub async fn reply_current_directory(session: &mut Session) -> Result<(), FtpError> {
    let response = format!("250 OK. Current directory is {}", session.sanitized_cwd());
    session.reply(&response).await
}
