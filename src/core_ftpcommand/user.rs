use crate::core_error::FtpError;
use crate::session::{LoginState, Session};
use log::info;

/// Handles the USER FTP command.
///
/// Accepted in any login state: it forgets any previous login and waits
/// for PASS.
pub async fn handle_user_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let username = arg.ok_or_else(FtpError::syntax)?;
    info!("Received USER command with username: {}", username);

    session.username = Some(username.to_string());
    session.state = LoginState::AwaitingPassword;
    session.reply("331 Password required").await
}
