use crate::core_error::FtpError;
use crate::session::{LoginState, Session};
use log::{info, warn};

/// Handles the PASS FTP command.
///
/// Only valid straight after USER. A wrong password sends the session back
/// to the start; the client may simply try again.
pub async fn handle_pass_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    if session.state != LoginState::AwaitingPassword {
        return Err(FtpError::bad_sequence());
    }

    let username = session.username.clone().unwrap_or_default();
    let password = arg.unwrap_or_default();
    if !session.context.authenticator.authenticate(&username, password) {
        warn!("Login incorrect for user {}", username);
        session.state = LoginState::Unauthenticated;
        return Err(FtpError::reply(530, "Login incorrect"));
    }

    session.state = LoginState::LoggedIn;
    info!("User {} logged in", username);
    session.reply("230 Logged in").await
}
