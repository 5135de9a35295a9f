use crate::core_error::FtpError;
use crate::core_ftpcommand::handlers::CommandOutcome;
use crate::session::{LoginState, Session};
use log::info;

/// Handles the QUIT FTP command. The command loop ends after the reply.
pub async fn handle_quit_command(
    session: &mut Session,
    _arg: Option<&str>,
) -> Result<CommandOutcome, FtpError> {
    info!("Received QUIT command. Closing connection.");
    session.reply("221 Byebye").await?;
    session.state = LoginState::Unauthenticated;
    Ok(CommandOutcome::Quit)
}
