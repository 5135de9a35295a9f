use crate::core_error::FtpError;
use crate::session::Session;

pub async fn handle_noop_command(session: &mut Session, _arg: Option<&str>) -> Result<(), FtpError> {
    session.reply("200 Nothing done").await
}
