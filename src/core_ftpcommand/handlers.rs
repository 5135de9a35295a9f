use crate::core_error::FtpError;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::{
    auth, cdup, cwd, dele, list, mode, noop, pass, pbsz, prot, pwd, quit, retr, stor, stru, type_,
    user,
};
use crate::core_network::{pasv, port};
use crate::session::Session;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// What the command loop does after a command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

fn command_line() -> &'static Regex {
    static COMMAND_LINE: OnceLock<Regex> = OnceLock::new();
    COMMAND_LINE.get_or_init(|| Regex::new(r"^(\w+)(?: (.*))?$").expect("static regex"))
}

/// Splits a line into its verb and optional argument.
///
/// The verb is lower-cased; the argument is everything after the first
/// space, kept verbatim.
pub fn parse_command_line(line: &str) -> Result<(String, Option<String>), FtpError> {
    let caps = command_line().captures(line).ok_or_else(FtpError::syntax)?;
    let verb = caps[1].to_ascii_lowercase();
    let arg = caps.get(2).map(|m| m.as_str().to_string());
    Ok((verb, arg))
}

/// Parses one line and runs its handler.
///
/// Unknown verbs are 500, known verbs without a handler are 502, and
/// everything but the pre-login commands needs a logged-in session.
pub async fn dispatch_command(session: &mut Session, line: &str) -> Result<CommandOutcome, FtpError> {
    let (verb, arg) = parse_command_line(line)?;
    let command = FtpCommand::from_str(&verb).ok_or_else(|| FtpError::unrecognized(line))?;
    if !command.is_implemented() {
        return Err(FtpError::not_implemented(command.as_str()));
    }
    if command.requires_login() {
        session.check_logged_in()?;
    }

    debug!("Dispatching {:?}", command);
    let arg = arg.as_deref();
    let result = run_handler(session, command, arg).await;
    if command.uses_data_channel() {
        session.data_channel.close_listener();
    }
    result
}

async fn run_handler(
    session: &mut Session,
    command: FtpCommand,
    arg: Option<&str>,
) -> Result<CommandOutcome, FtpError> {
    match command {
        FtpCommand::QUIT => return quit::handle_quit_command(session, arg).await,
        FtpCommand::USER => user::handle_user_command(session, arg).await?,
        FtpCommand::PASS => pass::handle_pass_command(session, arg).await?,
        FtpCommand::NOOP => noop::handle_noop_command(session, arg).await?,
        FtpCommand::PORT => port::handle_port_command(session, arg).await?,
        FtpCommand::PASV => pasv::handle_pasv_command(session, arg).await?,
        FtpCommand::TYPE => type_::handle_type_command(session, arg).await?,
        FtpCommand::MODE => mode::handle_mode_command(session, arg).await?,
        FtpCommand::STRU => stru::handle_stru_command(session, arg).await?,
        FtpCommand::CWD => cwd::handle_cwd_command(session, arg).await?,
        FtpCommand::CDUP => cdup::handle_cdup_command(session, arg).await?,
        FtpCommand::PWD => pwd::handle_pwd_command(session, arg).await?,
        FtpCommand::STOR => stor::handle_stor_command(session, arg).await?,
        FtpCommand::RETR => retr::handle_retr_command(session, arg).await?,
        FtpCommand::DELE => dele::handle_dele_command(session, arg).await?,
        FtpCommand::LIST => list::handle_list_command(session, arg).await?,
        FtpCommand::NLST => list::handle_nlst_command(session, arg).await?,
        FtpCommand::AUTH => auth::handle_auth_command(session, arg).await?,
        FtpCommand::PBSZ => pbsz::handle_pbsz_command(session, arg).await?,
        FtpCommand::PROT => prot::handle_prot_command(session, arg).await?,
        other => return Err(FtpError::not_implemented(other.as_str())),
    }
    Ok(CommandOutcome::Continue)
}
