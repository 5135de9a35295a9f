use crate::core_error::FtpError;
use crate::core_transfer::TransferCode;
use crate::session::Session;
use log::info;

/// Handles the TYPE FTP command: `TYPE <type> [<format>]`.
pub async fn handle_type_command(session: &mut Session, arg: Option<&str>) -> Result<(), FtpError> {
    let data_type = session.transfer.set_type(arg)?;
    info!("Transfer type set to {}", data_type.name());
    session
        .reply(&format!("200 Type set to {}", data_type.code()))
        .await
}
