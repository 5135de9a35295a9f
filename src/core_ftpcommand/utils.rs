use crate::core_error::FtpError;
use crate::core_network::data_channel::{receive_data, send_data};
use crate::core_network::stream::FtpStream;
use crate::core_transfer::ascii::{ascii_to_native, native_to_ascii};
use crate::core_transfer::{DataType, TransferCode};
use crate::session::Session;
use log::{debug, error};

/// Text of the 150 reply, e.g. `Opening BINARY mode data connection (TLS)`.
pub fn data_connection_description(data_type: DataType, encrypted: bool) -> String {
    let mut description = format!("Opening {} mode data connection", data_type.name());
    if encrypted {
        description.push_str(" (TLS)");
    }
    description
}

/// Replies 150 and establishes the data connection, encrypted when PROT P
/// is in force. Fails with 425 before the 150 if no PORT/PASV was given.
async fn open_data_connection(
    session: &mut Session,
    data_type: DataType,
) -> Result<FtpStream, FtpError> {
    session.data_channel.ensure_ready()?;

    let encrypted = session.protection.encrypt_data();
    debug!(
        "Opening data connection, protection level {}",
        session.protection.level()
    );
    let reply = format!("150 {}", data_connection_description(data_type, encrypted));
    session.reply(&reply).await?;

    let tls = if encrypted {
        let tls = session.context.tls.clone().ok_or_else(|| {
            error!("Data protection requested but TLS is not configured");
            FtpError::cant_open_data_connection()
        })?;
        Some(tls)
    } else {
        None
    };
    session.data_channel.open(tls.as_deref()).await
}

/// Sends `contents` over a fresh data connection, converting line breaks
/// when `data_type` is ASCII, then replies 226.
pub async fn transmit_file(
    session: &mut Session,
    contents: Vec<u8>,
    data_type: DataType,
) -> Result<(), FtpError> {
    let mut stream = open_data_connection(session, data_type).await?;
    let contents = match data_type {
        DataType::Ascii => native_to_ascii(&contents),
        _ => contents,
    };

    send_data(&mut stream, &contents).await.map_err(|e| {
        error!("Error sending data: {}", e);
        FtpError::transfer_aborted()
    })?;
    drop(stream);
    debug!("Sent {} bytes", contents.len());

    session.reply("226 Transfer complete").await
}

/// Reads everything the client sends over a fresh data connection,
/// converting line breaks when the session's type is ASCII.
pub async fn receive_file(session: &mut Session) -> Result<Vec<u8>, FtpError> {
    let data_type = session.transfer.data_type;
    let mut stream = open_data_connection(session, data_type).await?;

    let contents = receive_data(&mut stream).await.map_err(|e| {
        error!("Error receiving data: {}", e);
        FtpError::transfer_aborted()
    })?;
    drop(stream);

    let contents = match data_type {
        DataType::Ascii => ascii_to_native(&contents),
        _ => contents,
    };
    debug!("Received {} bytes", contents.len());
    Ok(contents)
}
